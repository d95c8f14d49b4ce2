use measurements_uom::{round_to_digits, Uom, UomCategory};
use proptest::prelude::*;

#[test]
fn new_uses_default_precision() {
    let uom = Uom::new("meter", "Meter", "m", UomCategory::Length, 1.0);
    assert_eq!(uom.digits, 2);
    assert_eq!(uom.rounding, 0.01);
}

#[test]
fn with_digits_updates_rounding() {
    let uom = Uom::new("gram", "Gram", "g", UomCategory::Weight, 0.001).with_digits(3);
    assert_eq!(uom.digits, 3);
    assert!((uom.rounding - 0.001).abs() < 1e-15);
}

#[test]
fn huge_digits_give_zero_rounding() {
    let uom = Uom::new("gram", "Gram", "g", UomCategory::Weight, 0.001).with_digits(u32::MAX);
    assert_eq!(uom.digits, u32::MAX);
    assert_eq!(uom.rounding, 0.0);
}

#[test]
fn display_is_name() {
    let uom = Uom::new("liter", "Liter", "l", UomCategory::Volume, 1.0);
    assert_eq!(uom.to_string(), "Liter");
}

#[test]
fn category_serializes_lowercase() {
    let json = serde_json::to_string(&UomCategory::Volume).unwrap();
    assert_eq!(json, "\"volume\"");
    let back: UomCategory = serde_json::from_str("\"length\"").unwrap();
    assert_eq!(back, UomCategory::Length);
}

#[test]
fn category_reference_ids() {
    assert_eq!(UomCategory::Length.reference_id(), "meter");
    assert_eq!(UomCategory::Weight.reference_id(), "kilogram");
    assert_eq!(UomCategory::Volume.reference_id(), "liter");
}

proptest! {
    #[test]
    fn reference_conversion_is_invertible(value in -1e6f64..1e6, factor in 1e-4f64..1e4) {
        let uom = Uom::new("x", "X", "x", UomCategory::Length, factor);
        let back = uom.from_reference(uom.to_reference(value));
        prop_assert!((back - value).abs() <= 1e-9 * value.abs().max(1.0));
    }

    #[test]
    fn rounding_error_is_bounded(value in -1e6f64..1e6, digits in 0u32..6) {
        let rounded = round_to_digits(value, digits);
        let bound = 0.5 * 10f64.powi(-(digits as i32)) + 1e-9;
        prop_assert!((rounded - value).abs() <= bound);
    }
}
