use measurements_model::{
    density_digits, derive_density, derive_weight, diameter_digits, volume_m3, weight_digits,
    ProductType, Shape, Template,
};
use measurements_uom::{Uom, UomCatalog, UomCategory};
use pretty_assertions::assert_eq;
use std::f64::consts::PI;

fn unit(id: &str) -> Option<Uom> {
    UomCatalog::standard().get(id).cloned()
}

fn steel_bar() -> Template {
    Template {
        shape: Shape::Parallelepiped,
        length: Some(2.0),
        length_uom: unit("meter"),
        height: Some(10.0),
        height_uom: unit("centimeter"),
        width: Some(50.0),
        width_uom: unit("millimeter"),
        weight_uom: unit("kilogram"),
        density: Some(7.85),
        density_weight_uom: unit("kilogram"),
        density_volume_uom: unit("liter"),
        ..Template::new("Steel bar", ProductType::Goods)
    }
}

fn rod() -> Template {
    Template {
        shape: Shape::Cylinder,
        length: Some(2.0),
        length_uom: unit("meter"),
        diameter: Some(2.0),
        diameter_uom: unit("meter"),
        weight_uom: unit("kilogram"),
        density: Some(1.0),
        density_weight_uom: unit("kilogram"),
        density_volume_uom: unit("liter"),
        ..Template::new("Rod", ProductType::Goods)
    }
}

// ── Weight ───────────────────────────────────────────────────────

#[test]
fn parallelepiped_weight_uses_unit_factors() {
    // 2 m x 0.1 m x 0.05 m = 0.01 m³, at 7.85 kg/L
    assert_eq!(derive_weight(&steel_bar()), Some(78.5));
}

#[test]
fn cylinder_weight() {
    let expected = (2.0 * PI * 1000.0 * 100.0).round() / 100.0;
    assert_eq!(derive_weight(&rod()), Some(expected));
}

#[test]
fn weight_in_grams_is_converted() {
    let mut bar = steel_bar();
    bar.weight_uom = unit("gram");
    assert_eq!(derive_weight(&bar), Some(78_500.0));
}

#[test]
fn weight_is_rounded_to_weight_digits() {
    let mut bar = steel_bar();
    bar.density = Some(1.23456);
    // 0.01 m³ x 1.23456 kg/L = 12.3456 kg
    assert_eq!(derive_weight(&bar), Some(12.35));
    bar.weight_uom = bar.weight_uom.map(|u| u.with_digits(3));
    assert_eq!(derive_weight(&bar), Some(12.346));
}

#[test]
fn density_per_cubic_meter() {
    let mut bar = steel_bar();
    bar.density = Some(7850.0);
    bar.density_volume_uom = unit("cubic_meter");
    assert_eq!(derive_weight(&bar), Some(78.5));
}

#[test]
fn cylinder_ignores_height_and_width() {
    let mut cylinder = rod();
    let before = derive_weight(&cylinder);
    cylinder.height = Some(99.0);
    cylinder.height_uom = unit("meter");
    cylinder.width = None;
    assert_eq!(derive_weight(&cylinder), before);
}

#[test]
fn parallelepiped_ignores_diameter() {
    let mut bar = steel_bar();
    let before = derive_weight(&bar);
    bar.diameter = Some(3.0);
    bar.diameter_uom = None;
    assert_eq!(derive_weight(&bar), before);
}

// ── Missing inputs ───────────────────────────────────────────────

#[test]
fn weight_requires_every_input() {
    let strip: [fn(&mut Template); 8] = [
        |t| t.density = None,
        |t| t.density = Some(0.0),
        |t| t.density_weight_uom = None,
        |t| t.density_volume_uom = None,
        |t| t.weight_uom = None,
        |t| t.length = None,
        |t| t.length_uom = None,
        |t| t.height = Some(0.0),
    ];
    for (i, f) in strip.iter().enumerate() {
        let mut bar = steel_bar();
        f(&mut bar);
        assert_eq!(derive_weight(&bar), None, "case {i}");
    }

    let mut cylinder = rod();
    cylinder.diameter_uom = None;
    assert_eq!(derive_weight(&cylinder), None);
}

#[test]
fn density_requires_every_input() {
    let mut bar = steel_bar();
    bar.weight = Some(78.5);
    assert!(derive_density(&bar).is_some());

    let strip: [fn(&mut Template); 7] = [
        |t| t.weight = None,
        |t| t.weight = Some(0.0),
        |t| t.weight_uom = None,
        |t| t.density_weight_uom = None,
        |t| t.density_volume_uom = None,
        |t| t.width = None,
        |t| t.width_uom = None,
    ];
    for (i, f) in strip.iter().enumerate() {
        let mut t = bar.clone();
        f(&mut t);
        assert_eq!(derive_density(&t), None, "case {i}");
    }
}

#[test]
fn no_shape_derives_nothing() {
    let mut bar = steel_bar();
    bar.shape = Shape::None;
    bar.weight = Some(10.0);
    assert_eq!(derive_weight(&bar), None);
    assert_eq!(derive_density(&bar), None);
    assert_eq!(volume_m3(&bar), None);
}

// ── Density ──────────────────────────────────────────────────────

#[test]
fn density_is_not_rounded() {
    let mut bar = steel_bar();
    bar.density = None;
    bar.weight = Some(1.0);
    // 1 kg over 10 L
    let density = derive_density(&bar).unwrap();
    assert!((density - 0.1).abs() < 1e-12);

    bar.weight = Some(1.0 / 3.0);
    let density = derive_density(&bar).unwrap();
    assert!((density - 1.0 / 30.0).abs() < 1e-12);
    assert_ne!(density, (density * 10_000.0).round() / 10_000.0);
}

#[test]
fn cylinder_density() {
    let mut cylinder = rod();
    cylinder.density = None;
    cylinder.weight = Some(2.0 * PI * 1000.0);
    let density = derive_density(&cylinder).unwrap();
    assert!((density - 1.0).abs() < 1e-9);
}

// ── Digits ───────────────────────────────────────────────────────

#[test]
fn digits_defaults() {
    let t = Template::new("Plain", ProductType::Goods);
    assert_eq!(weight_digits(&t), 2);
    assert_eq!(diameter_digits(&t), 2);
    assert_eq!(density_digits(&t), 4);
}

#[test]
fn density_digits_sum_both_units() {
    let t = Template {
        density_weight_uom: Some(Uom::new("kg2", "Kg", "kg", UomCategory::Weight, 1.0)),
        density_volume_uom: Some(
            Uom::new("l3", "Liter", "l", UomCategory::Volume, 1.0).with_digits(3),
        ),
        ..Template::default()
    };
    assert_eq!(density_digits(&t), 5);

    let half = Template {
        density_volume_uom: None,
        ..t
    };
    assert_eq!(density_digits(&half), 4);
}

#[test]
fn diameter_digits_follow_unit() {
    let t = Template {
        diameter_uom: unit("millimeter").map(|u| u.with_digits(1)),
        ..Template::default()
    };
    assert_eq!(diameter_digits(&t), 1);
}
