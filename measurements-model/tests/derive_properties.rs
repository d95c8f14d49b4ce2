//! Property-based tests for weight and density derivation.
//!
//! - Deriving a weight then the density back from it returns the original
//!   density, within the error introduced by rounding the weight
//! - Without a shape, nothing is derived

use measurements_model::{derive_density, derive_weight, volume_m3, ProductType, Shape, Template};
use measurements_uom::UomCatalog;
use proptest::prelude::*;

fn length_unit() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("meter"), Just("centimeter"), Just("millimeter"), Just("inch")]
}

fn template(
    shape: Shape,
    dims: (f64, f64, f64),
    unit: &str,
    density: f64,
) -> Template {
    let catalog = UomCatalog::standard();
    let length = catalog.get(unit).cloned();
    Template {
        shape,
        length: Some(dims.0),
        length_uom: length.clone(),
        height: Some(dims.1),
        height_uom: length.clone(),
        width: Some(dims.2),
        width_uom: length.clone(),
        diameter: Some(dims.1),
        diameter_uom: length,
        weight_uom: catalog.get("kilogram").cloned(),
        density: Some(density),
        density_weight_uom: catalog.get("kilogram").cloned(),
        density_volume_uom: catalog.get("liter").cloned(),
        ..Template::new("p", ProductType::Goods)
    }
}

proptest! {
    #[test]
    fn weight_then_density_round_trips(
        shape in prop_oneof![Just(Shape::Parallelepiped), Just(Shape::Cylinder)],
        dims in (1.0f64..500.0, 1.0f64..500.0, 1.0f64..500.0),
        unit in length_unit(),
        density in 0.1f64..20.0,
    ) {
        let mut t = template(shape, dims, unit, density);
        let weight = derive_weight(&t).unwrap();
        prop_assume!(weight > 0.0);

        t.weight = Some(weight);
        t.density = None;
        let back = derive_density(&t).unwrap();

        // |Δweight| <= 0.005 kg, spread over the volume in liters.
        let liters = volume_m3(&t).unwrap() * 1000.0;
        let tolerance = 0.005 / liters + 1e-9 * density;
        prop_assert!(
            (back - density).abs() <= tolerance,
            "density {} came back as {} (tolerance {})", density, back, tolerance
        );
    }

    #[test]
    fn no_shape_never_derives(
        dims in (0.0f64..500.0, 0.0f64..500.0, 0.0f64..500.0),
        density in 0.0f64..20.0,
    ) {
        let mut t = template(Shape::None, dims, "meter", density);
        t.weight = Some(dims.0);
        prop_assert_eq!(derive_weight(&t), None);
        prop_assert_eq!(derive_density(&t), None);
    }
}
