use crate::template::{MeasurementField, Template};
use measurements_formula::Context;

/// Builds the formula context for a template.
///
/// Zero and missing values are passed through as they are; formulas decide
/// how to render them.
#[must_use]
pub fn measurement_context(template: &Template) -> Context {
    use MeasurementField as F;
    Context::new()
        .with(F::Type, template.product_type.as_str())
        .with(F::Shape, template.shape.as_str())
        .with(F::Length, template.length)
        .with(F::LengthUom, template.length_uom.clone())
        .with(F::Height, template.height)
        .with(F::HeightUom, template.height_uom.clone())
        .with(F::Width, template.width)
        .with(F::WidthUom, template.width_uom.clone())
        .with(F::Diameter, template.diameter)
        .with(F::DiameterUom, template.diameter_uom.clone())
        .with(F::Weight, template.weight)
        .with(F::WeightUom, template.weight_uom.clone())
        .with(F::Density, template.density)
        .with(F::DensityWeightUom, template.density_weight_uom.clone())
        .with(F::DensityVolumeUom, template.density_volume_uom.clone())
}
