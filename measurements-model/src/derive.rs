//! Weight and density derivation from a template's geometry.
//!
//! Lengths are normalized to meters, weights to kilograms and volumes to
//! liters through the unit factors. Densities are expressed per liter, so a
//! volume in cubic meters is scaled by [`LITERS_PER_CUBIC_METER`].
//!
//! A missing value, a missing unit or a zero value leaves the result
//! undetermined (`None`); none of these are errors.

use crate::template::{Shape, Template};
use measurements_uom::{round_to_digits, Uom};
use std::f64::consts::PI;
use tracing::debug;

/// Converts kg/L to kg/m³.
pub const LITERS_PER_CUBIC_METER: f64 = 1000.0;

/// Precision used when a unit is not set.
pub const DEFAULT_DIGITS: u32 = 2;

/// Precision used for density when either density unit is not set.
pub const DEFAULT_DENSITY_DIGITS: u32 = 4;

/// Display precision of the weight.
#[must_use]
pub fn weight_digits(template: &Template) -> u32 {
    template
        .weight_uom
        .as_ref()
        .map_or(DEFAULT_DIGITS, |uom| uom.digits)
}

/// Display precision of the diameter.
#[must_use]
pub fn diameter_digits(template: &Template) -> u32 {
    template
        .diameter_uom
        .as_ref()
        .map_or(DEFAULT_DIGITS, |uom| uom.digits)
}

/// Display precision of the density: the sum of both density units' digits.
#[must_use]
pub fn density_digits(template: &Template) -> u32 {
    match (&template.density_weight_uom, &template.density_volume_uom) {
        (Some(weight), Some(volume)) => weight.digits + volume.digits,
        _ => DEFAULT_DENSITY_DIGITS,
    }
}

/// A present, non-zero value converted to its reference unit.
fn measured(value: Option<f64>, uom: &Option<Uom>) -> Option<f64> {
    match (value, uom) {
        (Some(v), Some(uom)) if v != 0.0 => Some(uom.to_reference(v)),
        _ => None,
    }
}

/// Volume in cubic meters, if the shape's dimensions are all known.
#[must_use]
pub fn volume_m3(template: &Template) -> Option<f64> {
    let length = measured(template.length, &template.length_uom)?;
    match template.shape {
        Shape::Parallelepiped => {
            let height = measured(template.height, &template.height_uom)?;
            let width = measured(template.width, &template.width_uom)?;
            Some(length * height * width)
        }
        Shape::Cylinder => {
            let radius = measured(template.diameter, &template.diameter_uom)? / 2.0;
            Some(PI * radius * radius * length)
        }
        Shape::None => None,
    }
}

/// Weight in the template's weight unit, rounded to [`weight_digits`].
#[must_use]
pub fn derive_weight(template: &Template) -> Option<f64> {
    let density = template.density.filter(|d| *d != 0.0)?;
    let density_weight = template.density_weight_uom.as_ref()?;
    let density_volume = template.density_volume_uom.as_ref()?;
    let weight_uom = template.weight_uom.as_ref()?;
    let volume = volume_m3(template)?;

    let kilograms =
        volume * density * density_weight.factor * LITERS_PER_CUBIC_METER / density_volume.factor;
    let weight = round_to_digits(weight_uom.from_reference(kilograms), weight_digits(template));
    debug!(shape = %template.shape, volume, weight, uom = %weight_uom.id, "derived weight");
    Some(weight)
}

/// Density in the template's density units. The result is not rounded.
#[must_use]
pub fn derive_density(template: &Template) -> Option<f64> {
    let weight = measured(template.weight, &template.weight_uom)?;
    let density_weight = template.density_weight_uom.as_ref()?;
    let density_volume = template.density_volume_uom.as_ref()?;
    let volume = volume_m3(template)?;

    let density = weight * density_volume.factor
        / (volume * density_weight.factor * LITERS_PER_CUBIC_METER);
    debug!(shape = %template.shape, volume, density, "derived density");
    Some(density)
}
