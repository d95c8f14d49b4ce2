//! Product templates as seen by the measurement engine.

use crate::error::{ModelError, ModelResult};
use measurements_formula::Variable;
use measurements_uom::{Uom, UomCatalog, UomCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity type of product templates in the host store.
pub const PRODUCT_TEMPLATE: &str = "product.template";

/// A measurement input of a template.
///
/// These are exactly the variables a measurement code formula can read.
pub type MeasurementField = Variable;

/// Product classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Goods,
    Assets,
    Service,
}

impl ProductType {
    /// Types for which no measurement is meaningful.
    pub const NON_MEASURABLE: [ProductType; 1] = [ProductType::Service];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goods => "goods",
            Self::Assets => "assets",
            Self::Service => "service",
        }
    }

    #[must_use]
    pub fn is_measurable(&self) -> bool {
        !Self::NON_MEASURABLE.contains(self)
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    None,
    Parallelepiped,
    Cylinder,
}

impl Shape {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Parallelepiped => "parallelepiped",
            Self::Cylinder => "cylinder",
        }
    }

    /// The dimension fields that determine this shape's volume.
    #[must_use]
    pub fn dimensions(&self) -> &'static [MeasurementField] {
        match self {
            Self::None => &[],
            Self::Parallelepiped => &[
                MeasurementField::Length,
                MeasurementField::Height,
                MeasurementField::Width,
            ],
            Self::Cylinder => &[MeasurementField::Length, MeasurementField::Diameter],
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A snapshot of a product template's measurement fields with resolved units.
///
/// A value without its unit, or a zero value, is treated as absent by the
/// derivation engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    pub name: String,
    pub product_type: ProductType,
    pub shape: Shape,
    pub length: Option<f64>,
    pub length_uom: Option<Uom>,
    pub height: Option<f64>,
    pub height_uom: Option<Uom>,
    pub width: Option<f64>,
    pub width_uom: Option<Uom>,
    pub diameter: Option<f64>,
    pub diameter_uom: Option<Uom>,
    pub weight: Option<f64>,
    pub weight_uom: Option<Uom>,
    pub density: Option<f64>,
    pub density_weight_uom: Option<Uom>,
    pub density_volume_uom: Option<Uom>,
}

impl Template {
    /// Creates a template with no shape and no measurements.
    pub fn new(name: impl Into<String>, product_type: ProductType) -> Self {
        Self {
            name: name.into(),
            product_type,
            ..Self::default()
        }
    }

    /// Returns whether `field` is meaningful for this template's type and
    /// shape.
    #[must_use]
    pub fn is_field_applicable(&self, field: MeasurementField) -> bool {
        use MeasurementField as F;
        if field == F::Type {
            return true;
        }
        if !self.product_type.is_measurable() {
            return false;
        }
        match field {
            F::Diameter | F::DiameterUom => self.shape == Shape::Cylinder,
            F::Height | F::HeightUom | F::Width | F::WidthUom => self.shape != Shape::Cylinder,
            _ => true,
        }
    }

    /// Checks that every non-zero value carries its unit.
    pub fn check_units(&self) -> ModelResult<()> {
        let pairs: [(&'static str, Option<f64>, bool); 5] = [
            ("length", self.length, self.length_uom.is_some()),
            ("height", self.height, self.height_uom.is_some()),
            ("width", self.width, self.width_uom.is_some()),
            ("diameter", self.diameter, self.diameter_uom.is_some()),
            ("weight", self.weight, self.weight_uom.is_some()),
        ];
        for (field, value, has_uom) in pairs {
            if is_set(value) && !has_uom {
                return Err(ModelError::MissingUom { field });
            }
        }
        if is_set(self.density) {
            if self.density_weight_uom.is_none() {
                return Err(ModelError::MissingUom {
                    field: "density_weight_uom",
                });
            }
            if self.density_volume_uom.is_none() {
                return Err(ModelError::MissingUom {
                    field: "density_volume_uom",
                });
            }
        }
        Ok(())
    }

    /// Converts back to the host representation.
    #[must_use]
    pub fn to_record(&self) -> TemplateRecord {
        let id = |uom: &Option<Uom>| uom.as_ref().map(|u| u.id.clone());
        TemplateRecord {
            name: self.name.clone(),
            product_type: self.product_type,
            shape: self.shape,
            length: self.length,
            length_uom: id(&self.length_uom),
            height: self.height,
            height_uom: id(&self.height_uom),
            width: self.width,
            width_uom: id(&self.width_uom),
            diameter: self.diameter,
            diameter_uom: id(&self.diameter_uom),
            weight: self.weight,
            weight_uom: id(&self.weight_uom),
            density: self.density,
            density_weight_uom: id(&self.density_weight_uom),
            density_volume_uom: id(&self.density_volume_uom),
        }
    }
}

fn is_set(value: Option<f64>) -> bool {
    value.is_some_and(|v| v != 0.0)
}

/// Host (JSON) form of a template, with units referenced by catalog id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub shape: Shape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter_uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_weight_uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_volume_uom: Option<String>,
}

impl TemplateRecord {
    /// Reads a record from an entity's JSON payload. Unknown keys are ignored.
    pub fn from_value(data: &serde_json::Value) -> ModelResult<Self> {
        Ok(Self::deserialize(data)?)
    }

    /// Resolves unit ids against `catalog`, checking each unit's category.
    pub fn resolve(&self, catalog: &UomCatalog) -> ModelResult<Template> {
        let length = |id: &Option<String>| catalog.resolve_opt(id.as_deref(), UomCategory::Length);
        Ok(Template {
            name: self.name.clone(),
            product_type: self.product_type,
            shape: self.shape,
            length: self.length,
            length_uom: length(&self.length_uom)?,
            height: self.height,
            height_uom: length(&self.height_uom)?,
            width: self.width,
            width_uom: length(&self.width_uom)?,
            diameter: self.diameter,
            diameter_uom: length(&self.diameter_uom)?,
            weight: self.weight,
            weight_uom: catalog.resolve_opt(self.weight_uom.as_deref(), UomCategory::Weight)?,
            density: self.density,
            density_weight_uom: catalog
                .resolve_opt(self.density_weight_uom.as_deref(), UomCategory::Weight)?,
            density_volume_uom: catalog
                .resolve_opt(self.density_volume_uom.as_deref(), UomCategory::Volume)?,
        })
    }
}

/// Appends a non-empty measurement code to a display name as `"name [code]"`.
#[must_use]
pub fn display_name(base: &str, code: Option<&str>) -> String {
    match code {
        Some(code) if !code.is_empty() => format!("{base} [{code}]"),
        _ => base.to_string(),
    }
}
