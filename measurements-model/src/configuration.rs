//! Measurement defaults and the measurement code formula.

use crate::context::measurement_context;
use crate::error::ConfigError;
use crate::template::{ProductType, Shape, Template};
use measurements_formula::{EvaluationError, Formula, DEFAULT_FORMULA};
use measurements_uom::{Uom, UomCatalog, UomCategory};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What to do when the measurement code formula fails while a template is
/// being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeFailurePolicy {
    /// Log a warning and show no code.
    #[default]
    Fallback,
    /// Return the evaluation error to the caller.
    Propagate,
}

/// Measurement settings shared by all product templates.
///
/// There is one configuration per host; it is passed explicitly wherever it
/// is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Shape given to new templates. Unset means [`Shape::None`].
    pub shape: Option<Shape>,
    pub length_uom: Option<Uom>,
    pub height_uom: Option<Uom>,
    pub width_uom: Option<Uom>,
    pub diameter_uom: Option<Uom>,
    pub weight_uom: Option<Uom>,
    pub density_weight_uom: Option<Uom>,
    pub density_volume_uom: Option<Uom>,
    /// Expression computing the measurement code. Empty or unset disables
    /// the code; both are stored as an empty string.
    pub measurement_code_formula: Option<String>,
    pub code_failure_policy: CodeFailurePolicy,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            shape: None,
            length_uom: None,
            height_uom: None,
            width_uom: None,
            diameter_uom: None,
            weight_uom: None,
            density_weight_uom: None,
            density_volume_uom: None,
            measurement_code_formula: Some(DEFAULT_FORMULA.to_string()),
            code_failure_policy: CodeFailurePolicy::default(),
        }
    }
}

impl Configuration {
    /// The formula source, if a code should be computed at all.
    #[must_use]
    pub fn formula(&self) -> Option<&str> {
        self.measurement_code_formula
            .as_deref()
            .filter(|f| !f.trim().is_empty())
    }

    /// Builds a new template carrying the configured defaults.
    pub fn new_template(&self, name: impl Into<String>, product_type: ProductType) -> Template {
        Template {
            shape: self.shape.unwrap_or_default(),
            length_uom: self.length_uom.clone(),
            height_uom: self.height_uom.clone(),
            width_uom: self.width_uom.clone(),
            diameter_uom: self.diameter_uom.clone(),
            weight_uom: self.weight_uom.clone(),
            density_weight_uom: self.density_weight_uom.clone(),
            density_volume_uom: self.density_volume_uom.clone(),
            ..Template::new(name, product_type)
        }
    }

    /// Compiles the formula and evaluates it against a zero-valued
    /// parallelepiped and cylinder, requiring a string both times.
    ///
    /// Passing this check does not guarantee the formula succeeds on every
    /// template.
    pub fn check_formula(&self, catalog: &UomCatalog) -> Result<(), ConfigError> {
        let Some(source) = self.formula() else {
            return Ok(());
        };
        let invalid = |error: EvaluationError| ConfigError::InvalidFormula {
            formula: source.to_string(),
            error,
        };
        let formula = Formula::compile(source).map_err(invalid)?;
        for template in canned_templates(catalog)? {
            formula
                .evaluate_code(&measurement_context(&template))
                .map_err(invalid)?;
        }
        debug!(formula = source, "measurement code formula accepted");
        Ok(())
    }

    /// Save-time validation.
    pub fn validate(&self, catalog: &UomCatalog) -> Result<(), ConfigError> {
        self.check_formula(catalog)
    }

    /// Converts to the serialized form.
    #[must_use]
    pub fn to_record(&self) -> ConfigurationRecord {
        let id = |uom: &Option<Uom>| uom.as_ref().map(|u| u.id.clone());
        ConfigurationRecord {
            shape: self.shape,
            length_uom: id(&self.length_uom),
            height_uom: id(&self.height_uom),
            width_uom: id(&self.width_uom),
            diameter_uom: id(&self.diameter_uom),
            weight_uom: id(&self.weight_uom),
            density_weight_uom: id(&self.density_weight_uom),
            density_volume_uom: id(&self.density_volume_uom),
            measurement_code_formula: Some(self.formula().unwrap_or_default().to_string()),
            code_failure_policy: self.code_failure_policy,
        }
    }
}

/// The two zero-valued templates a formula must accept.
fn canned_templates(catalog: &UomCatalog) -> Result<[Template; 2], ConfigError> {
    let meter = catalog.resolve(UomCategory::Length.reference_id(), UomCategory::Length)?;
    let kilogram = catalog.resolve(UomCategory::Weight.reference_id(), UomCategory::Weight)?;
    let liter = catalog.resolve(UomCategory::Volume.reference_id(), UomCategory::Volume)?;

    let parallelepiped = Template {
        product_type: ProductType::Goods,
        shape: Shape::Parallelepiped,
        length: Some(0.0),
        length_uom: Some(meter.clone()),
        height: Some(0.0),
        height_uom: Some(meter.clone()),
        width: Some(0.0),
        width_uom: Some(meter.clone()),
        diameter: Some(0.0),
        diameter_uom: Some(meter),
        weight: Some(0.0),
        weight_uom: Some(kilogram.clone()),
        density: Some(0.0),
        density_weight_uom: Some(kilogram),
        density_volume_uom: Some(liter),
        ..Template::default()
    };
    let cylinder = Template {
        shape: Shape::Cylinder,
        ..parallelepiped.clone()
    };
    Ok([parallelepiped, cylinder])
}

/// Serialized configuration with units referenced by catalog id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter_uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_weight_uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_volume_uom: Option<String>,
    /// Missing means the default formula; an empty string means no code.
    pub measurement_code_formula: Option<String>,
    pub code_failure_policy: CodeFailurePolicy,
}

impl Default for ConfigurationRecord {
    fn default() -> Self {
        Configuration::default().to_record()
    }
}

impl ConfigurationRecord {
    /// Resolves unit ids against `catalog`, checking each unit's category.
    pub fn resolve(&self, catalog: &UomCatalog) -> Result<Configuration, ConfigError> {
        let length = |id: &Option<String>| catalog.resolve_opt(id.as_deref(), UomCategory::Length);
        Ok(Configuration {
            shape: self.shape,
            length_uom: length(&self.length_uom)?,
            height_uom: length(&self.height_uom)?,
            width_uom: length(&self.width_uom)?,
            diameter_uom: length(&self.diameter_uom)?,
            weight_uom: catalog.resolve_opt(self.weight_uom.as_deref(), UomCategory::Weight)?,
            density_weight_uom: catalog
                .resolve_opt(self.density_weight_uom.as_deref(), UomCategory::Weight)?,
            density_volume_uom: catalog
                .resolve_opt(self.density_volume_uom.as_deref(), UomCategory::Volume)?,
            measurement_code_formula: self
                .measurement_code_formula
                .clone()
                .filter(|f| !f.trim().is_empty()),
            code_failure_policy: self.code_failure_policy,
        })
    }
}
