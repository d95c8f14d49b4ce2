//! Derived template fields and the host hooks that maintain them.

use crate::error::{PluginError, Result};
use crate::handler::TemplateHandler;
use measurements_formula::Formula;
use measurements_model::{
    density_digits, derive_density, derive_weight, diameter_digits, display_name,
    measurement_context, weight_digits, CodeFailurePolicy, Configuration, Entity,
    MeasurementField, ProductType, Template, TemplateRecord, PRODUCT_TEMPLATE,
};
use measurements_uom::UomCatalog;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// Entity key holding the display name with the measurement code.
pub const REC_NAME: &str = "rec_name";

/// A field computed from a template's measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedField {
    Weight,
    Density,
    WeightDigits,
    DiameterDigits,
    DensityDigits,
    MeasurementCode,
}

impl DerivedField {
    pub const ALL: [DerivedField; 6] = [
        DerivedField::Weight,
        DerivedField::Density,
        DerivedField::WeightDigits,
        DerivedField::DiameterDigits,
        DerivedField::DensityDigits,
        DerivedField::MeasurementCode,
    ];

    /// Entity key the field is stored under.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Density => "density",
            Self::WeightDigits => "weight_digits",
            Self::DiameterDigits => "diameter_digits",
            Self::DensityDigits => "density_digits",
            Self::MeasurementCode => "measurement_code",
        }
    }

    /// Returns whether a change to `field` requires recomputing this one.
    #[must_use]
    pub fn depends_on(&self, field: MeasurementField) -> bool {
        use MeasurementField as F;
        match self {
            Self::Weight | Self::Density => field != F::Type,
            Self::WeightDigits => field == F::WeightUom,
            Self::DiameterDigits => field == F::DiameterUom,
            Self::DensityDigits => matches!(field, F::DensityWeightUom | F::DensityVolumeUom),
            Self::MeasurementCode => true,
        }
    }
}

/// Every value the plugin computes for a template.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFields {
    pub weight: Option<f64>,
    pub density: Option<f64>,
    pub weight_digits: u32,
    pub diameter_digits: u32,
    pub density_digits: u32,
    pub measurement_code: Option<String>,
    /// Template name with the measurement code appended.
    pub rec_name: String,
}

impl DerivedFields {
    /// JSON value of one field, as written into the entity.
    #[must_use]
    pub fn value(&self, field: DerivedField) -> Value {
        match field {
            DerivedField::Weight => json!(self.weight),
            DerivedField::Density => json!(self.density),
            DerivedField::WeightDigits => json!(self.weight_digits),
            DerivedField::DiameterDigits => json!(self.diameter_digits),
            DerivedField::DensityDigits => json!(self.density_digits),
            DerivedField::MeasurementCode => json!(self.measurement_code),
        }
    }

    fn write(&self, entity: &mut Entity, fields: impl IntoIterator<Item = DerivedField>) {
        for field in fields {
            entity.set_field(field.key(), self.value(field));
        }
        entity.set_field(REC_NAME, json!(self.rec_name));
    }
}

/// Computes weight, density, display precisions and the measurement code
/// for product templates.
///
/// The formula is checked and compiled once when the plugin is built.
#[derive(Debug)]
pub struct MeasurementsPlugin {
    catalog: UomCatalog,
    config: Configuration,
    formula: Option<Formula>,
}

impl MeasurementsPlugin {
    /// Validates `config` against `catalog` and compiles its formula.
    pub fn new(catalog: UomCatalog, config: Configuration) -> Result<Self> {
        config.validate(&catalog)?;
        let formula = config.formula().map(Formula::compile).transpose()?;
        info!(
            units = catalog.len(),
            has_formula = formula.is_some(),
            policy = ?config.code_failure_policy,
            "measurements plugin ready"
        );
        Ok(Self {
            catalog,
            config,
            formula,
        })
    }

    pub fn catalog(&self) -> &UomCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// A new template carrying the configured defaults.
    pub fn new_template(&self, name: impl Into<String>, product_type: ProductType) -> Template {
        self.config.new_template(name, product_type)
    }

    /// Evaluates the measurement code, applying the configured failure
    /// policy. `None` when no formula is configured or the fallback applies.
    pub fn measurement_code(&self, template: &Template) -> Result<Option<String>> {
        let Some(formula) = &self.formula else {
            return Ok(None);
        };
        match formula.evaluate_code(&measurement_context(template)) {
            Ok(code) => Ok(Some(code)),
            Err(error) => match self.config.code_failure_policy {
                CodeFailurePolicy::Fallback => {
                    warn!(
                        template = %template.name,
                        formula = formula.source(),
                        %error,
                        "measurement code formula failed, showing no code"
                    );
                    Ok(None)
                }
                CodeFailurePolicy::Propagate => Err(PluginError::Evaluation(error)),
            },
        }
    }

    /// Template name with its measurement code, e.g. `"Pipe [6m x 40mm∅]"`.
    pub fn rec_name(&self, template: &Template) -> Result<String> {
        let code = self.measurement_code(template)?;
        Ok(display_name(&template.name, code.as_deref()))
    }

    /// Computes every derived field. Weight and density keep the template's
    /// stored value when they cannot be derived.
    pub fn derive(&self, template: &Template) -> Result<DerivedFields> {
        let measurement_code = self.measurement_code(template)?;
        Ok(DerivedFields {
            weight: derive_weight(template).or(template.weight),
            density: derive_density(template).or(template.density),
            weight_digits: weight_digits(template),
            diameter_digits: diameter_digits(template),
            density_digits: density_digits(template),
            rec_name: display_name(&template.name, measurement_code.as_deref()),
            measurement_code,
        })
    }

    /// Recomputes the fields depending on `field`; the others echo the
    /// template's values.
    pub fn on_change(&self, template: &Template, field: MeasurementField) -> Result<DerivedFields> {
        let mut derived = self.derive(template)?;
        if !DerivedField::Weight.depends_on(field) {
            derived.weight = template.weight;
        }
        if !DerivedField::Density.depends_on(field) {
            derived.density = template.density;
        }
        debug!(
            template = %template.name,
            field = field.name(),
            weight = ?derived.weight,
            density = ?derived.density,
            "recomputed derived fields"
        );
        Ok(derived)
    }

    /// Reads a template out of a host entity.
    pub fn load_template(&self, entity: &Entity) -> Result<Template> {
        if !entity.is_template() {
            return Err(PluginError::EntityType {
                expected: PRODUCT_TEMPLATE,
                actual: entity.entity_type.clone(),
            });
        }
        let record = TemplateRecord::from_value(&entity.data)?;
        Ok(record.resolve(&self.catalog)?)
    }
}

impl TemplateHandler for MeasurementsPlugin {
    fn validate(&self, entity: &Entity) -> std::result::Result<(), String> {
        let template = self.load_template(entity).map_err(|e| e.to_string())?;
        template.check_units().map_err(|e| e.to_string())
    }

    fn on_after_load(&self, entity: &mut Entity) -> std::result::Result<(), String> {
        let template = self.load_template(entity).map_err(|e| e.to_string())?;
        let derived = self.derive(&template).map_err(|e| e.to_string())?;
        derived.write(entity, DerivedField::ALL);
        Ok(())
    }

    fn on_field_change(&self, entity: &mut Entity, field: &str) -> std::result::Result<(), String> {
        let Some(field) = MeasurementField::from_name(field) else {
            debug!(field, "not a measurement field, nothing to recompute");
            return Ok(());
        };
        let template = self.load_template(entity).map_err(|e| e.to_string())?;
        let derived = self.on_change(&template, field).map_err(|e| e.to_string())?;
        derived.write(
            entity,
            DerivedField::ALL.into_iter().filter(|d| d.depends_on(field)),
        );
        Ok(())
    }
}
