use crate::template::PRODUCT_TEMPLATE;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A product template as the host stores it.
///
/// `data` is the flat JSON object read by
/// [`TemplateRecord::from_value`](crate::TemplateRecord::from_value): the
/// template's name, type, shape, measurements and unit ids, plus the derived
/// fields written back by the measurements plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub entity_type: String,
    pub data: Value,
    pub created_at: i64,
    pub modified_at: i64,
    pub created_by: String,
}

impl Entity {
    /// Whether this entity holds a product template payload.
    #[must_use]
    pub fn is_template(&self) -> bool {
        self.entity_type == PRODUCT_TEMPLATE
    }

    /// A text field of the template, such as `name` or `measurement_code`.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.data.get(key)?.as_str()
    }

    /// A numeric field of the template, such as `length` or `weight_digits`.
    /// `null` and non-numeric values read as `None`.
    #[must_use]
    pub fn measure(&self, key: &str) -> Option<f64> {
        self.data.get(key)?.as_f64()
    }

    /// Writes a derived field back into the payload. A payload that is not
    /// an object is replaced by one holding only this field.
    pub fn set_field(&mut self, key: &str, value: Value) {
        if !self.data.is_object() {
            self.data = Value::Object(Map::new());
        }
        if let Value::Object(fields) = &mut self.data {
            fields.insert(key.to_string(), value);
        }
    }
}
