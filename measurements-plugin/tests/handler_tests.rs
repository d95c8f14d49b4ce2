use measurements_model::{Configuration, Entity, PRODUCT_TEMPLATE};
use measurements_plugin::{MeasurementsPlugin, TemplateHandler, REC_NAME};
use measurements_uom::UomCatalog;
use serde_json::json;

fn make_entity(entity_type: &str, data: serde_json::Value) -> Entity {
    Entity {
        id: "tmpl-1".to_string(),
        entity_type: entity_type.to_string(),
        data,
        created_at: 1000,
        modified_at: 2000,
        created_by: "peer-1".to_string(),
    }
}

fn plugin() -> MeasurementsPlugin {
    MeasurementsPlugin::new(UomCatalog::standard(), Configuration::default()).unwrap()
}

fn pipe() -> Entity {
    make_entity(
        PRODUCT_TEMPLATE,
        json!({
            "name": "Pipe",
            "type": "goods",
            "shape": "cylinder",
            "length": 6.0,
            "length_uom": "meter",
            "diameter": 40.0,
            "diameter_uom": "millimeter",
            "weight": 7.5,
            "weight_uom": "kilogram",
            "density_weight_uom": "kilogram",
            "density_volume_uom": "liter"
        }),
    )
}

// ── Default implementations ──────────────────────────────────────

struct NoOpHandler;
impl TemplateHandler for NoOpHandler {}

#[test]
fn default_hooks_are_noops() {
    let handler = NoOpHandler;
    let mut entity = make_entity("note", json!({"title": "before"}));
    assert!(handler.validate(&entity).is_ok());
    assert!(handler.on_after_load(&mut entity).is_ok());
    assert!(handler.on_field_change(&mut entity, "title").is_ok());
    assert_eq!(entity.data, json!({"title": "before"}));
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn validate_accepts_complete_template() {
    assert!(plugin().validate(&pipe()).is_ok());
}

#[test]
fn validate_rejects_other_entity_types() {
    let err = plugin().validate(&make_entity("note", json!({}))).unwrap_err();
    assert!(err.contains("product.template"), "{err}");
}

#[test]
fn validate_rejects_missing_unit() {
    let mut entity = pipe();
    entity.set_field("diameter_uom", json!(null));
    let err = plugin().validate(&entity).unwrap_err();
    assert!(err.contains("diameter"), "{err}");
}

#[test]
fn validate_rejects_unit_of_wrong_category() {
    let mut entity = pipe();
    entity.set_field("weight_uom", json!("liter"));
    assert!(plugin().validate(&entity).is_err());
}

// ── Derived fields in entities ───────────────────────────────────

#[test]
fn on_after_load_writes_derived_fields() {
    let mut entity = pipe();
    plugin().on_after_load(&mut entity).unwrap();

    assert_eq!(entity.text("measurement_code"), Some("6m x 40mm∅"));
    assert_eq!(entity.text(REC_NAME), Some("Pipe [6m x 40mm∅]"));
    assert_eq!(entity.measure("weight"), Some(7.5));
    assert_eq!(entity.measure("diameter_digits"), Some(2.0));
    assert_eq!(entity.measure("density_digits"), Some(4.0));
    assert_eq!(entity.measure("weight_digits"), Some(2.0));

    // 7.5 kg over π x 0.02² x 6 m³
    let density = entity.measure("density").unwrap();
    let expected = 7.5 / (std::f64::consts::PI * 0.02 * 0.02 * 6.0 * 1000.0);
    assert!((density - expected).abs() < 1e-9);
}

#[test]
fn on_field_change_recomputes_dependents_only() {
    let mut entity = pipe();
    plugin()
        .on_field_change(&mut entity, "diameter_uom")
        .unwrap();
    assert_eq!(entity.measure("diameter_digits"), Some(2.0));
    assert!(entity.measure("density").is_some());
    assert_eq!(entity.text("measurement_code"), Some("6m x 40mm∅"));
    // weight_uom did not change
    assert!(entity.data.get("weight_digits").is_none());
    assert!(entity.data.get("density_digits").is_none());
}

#[test]
fn on_field_change_ignores_other_fields() {
    let mut entity = pipe();
    let before = entity.data.clone();
    plugin().on_field_change(&mut entity, "list_price").unwrap();
    assert_eq!(entity.data, before);
}

#[test]
fn type_change_updates_code_only() {
    let mut entity = pipe();
    entity.set_field("type", json!("service"));
    plugin().on_field_change(&mut entity, "type").unwrap();
    assert_eq!(entity.text("measurement_code"), Some(""));
    assert_eq!(entity.text("rec_name"), Some("Pipe"));
    assert!(entity.data.get("density").is_none());
}
