use measurements_model::{Entity, TemplateRecord, PRODUCT_TEMPLATE};
use serde_json::json;

fn make_entity(data: serde_json::Value) -> Entity {
    Entity {
        id: "tmpl-1".to_string(),
        entity_type: PRODUCT_TEMPLATE.to_string(),
        data,
        created_at: 1000,
        modified_at: 2000,
        created_by: "peer-abc".to_string(),
    }
}

// ── Payload fields ───────────────────────────────────────────────

#[test]
fn reads_template_fields() {
    let e = make_entity(json!({"name": "Pipe", "length": 6.0, "weight_digits": 2}));
    assert!(e.is_template());
    assert_eq!(e.text("name"), Some("Pipe"));
    assert_eq!(e.measure("length"), Some(6.0));
    assert_eq!(e.measure("weight_digits"), Some(2.0));
}

#[test]
fn mismatched_or_null_fields_read_as_none() {
    let e = make_entity(json!({"name": "Pipe", "weight": null}));
    assert_eq!(e.measure("name"), None);
    assert_eq!(e.measure("weight"), None);
    assert_eq!(e.text("missing"), None);
}

#[test]
fn other_entity_types_are_not_templates() {
    let mut e = make_entity(json!({}));
    e.entity_type = "note".to_string();
    assert!(!e.is_template());
}

// ── Writes ───────────────────────────────────────────────────────

#[test]
fn set_field_inserts_and_overwrites() {
    let mut e = make_entity(json!({"name": "Pipe", "weight": 1.0}));
    e.set_field("weight", json!(2.5));
    e.set_field("measurement_code", json!("6m"));
    assert_eq!(e.measure("weight"), Some(2.5));
    assert_eq!(e.text("measurement_code"), Some("6m"));
    assert_eq!(e.text("name"), Some("Pipe"));
}

#[test]
fn set_field_replaces_non_object_payload() {
    let mut e = make_entity(json!(null));
    e.set_field("name", json!("Pipe"));
    assert_eq!(e.data, json!({"name": "Pipe"}));
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn entity_round_trips_through_json() {
    let e = make_entity(json!({"name": "Pipe", "shape": "cylinder"}));
    let text = serde_json::to_string(&e).unwrap();
    let back: Entity = serde_json::from_str(&text).unwrap();
    assert_eq!(back.id, "tmpl-1");
    assert_eq!(back.entity_type, "product.template");
    assert_eq!(back.data, e.data);
}

#[test]
fn payload_reads_as_template_record() {
    let e = make_entity(json!({"name": "Pipe", "shape": "cylinder", "diameter": 4.0}));
    let record = TemplateRecord::from_value(&e.data).unwrap();
    assert_eq!(record.diameter, Some(4.0));
    assert_eq!(record.name, "Pipe");
}
