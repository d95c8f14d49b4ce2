use measurements_model::{
    display_name, measurement_context, MeasurementField, ModelError, ProductType, Shape, Template,
    TemplateRecord,
};
use measurements_formula::Value;
use measurements_uom::{UomCatalog, UomError};
use pretty_assertions::assert_eq;
use serde_json::json;

fn unit(id: &str) -> Option<measurements_uom::Uom> {
    UomCatalog::standard().get(id).cloned()
}

// ── Enums ────────────────────────────────────────────────────────

#[test]
fn service_is_not_measurable() {
    assert!(ProductType::Goods.is_measurable());
    assert!(ProductType::Assets.is_measurable());
    assert!(!ProductType::Service.is_measurable());
}

#[test]
fn shape_defaults_to_none() {
    assert_eq!(Shape::default(), Shape::None);
    assert_eq!(Template::default().shape, Shape::None);
}

#[test]
fn shape_dimensions() {
    assert!(Shape::None.dimensions().is_empty());
    assert_eq!(
        Shape::Cylinder.dimensions(),
        &[MeasurementField::Length, MeasurementField::Diameter]
    );
    assert_eq!(Shape::Parallelepiped.dimensions().len(), 3);
}

#[test]
fn enums_serialize_lowercase() {
    assert_eq!(serde_json::to_value(Shape::Parallelepiped).unwrap(), json!("parallelepiped"));
    assert_eq!(serde_json::to_value(ProductType::Service).unwrap(), json!("service"));
}

// ── Applicability ────────────────────────────────────────────────

#[test]
fn nothing_applies_to_services() {
    let t = Template {
        shape: Shape::Cylinder,
        ..Template::new("Consulting", ProductType::Service)
    };
    assert!(t.is_field_applicable(MeasurementField::Type));
    for field in &MeasurementField::ALL[1..] {
        assert!(!t.is_field_applicable(*field), "{}", field.name());
    }
}

#[test]
fn cylinder_uses_diameter_not_height() {
    let t = Template {
        shape: Shape::Cylinder,
        ..Template::new("Rod", ProductType::Goods)
    };
    assert!(t.is_field_applicable(MeasurementField::Diameter));
    assert!(t.is_field_applicable(MeasurementField::DiameterUom));
    assert!(!t.is_field_applicable(MeasurementField::Height));
    assert!(!t.is_field_applicable(MeasurementField::WidthUom));
    assert!(t.is_field_applicable(MeasurementField::Density));
}

#[test]
fn parallelepiped_uses_height_not_diameter() {
    let t = Template {
        shape: Shape::Parallelepiped,
        ..Template::new("Box", ProductType::Goods)
    };
    assert!(t.is_field_applicable(MeasurementField::Height));
    assert!(t.is_field_applicable(MeasurementField::Width));
    assert!(!t.is_field_applicable(MeasurementField::Diameter));
}

// ── Unit requirements ────────────────────────────────────────────

#[test]
fn value_without_unit_is_rejected() {
    let t = Template {
        diameter: Some(3.0),
        ..Template::default()
    };
    assert!(matches!(
        t.check_units(),
        Err(ModelError::MissingUom { field: "diameter" })
    ));
}

#[test]
fn density_requires_both_units() {
    let t = Template {
        density: Some(1.0),
        density_weight_uom: unit("kilogram"),
        ..Template::default()
    };
    assert!(matches!(
        t.check_units(),
        Err(ModelError::MissingUom { field: "density_volume_uom" })
    ));
}

#[test]
fn zero_value_needs_no_unit() {
    let t = Template {
        length: Some(0.0),
        weight: Some(0.0),
        density: Some(0.0),
        ..Template::default()
    };
    assert!(t.check_units().is_ok());
}

// ── Records ──────────────────────────────────────────────────────

#[test]
fn record_resolves_units() {
    let data = json!({
        "name": "Pipe",
        "type": "goods",
        "shape": "cylinder",
        "length": 6.0,
        "length_uom": "meter",
        "diameter": 40.0,
        "diameter_uom": "millimeter",
        "list_price": 12.5
    });
    let record = TemplateRecord::from_value(&data).unwrap();
    let t = record.resolve(&UomCatalog::standard()).unwrap();
    assert_eq!(t.name, "Pipe");
    assert_eq!(t.shape, Shape::Cylinder);
    assert_eq!(t.diameter_uom.as_ref().map(|u| u.symbol.as_str()), Some("mm"));
    assert_eq!(t.weight_uom, None);
    assert_eq!(t.to_record(), record);
}

#[test]
fn record_rejects_unit_of_wrong_category() {
    let record = TemplateRecord {
        length: Some(1.0),
        length_uom: Some("kilogram".into()),
        ..TemplateRecord::default()
    };
    let err = record.resolve(&UomCatalog::standard()).unwrap_err();
    assert!(matches!(err, ModelError::Uom(UomError::WrongCategory { .. })));
}

#[test]
fn record_rejects_unknown_unit() {
    let record = TemplateRecord {
        weight_uom: Some("stone".into()),
        ..TemplateRecord::default()
    };
    let err = record.resolve(&UomCatalog::standard()).unwrap_err();
    assert!(matches!(err, ModelError::Uom(UomError::Unknown(_))));
}

#[test]
fn malformed_payload_is_a_serialization_error() {
    let err = TemplateRecord::from_value(&json!({"shape": "sphere"})).unwrap_err();
    assert!(matches!(err, ModelError::Serialization(_)));
}

#[test]
fn empty_fields_are_not_serialized() {
    let value = serde_json::to_value(TemplateRecord::default()).unwrap();
    assert_eq!(value, json!({"name": "", "type": "goods", "shape": "none"}));
}

// ── Context & display ────────────────────────────────────────────

#[test]
fn context_carries_every_field() {
    let t = Template {
        shape: Shape::Cylinder,
        length: Some(2.0),
        length_uom: unit("meter"),
        ..Template::new("Rod", ProductType::Assets)
    };
    let ctx = measurement_context(&t);
    assert_eq!(ctx.get(MeasurementField::Type), &Value::Str("assets".into()));
    assert_eq!(ctx.get(MeasurementField::Shape), &Value::Str("cylinder".into()));
    assert_eq!(ctx.get(MeasurementField::Length), &Value::Float(2.0));
    assert!(matches!(ctx.get(MeasurementField::LengthUom), Value::Uom(u) if u.id == "meter"));
    assert_eq!(ctx.get(MeasurementField::Diameter), &Value::None);
}

#[test]
fn display_name_appends_code() {
    assert_eq!(display_name("Pipe", Some("6m x 40mm∅")), "Pipe [6m x 40mm∅]");
    assert_eq!(display_name("Pipe", Some("")), "Pipe");
    assert_eq!(display_name("Pipe", None), "Pipe");
}
