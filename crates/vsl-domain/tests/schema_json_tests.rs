use vsl_domain::{default_lead_schema, FieldKind, FormSchema};

const PAGE_SCHEMA: &str = r#"{
  "title": { "es": "Accede al Entrenamiento Exclusivo", "en": "Access the Exclusive Training" },
  "submitLabel": { "es": "Ver Video Ahora", "en": "Watch Video Now" },
  "fields": [
    {
      "name": "name",
      "type": "text",
      "label": { "es": "Nombre", "en": "First Name" },
      "placeholder": { "es": "Tu nombre", "en": "Your name" },
      "required": true,
      "validation": { "minLength": 2 }
    },
    {
      "name": "email",
      "type": "email",
      "label": { "es": "Correo Electrónico", "en": "Email Address" },
      "required": true
    },
    {
      "name": "phone",
      "type": "tel",
      "label": { "es": "WhatsApp", "en": "WhatsApp" },
      "required": true
    },
    {
      "name": "budget",
      "type": "select",
      "label": { "en": "Budget" },
      "options": [
        { "value": "low", "label": { "en": "Under $5k" } },
        { "value": "high", "label": { "en": "Over $5k" } }
      ]
    }
  ]
}"#;

#[test]
fn parses_page_schema_document() {
    let schema: FormSchema = serde_json::from_str(PAGE_SCHEMA).expect("parse schema");

    assert_eq!(schema.fields().len(), 4);
    assert_eq!(schema.submit_label_for("es", "en"), "Ver Video Ahora");
    assert_eq!(schema.description_for("es", "en"), "");

    let name = schema.field("name").expect("name field");
    assert!(name.required);
    assert_eq!(name.constraints.as_ref().and_then(|c| c.min_length), Some(2));
    assert_eq!(name.placeholder_for("en", "en"), "Your name");

    let phone = schema.field("phone").expect("phone field");
    assert_eq!(phone.kind, FieldKind::Tel);

    let budget = schema.field("budget").expect("budget field");
    assert_eq!(budget.options()[1].label_for("es", "en"), "Over $5k");
}

#[test]
fn rejects_select_without_options_in_document() {
    let doc = r#"{
      "submitLabel": { "en": "Go" },
      "fields": [ { "name": "plan", "type": "select", "label": { "en": "Plan" }, "options": [] } ]
    }"#;
    let err = serde_json::from_str::<FormSchema>(doc).unwrap_err();
    assert!(err.to_string().contains("plan"), "{err}");
}

#[test]
fn rejects_duplicate_names_in_document() {
    let doc = r#"{
      "submitLabel": { "en": "Go" },
      "fields": [
        { "name": "email", "type": "email", "label": { "en": "Email" } },
        { "name": "email", "type": "text", "label": { "en": "Again" } }
      ]
    }"#;
    assert!(serde_json::from_str::<FormSchema>(doc).is_err());
}

#[test]
fn default_schema_survives_serialization() {
    let schema = default_lead_schema();
    let json = serde_json::to_string(&schema).expect("serialize");
    assert!(json.contains("\"submitLabel\""));
    assert!(json.contains("\"validation\""));
    let back: FormSchema = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, schema);
}
