//! End-to-end encode/decode behavior

use pretty_assertions::assert_eq;
use std::sync::Arc;
use xmlform_codec::{CodecConfig, EntityRef, FormCodec, MemoryLogger};
use xmlform_model::{AttributeValue, FieldOption, FormId, FormModel, TriggerRecord};
use xmlform_test_utils::{
    catalog, field, legacy_document, resolvers, sample_form, type_id, ADA, GHOST, HIGH, KNOWN_TASK,
};

fn codec() -> FormCodec {
    FormCodec::new(catalog(), resolvers())
}

fn codec_with_logger() -> (FormCodec, Arc<MemoryLogger>) {
    let logger = Arc::new(MemoryLogger::new());
    let codec = FormCodec::builder(catalog(), resolvers())
        .with_logger(logger.clone())
        .build();
    (codec, logger)
}

#[test]
fn minimal_form_omits_optional_sections() {
    let xml = codec().encode(&FormModel::new(FormId(3))).unwrap();

    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <form id=\"3\" isEditing=\"true\">\
         <fversion>1</fversion>\
         <fdescription>Please input the form description here</fdescription>\
         <finstructions>Please input the form instructions here</finstructions>\
         </form>\n"
    );
    for section in ["<fields", "<keywords", "<approvals", "<tasks", "<communications"] {
        assert!(!xml.contains(section), "unexpected {section}");
    }
}

#[test]
fn checkbox_values_select_each_option() {
    let form = FormModel::new(FormId(1)).with_field(
        field(1, "pick", "checkbox_list")
            .with_attribute("value", "a|b|c")
            .with_option(FieldOption::new("a"))
            .with_option(FieldOption::new("b"))
            .with_option(FieldOption::new("c"))
            .with_option(FieldOption::new("d")),
    );
    let codec = codec();
    let xml = codec.encode(&form).unwrap();

    assert!(xml.contains(r#"<option selected="true">a</option>"#));
    assert!(xml.contains(r#"<option selected="true">b</option>"#));
    assert!(xml.contains(r#"<option selected="true">c</option>"#));
    assert!(xml.contains("<option>d</option>"));

    let record = codec.decode(&EntityRef::xml_form(1), &xml);
    let field = &record.fields.unwrap()[0];
    assert_eq!(
        field.value(),
        &AttributeValue::List(vec!["a".into(), "b".into(), "c".into()])
    );
    assert_eq!(field.field_id, Some(type_id("checkbox_list")));
}

#[test]
fn malformed_xml_logs_once_and_returns_empty_record() {
    let (codec, logger) = codec_with_logger();

    let record = codec.decode(&EntityRef::xml_form(981), "<form><fields><field></fields>");

    assert!(record.is_empty());
    assert_eq!(serde_json::to_string(&record).unwrap(), "{}");
    let failures = logger.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].entity.id, "981");
    assert_eq!(failures[0].entity.to_string(), "xmlform with id 981");
}

#[test]
fn malformed_inputs_never_panic() {
    let (codec, logger) = codec_with_logger();
    let inputs = [
        "",
        "not xml at all",
        "<form>",
        "<form></form><form></form>",
        "<form a='1' a='2'/>",
        "<form>&nope;</form>",
    ];
    for input in inputs {
        assert!(codec.decode(&EntityRef::task_log(input.len()), input).is_empty());
    }
    assert_eq!(logger.len(), inputs.len());
}

#[test]
fn unknown_approver_is_dropped() {
    let form = FormModel::new(FormId(1)).with_approver(GHOST).with_approver(ADA);
    let codec = codec();
    let xml = codec.encode(&form).unwrap();

    assert!(xml.contains(r#"<approvals><approval type="todo" approver="ada"/></approvals>"#));

    let record = codec.decode(&EntityRef::xml_form(1), &xml);
    assert_eq!(record.approvers, Some(vec![ADA]));
}

#[test]
fn unknown_approver_username_is_skipped_on_decode() {
    let xml = legacy_document(
        r#"<approvals><approval type="todo" approver="nobody"/></approvals>"#,
    );
    let record = codec().decode(&EntityRef::xml_form(1), &xml);
    assert_eq!(record.approvers, Some(vec![]));
}

#[test]
fn digit_attribute_names_are_prefixed() {
    let form = FormModel::new(FormId(1)).with_field(
        field(1, "a", "text_field")
            .with_attribute("1custom", "x")
            .with_attribute("custom", "y"),
    );
    let xml = codec().encode(&form).unwrap();
    assert!(xml.contains(r#" _1custom="x""#));
    assert!(xml.contains(r#" custom="y""#));
}

#[test]
fn length_attributes_decode_to_short_names() {
    let xml = legacy_document(
        r#"<fields><field type="text" name="t" minlength="3" maxlength="10"/></fields>"#,
    );
    let record = codec().decode(&EntityRef::xml_form(1), &xml);
    let field = &record.fields.unwrap()[0];
    assert_eq!(field.attribute("min"), Some(&AttributeValue::from("3")));
    assert_eq!(field.attribute("max"), Some(&AttributeValue::from("10")));
    assert!(field.attribute("minlength").is_none());
}

#[test]
fn mixed_ampersands_and_entities_decode() {
    let xml = legacy_document(
        r#"<fields><field type="text" name="Fish &amp; Chips &amp;amp; Peas" value="A &amp; B &amp;lt;C&amp;gt;" hint="&amp;#65;"/></fields>"#,
    );
    let record = codec().decode(&EntityRef::xml_form(1), &xml);
    let field = &record.fields.unwrap()[0];
    assert_eq!(field.property("name"), Some("Fish & Chips & Peas"));
    assert_eq!(field.value(), &AttributeValue::from("A & B <C>"));
    assert_eq!(field.attribute("hint"), Some(&AttributeValue::from("&#65;")));
}

#[test]
fn numeric_option_prefix_follows_config() {
    let form = FormModel::new(FormId(1)).with_field(
        field(1, "n", "radio_list")
            .with_option(FieldOption::new("1 star"))
            .with_option(FieldOption::new("five")),
    );

    let prefixed = codec().encode(&form).unwrap();
    assert!(prefixed.contains("<option>_1 star</option>"));
    assert!(prefixed.contains("<option>five</option>"));

    let plain = FormCodec::builder(catalog(), resolvers())
        .with_config(CodecConfig::default().with_numeric_option_prefix(false))
        .build()
        .encode(&form)
        .unwrap();
    assert!(plain.contains("<option>1 star</option>"));
}

#[test]
fn sample_form_round_trips() {
    let codec = codec();
    let form = sample_form();
    let xml = codec.encode(&form).unwrap();
    let record = codec.decode(&EntityRef::xml_form(form.id), &xml);

    let header = record.header.as_ref().unwrap();
    assert_eq!(header.description.as_deref(), Some("Weekly <safety> check"));
    assert_eq!(header.instructions.as_deref(), Some("Fill in & sign"));
    assert_eq!(record.keywords, Some(vec!["safety".into(), "weekly".into()]));
    assert_eq!(record.approvers, Some(vec![ADA]));
    assert_eq!(
        record.trigger,
        Some(TriggerRecord {
            triggered_task_id: Some(KNOWN_TASK.into()),
            trigger_has_date: 0,
        })
    );
    assert_eq!(record.email_notifications, Some(vec!["ops@example.com".into()]));

    let fields = record.fields.unwrap();
    assert_eq!(fields.len(), form.fields.len());
    for (decoded, original) in fields.iter().zip(&form.fields) {
        assert_eq!(decoded.field_id, Some(original.field_type));
        assert_eq!(decoded.property("name"), Some(original.name.as_str()));
    }

    // text_field: value pair + renamed bound + required
    assert_eq!(fields[0].value(), &AttributeValue::from("Site A"));
    assert_eq!(fields[0].attribute("min"), Some(&AttributeValue::from("2")));
    assert_eq!(fields[0].attribute("required"), Some(&AttributeValue::from("true")));
    assert_eq!(fields[0].property("description"), Some("Short title"));

    // text_area: escaped element text
    assert_eq!(fields[1].value(), &AttributeValue::from("Line <one> & two"));

    // checkbox_list: a|b|c
    assert_eq!(
        fields[2].value(),
        &AttributeValue::List(vec!["a".into(), "b".into(), "c".into()])
    );

    // system_list: id -> "High" -> id
    assert_eq!(
        fields[3].attribute("data-value"),
        Some(&AttributeValue::from(HIGH.to_string().as_str()))
    );

    // yes_no: text content
    assert_eq!(fields[4].value(), &AttributeValue::from("Yes"));

    // dropdown: selected option + resolved trigger
    assert_eq!(fields[5].value(), &AttributeValue::from("Night"));
    let options = fields[5].options.as_ref().unwrap();
    assert_eq!(options[1].triggered_task_id, Some(Some("t-55".into())));
    assert_eq!(options[1].trigger_has_date, Some(1));
    assert_eq!(options[0].triggered_task_id, None);
}

#[test]
fn image_and_file_values_round_trip() {
    let files = r#"[{"name":"plan.pdf","size":12}]"#;
    let form = FormModel::new(FormId(1))
        .with_field(field(1, "photo", "image").with_attribute("value", "/img/p.png"))
        .with_field(field(2, "sign", "signature").with_attribute("value", "data:image/png;base64,AA=="))
        .with_field(field(3, "docs", "embed_files").with_attribute("value", files));
    let codec = codec();
    let record = codec.decode(&EntityRef::xml_form(1), &codec.encode(&form).unwrap());
    let fields = record.fields.unwrap();

    assert_eq!(fields[0].value(), &AttributeValue::from("/img/p.png"));
    assert_eq!(fields[1].value(), &AttributeValue::from("data:image/png;base64,AA=="));
    // the file list travels as a JSON string literal
    let decoded: String = serde_json::from_str(fields[2].value().as_text().unwrap()).unwrap();
    assert_eq!(decoded, files);
}

#[test]
fn heading_and_paragraph_use_element_text() {
    let form = FormModel::new(FormId(1))
        .with_field(field(1, "h", "heading").with_attribute("value", "Section 1"))
        .with_field(field(2, "p", "paragraph").with_attribute("value", "Read <carefully>"));
    let codec = codec();
    let xml = codec.encode(&form).unwrap();
    assert!(xml.contains(">Read &lt;carefully&gt;</field>"));

    let fields = codec.decode(&EntityRef::xml_form(1), &xml).fields.unwrap();
    assert_eq!(fields[0].value(), &AttributeValue::from("Section 1"));
    assert_eq!(fields[1].value(), &AttributeValue::from("Read <carefully>"));
}

#[test]
fn legacy_document_with_whitespace_layout() {
    let xml = legacy_document(
        "\n  <fields>\n    <field type=\"textarea\" name=\"n\">\n      free text\n    </field>\n  </fields>\n",
    );
    let fields = codec().decode(&EntityRef::xml_form(1), &xml).fields.unwrap();
    assert_eq!(
        fields[0].value(),
        &AttributeValue::from("\n      free text\n    ")
    );
}

#[test]
fn decoded_record_serializes_flat() {
    let xml = legacy_document(
        r#"<fdescription>D</fdescription><tasks><task type="new" xmlform_id="9" trigger_has_date="1"/></tasks>"#,
    );
    let record = codec().decode(&EntityRef::xml_form(1), &xml);
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["description"], "D");
    assert_eq!(json["instructions"], serde_json::Value::Null);
    assert_eq!(json["triggered_task_id"], "9");
    assert_eq!(json["trigger_has_date"], 1);
    assert!(json.get("fields").is_none());
}
