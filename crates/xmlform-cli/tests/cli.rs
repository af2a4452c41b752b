//! Subcommands against files on disk

use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use xmlform_cli::{run, Command, EntityKindArg, Sources};
use xmlform_test_utils::SAMPLE_SNAPSHOT_JSON;

const FORM_JSON: &str = r#"{
  "id": 42,
  "description": "Site check",
  "fields": [
    {
      "id": 1,
      "name": "title",
      "field_type": 1,
      "attributes": [{ "name": "value", "value": "Hi & bye" }]
    },
    {
      "id": 2,
      "name": "priority",
      "field_type": 10,
      "attributes": [{ "name": "value", "value": "7" }]
    }
  ],
  "keywords": ["safety"],
  "approvers": [{ "user_id": 1 }, { "user_id": 99 }]
}"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn sources(snapshot: &Path) -> Sources {
    Sources {
        resolvers: Some(snapshot.to_path_buf()),
        ..Sources::default()
    }
}

fn run_to_string(command: &Command) -> String {
    let mut out = Vec::new();
    run(command, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn encode_then_decode() {
    let dir = TempDir::new().unwrap();
    let model = write(&dir, "form.json", FORM_JSON);
    let snapshot = write(&dir, "snapshot.json", SAMPLE_SNAPSHOT_JSON);
    let xml_path = dir.path().join("form.xml");

    let stdout = run_to_string(&Command::Encode {
        model,
        sources: sources(&snapshot),
        out: Some(xml_path.clone()),
    });
    assert!(stdout.is_empty());

    let xml = std::fs::read_to_string(&xml_path).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n"));
    assert!(xml.contains(r#"value="Hi &amp; bye""#));
    assert!(xml.contains(r#"value="High" data-value="High""#));
    assert!(xml.contains(r#"approver="ada""#));

    let json = run_to_string(&Command::Decode {
        xml: xml_path,
        entity_id: "42".into(),
        entity_kind: EntityKindArg::Xmlform,
        sources: sources(&snapshot),
        pretty: false,
    });
    let record: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(record["description"], "Site check");
    assert_eq!(record["keywords"], serde_json::json!(["safety"]));
    assert_eq!(record["approvers"], serde_json::json!([1]));
    assert_eq!(record["fields"][0]["name"], "title");
    assert_eq!(record["fields"][0]["attributes"]["value"], "Hi & bye");
    assert_eq!(record["fields"][1]["attributes"]["data-value"], "7");
}

#[test]
fn encode_to_stdout() {
    let dir = TempDir::new().unwrap();
    let model = write(&dir, "form.json", r#"{ "id": 5 }"#);

    let xml = run_to_string(&Command::Encode {
        model,
        sources: Sources::default(),
        out: None,
    });
    assert!(xml.contains(r#"<form id="5" isEditing="true">"#));
    assert!(xml.ends_with("</form>\n"));
}

#[test]
fn codec_config_file_is_applied() {
    let dir = TempDir::new().unwrap();
    let model = write(&dir, "form.json", r#"{ "id": 5 }"#);
    let config = write(&dir, "codec.toml", "form_version = \"3\"\n");

    let xml = run_to_string(&Command::Encode {
        model,
        sources: Sources {
            config: Some(config),
            ..Sources::default()
        },
        out: None,
    });
    assert!(xml.contains("<fversion>3</fversion>"));
}

#[test]
fn decoding_malformed_xml_prints_empty_record() {
    let dir = TempDir::new().unwrap();
    let xml = write(&dir, "broken.xml", "<form><fields></form>");

    let json = run_to_string(&Command::Decode {
        xml,
        entity_id: "9".into(),
        entity_kind: EntityKindArg::TaskLog,
        sources: Sources::default(),
        pretty: true,
    });
    assert_eq!(json.trim(), "{}");
}

#[test]
fn check_catalog_reports_counts() {
    let dir = TempDir::new().unwrap();
    let snapshot = write(&dir, "snapshot.json", SAMPLE_SNAPSHOT_JSON);

    let report = run_to_string(&Command::CheckCatalog {
        sources: sources(&snapshot),
    });
    assert_eq!(
        report.trim(),
        "catalog ok: 17 field types (default text_field), 2 system list entries round-trip"
    );
}

#[test]
fn check_catalog_rejects_colliding_legacy_values() {
    let dir = TempDir::new().unwrap();
    let snapshot = write(
        &dir,
        "snapshot.json",
        r#"{ "users": [], "tasks": [], "system_lists": [
            { "id": 1, "legacy_value": "Same" },
            { "id": 2, "legacy_value": "Same" }
        ] }"#,
    );

    let mut out = Vec::new();
    let err = run(
        &Command::CheckCatalog {
            sources: sources(&snapshot),
        },
        &mut out,
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("duplicate system list legacy value"));
}

#[test]
fn check_catalog_rejects_broken_catalog() {
    let dir = TempDir::new().unwrap();
    let catalog = write(&dir, "catalog.toml", "default_type = \"missing\"\n");

    let mut out = Vec::new();
    let err = run(
        &Command::CheckCatalog {
            sources: Sources {
                catalog: Some(catalog),
                ..Sources::default()
            },
        },
        &mut out,
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("failed to load catalog"));
}
