//! Testing utilities for the xmlform workspace
//!
//! Shared fixtures: the built-in catalog, a small resolver snapshot and a
//! form that exercises every section of the legacy dialect.

#![allow(missing_docs)]

use std::sync::Arc;
use xmlform_catalog::FieldTypeCatalog;
use xmlform_model::{
    Field, FieldId, FieldOption, FieldTypeId, FormId, FormModel, SystemListId, TriggerSpec, UserId,
};
use xmlform_resolve::{InMemoryStores, ResolverSnapshot, Resolvers};

/// Resolver snapshot in the CLI's JSON format
pub const SAMPLE_SNAPSHOT_JSON: &str = r#"{
  "users": [
    { "id": 1, "username": "ada" },
    { "id": 2, "username": "grace" }
  ],
  "system_lists": [
    { "id": 7, "legacy_value": "High" },
    { "id": 8, "legacy_value": "Low" }
  ],
  "tasks": [
    { "legacy_id": "55", "id": "t-55", "name": "Follow up" }
  ]
}"#;

pub const ADA: UserId = UserId(1);
pub const GRACE: UserId = UserId(2);
/// Not in the snapshot
pub const GHOST: UserId = UserId(404);

pub const HIGH: SystemListId = SystemListId(7);
pub const LOW: SystemListId = SystemListId(8);

/// Legacy form id the sample task store resolves
pub const KNOWN_TASK: &str = "55";

pub fn catalog() -> Arc<FieldTypeCatalog> {
    Arc::new(FieldTypeCatalog::builtin().unwrap())
}

/// Current id of a built-in type, by name
pub fn type_id(name: &str) -> FieldTypeId {
    FieldTypeCatalog::builtin()
        .unwrap()
        .by_name(name)
        .unwrap_or_else(|| panic!("no built-in field type named {name}"))
        .id
}

pub fn stores() -> InMemoryStores {
    ResolverSnapshot::from_json_str(SAMPLE_SNAPSHOT_JSON)
        .unwrap()
        .into_stores()
        .unwrap()
}

pub fn resolvers() -> Resolvers {
    stores().into_resolvers()
}

/// Field of a built-in type
pub fn field(id: u64, name: &str, type_name: &str) -> Field {
    Field::new(FieldId(id), name, type_id(type_name))
}

/// A form using every section and most field types
pub fn sample_form() -> FormModel {
    FormModel::new(FormId(42))
        .with_description("Weekly <safety> check")
        .with_instructions("Fill in & sign")
        .with_field(
            field(1, "title", "text_field")
                .with_description("Short title")
                .with_attribute("value", "Site A")
                .with_attribute("min", "2")
                .with_attribute("required", "1"),
        )
        .with_field(field(2, "notes", "text_area").with_attribute("value", "Line <one> & two"))
        .with_field(
            field(3, "hazards", "checkbox_list")
                .with_attribute("value", "a|b|c")
                .with_option(FieldOption::new("a"))
                .with_option(FieldOption::new("b"))
                .with_option(FieldOption::new("c"))
                .with_option(FieldOption::new("d")),
        )
        .with_field(
            field(4, "priority", "system_list").with_attribute("value", HIGH.to_string()),
        )
        .with_field(field(5, "ok", "yes_no").with_attribute("value", "Yes"))
        .with_field(
            field(6, "shift", "dropdown")
                .with_attribute("value", "Night")
                .with_option(FieldOption::new("Day"))
                .with_option(
                    FieldOption::new("Night").with_trigger(TriggerSpec::new(KNOWN_TASK).with_date()),
                ),
        )
        .with_keyword("safety")
        .with_keyword("weekly")
        .with_approver(ADA)
        .with_approver(GHOST)
        .with_trigger(TriggerSpec::new(KNOWN_TASK))
        .with_email_notification("ops@example.com")
}

/// Wrap a fragment in a minimal legacy document
pub fn legacy_document(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<form id=\"1\" isEditing=\"true\"><fversion>1</fversion>{body}</form>\n"
    )
}
