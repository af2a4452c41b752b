//! Legacy XML -> form record
//!
//! # Overview
//!
//! The document is parsed strictly into an owned tree. A parse failure is
//! reported once through the [`DecodeLogger`] and yields an empty
//! [`FormRecord`]; nothing is raised to the caller.
//!
//! Sections are located like DOM `getElementsByTagName(..).item(0)`: the first
//! matching element anywhere in the document. Each field attribute goes
//! through two dispatch steps:
//!
//! 1. `LegacyRule`: type-specific handling keyed on the legacy field type
//! 2. `AttributeRule`: generic handling keyed on the attribute name
//!
//! After the attributes, infix-value types fall back to the element's last
//! text child for their value.

use crate::escape::Escaper;
use crate::logger::{DecodeLogger, EntityRef};
use crate::numeric::leading_int;
use crate::xml::{parse_document, XmlDocument, XmlElement};
use xmlform_catalog::{BehaviorFlag, FieldType, FieldTypeCatalog};
use xmlform_model::{
    AttributeValue, FieldRecord, FormHeader, FormRecord, OptionRecord, TriggerRecord, UserId,
};
use xmlform_resolve::Memoized;

/// Legacy field types with dedicated attribute handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LegacyKind {
    Function,
    SystemList,
    TaskLogReference,
    File,
    CheckboxList,
    Other,
}

impl LegacyKind {
    fn of(legacy: &str) -> Self {
        match legacy.to_ascii_lowercase().as_str() {
            "function" => Self::Function,
            "systemlist" => Self::SystemList,
            "tasklogreference" => Self::TaskLogReference,
            "file" => Self::File,
            "checkboxlist" => Self::CheckboxList,
            _ => Self::Other,
        }
    }
}

/// Type-specific attribute handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LegacyRule {
    /// `function` + `data-value`: the computed value
    FunctionValue,
    /// `function` + `function_name` / `data-label`
    FunctionProperty,
    /// `systemlist` + `value` / `data-value`: legacy display string
    SystemListValue,
    /// `tasklogreference` + `data-object`: JSON reference
    TaskLogObject,
    /// `tasklogreference` + `value` / `data-value`: superseded by the object
    TaskLogValue,
    /// `file` + `value` / `data-value`: JSON file list
    FileValue,
}

impl LegacyRule {
    fn of(kind: LegacyKind, name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        let rule = match (kind, name.as_str()) {
            (LegacyKind::Function, "data-value") => Self::FunctionValue,
            (LegacyKind::Function, "function_name" | "data-label") => Self::FunctionProperty,
            (LegacyKind::SystemList, "value" | "data-value") => Self::SystemListValue,
            (LegacyKind::TaskLogReference, "data-object") => Self::TaskLogObject,
            (LegacyKind::TaskLogReference, "value" | "data-value") => Self::TaskLogValue,
            (LegacyKind::File, "value" | "data-value") => Self::FileValue,
            _ => return None,
        };
        Some(rule)
    }
}

/// Generic attribute handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttributeRule {
    Ignored,
    OnField,
    Type,
    Value,
    TriggerTask,
    TriggerHasDate,
    LengthBound,
    Required,
    Copy,
}

impl AttributeRule {
    fn of(catalog: &FieldTypeCatalog, name: &str) -> Self {
        if catalog.is_ignored_attribute(name) {
            Self::Ignored
        } else if catalog.is_on_field_attribute(name) {
            Self::OnField
        } else if name.eq_ignore_ascii_case("type") {
            Self::Type
        } else if catalog.is_value_attribute(name) {
            Self::Value
        } else {
            match name {
                "data-trigger-task" => Self::TriggerTask,
                "data-trigger-has-date" => Self::TriggerHasDate,
                "minlength" | "maxlength" => Self::LengthBound,
                "required" => Self::Required,
                _ => Self::Copy,
            }
        }
    }
}

/// Turns legacy XML into [`FormRecord`]s
///
/// Holds one [`Memoized`] resolver view, so build one decoder per document.
pub struct FormDecoder<'a> {
    catalog: &'a FieldTypeCatalog,
    resolvers: Memoized<'a>,
    escaper: &'a dyn Escaper,
    logger: &'a dyn DecodeLogger,
}

impl<'a> FormDecoder<'a> {
    /// Create decoder
    #[must_use]
    pub fn new(
        catalog: &'a FieldTypeCatalog,
        resolvers: Memoized<'a>,
        escaper: &'a dyn Escaper,
        logger: &'a dyn DecodeLogger,
    ) -> Self {
        Self {
            catalog,
            resolvers,
            escaper,
            logger,
        }
    }

    /// Decode a stored document
    ///
    /// Malformed input is logged against `entity` and decodes to the empty
    /// record.
    pub fn decode(&self, entity: &EntityRef, xml: &str) -> FormRecord {
        let document = match parse_document(xml) {
            Ok(document) => document,
            Err(error) => {
                self.logger.parse_failed(entity, &error);
                return FormRecord::default();
            }
        };

        let record = self.decode_document(&document);
        let stats = self.resolvers.stats();
        tracing::debug!(
            entity = %entity.kind,
            id = %entity.id,
            fields = record.fields.as_ref().map_or(0, Vec::len),
            lookups = stats.misses,
            cached = stats.hits,
            "decoded form"
        );
        record
    }

    /// Decode an already parsed document
    #[must_use]
    pub fn decode_document(&self, document: &XmlDocument) -> FormRecord {
        FormRecord {
            header: document.first_named("form").map(header),
            fields: document.first_named("fields").map(|fields| self.fields(fields)),
            keywords: document
                .first_named("keywords")
                .map(|keywords| texts(keywords, "keyword")),
            approvers: document
                .first_named("approvals")
                .map(|approvals| self.approvers(approvals)),
            trigger: document.first_named("tasks").and_then(trigger),
            email_notifications: document
                .first_named("communications")
                .map(|communications| texts(communications, "notify")),
        }
    }

    fn approvers(&self, approvals: &XmlElement) -> Vec<UserId> {
        approvals
            .descendants_named("approval")
            .into_iter()
            .filter_map(|approval| {
                let username = approval.attr("approver")?;
                let user = self.resolvers.by_username(username);
                if user.is_none() {
                    tracing::debug!(username, "approver not found");
                }
                user
            })
            .collect()
    }

    fn fields(&self, fields: &XmlElement) -> Vec<FieldRecord> {
        fields
            .descendants_named("field")
            .into_iter()
            .map(|field| self.field(field))
            .collect()
    }

    fn field(&self, element: &XmlElement) -> FieldRecord {
        let kind = LegacyKind::of(element.attr("type").unwrap_or_default());
        let mut record = FieldRecord::new(if kind == LegacyKind::CheckboxList {
            AttributeValue::List(Vec::new())
        } else {
            AttributeValue::Null
        });

        if element.has_attributes() {
            let mut resolved: Option<&FieldType> = None;
            for (name, value) in element.attributes() {
                if name.is_empty() {
                    continue;
                }
                match LegacyRule::of(kind, name) {
                    Some(rule) => self.apply_legacy_rule(&mut record, rule, name, value),
                    None => {
                        if let Some(field_type) = self.apply_attribute(&mut record, name, value) {
                            resolved = Some(field_type);
                        }
                    }
                }
            }

            let field_type = resolved.unwrap_or_else(|| self.catalog.default_type());
            let value = record.value();
            let wants_text = (!value.is_list()
                && value.is_empty()
                && field_type.behavior.contains(BehaviorFlag::InfixValue))
                || field_type.behavior.contains(BehaviorFlag::TextFallback);
            if wants_text {
                record.set_value(AttributeValue::from_option(leaf_text(element)));
            }
        }

        let options = element.descendants_named("option");
        if !options.is_empty() {
            record.options = Some(
                options
                    .into_iter()
                    .map(|option| option_record(&mut record, option))
                    .collect(),
            );
        }
        record
    }

    fn apply_legacy_rule(&self, record: &mut FieldRecord, rule: LegacyRule, name: &str, value: &str) {
        match rule {
            LegacyRule::FunctionValue => {
                record.set_value(self.unescaped(value));
            }
            LegacyRule::FunctionProperty => {
                record
                    .attributes
                    .insert(name.to_string(), self.unescaped(value));
                if name.eq_ignore_ascii_case("function_name") && record.value().is_empty() {
                    record.set_value(self.unescaped(value));
                }
            }
            LegacyRule::SystemListValue => match self.resolvers.find_by_legacy_value(value) {
                Some(id) => {
                    record
                        .attributes
                        .insert("data-value".to_string(), AttributeValue::Text(id.to_string()));
                }
                None => tracing::debug!(value, "system list value not found"),
            },
            LegacyRule::TaskLogObject | LegacyRule::FileValue => {
                record.set_value(self.json_or_null(value));
            }
            LegacyRule::TaskLogValue => {}
        }
    }

    /// Returns the resolved type when the attribute was `type`
    fn apply_attribute(
        &self,
        record: &mut FieldRecord,
        name: &str,
        value: &str,
    ) -> Option<&'a FieldType> {
        match AttributeRule::of(self.catalog, name) {
            AttributeRule::Ignored => {}
            AttributeRule::OnField => {
                record
                    .properties
                    .insert(name.to_string(), self.escaper.unescape(value).into_owned());
            }
            AttributeRule::Type => {
                let field_type = self.catalog.legacy_to_current(value);
                record.field_id = Some(field_type.id);
                return Some(field_type);
            }
            AttributeRule::Value => record.set_value(self.unescaped(value)),
            AttributeRule::TriggerTask => {
                let task = (!value.is_empty()).then(|| value.to_string());
                record.attributes.insert(
                    "triggered_task_id".to_string(),
                    AttributeValue::from_option(task),
                );
            }
            AttributeRule::TriggerHasDate => {
                record.attributes.insert(
                    "trigger_has_date".to_string(),
                    AttributeValue::Int(leading_int(value)),
                );
            }
            AttributeRule::LengthBound => {
                record
                    .attributes
                    .insert(name[..3].to_string(), AttributeValue::from(value));
            }
            AttributeRule::Required => {
                if matches!(value, "true" | "required") {
                    record
                        .attributes
                        .insert("required".to_string(), AttributeValue::from("true"));
                }
            }
            AttributeRule::Copy => {
                record
                    .attributes
                    .insert(name.to_string(), self.unescaped(value));
            }
        }
        None
    }

    fn unescaped(&self, value: &str) -> AttributeValue {
        AttributeValue::Text(self.escaper.unescape(value).into_owned())
    }

    fn json_or_null(&self, value: &str) -> AttributeValue {
        let text = self.escaper.unescape(value);
        if serde_json::from_str::<serde_json::Value>(&text).is_ok() {
            AttributeValue::Text(text.into_owned())
        } else {
            AttributeValue::Null
        }
    }
}

fn header(form: &XmlElement) -> FormHeader {
    FormHeader {
        description: form.first_named("fdescription").map(XmlElement::text_content),
        instructions: form.first_named("finstructions").map(XmlElement::text_content),
    }
}

fn trigger(tasks: &XmlElement) -> Option<TriggerRecord> {
    let task = tasks.first_named("task")?;
    let has_date = task
        .attr("trigger_has_date")
        .is_some_and(|flag| leading_int(flag) == 1);
    Some(TriggerRecord {
        triggered_task_id: task.attr("xmlform_id").map(str::to_string),
        trigger_has_date: u8::from(has_date),
    })
}

fn texts(section: &XmlElement, name: &str) -> Vec<String> {
    section
        .descendants_named(name)
        .into_iter()
        .map(XmlElement::text_content)
        .collect()
}

/// Text of the last child, when that child is a leaf
fn leaf_text(element: &XmlElement) -> Option<String> {
    element
        .last_child()
        .filter(|last| !last.has_children())
        .map(|last| last.text().into_owned())
}

fn option_record(field: &mut FieldRecord, option: &XmlElement) -> OptionRecord {
    let mut record = OptionRecord::new(option.text_content());

    if matches!(option.attr("selected"), Some("true" | "yes")) {
        match field.value_mut() {
            AttributeValue::List(selected) => selected.push(record.name.clone()),
            value if value.is_empty() => *value = AttributeValue::Text(record.name.clone()),
            _ => {}
        }
    }

    if let Some(task) = option.attr("data-trigger-task") {
        record.triggered_task_id = Some((!task.is_empty()).then(|| task.to_string()));
    }
    if let Some(flag) = option.attr("data-trigger-has-date") {
        record.trigger_has_date = Some(leading_int(flag));
    }
    record
}
