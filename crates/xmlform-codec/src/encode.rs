//! Form definition -> legacy XML
//!
//! # Overview
//!
//! Each entity maps to an [`XmlElement`] through a pure function; the tree is
//! then written in a single pass. Empty optional sections are left out:
//!
//! ```text
//! form id isEditing
//! ├── fversion, fdescription, finstructions
//! ├── fields/field*/options/option*      (if any fields)
//! ├── keywords/keyword*                  (if any keywords)
//! ├── approvals/approval*                (if any approvers)
//! ├── tasks/task                         (if triggered)
//! └── communications/notify*             (if any addresses)
//! ```

use crate::config::CodecConfig;
use crate::error::EncodeError;
use crate::escape::Escaper;
use crate::numeric::{leading_int, starts_with_digit};
use crate::xml::{write_document, XmlElement};
use xmlform_catalog::{Behavior, BehaviorFlag, FieldTypeCatalog, ValueCarrier};
use xmlform_model::{AttributeKv, Field, FieldOption, FormModel, SystemListId, TriggerSpec};
use xmlform_resolve::Memoized;

/// How a stored field attribute is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttributeRule {
    /// The field value, through the type's carrier
    Value,
    /// Legacy id of a form to trigger
    TriggeredTask,
    /// Trigger date flag
    TriggerHasDate,
    /// `min` / `max`
    LengthBound,
    /// `required` set to 1
    Required,
    /// Anything else, copied verbatim
    Passthrough,
}

impl AttributeRule {
    fn of(attribute: &AttributeKv) -> Self {
        match attribute.name.to_ascii_lowercase().as_str() {
            "value" => Self::Value,
            "triggered_task_id" => Self::TriggeredTask,
            "trigger_has_date" => Self::TriggerHasDate,
            "min" | "max" => Self::LengthBound,
            "required" if leading_int(&attribute.value) == 1 => Self::Required,
            _ => Self::Passthrough,
        }
    }
}

/// Renders [`FormModel`]s as legacy XML
///
/// Holds one [`Memoized`] resolver view, so build one encoder per document.
pub struct FormEncoder<'a> {
    catalog: &'a FieldTypeCatalog,
    resolvers: Memoized<'a>,
    escaper: &'a dyn Escaper,
    config: &'a CodecConfig,
}

impl<'a> FormEncoder<'a> {
    /// Create encoder
    #[must_use]
    pub fn new(
        catalog: &'a FieldTypeCatalog,
        resolvers: Memoized<'a>,
        escaper: &'a dyn Escaper,
        config: &'a CodecConfig,
    ) -> Self {
        Self {
            catalog,
            resolvers,
            escaper,
            config,
        }
    }

    /// Encode a form as a complete XML document
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::UnknownFieldType`] when a field's type is not
    /// in the catalog, or a writer error.
    pub fn encode(&self, form: &FormModel) -> Result<String, EncodeError> {
        let root = self.form_element(form)?;
        let xml = write_document(&root)?;

        let stats = self.resolvers.stats();
        tracing::debug!(
            form = %form.id,
            fields = form.fields.len(),
            bytes = xml.len(),
            lookups = stats.misses,
            cached = stats.hits,
            "encoded form"
        );
        Ok(xml)
    }

    /// Build the document tree for a form
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::UnknownFieldType`] when a field's type is not
    /// in the catalog.
    pub fn form_element(&self, form: &FormModel) -> Result<XmlElement, EncodeError> {
        let description =
            header_text(form.description.as_deref(), &self.config.description_placeholder);
        let instructions =
            header_text(form.instructions.as_deref(), &self.config.instructions_placeholder);

        let mut root = XmlElement::new("form")
            .with_attr("id", form.id.to_string())
            .with_attr("isEditing", "true")
            .with_child(self.text_element("fversion", &self.config.form_version))
            .with_child(self.text_element("fdescription", description))
            .with_child(self.text_element("finstructions", instructions));

        if !form.fields.is_empty() {
            let fields = form
                .fields
                .iter()
                .map(|field| self.field_element(field))
                .collect::<Result<Vec<_>, _>>()?;
            root = root.with_child(XmlElement::new("fields").with_children(fields));
        }

        if !form.keywords.is_empty() {
            root = root.with_child(XmlElement::new("keywords").with_children(
                form.keywords.iter().map(|keyword| self.text_element("keyword", keyword)),
            ));
        }

        if !form.approvers.is_empty() {
            root = root.with_child(self.approvals_element(form));
        }

        if let Some(trigger) = form.trigger.as_ref().filter(|t| !t.target.is_empty()) {
            root = root.with_child(XmlElement::new("tasks").with_child(task_element(trigger)));
        }

        if !form.email_notifications.is_empty() {
            root = root.with_child(XmlElement::new("communications").with_children(
                form.email_notifications.iter().map(|address| {
                    self.text_element("notify", address).with_attr("type", "email")
                }),
            ));
        }

        Ok(root)
    }

    fn field_element(&self, field: &Field) -> Result<XmlElement, EncodeError> {
        let field_type =
            self.catalog
                .get(field.field_type)
                .ok_or(EncodeError::UnknownFieldType {
                    field: field.id,
                    field_type: field.field_type,
                })?;
        let legacy = field_type.legacy.as_str();
        let behavior = field_type.behavior;

        let mut element = XmlElement::new("field")
            .with_attr("type", legacy)
            .with_attr("name", &field.name)
            .with_attr("id", format!("{}_{legacy}", field.id))
            .with_attr("description", &field.description)
            .with_attr("instructions", &field.instructions)
            .with_attr("keywords", &field.keywords);

        for attribute in field.attributes.iter().filter(|a| !a.name.is_empty()) {
            element = self.apply_attribute(element, field, attribute, behavior)?;
        }

        if !field.options.is_empty() {
            let selected = self.selected_values(field, behavior);
            element = element.with_child(
                XmlElement::new("options").with_children(
                    field
                        .options
                        .iter()
                        .map(|option| self.option_element(option, &selected)),
                ),
            );
        }

        Ok(element)
    }

    fn apply_attribute(
        &self,
        element: XmlElement,
        field: &Field,
        attribute: &AttributeKv,
        behavior: Behavior,
    ) -> Result<XmlElement, EncodeError> {
        let value = attribute.value.as_str();
        let element = match AttributeRule::of(attribute) {
            AttributeRule::Value => self.write_value(element, value, behavior)?,
            AttributeRule::TriggeredTask => self.write_task(element, value),
            AttributeRule::TriggerHasDate if leading_int(value) != 0 => {
                element.with_attr("data-trigger-has-date", value)
            }
            AttributeRule::TriggerHasDate => element,
            AttributeRule::LengthBound if behavior.contains(BehaviorFlag::MinMaxLength) => {
                element.with_attr(format!("{}length", attribute.name), value)
            }
            AttributeRule::Required => element.with_attr("required", "required"),
            AttributeRule::LengthBound | AttributeRule::Passthrough => {
                let name = if starts_with_digit(&attribute.name) {
                    format!("_{}", attribute.name)
                } else {
                    attribute.name.clone()
                };
                if is_xml_name(&name) {
                    element.with_attr(name, value)
                } else {
                    tracing::warn!(
                        field = %field.id,
                        attribute = %attribute.name,
                        "skipping attribute with invalid xml name"
                    );
                    element
                }
            }
        };
        Ok(element)
    }

    fn write_value(
        &self,
        element: XmlElement,
        value: &str,
        behavior: Behavior,
    ) -> Result<XmlElement, EncodeError> {
        let element = match behavior.carrier() {
            Some(ValueCarrier::Text) => element.with_escaped_text(self.escaper.escape(value)),
            Some(ValueCarrier::Src) => element.with_attr("src", value),
            Some(ValueCarrier::ValuePair) => {
                let shown = if behavior.contains(BehaviorFlag::SystemList) {
                    self.system_list_display(value)
                } else {
                    value.to_string()
                };
                element
                    .with_attr("value", shown.as_str())
                    .with_attr("data-value", shown)
            }
            Some(ValueCarrier::Files) => {
                let encoded = serde_json::to_string(value)?;
                element
                    .with_attr("data-files", encoded.as_str())
                    .with_attr("data-value", encoded)
            }
            None => element,
        };
        Ok(element)
    }

    fn system_list_display(&self, value: &str) -> String {
        let legacy = value
            .trim()
            .parse::<SystemListId>()
            .ok()
            .and_then(|id| self.resolvers.legacy_value_of(id));
        legacy.unwrap_or_else(|| {
            tracing::debug!(value, "system list value not resolved, writing it as is");
            value.to_string()
        })
    }

    fn write_task(&self, element: XmlElement, target: &str) -> XmlElement {
        match self.resolvers.resolve_task(target) {
            Some(task) => element
                .with_attr("data-trigger-task", task.id)
                .with_attr("data-trigger-task-name", task.name),
            None => {
                tracing::debug!(target, "triggered task not resolved");
                element
            }
        }
    }

    fn selected_values<'f>(&self, field: &'f Field, behavior: Behavior) -> Vec<&'f str> {
        match field.value() {
            Some(value) if behavior.contains(BehaviorFlag::MultiValued) => {
                value.split(self.catalog.multi_value_delimiter()).collect()
            }
            Some(value) => vec![value],
            None => Vec::new(),
        }
    }

    fn option_element(&self, option: &FieldOption, selected: &[&str]) -> XmlElement {
        let name = if self.config.prefix_numeric_option_names && starts_with_digit(&option.name) {
            format!("_{}", option.name)
        } else {
            option.name.clone()
        };
        let mut element =
            XmlElement::new("option").with_escaped_text(self.escaper.escape(&name));

        if let Some(trigger) = option.trigger.as_ref().filter(|t| !t.target.is_empty()) {
            if let Some(task) = self.resolvers.resolve_task(&trigger.target) {
                element = element
                    .with_attr("data-trigger-task", task.id)
                    .with_attr("data-trigger-task-name", task.name);
                if trigger.requires_date {
                    element = element.with_attr("data-trigger-has-date", "1");
                }
            } else {
                tracing::debug!(target = %trigger.target, "option task not resolved");
            }
        }

        if selected.contains(&option.name.as_str()) {
            element = element.with_attr("selected", "true");
        }
        element
    }

    fn approvals_element(&self, form: &FormModel) -> XmlElement {
        let approvals = form.approvers.iter().filter_map(|approver| {
            match self.resolvers.username_of(approver.user_id) {
                Some(username) => Some(
                    XmlElement::new("approval")
                        .with_attr("type", "todo")
                        .with_attr("approver", username),
                ),
                None => {
                    tracing::warn!(
                        form = %form.id,
                        user = %approver.user_id,
                        "approver has no username, leaving it out"
                    );
                    None
                }
            }
        });
        XmlElement::new("approvals").with_children(approvals)
    }

    fn text_element(&self, name: &str, text: &str) -> XmlElement {
        XmlElement::new(name).with_escaped_text(self.escaper.escape(text))
    }
}

fn header_text<'t>(text: Option<&'t str>, placeholder: &'t str) -> &'t str {
    match text {
        Some(text) if !text.trim().is_empty() && text != "null" => text,
        _ => placeholder,
    }
}

fn task_element(trigger: &TriggerSpec) -> XmlElement {
    let task = XmlElement::new("task")
        .with_attr("type", "new")
        .with_attr("xmlform_id", trigger.target.as_str());
    if trigger.requires_date {
        task.with_attr("trigger_has_date", "1")
    } else {
        task
    }
}

/// XML 1.0 `Name` production, restricted to the characters a DOM would
/// accept without namespaces in play
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == ':')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
}
