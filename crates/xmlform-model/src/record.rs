//! Decoded form record (decode output)
//!
//! The decoder produces a plain structure that mirrors what the persistence
//! layer stores. Each top-level section is optional and only present when the
//! source document carried it, so the empty record serializes to `{}`.

use crate::ids::{FieldTypeId, UserId};
use indexmap::IndexMap;
use serde::Serialize;

/// Attribute key holding the field value
pub const VALUE_KEY: &str = "value";

/// Decoded form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormRecord {
    /// Description and instructions, from the `form` element
    #[serde(flatten)]
    pub header: Option<FormHeader>,

    /// Decoded fields, from the `fields` element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldRecord>>,

    /// Keyword tags, from the `keywords` element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// Resolved approvers, from the `approvals` element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approvers: Option<Vec<UserId>>,

    /// Form-level trigger, from the first `task` element
    #[serde(flatten)]
    pub trigger: Option<TriggerRecord>,

    /// Notification addresses, from the `communications` element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<Vec<String>>,
}

impl FormRecord {
    /// True when no section was decoded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.header.is_none()
            && self.fields.is_none()
            && self.keywords.is_none()
            && self.approvers.is_none()
            && self.trigger.is_none()
            && self.email_notifications.is_none()
    }
}

/// Header texts of the form element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormHeader {
    /// `fdescription` text, `None` when the element was absent
    pub description: Option<String>,
    /// `finstructions` text, `None` when the element was absent
    pub instructions: Option<String>,
}

/// Form-level trigger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TriggerRecord {
    /// Legacy id of the form to instantiate
    pub triggered_task_id: Option<String>,
    /// 1 when the trigger needs a date, else 0
    pub trigger_has_date: u8,
}

/// Decoded attribute value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// No value
    #[default]
    Null,
    /// Scalar text
    Text(String),
    /// Multi-selection
    List(Vec<String>),
    /// Integer flag
    Int(i64),
}

impl AttributeValue {
    /// Text value, or `Null` for `None`
    #[inline]
    #[must_use]
    pub fn from_option(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }

    /// True for `Null` and the empty string
    ///
    /// Lists and integers are never empty; an empty list still marks a
    /// multi-valued slot.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.is_empty(),
            Self::List(_) | Self::Int(_) => false,
        }
    }

    /// True for the list variant
    #[inline]
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Scalar text, if any
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// List items, if any
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Decoded field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldRecord {
    /// Current field type, resolved from the legacy `type`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<FieldTypeId>,

    /// Top-level field columns (`name`, `description`, ...)
    #[serde(flatten)]
    pub properties: IndexMap<String, String>,

    /// Field attributes; always holds a `value` slot
    pub attributes: IndexMap<String, AttributeValue>,

    /// Decoded options, when the field had any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionRecord>>,
}

impl FieldRecord {
    /// Create record with a pre-seeded value slot
    #[must_use]
    pub fn new(initial_value: AttributeValue) -> Self {
        let mut attributes = IndexMap::new();
        attributes.insert(VALUE_KEY.to_string(), initial_value);
        Self {
            field_id: None,
            properties: IndexMap::new(),
            attributes,
            options: None,
        }
    }

    /// Current value slot
    #[must_use]
    pub fn value(&self) -> &AttributeValue {
        static NULL: AttributeValue = AttributeValue::Null;
        self.attributes.get(VALUE_KEY).unwrap_or(&NULL)
    }

    /// Replace the value slot
    pub fn set_value(&mut self, value: AttributeValue) {
        self.attributes.insert(VALUE_KEY.to_string(), value);
    }

    /// Mutable access to the value slot
    pub fn value_mut(&mut self) -> &mut AttributeValue {
        self.attributes.entry(VALUE_KEY.to_string()).or_default()
    }

    /// Attribute by name
    #[inline]
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Top-level property by name
    #[inline]
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}

/// Decoded option
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionRecord {
    /// Option text
    pub name: String,

    /// Present when the option carried `data-trigger-task`; inner `None` for
    /// an empty attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggered_task_id: Option<Option<String>>,

    /// Present when the option carried `data-trigger-has-date`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_has_date: Option<i64>,
}

impl OptionRecord {
    /// Create option record with just a name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            triggered_task_id: None,
            trigger_has_date: None,
        }
    }
}
