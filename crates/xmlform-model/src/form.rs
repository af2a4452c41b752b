//! Form definition model (encode input)
//!
//! A [`FormModel`] is assembled by the data-access layer and handed to the
//! encoder fully populated. Nothing in here talks to a store.

use crate::ids::{FieldId, FieldTypeId, FormId, UserId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Form definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormModel {
    /// Form id
    pub id: FormId,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Free-text instructions
    #[serde(default)]
    pub instructions: Option<String>,
    /// Fields in display order
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Keyword tags
    #[serde(default)]
    pub keywords: IndexSet<String>,
    /// Approvers in approval order
    #[serde(default)]
    pub approvers: Vec<Approver>,
    /// Form to instantiate when this form is actioned
    #[serde(default)]
    pub trigger: Option<TriggerSpec>,
    /// Notification addresses
    #[serde(default)]
    pub email_notifications: IndexSet<String>,
}

impl FormModel {
    /// Create empty form with the given id
    #[inline]
    #[must_use]
    pub fn new(id: FormId) -> Self {
        Self {
            id,
            description: None,
            instructions: None,
            fields: Vec::new(),
            keywords: IndexSet::new(),
            approvers: Vec::new(),
            trigger: None,
            email_notifications: IndexSet::new(),
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With instructions
    #[inline]
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Append a field
    #[inline]
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a keyword (duplicates are ignored)
    #[inline]
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.insert(keyword.into());
        self
    }

    /// Append an approver
    #[inline]
    #[must_use]
    pub fn with_approver(mut self, user_id: UserId) -> Self {
        self.approvers.push(Approver::new(user_id));
        self
    }

    /// With form-level trigger
    #[inline]
    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerSpec) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Add a notification address (duplicates are ignored)
    #[inline]
    #[must_use]
    pub fn with_email_notification(mut self, address: impl Into<String>) -> Self {
        self.email_notifications.insert(address.into());
        self
    }
}

/// A single form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field id
    pub id: FieldId,
    /// Field name
    #[serde(default)]
    pub name: String,
    /// Field description
    #[serde(default)]
    pub description: String,
    /// Field instructions
    #[serde(default)]
    pub instructions: String,
    /// Keyword string, stored as-is
    #[serde(default)]
    pub keywords: String,
    /// Current field type
    pub field_type: FieldTypeId,
    /// Raw attributes in stored order
    #[serde(default)]
    pub attributes: Vec<AttributeKv>,
    /// Selectable options in display order
    #[serde(default)]
    pub options: Vec<FieldOption>,
}

impl Field {
    /// Create field with no attributes or options
    #[inline]
    #[must_use]
    pub fn new(id: FieldId, name: impl Into<String>, field_type: FieldTypeId) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            instructions: String::new(),
            keywords: String::new(),
            field_type,
            attributes: Vec::new(),
            options: Vec::new(),
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With instructions
    #[inline]
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// With keyword string
    #[inline]
    #[must_use]
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    /// Append an attribute
    #[inline]
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(AttributeKv::new(name, value));
        self
    }

    /// Append an option
    #[inline]
    #[must_use]
    pub fn with_option(mut self, option: FieldOption) -> Self {
        self.options.push(option);
        self
    }

    /// Stored scalar value
    ///
    /// The first attribute named `value`, compared case-insensitively.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case("value"))
            .map(|attr| attr.value.as_str())
    }
}

/// Raw field attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeKv {
    /// Attribute name
    pub name: String,
    /// Raw attribute value
    #[serde(default)]
    pub value: String,
}

impl AttributeKv {
    /// Create attribute
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Selectable option of a list-style field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Option name (also its value)
    pub name: String,
    /// Form to instantiate when this option is chosen
    #[serde(default)]
    pub trigger: Option<TriggerSpec>,
}

impl FieldOption {
    /// Create option without a trigger
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trigger: None,
        }
    }

    /// With trigger
    #[inline]
    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerSpec) -> Self {
        self.trigger = Some(trigger);
        self
    }
}

/// Form approver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approver {
    /// Approving user
    pub user_id: UserId,
}

impl Approver {
    /// Create approver for a user
    #[inline]
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Reference to a form that gets instantiated on action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSpec {
    /// Target form reference
    pub target: String,
    /// Whether the triggered form needs a date
    #[serde(default)]
    pub requires_date: bool,
}

impl TriggerSpec {
    /// Create trigger without a date requirement
    #[inline]
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            requires_date: false,
        }
    }

    /// Require a trigger date
    #[inline]
    #[must_use]
    pub fn with_date(mut self) -> Self {
        self.requires_date = true;
        self
    }
}
