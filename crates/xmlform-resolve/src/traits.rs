//! Resolver interfaces
//!
//! The codec never touches a store directly. It is handed these three
//! collaborators instead, bundled in [`Resolvers`].

use std::fmt;
use std::sync::Arc;
use xmlform_model::{SystemListId, UserId};

/// Username <-> user id lookups
pub trait UserResolver: Send + Sync {
    /// User id for a login name
    fn by_username(&self, username: &str) -> Option<UserId>;

    /// Login name of a user
    fn username_of(&self, id: UserId) -> Option<String>;
}

/// System list id <-> legacy display value lookups
///
/// Implementations must be bijective over their active entries, otherwise
/// values silently change when they pass through the legacy dialect.
pub trait SystemListResolver: Send + Sync {
    /// Legacy display value of an entry
    fn legacy_value_of(&self, id: SystemListId) -> Option<String>;

    /// Entry carrying a legacy display value
    fn find_by_legacy_value(&self, value: &str) -> Option<SystemListId>;
}

/// Legacy form id -> triggerable form lookups
pub trait TaskResolver: Send + Sync {
    /// Triggerable form for a legacy form id
    fn resolve(&self, legacy_form_id: &str) -> Option<TaskRef>;
}

/// A triggerable form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskRef {
    /// Id written to `data-trigger-task`
    pub id: String,
    /// Display name written to `data-trigger-task-name`
    pub name: String,
}

impl TaskRef {
    /// Create task reference
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The three resolvers the codec depends on
#[derive(Clone)]
pub struct Resolvers {
    /// User lookups
    pub users: Arc<dyn UserResolver>,
    /// System list lookups
    pub system_lists: Arc<dyn SystemListResolver>,
    /// Triggered task lookups
    pub tasks: Arc<dyn TaskResolver>,
}

impl Resolvers {
    /// Bundle resolvers
    #[inline]
    #[must_use]
    pub fn new(
        users: Arc<dyn UserResolver>,
        system_lists: Arc<dyn SystemListResolver>,
        tasks: Arc<dyn TaskResolver>,
    ) -> Self {
        Self {
            users,
            system_lists,
            tasks,
        }
    }
}

impl fmt::Debug for Resolvers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolvers").finish_non_exhaustive()
    }
}
