//! In-memory resolver stores
//!
//! Backed by plain hash maps. Used by the CLI (loaded from a JSON
//! [`ResolverSnapshot`]) and throughout the tests.

use crate::error::ResolveError;
use crate::traits::{Resolvers, SystemListResolver, TaskRef, TaskResolver, UserResolver};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use xmlform_model::{SystemListId, UserId};

/// In-memory user store
#[derive(Debug, Clone, Default)]
pub struct InMemoryUsers {
    by_name: HashMap<String, UserId>,
    by_id: HashMap<UserId, String>,
}

impl InMemoryUsers {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user
    ///
    /// # Errors
    /// Returns [`ResolveError::DuplicateUsername`] if the login is taken.
    pub fn insert(&mut self, id: UserId, username: impl Into<String>) -> Result<(), ResolveError> {
        let username = username.into();
        if self.by_name.contains_key(&username) {
            return Err(ResolveError::DuplicateUsername(username));
        }
        if let Some(previous) = self.by_id.insert(id, username.clone()) {
            self.by_name.remove(&previous);
        }
        self.by_name.insert(username, id);
        Ok(())
    }

    /// Build from `(id, username)` pairs
    ///
    /// # Errors
    /// Returns the first duplicate login.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = (UserId, S)>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for (id, username) in entries {
            store.insert(id, username)?;
        }
        Ok(store)
    }

    /// Number of users
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl UserResolver for InMemoryUsers {
    fn by_username(&self, username: &str) -> Option<UserId> {
        self.by_name.get(username).copied()
    }

    fn username_of(&self, id: UserId) -> Option<String> {
        self.by_id.get(&id).cloned()
    }
}

/// In-memory system list store
///
/// Construction rejects duplicate ids and duplicate legacy values, so the
/// store is always bijective.
#[derive(Debug, Clone, Default)]
pub struct InMemorySystemLists {
    by_id: HashMap<SystemListId, String>,
    by_legacy: HashMap<String, SystemListId>,
}

impl InMemorySystemLists {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry
    ///
    /// # Errors
    /// Returns an error if the id or the legacy value is already present.
    pub fn insert(
        &mut self,
        id: SystemListId,
        legacy_value: impl Into<String>,
    ) -> Result<(), ResolveError> {
        let legacy_value = legacy_value.into();
        if self.by_id.contains_key(&id) {
            return Err(ResolveError::DuplicateSystemListId(id));
        }
        if self.by_legacy.contains_key(&legacy_value) {
            return Err(ResolveError::DuplicateLegacyValue(legacy_value));
        }
        self.by_legacy.insert(legacy_value.clone(), id);
        self.by_id.insert(id, legacy_value);
        Ok(())
    }

    /// Build from `(id, legacy value)` pairs
    ///
    /// # Errors
    /// Returns the first duplicate id or legacy value.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = (SystemListId, S)>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for (id, legacy_value) in entries {
            store.insert(id, legacy_value)?;
        }
        Ok(store)
    }

    /// All ids, sorted
    #[must_use]
    pub fn ids(&self) -> Vec<SystemListId> {
        let mut ids: Vec<_> = self.by_id.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl SystemListResolver for InMemorySystemLists {
    fn legacy_value_of(&self, id: SystemListId) -> Option<String> {
        self.by_id.get(&id).cloned()
    }

    fn find_by_legacy_value(&self, value: &str) -> Option<SystemListId> {
        self.by_legacy.get(value).copied()
    }
}

/// Check the system list round-trip invariant over a set of ids
///
/// # Errors
/// Returns [`ResolveError::RoundTrip`] for the first id that does not map back
/// to itself.
pub fn verify_round_trip(
    resolver: &dyn SystemListResolver,
    ids: impl IntoIterator<Item = SystemListId>,
) -> Result<(), ResolveError> {
    for id in ids {
        let legacy = resolver.legacy_value_of(id);
        let resolved = legacy
            .as_deref()
            .and_then(|value| resolver.find_by_legacy_value(value));
        if resolved != Some(id) {
            return Err(ResolveError::RoundTrip {
                id,
                legacy,
                resolved,
            });
        }
    }
    Ok(())
}

/// In-memory triggerable form store
#[derive(Debug, Clone, Default)]
pub struct InMemoryTasks {
    by_legacy_id: HashMap<String, TaskRef>,
}

impl InMemoryTasks {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a form
    pub fn insert(&mut self, legacy_form_id: impl Into<String>, task: TaskRef) {
        self.by_legacy_id.insert(legacy_form_id.into(), task);
    }

    /// With a form
    #[inline]
    #[must_use]
    pub fn with(mut self, legacy_form_id: impl Into<String>, task: TaskRef) -> Self {
        self.insert(legacy_form_id, task);
        self
    }

    /// Number of forms
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_legacy_id.len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_legacy_id.is_empty()
    }
}

impl TaskResolver for InMemoryTasks {
    fn resolve(&self, legacy_form_id: &str) -> Option<TaskRef> {
        self.by_legacy_id.get(legacy_form_id).cloned()
    }
}

/// Serializable contents of all three stores
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSnapshot {
    /// Users
    pub users: Vec<UserEntry>,
    /// System list entries
    pub system_lists: Vec<SystemListEntry>,
    /// Triggerable forms
    pub tasks: Vec<TaskEntry>,
}

/// User row of a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    /// User id
    pub id: UserId,
    /// Login name
    pub username: String,
}

/// System list row of a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemListEntry {
    /// Current id
    pub id: SystemListId,
    /// Legacy display value
    pub legacy_value: String,
}

/// Triggerable form row of a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    /// Legacy form id used by the model
    pub legacy_id: String,
    /// Id written to the XML
    pub id: String,
    /// Display name
    pub name: String,
}

/// The three stores built from a snapshot
#[derive(Debug, Clone, Default)]
pub struct InMemoryStores {
    /// Users
    pub users: InMemoryUsers,
    /// System list entries
    pub system_lists: InMemorySystemLists,
    /// Triggerable forms
    pub tasks: InMemoryTasks,
}

impl InMemoryStores {
    /// Share the stores as codec resolvers
    #[must_use]
    pub fn into_resolvers(self) -> Resolvers {
        Resolvers::new(
            Arc::new(self.users),
            Arc::new(self.system_lists),
            Arc::new(self.tasks),
        )
    }
}

impl ResolverSnapshot {
    /// Parse a JSON snapshot
    ///
    /// # Errors
    /// Returns [`ResolveError::Json`] for malformed input.
    pub fn from_json_str(source: &str) -> Result<Self, ResolveError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Read and parse a JSON snapshot file
    ///
    /// # Errors
    /// Returns IO or JSON errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResolveError> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|e| ResolveError::io_error(path, e))?;
        tracing::debug!(path = %path.display(), "loading resolver snapshot");
        Self::from_json_str(&source)
    }

    /// Build the in-memory stores
    ///
    /// # Errors
    /// Returns duplicate username, system list id or legacy value errors.
    pub fn into_stores(self) -> Result<InMemoryStores, ResolveError> {
        let users = InMemoryUsers::from_entries(
            self.users.into_iter().map(|entry| (entry.id, entry.username)),
        )?;
        let system_lists = InMemorySystemLists::from_entries(
            self.system_lists
                .into_iter()
                .map(|entry| (entry.id, entry.legacy_value)),
        )?;
        let tasks = self
            .tasks
            .into_iter()
            .fold(InMemoryTasks::new(), |tasks, entry| {
                tasks.with(entry.legacy_id, TaskRef::new(entry.id, entry.name))
            });

        tracing::debug!(
            users = users.len(),
            system_lists = system_lists.len(),
            tasks = tasks.len(),
            "resolver stores ready"
        );

        Ok(InMemoryStores {
            users,
            system_lists,
            tasks,
        })
    }
}
