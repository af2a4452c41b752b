//! Per-document lookup memoization
//!
//! A form routinely references the same user, list entry or task many times.
//! [`Memoized`] sits in front of [`Resolvers`] for the duration of one encode
//! or decode call so each distinct key reaches the backing store once.

use crate::traits::{Resolvers, TaskRef};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::hash::Hash;
use xmlform_model::{SystemListId, UserId};

/// Cache hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups forwarded to a resolver
    pub misses: u64,
}

/// Memoizing view over [`Resolvers`], scoped to one document
///
/// Not `Sync`: each call builds its own and drops it on return.
#[derive(Debug)]
pub struct Memoized<'r> {
    inner: &'r Resolvers,
    user_ids: RefCell<HashMap<String, Option<UserId>>>,
    usernames: RefCell<HashMap<UserId, Option<String>>>,
    legacy_values: RefCell<HashMap<SystemListId, Option<String>>>,
    system_list_ids: RefCell<HashMap<String, Option<SystemListId>>>,
    tasks: RefCell<HashMap<String, Option<TaskRef>>>,
    stats: Cell<MemoStats>,
}

impl<'r> Memoized<'r> {
    /// Wrap resolvers with empty caches
    #[must_use]
    pub fn new(inner: &'r Resolvers) -> Self {
        Self {
            inner,
            user_ids: RefCell::default(),
            usernames: RefCell::default(),
            legacy_values: RefCell::default(),
            system_list_ids: RefCell::default(),
            tasks: RefCell::default(),
            stats: Cell::default(),
        }
    }

    /// User id for a login name
    pub fn by_username(&self, username: &str) -> Option<UserId> {
        self.cached(&self.user_ids, username.to_string(), || {
            self.inner.users.by_username(username)
        })
    }

    /// Login name of a user
    pub fn username_of(&self, id: UserId) -> Option<String> {
        self.cached(&self.usernames, id, || self.inner.users.username_of(id))
    }

    /// Legacy display value of a system list entry
    pub fn legacy_value_of(&self, id: SystemListId) -> Option<String> {
        self.cached(&self.legacy_values, id, || {
            self.inner.system_lists.legacy_value_of(id)
        })
    }

    /// System list entry carrying a legacy display value
    pub fn find_by_legacy_value(&self, value: &str) -> Option<SystemListId> {
        self.cached(&self.system_list_ids, value.to_string(), || {
            self.inner.system_lists.find_by_legacy_value(value)
        })
    }

    /// Triggerable form for a legacy form id
    pub fn resolve_task(&self, legacy_form_id: &str) -> Option<TaskRef> {
        self.cached(&self.tasks, legacy_form_id.to_string(), || {
            self.inner.tasks.resolve(legacy_form_id)
        })
    }

    /// Counters so far
    #[inline]
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        self.stats.get()
    }

    fn cached<K, V>(&self, cache: &RefCell<HashMap<K, V>>, key: K, load: impl FnOnce() -> V) -> V
    where
        K: Eq + Hash,
        V: Clone,
    {
        let mut stats = self.stats.get();
        if let Some(value) = cache.borrow().get(&key) {
            stats.hits += 1;
            self.stats.set(stats);
            return value.clone();
        }

        stats.misses += 1;
        self.stats.set(stats);
        let value = load();
        cache.borrow_mut().insert(key, value.clone());
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{SystemListResolver, TaskResolver, UserResolver};
    use mockall::mock;
    use std::sync::Arc;

    mock! {
        Users {}
        impl UserResolver for Users {
            fn by_username(&self, username: &str) -> Option<UserId>;
            fn username_of(&self, id: UserId) -> Option<String>;
        }
    }

    mock! {
        Lists {}
        impl SystemListResolver for Lists {
            fn legacy_value_of(&self, id: SystemListId) -> Option<String>;
            fn find_by_legacy_value(&self, value: &str) -> Option<SystemListId>;
        }
    }

    mock! {
        Tasks {}
        impl TaskResolver for Tasks {
            fn resolve(&self, legacy_form_id: &str) -> Option<TaskRef>;
        }
    }

    fn resolvers(users: MockUsers, lists: MockLists, tasks: MockTasks) -> Resolvers {
        Resolvers::new(Arc::new(users), Arc::new(lists), Arc::new(tasks))
    }

    #[test]
    fn repeated_username_lookup_hits_store_once() {
        let mut users = MockUsers::new();
        users
            .expect_by_username()
            .withf(|username: &str| username == "ada")
            .times(1)
            .return_const(Some(UserId(1)));

        let resolvers = resolvers(users, MockLists::new(), MockTasks::new());
        let memo = Memoized::new(&resolvers);

        for _ in 0..3 {
            assert_eq!(memo.by_username("ada"), Some(UserId(1)));
        }
        assert_eq!(memo.stats(), MemoStats { hits: 2, misses: 1 });
    }

    #[test]
    fn misses_are_cached_too() {
        let mut lists = MockLists::new();
        lists
            .expect_find_by_legacy_value()
            .withf(|value: &str| value == "Unknown")
            .times(1)
            .return_const(None::<SystemListId>);

        let resolvers = resolvers(MockUsers::new(), lists, MockTasks::new());
        let memo = Memoized::new(&resolvers);

        assert_eq!(memo.find_by_legacy_value("Unknown"), None);
        assert_eq!(memo.find_by_legacy_value("Unknown"), None);
    }

    #[test]
    fn distinct_keys_are_forwarded() {
        let mut tasks = MockTasks::new();
        tasks
            .expect_resolve()
            .times(2)
            .returning(|id: &str| Some(TaskRef::new(format!("t-{id}"), "Task")));

        let resolvers = resolvers(MockUsers::new(), MockLists::new(), tasks);
        let memo = Memoized::new(&resolvers);

        assert_eq!(memo.resolve_task("1").map(|t| t.id).as_deref(), Some("t-1"));
        assert_eq!(memo.resolve_task("2").map(|t| t.id).as_deref(), Some("t-2"));
        assert_eq!(memo.resolve_task("1").map(|t| t.id).as_deref(), Some("t-1"));
        assert_eq!(memo.stats().misses, 2);
    }

    #[test]
    fn fresh_memo_starts_cold() {
        let mut lists = MockLists::new();
        lists
            .expect_legacy_value_of()
            .times(2)
            .return_const(Some("High".to_string()));

        let resolvers = resolvers(MockUsers::new(), lists, MockTasks::new());

        let first = Memoized::new(&resolvers);
        assert_eq!(first.legacy_value_of(SystemListId(3)).as_deref(), Some("High"));
        drop(first);

        let second = Memoized::new(&resolvers);
        assert_eq!(second.legacy_value_of(SystemListId(3)).as_deref(), Some("High"));
    }
}
