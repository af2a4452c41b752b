//! xmlform Reference Resolvers
//!
//! Lookups the codec needs from the outside world, behind injectable traits.
//!
//! # Overview
//!
//! - **UserResolver**: username <-> user id
//! - **SystemListResolver**: system list id <-> legacy display value
//! - **TaskResolver**: legacy form id -> triggerable form
//! - **Memoized**: per-document cache in front of all three
//!
//! Unresolved references are `None`, never errors.
//!
//! # Example
//!
//! ```rust
//! use xmlform_model::SystemListId;
//! use xmlform_resolve::{verify_round_trip, InMemorySystemLists, SystemListResolver};
//!
//! let lists = InMemorySystemLists::from_entries([
//!     (SystemListId(1), "Low"),
//!     (SystemListId(2), "High"),
//! ])
//! .unwrap();
//!
//! assert_eq!(lists.find_by_legacy_value("High"), Some(SystemListId(2)));
//! verify_round_trip(&lists, lists.ids()).unwrap();
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod memo;
pub mod memory;
pub mod traits;

// Re-exports
pub use error::ResolveError;
pub use memo::{MemoStats, Memoized};
pub use memory::{
    verify_round_trip, InMemoryStores, InMemorySystemLists, InMemoryTasks, InMemoryUsers,
    ResolverSnapshot, SystemListEntry, TaskEntry, UserEntry,
};
pub use traits::{Resolvers, SystemListResolver, TaskRef, TaskResolver, UserResolver};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
