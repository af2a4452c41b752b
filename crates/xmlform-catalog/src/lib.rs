//! xmlform Field Type Catalog
//!
//! Classification of field types and the legacy/current type mapping.
//!
//! # Overview
//!
//! - **CatalogConfig**: raw TOML definition (type table + named sets)
//! - **FieldTypeCatalog**: validated, read-only lookups
//! - **Behavior**: per-type set of [`BehaviorFlag`]s with a single
//!   [`ValueCarrier`]
//!
//! # Example
//!
//! ```rust
//! use xmlform_catalog::{BehaviorFlag, FieldTypeCatalog, ValueCarrier};
//!
//! let catalog = FieldTypeCatalog::builtin().unwrap();
//!
//! let checkbox = catalog.legacy_to_current("checkboxlist");
//! assert!(checkbox.behavior.contains(BehaviorFlag::MultiValued));
//!
//! // Unmapped legacy names never fail
//! assert_eq!(catalog.legacy_to_current("unheard-of").name, "text_field");
//!
//! let area = catalog.by_name("text_area").unwrap();
//! assert_eq!(catalog.classify(area.id).carrier(), Some(ValueCarrier::Text));
//! ```

#![warn(missing_docs)]

pub mod behavior;
pub mod catalog;
pub mod config;
pub mod error;

// Re-exports
pub use behavior::{Behavior, BehaviorFlag, ValueCarrier};
pub use catalog::{FieldType, FieldTypeCatalog};
pub use config::{AttributeSets, BehaviorSets, CatalogConfig, FieldTypeRow, BUILTIN_CATALOG};
pub use error::CatalogError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
