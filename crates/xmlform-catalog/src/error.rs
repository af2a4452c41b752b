//! Error types for catalog loading and validation

use crate::behavior::{BehaviorFlag, ValueCarrier};
use std::path::PathBuf;
use xmlform_model::FieldTypeId;

/// Errors while building a [`crate::FieldTypeCatalog`]
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Catalog file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Catalog text is not valid TOML for the catalog schema
    #[error("invalid catalog: {0}")]
    Toml(#[from] toml::de::Error),

    /// Two rows share an id
    #[error("duplicate field type id: {0}")]
    DuplicateTypeId(FieldTypeId),

    /// Two rows share a current name
    #[error("duplicate field type name: '{0}'")]
    DuplicateTypeName(String),

    /// Two rows share a legacy name
    #[error("duplicate legacy type name: '{0}'")]
    DuplicateLegacyName(String),

    /// A behavior set names a type missing from the table
    #[error("{flag} set references unknown field type '{name}'")]
    UnknownTypeInSet {
        /// The set
        flag: BehaviorFlag,
        /// The unknown type name
        name: String,
    },

    /// The default type is missing from the table
    #[error("default type '{0}' is not in the type table")]
    UnknownDefaultType(String),

    /// The system list type is missing from the table
    #[error("system list type '{0}' is not in the type table")]
    UnknownSystemListType(String),

    /// A type would carry its value in more than one representation
    #[error("field type '{name}' has conflicting value carriers: {carriers:?}")]
    ConflictingCarriers {
        /// Field type name
        name: String,
        /// Every carrier its flags select
        carriers: Vec<ValueCarrier>,
    },

    /// Multi-value delimiter is empty
    #[error("multi-value delimiter must not be empty")]
    EmptyDelimiter,
}

impl CatalogError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
