//! Error types for resolver stores

use std::path::PathBuf;
use xmlform_model::SystemListId;

/// Errors while building or verifying resolver stores
///
/// Lookups themselves never fail: an unresolved reference is `None`.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Two users share a login name
    #[error("duplicate username: '{0}'")]
    DuplicateUsername(String),

    /// Two system list entries share an id
    #[error("duplicate system list id: {0}")]
    DuplicateSystemListId(SystemListId),

    /// Two system list entries share a legacy value
    #[error("duplicate system list legacy value: '{0}'")]
    DuplicateLegacyValue(String),

    /// `find_by_legacy_value(legacy_value_of(id)) != id`
    #[error("system list entry {id} does not round-trip (legacy value {legacy:?}, resolves to {resolved:?})")]
    RoundTrip {
        /// Entry that failed
        id: SystemListId,
        /// Its legacy value, if any
        legacy: Option<String>,
        /// What the legacy value resolves back to
        resolved: Option<SystemListId>,
    },

    /// Snapshot file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Snapshot file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON for the snapshot schema
    #[error("invalid resolver snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResolveError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
