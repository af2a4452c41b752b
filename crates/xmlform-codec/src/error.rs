//! Error types for the codec
//!
//! - [`ParseError`]: legacy text is not a well-formed document (decode)
//! - [`EncodeError`]: a form cannot be rendered (encode)
//! - [`CodecError`]: umbrella for building a codec from files

use std::path::PathBuf;
use xmlform_catalog::CatalogError;
use xmlform_model::{FieldId, FieldTypeId};
use xmlform_resolve::ResolveError;

/// Errors while reading legacy XML
///
/// Never escapes [`crate::FormDecoder::decode`]; it is handed to the
/// [`crate::DecodeLogger`] instead.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Tokenizer error (mismatched end tag, bad escape, ...)
    #[error("malformed xml at byte {position}: {source}")]
    Syntax {
        /// Byte offset reached by the reader
        position: usize,
        /// Tokenizer error
        #[source]
        source: quick_xml::Error,
    },

    /// Malformed or duplicate attribute
    #[error("malformed attribute at byte {position}: {source}")]
    Attribute {
        /// Byte offset reached by the reader
        position: usize,
        /// Attribute error
        #[source]
        source: quick_xml::events::attributes::AttrError,
    },

    /// Element or attribute name is not UTF-8
    #[error("invalid utf-8 in markup: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Input ended inside an element
    #[error("unclosed element: <{0}>")]
    Unclosed(String),

    /// No root element
    #[error("document has no root element")]
    NoRoot,

    /// A second top-level element
    #[error("document has more than one root element: <{first}> and <{second}>")]
    MultipleRoots {
        /// Name of the root element
        first: String,
        /// Name of the extra element
        second: String,
    },

    /// Non-whitespace text before or after the root element
    #[error("text outside the root element at byte {position}")]
    TextOutsideRoot {
        /// Byte offset reached by the reader
        position: usize,
    },
}

/// Errors while rendering a form
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// A field references a type the catalog does not know
    #[error("field {field} has unknown field type {field_type}")]
    UnknownFieldType {
        /// Offending field
        field: FieldId,
        /// Its unknown type
        field_type: FieldTypeId,
    },

    /// Writer failure
    #[error("xml writer error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON encoding of a file value failed
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Writer produced non UTF-8 output
    #[error("encoded document is not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Errors while assembling a codec from configuration files
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Catalog failed to load or validate
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Resolver snapshot failed to load or verify
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Encoding failed
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Codec configuration is not valid TOML for the schema
    #[error("invalid codec config: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Config file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl CodecError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
