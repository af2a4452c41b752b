//! xmlform Codec
//!
//! Bidirectional translation between form definitions and the legacy XML
//! form dialect.
//!
//! # Core Operations
//!
//! - **Encode**: [`FormModel`](xmlform_model::FormModel) -> XML text
//! - **Decode**: XML text -> [`FormRecord`](xmlform_model::FormRecord)
//!
//! # Architecture
//!
//! ```text
//! FormModel → FormEncoder → XmlElement tree → writer → XML
//! XML → reader → XmlDocument → FormDecoder → FormRecord
//!                    │
//!                    └─ parse failure → DecodeLogger → empty record
//! ```
//!
//! Both directions consult the [`FieldTypeCatalog`](xmlform_catalog::FieldTypeCatalog)
//! and the injected [`Resolvers`](xmlform_resolve::Resolvers), memoized per
//! document.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use xmlform_catalog::FieldTypeCatalog;
//! use xmlform_codec::{EntityRef, FormCodec};
//! use xmlform_model::{Field, FieldId, FormId, FormModel};
//! use xmlform_resolve::{InMemorySystemLists, InMemoryTasks, InMemoryUsers, Resolvers};
//!
//! let catalog = Arc::new(FieldTypeCatalog::builtin().unwrap());
//! let text_field = catalog.by_name("text_field").unwrap().id;
//! let resolvers = Resolvers::new(
//!     Arc::new(InMemoryUsers::new()),
//!     Arc::new(InMemorySystemLists::new()),
//!     Arc::new(InMemoryTasks::new()),
//! );
//! let codec = FormCodec::new(catalog, resolvers);
//!
//! let form = FormModel::new(FormId(1))
//!     .with_field(Field::new(FieldId(1), "title", text_field).with_attribute("value", "Hi"));
//! let xml = codec.encode(&form).unwrap();
//! assert!(xml.contains(r#"<field type="text" name="title" id="1_text""#));
//!
//! let record = codec.decode(&EntityRef::xml_form(1), &xml);
//! assert_eq!(record.fields.unwrap()[0].value().as_text(), Some("Hi"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod codec;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod escape;
pub mod logger;
mod numeric;
pub mod xml;

// Re-exports for convenience
pub use codec::{FormCodec, FormCodecBuilder};
pub use config::{CodecConfig, DEFAULT_DESCRIPTION_PLACEHOLDER, DEFAULT_INSTRUCTIONS_PLACEHOLDER};
pub use decode::FormDecoder;
pub use encode::FormEncoder;
pub use error::{CodecError, EncodeError, ParseError};
pub use escape::{Escaper, HtmlEscaper};
pub use logger::{DecodeLogger, EntityKind, EntityRef, LoggedFailure, MemoryLogger, TracingLogger};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the codec
    pub use crate::codec::FormCodec;
    pub use crate::config::CodecConfig;
    pub use crate::error::{CodecError, EncodeError, ParseError};
    pub use crate::escape::{Escaper, HtmlEscaper};
    pub use crate::logger::{DecodeLogger, EntityKind, EntityRef, TracingLogger};
    pub use xmlform_catalog::FieldTypeCatalog;
    pub use xmlform_model::{FormModel, FormRecord};
    pub use xmlform_resolve::Resolvers;
}
