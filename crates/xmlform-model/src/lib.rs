//! xmlform Model
//!
//! The two in-memory shapes the codec transforms between.
//!
//! # Overview
//!
//! - **FormModel**: fully populated form definition handed to the encoder
//! - **FormRecord**: plain structured record produced by the decoder
//!
//! # Example
//!
//! ```rust
//! use xmlform_model::{Field, FieldId, FieldOption, FieldTypeId, FormId, FormModel};
//!
//! let form = FormModel::new(FormId(1))
//!     .with_description("Site inspection")
//!     .with_field(
//!         Field::new(FieldId(10), "hazards", FieldTypeId(6))
//!             .with_attribute("value", "fire|flood")
//!             .with_option(FieldOption::new("fire"))
//!             .with_option(FieldOption::new("flood")),
//!     );
//!
//! assert_eq!(form.fields[0].value(), Some("fire|flood"));
//! ```

#![warn(missing_docs)]

pub mod form;
pub mod ids;
pub mod record;

// Re-exports
pub use form::{Approver, AttributeKv, Field, FieldOption, FormModel, TriggerSpec};
pub use ids::{FieldId, FieldTypeId, FormId, SystemListId, UserId};
pub use record::{
    AttributeValue, FieldRecord, FormHeader, FormRecord, OptionRecord, TriggerRecord, VALUE_KEY,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building and inspecting forms
    pub use crate::{
        AttributeValue, Field, FieldId, FieldOption, FieldRecord, FieldTypeId, FormId, FormModel,
        FormRecord, TriggerSpec, UserId,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
