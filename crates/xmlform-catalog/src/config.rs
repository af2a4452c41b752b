//! Catalog configuration
//!
//! The catalog is data: a two-column type table plus named sets. It is read
//! from TOML and validated by [`crate::FieldTypeCatalog::from_config`].

use crate::behavior::BehaviorFlag;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use xmlform_model::FieldTypeId;

/// Built-in catalog source
pub const BUILTIN_CATALOG: &str = include_str!("../catalog.toml");

fn default_delimiter() -> String {
    "|".to_string()
}

/// Raw catalog definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Type used for unmapped legacy names
    pub default_type: String,

    /// Type whose values are system list ids
    pub system_list_type: String,

    /// Separator of multi-selection values
    #[serde(default = "default_delimiter")]
    pub multi_value_delimiter: String,

    /// Current/legacy mapping table
    pub types: Vec<FieldTypeRow>,

    /// Behavior sets, by current type name
    #[serde(default)]
    pub behavior: BehaviorSets,

    /// Attribute name sets used by the decoder
    #[serde(default)]
    pub attributes: AttributeSets,
}

impl CatalogConfig {
    /// Parse the built-in catalog
    ///
    /// # Errors
    /// Only fails if the embedded TOML is broken.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse catalog TOML
    ///
    /// # Errors
    /// Returns [`CatalogError::Toml`] for malformed input.
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a catalog file
    ///
    /// # Errors
    /// Returns IO or TOML errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;
        tracing::debug!(path = %path.display(), "loading field type catalog");
        Self::from_toml_str(&source)
    }
}

/// One row of the mapping table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTypeRow {
    /// Current type id
    pub id: FieldTypeId,
    /// Current type name
    pub name: String,
    /// Legacy dialect name
    pub legacy: String,
}

/// Behavior sets keyed by flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorSets {
    /// Value as element text
    pub infix_value: Vec<String>,
    /// Value as `src`
    pub image: Vec<String>,
    /// Value as `value` + `data-value`
    pub plain_value: Vec<String>,
    /// Value as JSON `data-files` + `data-value`
    pub embed_files: Vec<String>,
    /// `min`/`max` get a `length` suffix
    pub min_max_length: Vec<String>,
    /// Delimiter-joined multi-selection
    pub multi_valued: Vec<String>,
    /// Decoder always reads element text
    pub text_fallback: Vec<String>,
}

impl BehaviorSets {
    /// Members of the set behind a flag
    ///
    /// [`BehaviorFlag::SystemList`] is not a set; it comes from
    /// [`CatalogConfig::system_list_type`].
    #[must_use]
    pub fn members(&self, flag: BehaviorFlag) -> &[String] {
        match flag {
            BehaviorFlag::InfixValue => &self.infix_value,
            BehaviorFlag::Image => &self.image,
            BehaviorFlag::PlainValue => &self.plain_value,
            BehaviorFlag::EmbedFiles => &self.embed_files,
            BehaviorFlag::MinMaxLength => &self.min_max_length,
            BehaviorFlag::MultiValued => &self.multi_valued,
            BehaviorFlag::TextFallback => &self.text_fallback,
            BehaviorFlag::SystemList => &[],
        }
    }
}

/// Attribute name sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSets {
    /// Dropped on decode
    pub ignored: Vec<String>,
    /// Copied to top-level field columns on decode
    pub on_field: Vec<String>,
    /// Copied to the value slot on decode
    pub value: Vec<String>,
}
