//! Codec configuration

use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Description written when a form has none
pub const DEFAULT_DESCRIPTION_PLACEHOLDER: &str = "Please input the form description here";

/// Instructions written when a form has none
pub const DEFAULT_INSTRUCTIONS_PLACEHOLDER: &str = "Please input the form instructions here";

/// Encoder settings
///
/// # Example
///
/// ```toml
/// form_version = "1"
/// prefix_numeric_option_names = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// `fdescription` text for a blank description
    pub description_placeholder: String,

    /// `finstructions` text for blank instructions
    pub instructions_placeholder: String,

    /// Prefix `_` to option names starting with a digit
    pub prefix_numeric_option_names: bool,

    /// `fversion` text
    pub form_version: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            description_placeholder: DEFAULT_DESCRIPTION_PLACEHOLDER.to_string(),
            instructions_placeholder: DEFAULT_INSTRUCTIONS_PLACEHOLDER.to_string(),
            prefix_numeric_option_names: true,
            form_version: "1".to_string(),
        }
    }
}

impl CodecConfig {
    /// Parse config TOML; absent keys keep their defaults
    ///
    /// # Errors
    /// Returns [`CodecError::Config`] for malformed input.
    pub fn from_toml_str(source: &str) -> Result<Self, CodecError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a config file
    ///
    /// # Errors
    /// Returns IO or TOML errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| CodecError::io_error(path, e))?;
        tracing::debug!(path = %path.display(), "loading codec config");
        Self::from_toml_str(&source)
    }

    /// Set the description placeholder
    #[must_use]
    pub fn with_description_placeholder(mut self, text: impl Into<String>) -> Self {
        self.description_placeholder = text.into();
        self
    }

    /// Set the instructions placeholder
    #[must_use]
    pub fn with_instructions_placeholder(mut self, text: impl Into<String>) -> Self {
        self.instructions_placeholder = text.into();
        self
    }

    /// Enable or disable the digit prefix on option names
    #[must_use]
    pub fn with_numeric_option_prefix(mut self, enabled: bool) -> Self {
        self.prefix_numeric_option_names = enabled;
        self
    }

    /// Set the form version
    #[must_use]
    pub fn with_form_version(mut self, version: impl Into<String>) -> Self {
        self.form_version = version.into();
        self
    }
}
