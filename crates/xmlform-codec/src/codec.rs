//! [`FormCodec`]: the shared, thread-safe entry point

use crate::config::CodecConfig;
use crate::decode::FormDecoder;
use crate::encode::FormEncoder;
use crate::error::EncodeError;
use crate::escape::{Escaper, HtmlEscaper};
use crate::logger::{DecodeLogger, EntityRef, TracingLogger};
use std::fmt;
use std::sync::Arc;
use xmlform_catalog::FieldTypeCatalog;
use xmlform_model::{FormModel, FormRecord};
use xmlform_resolve::{Memoized, Resolvers};

/// Encoder and decoder over one catalog and one set of resolvers
///
/// Cheap to clone and `Send + Sync`. Every call builds a fresh per-document
/// lookup cache.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use xmlform_catalog::FieldTypeCatalog;
/// use xmlform_codec::{EntityRef, FormCodec};
/// use xmlform_model::{FormId, FormModel};
/// # fn resolvers() -> xmlform_resolve::Resolvers { unimplemented!() }
///
/// let catalog = Arc::new(FieldTypeCatalog::builtin()?);
/// let codec = FormCodec::builder(catalog, resolvers()).build();
///
/// let xml = codec.encode(&FormModel::new(FormId::new(1)))?;
/// let record = codec.decode(&EntityRef::xml_form(1), &xml);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct FormCodec {
    catalog: Arc<FieldTypeCatalog>,
    resolvers: Resolvers,
    escaper: Arc<dyn Escaper>,
    logger: Arc<dyn DecodeLogger>,
    config: CodecConfig,
}

impl FormCodec {
    /// Codec with the HTML escaper, tracing logger and default config
    #[must_use]
    pub fn new(catalog: Arc<FieldTypeCatalog>, resolvers: Resolvers) -> Self {
        Self::builder(catalog, resolvers).build()
    }

    /// Start building a codec
    #[must_use]
    pub fn builder(catalog: Arc<FieldTypeCatalog>, resolvers: Resolvers) -> FormCodecBuilder {
        FormCodecBuilder {
            catalog,
            resolvers,
            escaper: Arc::new(HtmlEscaper),
            logger: Arc::new(TracingLogger),
            config: CodecConfig::default(),
        }
    }

    /// Encode a form definition as legacy XML
    ///
    /// # Errors
    ///
    /// See [`FormEncoder::encode`].
    pub fn encode(&self, form: &FormModel) -> Result<String, EncodeError> {
        FormEncoder::new(
            &self.catalog,
            Memoized::new(&self.resolvers),
            self.escaper.as_ref(),
            &self.config,
        )
        .encode(form)
    }

    /// Decode legacy XML; malformed input is logged and yields the empty record
    #[must_use]
    pub fn decode(&self, entity: &EntityRef, xml: &str) -> FormRecord {
        FormDecoder::new(
            &self.catalog,
            Memoized::new(&self.resolvers),
            self.escaper.as_ref(),
            self.logger.as_ref(),
        )
        .decode(entity, xml)
    }

    /// Catalog in use
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &FieldTypeCatalog {
        &self.catalog
    }

    /// Config in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

impl fmt::Debug for FormCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormCodec")
            .field("types", &self.catalog.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`FormCodec`]
pub struct FormCodecBuilder {
    catalog: Arc<FieldTypeCatalog>,
    resolvers: Resolvers,
    escaper: Arc<dyn Escaper>,
    logger: Arc<dyn DecodeLogger>,
    config: CodecConfig,
}

impl FormCodecBuilder {
    /// Replace the escaper
    #[must_use]
    pub fn with_escaper(mut self, escaper: Arc<dyn Escaper>) -> Self {
        self.escaper = escaper;
        self
    }

    /// Replace the decode failure logger
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn DecodeLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replace the config
    #[must_use]
    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// Finish
    #[must_use]
    pub fn build(self) -> FormCodec {
        FormCodec {
            catalog: self.catalog,
            resolvers: self.resolvers,
            escaper: self.escaper,
            logger: self.logger,
            config: self.config,
        }
    }
}

impl fmt::Debug for FormCodecBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormCodecBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
