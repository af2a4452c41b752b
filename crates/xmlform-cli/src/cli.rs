//! Argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use xmlform_codec::EntityKind;

/// Convert form definitions to and from the legacy XML dialect
#[derive(Debug, Parser)]
#[command(name = "xmlform")]
#[command(version)]
#[command(about = "Convert form definitions to and from the legacy XML dialect", long_about = None)]
pub struct Cli {
    /// Log output format (level comes from RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode a JSON form definition as legacy XML
    Encode {
        /// Form definition (JSON)
        #[arg(long)]
        model: PathBuf,

        /// Input files
        #[command(flatten)]
        sources: Sources,

        /// Write the XML here instead of stdout
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Decode legacy XML and print the record as JSON
    Decode {
        /// Legacy XML document
        #[arg(long)]
        xml: PathBuf,

        /// Id of the stored entity, for log context
        #[arg(long)]
        entity_id: String,

        /// Kind of the stored entity
        #[arg(long, value_enum, default_value_t = EntityKindArg::Xmlform)]
        entity_kind: EntityKindArg,

        /// Input files
        #[command(flatten)]
        sources: Sources,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Validate the catalog and the system list mapping
    CheckCatalog {
        /// Input files
        #[command(flatten)]
        sources: Sources,
    },
}

/// Catalog, resolver and codec config files
#[derive(Debug, Clone, Default, Args)]
pub struct Sources {
    /// Field type catalog (TOML); the built-in catalog if absent
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Resolver snapshot (JSON); empty stores if absent
    #[arg(long)]
    pub resolvers: Option<PathBuf>,

    /// Codec config (TOML); defaults if absent
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

/// Entity kind as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKindArg {
    /// A form definition
    Xmlform,
    /// A filled-in task log
    TaskLog,
}

impl From<EntityKindArg> for EntityKind {
    fn from(kind: EntityKindArg) -> Self {
        match kind {
            EntityKindArg::Xmlform => Self::XmlForm,
            EntityKindArg::TaskLog => Self::TaskLog,
        }
    }
}
