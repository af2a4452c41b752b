//! xmlform command-line interface
//!
//! # Usage
//!
//! ```bash
//! xmlform encode --model form.json --resolvers snapshot.json --out form.xml
//! xmlform decode --xml form.xml --entity-id 42 --pretty
//! xmlform decode --xml log.xml --entity-id 7 --entity-kind task-log
//! xmlform check-catalog --catalog catalog.toml --resolvers snapshot.json
//! ```
//!
//! Logging goes to stderr; the level comes from `RUST_LOG` (default `info`).

#![warn(missing_docs)]

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command, EntityKindArg, LogFormat, Sources};
pub use commands::run;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
