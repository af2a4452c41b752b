//! Subcommand implementations

use crate::cli::{Command, Sources};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use xmlform_catalog::FieldTypeCatalog;
use xmlform_codec::{CodecConfig, EntityRef, FormCodec};
use xmlform_model::FormModel;
use xmlform_resolve::{verify_round_trip, InMemoryStores, ResolverSnapshot};

/// Run a subcommand, writing its primary output to `out`
///
/// # Errors
///
/// Returns any file, configuration or encoding error with context.
pub fn run(command: &Command, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Encode {
            model,
            sources,
            out: target,
        } => encode(model, sources, target.as_deref(), out),
        Command::Decode {
            xml,
            entity_id,
            entity_kind,
            sources,
            pretty,
        } => {
            let entity = EntityRef::new((*entity_kind).into(), entity_id.clone());
            decode(xml, &entity, sources, *pretty, out)
        }
        Command::CheckCatalog { sources } => check_catalog(sources, out),
    }
}

fn encode(model: &Path, sources: &Sources, target: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let source = std::fs::read_to_string(model)
        .with_context(|| format!("failed to read form definition {}", model.display()))?;
    let form: FormModel = serde_json::from_str(&source)
        .with_context(|| format!("invalid form definition {}", model.display()))?;

    let xml = build_codec(sources)?
        .encode(&form)
        .with_context(|| format!("failed to encode form {}", form.id))?;

    match target {
        Some(path) => {
            std::fs::write(path, &xml)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(form = %form.id, path = %path.display(), "wrote legacy xml");
        }
        None => out.write_all(xml.as_bytes())?,
    }
    Ok(())
}

fn decode(
    xml: &Path,
    entity: &EntityRef,
    sources: &Sources,
    pretty: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let source = std::fs::read_to_string(xml)
        .with_context(|| format!("failed to read {}", xml.display()))?;
    let record = build_codec(sources)?.decode(entity, &source);

    let json = if pretty {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string(&record)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

fn check_catalog(sources: &Sources, out: &mut dyn Write) -> Result<()> {
    let catalog = load_catalog(sources)?;
    let stores = load_stores(sources)?;
    let ids = stores.system_lists.ids();
    verify_round_trip(&stores.system_lists, ids.iter().copied())
        .context("system list mapping is not bijective")?;

    writeln!(
        out,
        "catalog ok: {} field types (default {}), {} system list entries round-trip",
        catalog.len(),
        catalog.default_type().name,
        ids.len()
    )?;
    Ok(())
}

fn build_codec(sources: &Sources) -> Result<FormCodec> {
    let catalog = load_catalog(sources)?;
    let resolvers = load_stores(sources)?.into_resolvers();
    let config = match &sources.config {
        Some(path) => CodecConfig::load(path)
            .with_context(|| format!("failed to load codec config {}", path.display()))?,
        None => CodecConfig::default(),
    };

    Ok(FormCodec::builder(Arc::new(catalog), resolvers)
        .with_config(config)
        .build())
}

fn load_catalog(sources: &Sources) -> Result<FieldTypeCatalog> {
    match &sources.catalog {
        Some(path) => FieldTypeCatalog::load(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => FieldTypeCatalog::builtin().context("built-in catalog is invalid"),
    }
}

fn load_stores(sources: &Sources) -> Result<InMemoryStores> {
    match &sources.resolvers {
        Some(path) => ResolverSnapshot::load(path)
            .and_then(ResolverSnapshot::into_stores)
            .with_context(|| format!("failed to load resolver snapshot {}", path.display())),
        None => {
            tracing::warn!("no resolver snapshot given, references will not resolve");
            Ok(InMemoryStores::default())
        }
    }
}
