use anyhow::{Context, Result, anyhow, bail};
use schemars::{Schema, schema_for};
use serde_valid::Validate;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, trace, warn};

use super::models::{Config, ContentSourceConfig, WidgetConfig};
use crate::render::LayoutRegistry;
use crate::settings::WidgetSettings;

/// Load configuration from a string slice.
pub fn load_from_str(s: &str) -> Result<Config> {
    let cfg: Config =
        serde_json::from_str(s).context("Failed to parse JSON config string into Config")?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Load configuration from any reader (e.g., a file).
pub fn load_from_reader<R: Read>(reader: R) -> Result<Config> {
    let cfg: Config =
        serde_json::from_reader(reader).context("Failed to parse JSON config from reader")?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Load configuration from a file path synchronously.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref)
        .with_context(|| format!("Failed to open config file {}", path_ref.display()))?;
    let cfg = load_from_reader(file)?;
    debug!(target: "owce::config", "Loaded config from {}", path_ref.display());
    Ok(cfg)
}

/// Load configuration from a file path asynchronously (Tokio).
pub async fn load_from_path_async<P: AsRef<Path>>(path: P) -> Result<Config> {
    use tokio::fs;
    let path_ref = path.as_ref();
    let bytes = fs::read(path_ref)
        .await
        .with_context(|| format!("Failed to read config file {}", path_ref.display()))?;
    let cfg: Config = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse JSON config from {}", path_ref.display()))?;
    validate_config(&cfg)?;
    debug!(target: "owce::config", "Loaded config from {}", path_ref.display());
    Ok(cfg)
}

/// Generate the JSON Schema for the Config model (for external validation or tooling).
pub fn generate_schema() -> Schema {
    schema_for!(Config)
}

/// Write the JSON Schema for the Config model to any writer (pretty-printed).
pub fn write_schema_to_writer<W: Write>(mut writer: W) -> Result<()> {
    let schema = generate_schema();
    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    writer
        .write_all(json.as_bytes())
        .context("Failed to write schema to writer")?;
    Ok(())
}

/// Perform sanity checks the type system cannot express.
/// - The site block has non-empty values.
/// - File content sources name a path.
///
/// An unregistered layout is only logged here; it fails that widget's render.
pub fn validate_config(cfg: &Config) -> Result<()> {
    cfg.site
        .validate()
        .map_err(|e| anyhow!("Invalid site configuration: {e}"))?;

    let registry = LayoutRegistry::builtin();
    for (id, widget) in &cfg.widgets {
        validate_widget(id, widget, &registry).with_context(|| format!("Invalid widget '{id}'"))?;
    }

    trace!(target: "owce::config", widgets = cfg.widgets.len(), "Configuration validated");
    Ok(())
}

fn validate_widget(id: &str, widget: &WidgetConfig, registry: &LayoutRegistry) -> Result<()> {
    let layout = WidgetSettings::from_bag(&widget.settings).layout();
    if !registry.contains(&layout) {
        warn!(target: "owce::config", widget = %id, %layout, "Widget uses an unregistered layout and will fail to render");
    }

    if let ContentSourceConfig::File { path } = &widget.content {
        if path.trim().is_empty() {
            bail!("File content source has an empty path");
        }
    }
    Ok(())
}
