//! Configuration module for owce.
//!
//! This module wires together the data models and loading/validation helpers used
//! by the CLI and by embedders that keep widget settings in a JSON file.
//!
//! Example:
//! ```no_run
//! use owce::config::load_from_path;
//!
//! let cfg = load_from_path("config/widgets.json")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod loader;
pub mod models;

// Re-export core data models
pub use models::{Config, ContentSourceConfig, SiteConfig, WidgetConfig, Widgets};

// Re-export loader utilities
pub use loader::{
    generate_schema, load_from_path, load_from_path_async, load_from_reader, load_from_str,
    validate_config, write_schema_to_writer,
};
