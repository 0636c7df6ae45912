#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! owce — settings resolution and server-side rendering for an Owl Carousel post widget.
//!
//! This crate organizes the codebase into cohesive modules and exposes a convenient prelude
//! for downstream crates/binaries:
//! - `config`: Configuration models (site + named widgets), loader, and schema helpers.
//! - `settings`: Settings bag, declarative option table, breakpoint-aware resolver, typed record.
//! - `carousel`: Carousel runtime options (breakpoint table, animations).
//! - `content`: Content sources, queries, and the content adapter.
//! - `render`: Layout registry, item templates, and the widget renderer.
//!
//! Use `owce::prelude::*` to bring commonly used items into scope quickly.

/// Public module: configuration (models, loader, schema helpers).
pub mod config;
/// Public module: carousel runtime options.
pub mod carousel;
/// Public module: content sources and adapter.
pub mod content;
/// Public module: layout selection and rendering.
pub mod render;
/// Public module: widget settings and option resolution.
pub mod settings;

/// Crate-level constants for consumers that want to inspect package metadata at runtime.
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version (e.g., "0.1.0").
#[inline]
pub const fn version() -> &'static str {
    PKG_VERSION
}

/// Parse a log level name (trace|debug|info|warn|error).
pub fn parse_level(s: &str) -> Option<tracing::Level> {
    use tracing::Level;
    match s.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Initialize tracing (logging) with a reasonable default.
/// - Honors the `RUST_LOG` environment variable if set.
/// - Falls back to `info` level.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init_tracing() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(tracing::Level::INFO);
    init_tracing_with_level(level);
}

/// Initialize tracing at a fixed level, ignoring `RUST_LOG`.
pub fn init_tracing_with_level(level: tracing::Level) {
    // Ignore the error if the global subscriber was already set.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// A convenient set of exports for most consumers.
///
/// Bring this into scope with:
/// `use owce::prelude::*;`
pub mod prelude {
    // Common result/error handling
    pub use anyhow::{Context, Error, Result, anyhow, bail, ensure};

    // Serialization
    pub use serde::{Deserialize, Serialize};

    // Tracing macros
    pub use tracing::{debug, error, info, instrument, trace, warn};

    // External crates (namespaced) if callers want direct access
    pub use crate as owce;

    // Frequently used items
    pub use crate::carousel::{CarouselConfig, build as build_carousel};
    pub use crate::content::{ContentItem, ContentQuery, ContentRecord, ContentSource, adapt};
    pub use crate::render::{LayoutRegistry, LookupError, RenderedWidget, Renderer};
    pub use crate::settings::{Breakpoint, SettingValue, SettingsBag, WidgetSettings, resolve};
    pub use crate::{carousel, config, content, render, settings};
}
