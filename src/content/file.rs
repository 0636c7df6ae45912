//! File content source.
//!
//! Reads a JSON array of post records from disk on every fetch.
//!
//! Behavior:
//! - Empty / whitespace-only files yield no records (the adapter then
//!   substitutes its placeholder item).
//! - A missing file or invalid JSON is an error for this widget only.
//! - The query is applied in memory: category filter, stable sort, truncation.

use std::fs;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::ContentSource;
use super::query::ContentQuery;
use super::record::ContentRecord;

/// Source that loads records from a single JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: String,
}

impl FileSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<ContentRecord>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read content file '{}'", self.path))?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            debug!(
                target: "owce::content",
                path = %self.path,
                "Content file is empty; no records"
            );
            return Ok(Vec::new());
        }
        serde_json::from_str(trimmed)
            .with_context(|| format!("Failed to parse content records from '{}'", self.path))
    }
}

impl ContentSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn fetch(&self, query: &ContentQuery) -> Result<Vec<ContentRecord>> {
        let all = self.read_all()?;
        let total = all.len();
        let records = query.apply(all);
        info!(
            target: "owce::content",
            path = %self.path,
            total,
            selected = records.len(),
            "Loaded content records from file"
        );
        Ok(records)
    }
}
