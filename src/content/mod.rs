/*!
Content sources and the content adapter.

This module defines the `ContentSource` trait and the wiring helper
`build_source_from_config`. Concrete sources live in their own files:

- `file.rs`   -> `FileSource`   (JSON array of records on disk)
- `inline.rs` -> `InlineSource` (records embedded in the configuration)

A source receives a `ContentQuery` (limit, category, sort key and direction)
and returns records already filtered and ordered. `adapter.rs` then turns
those records into `ContentItem`s, substituting a single placeholder item when
there are none.

Adding a new source:
1. Create `src/content/your_source.rs`
2. Implement a `YourSource` struct + `impl ContentSource`
3. Extend `ContentSourceConfig` and `build_source_from_config`
*/

use anyhow::Result;

use crate::config::ContentSourceConfig;

pub mod adapter;
pub mod file;
pub mod inline;
pub mod query;
pub mod record;

pub use adapter::{CategoryRef, ContentItem, ImageRef, adapt, placeholder};
pub use file::FileSource;
pub use inline::InlineSource;
pub use query::{ContentQuery, OrderBy, SortOrder};
pub use record::{Category, ContentRecord, Thumbnail};

/// Supplier of post records for one widget render.
///
/// Implementations are called synchronously from the render pass; they should
/// return an error rather than panic when their backing data is unusable.
pub trait ContentSource: Send + Sync {
    /// Static human-readable identifier (used in logs).
    fn name(&self) -> &'static str;

    /// Records matching `query`, in the order the query asks for.
    fn fetch(&self, query: &ContentQuery) -> Result<Vec<ContentRecord>>;
}

/// Construct the source a widget's configuration describes.
pub fn build_source_from_config(cfg: &ContentSourceConfig) -> Box<dyn ContentSource> {
    match cfg {
        ContentSourceConfig::File { path } => Box::new(FileSource::new(path.clone())),
        ContentSourceConfig::Inline { records } => Box::new(InlineSource::new(records.clone())),
        ContentSourceConfig::None => Box::new(InlineSource::empty()),
    }
}
