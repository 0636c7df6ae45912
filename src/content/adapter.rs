use serde::Serialize;
use tracing::debug;

use super::record::{ContentRecord, Thumbnail};
use crate::config::SiteConfig;

/// Subtitle format of post items (`dd/mm/YYYY`).
pub const SUBTITLE_DATE_FORMAT: &str = "%d/%m/%Y";

pub const PLACEHOLDER_ID: &str = "placeholder";
pub const PLACEHOLDER_TITLE: &str = "Item 1";
pub const PLACEHOLDER_SUBTITLE: &str = "Lorem ipsum dolor";
pub const PLACEHOLDER_CATEGORY_ID: u64 = 1;
pub const PLACEHOLDER_CATEGORY_NAME: &str = "WithOut Category";

/// Image of one slide.
///
/// Templates branch on the variant: attachments render with their id and the
/// requested size, plus `src` when the host resolved a url; urls are used as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRef {
    ById { id: u64, src: Option<String> },
    ByUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRef {
    pub id: u64,
    pub name: String,
    pub link: String,
}

/// One slide, in the shape templates consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    /// Stable identifier, used in the item's css class.
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub image: ImageRef,
    pub category: Option<CategoryRef>,
    pub link: String,
}

/// Map source records to template items, in source order.
///
/// An empty input yields exactly one placeholder item so every template has
/// something to render.
pub fn adapt(records: &[ContentRecord], site: &SiteConfig) -> Vec<ContentItem> {
    if records.is_empty() {
        debug!(target: "owce::content", "No content records; using placeholder item");
        return vec![placeholder(site)];
    }
    records.iter().map(|r| adapt_one(r, site)).collect()
}

fn adapt_one(record: &ContentRecord, site: &SiteConfig) -> ContentItem {
    let image = match &record.thumbnail {
        Some(Thumbnail::Attachment { id, url }) => ImageRef::ById {
            id: *id,
            src: url.as_ref().filter(|u| !u.trim().is_empty()).cloned(),
        },
        Some(Thumbnail::Url { url }) if !url.trim().is_empty() => ImageRef::ByUrl(url.clone()),
        _ => ImageRef::ByUrl(site.placeholder_image.clone()),
    };
    ContentItem {
        id: format!("post-{}", record.id),
        title: record.title.clone(),
        subtitle: record.date.format(SUBTITLE_DATE_FORMAT).to_string(),
        image,
        category: record.categories.first().map(|c| CategoryRef {
            id: c.id,
            name: c.name.clone(),
            link: c.link.clone(),
        }),
        link: record.permalink.clone(),
    }
}

/// The single item shown when the source yields nothing.
pub fn placeholder(site: &SiteConfig) -> ContentItem {
    ContentItem {
        id: PLACEHOLDER_ID.to_string(),
        title: PLACEHOLDER_TITLE.to_string(),
        subtitle: PLACEHOLDER_SUBTITLE.to_string(),
        image: ImageRef::ByUrl(site.placeholder_image.clone()),
        category: Some(CategoryRef {
            id: PLACEHOLDER_CATEGORY_ID,
            name: PLACEHOLDER_CATEGORY_NAME.to_string(),
            link: site.url.clone(),
        }),
        link: site.url.clone(),
    }
}
