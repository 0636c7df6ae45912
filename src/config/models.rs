use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use std::collections::BTreeMap;

use crate::content::ContentRecord;
use crate::settings::SettingsBag;

/// Root configuration for owce.
///
/// This structure is intended to be deserialized from a JSON configuration file.
/// It captures everything a render pass needs from outside:
/// - `site`: values the host would normally provide (site url, placeholder image)
/// - `widgets`: named widget instances, each with its stored settings and a content source
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct Config {
    /// Site-wide values used by placeholder items.
    #[serde(default)]
    pub site: SiteConfig,

    /// Widget instances keyed by widget id. The id ends up in the carousel
    /// element id (`owce-carousel-<id>`).
    #[serde(default)]
    pub widgets: Widgets,
}

/// Named widget map.
pub type Widgets = BTreeMap<String, WidgetConfig>;

/// Stand-ins for the host's site url and placeholder image source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct SiteConfig {
    /// Site url; link target of the placeholder item and its category.
    #[validate(min_length = 1)]
    #[serde(default = "default_site_url")]
    pub url: String,

    /// Image shown for posts without a thumbnail and for the placeholder item.
    #[validate(min_length = 1)]
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

fn default_site_url() -> String {
    "http://localhost".to_string()
}

fn default_placeholder_image() -> String {
    "http://localhost/wp-content/plugins/elementor/assets/images/placeholder.png".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: default_site_url(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

/// One widget instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WidgetConfig {
    /// Stored widget settings as the host persists them: a flat map, keys
    /// optionally prefixed with `carousel_`, responsive keys suffixed with
    /// `_tablet` / `_mobile`.
    #[serde(default)]
    #[schemars(with = "BTreeMap<String, serde_json::Value>")]
    pub settings: SettingsBag,

    /// Where the widget's posts come from (default: none, which renders the placeholder item).
    #[serde(default)]
    pub content: ContentSourceConfig,
}

/// Content source configuration.
/// Use `type` to select a variant:
/// - "file": JSON array of post records on disk, read on every render
/// - "inline": records embedded in this file
/// - "none": no posts
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentSourceConfig {
    /// Read post records from a JSON file.
    File {
        /// Absolute or relative path to the file.
        path: String,
    },

    /// Post records listed inline.
    Inline {
        #[serde(default)]
        records: Vec<ContentRecord>,
    },

    /// No content source.
    #[default]
    None,
}
