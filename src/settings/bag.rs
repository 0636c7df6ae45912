use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Prefix the host puts in front of every control id of this widget.
pub const FIELD_PREFIX: &str = "carousel_";

/// Responsive device class. Ordered by ascending minimum width.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    /// The base (unsuffixed) key.
    Desktop,
}

impl Breakpoint {
    /// All breakpoints, ascending by minimum width.
    pub const ALL: [Self; 3] = [Self::Mobile, Self::Tablet, Self::Desktop];

    /// Minimum viewport width (px) at which the runtime applies this entry.
    pub const fn min_width(self) -> u32 {
        match self {
            Self::Mobile => 0,
            Self::Tablet => 768,
            Self::Desktop => 1024,
        }
    }

    /// Key suffix used by the host for per-device values.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Mobile => "_mobile",
            Self::Tablet => "_tablet",
            Self::Desktop => "",
        }
    }

    /// Breakpoint whose value is inherited when this one has none.
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Mobile => Some(Self::Tablet),
            Self::Tablet => Some(Self::Desktop),
            Self::Desktop => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }

    /// Storage key of `name` at this breakpoint.
    pub fn key(self, name: &str) -> String {
        format!("{name}{}", self.suffix())
    }
}

/// Flat settings map as persisted by the host, read-only to the widget.
///
/// Keys are stored without [`FIELD_PREFIX`]; both prefixed and bare keys are
/// accepted on input. When both spellings are present the prefixed one wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct SettingsBag(BTreeMap<String, Value>);

impl From<BTreeMap<String, Value>> for SettingsBag {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let (prefixed, bare): (Vec<_>, Vec<_>) = raw
            .into_iter()
            .partition(|(k, _)| k.starts_with(FIELD_PREFIX));
        let mut bag = Self::default();
        for (key, value) in bare.into_iter().chain(prefixed) {
            bag.insert(key, value);
        }
        bag
    }
}

impl FromIterator<(String, Value)> for SettingsBag {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<BTreeMap<_, _>>())
    }
}

impl SettingsBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bag from a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).context("Settings must be a JSON object")
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let key = match key.strip_prefix(FIELD_PREFIX) {
            Some(stripped) => stripped.to_string(),
            None => key,
        };
        self.0.insert(key, value);
    }

    /// Raw value by full (unprefixed) key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Raw value of `name` at `breakpoint`.
    pub fn get_at(&self, name: &str, breakpoint: Breakpoint) -> Option<&Value> {
        self.0.get(&breakpoint.key(name))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_field_prefix() {
        let bag = SettingsBag::from_value(json!({
            "carousel_items_count": 3,
            "layout": "basic"
        }))
        .unwrap();
        assert_eq!(bag.get("items_count"), Some(&json!(3)));
        assert_eq!(bag.get("layout"), Some(&json!("basic")));
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn prefixed_key_wins_over_bare() {
        let bag = SettingsBag::from_value(json!({
            "layout": "basic",
            "carousel_layout": "image"
        }))
        .unwrap();
        assert_eq!(bag.get("layout"), Some(&json!("image")));
    }

    #[test]
    fn breakpoint_keys_and_parents() {
        assert_eq!(Breakpoint::Tablet.key("show_nav"), "show_nav_tablet");
        assert_eq!(Breakpoint::Desktop.key("show_nav"), "show_nav");
        assert_eq!(Breakpoint::Mobile.parent(), Some(Breakpoint::Tablet));
        assert_eq!(Breakpoint::Desktop.parent(), None);
        let widths: Vec<u32> = Breakpoint::ALL.iter().map(|b| b.min_width()).collect();
        assert_eq!(widths, vec![0, 768, 1024]);
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(SettingsBag::from_value(json!([1, 2])).is_err());
    }
}
