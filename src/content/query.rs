use anyhow::{Result, anyhow};
use serde::Serialize;
use serde_valid::Validate;
use std::cmp::Ordering;
use tracing::warn;

use super::record::ContentRecord;
use crate::settings::{WidgetSettings, options};

/// Sort key understood by content sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    /// Keep the source's own order.
    None,
    #[default]
    Date,
    Name,
    Author,
    Title,
    Modified,
    #[serde(rename = "ID")]
    Id,
    CommentCount,
}

impl OrderBy {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "date" => Self::Date,
            "name" => Self::Name,
            "author" => Self::Author,
            "title" => Self::Title,
            "modified" => Self::Modified,
            "id" => Self::Id,
            "comment_count" => Self::CommentCount,
            _ => return None,
        })
    }

    fn compare(self, a: &ContentRecord, b: &ContentRecord) -> Ordering {
        match self {
            Self::None => Ordering::Equal,
            Self::Date => a.date.cmp(&b.date),
            Self::Name => a.slug.cmp(&b.slug),
            Self::Author => a.author.cmp(&b.author),
            Self::Title => a.title.cmp(&b.title),
            Self::Modified => a.modified.unwrap_or(a.date).cmp(&b.modified.unwrap_or(b.date)),
            Self::Id => a.id.cmp(&b.id),
            Self::CommentCount => a.comment_count.cmp(&b.comment_count),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// What a widget asks its content source for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct ContentQuery {
    #[validate(minimum = 1)]
    #[validate(maximum = 100)]
    pub limit: u32,
    /// `None` loads every category.
    pub category: Option<u64>,
    pub order_by: OrderBy,
    pub order: SortOrder,
}

impl Default for ContentQuery {
    fn default() -> Self {
        Self {
            limit: 4,
            category: None,
            order_by: OrderBy::default(),
            order: SortOrder::default(),
        }
    }
}

impl ContentQuery {
    /// Derive the query from widget settings. Unknown sort keys fall back to
    /// their defaults; an out-of-range limit is an error.
    pub fn from_settings(settings: &WidgetSettings) -> Result<Self> {
        let order_by_raw = settings.text(&settings.order_by, &options::ORDER_BY);
        let order_by = OrderBy::parse(&order_by_raw).unwrap_or_else(|| {
            warn!(target: "owce::content", value = %order_by_raw, "Unknown order_by; using date");
            OrderBy::default()
        });

        let order_raw = settings.text(&settings.order, &options::ORDER);
        let order = SortOrder::parse(&order_raw).unwrap_or_else(|| {
            warn!(target: "owce::content", value = %order_raw, "Unknown order; using ASC");
            SortOrder::default()
        });

        let category_raw = settings.text(&settings.category, &options::CATEGORY);
        let category = match category_raw.trim().parse::<u64>() {
            Ok(0) => None,
            Ok(id) => Some(id),
            Err(_) => {
                warn!(target: "owce::content", value = %category_raw, "Category is not an id; loading all");
                None
            }
        };

        let query = Self {
            limit: settings.items_load(),
            category,
            order_by,
            order,
        };
        query
            .validate()
            .map_err(|e| anyhow!("Invalid content query: {e}"))?;
        Ok(query)
    }

    /// Filter, sort and truncate an in-memory record list.
    ///
    /// The sort is stable, so records with equal keys keep the source order.
    pub fn apply(&self, mut records: Vec<ContentRecord>) -> Vec<ContentRecord> {
        if let Some(category) = self.category {
            records.retain(|r| r.categories.iter().any(|c| c.id == category));
        }
        if self.order_by != OrderBy::None {
            records.sort_by(|a, b| {
                let ord = self.order_by.compare(a, b);
                match self.order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
        }
        records.truncate(self.limit as usize);
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsBag;
    use serde_json::json;

    fn record(id: u64, title: &str, date: &str, category: u64) -> ContentRecord {
        serde_json::from_value(json!({
            "id": id,
            "title": title,
            "date": date,
            "permalink": format!("https://example.test/{id}"),
            "categories": [{"id": category, "name": format!("cat-{category}")}]
        }))
        .unwrap()
    }

    fn query(v: serde_json::Value) -> Result<ContentQuery> {
        ContentQuery::from_settings(&WidgetSettings::from_bag(&SettingsBag::from_value(v).unwrap()))
    }

    #[test]
    fn defaults_match_declared_options() {
        let q = query(json!({})).unwrap();
        assert_eq!(q, ContentQuery::default());
    }

    #[test]
    fn reads_settings() {
        let q = query(json!({
            "items_load": 12,
            "layout_categories": "7",
            "layout_order_by": "ID",
            "layout_order": "DESC"
        }))
        .unwrap();
        assert_eq!(q.limit, 12);
        assert_eq!(q.category, Some(7));
        assert_eq!(q.order_by, OrderBy::Id);
        assert_eq!(q.order, SortOrder::Desc);
    }

    #[test]
    fn category_zero_means_all() {
        assert_eq!(query(json!({"layout_categories": "0"})).unwrap().category, None);
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert!(query(json!({"items_load": 0})).is_err());
    }

    #[test]
    fn apply_filters_sorts_and_truncates() {
        let records = vec![
            record(1, "b", "2024-01-02", 5),
            record(2, "a", "2024-01-01", 5),
            record(3, "c", "2024-01-03", 9),
            record(4, "d", "2024-01-04", 5),
        ];
        let q = ContentQuery {
            limit: 2,
            category: Some(5),
            order_by: OrderBy::Date,
            order: SortOrder::Desc,
        };
        let ids: Vec<u64> = q.apply(records.clone()).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![4, 1]);

        let q = ContentQuery {
            limit: 10,
            category: None,
            order_by: OrderBy::None,
            order: SortOrder::Desc,
        };
        let ids: Vec<u64> = q.apply(records).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
