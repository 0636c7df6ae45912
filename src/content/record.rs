use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One post as delivered by a content source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContentRecord {
    pub id: u64,
    pub title: String,
    /// Publish date, `YYYY-MM-DD HH:MM:SS` or ISO-8601.
    #[serde(with = "post_date")]
    #[schemars(with = "String")]
    pub date: NaiveDateTime,
    #[serde(default, with = "post_date::option")]
    #[schemars(with = "Option<String>")]
    pub modified: Option<NaiveDateTime>,
    #[serde(default)]
    pub author: String,
    /// Post slug (`name` ordering).
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub comment_count: u64,
    /// Featured image, when the post has one.
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    /// Assigned categories, primary first.
    #[serde(default)]
    pub categories: Vec<Category>,
    pub permalink: String,
}

/// Featured image reference: an attachment `{"id": 12}`, optionally with the
/// url the host resolved for it (`{"id": 12, "url": "https://..."}`), or a
/// bare `{"url": "https://..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Thumbnail {
    Attachment {
        id: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    Url {
        url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub link: String,
}

mod post_date {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        NaiveDateTime::parse_from_str(s, FORMAT)
            .ok()
            .or_else(|| s.parse::<NaiveDateTime>().ok())
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .map(|d| d.and_time(NaiveTime::MIN))
            })
    }

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid post date '{raw}'")))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(date: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => serializer.serialize_some(&d.format(FORMAT).to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => parse(&raw)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid post date '{raw}'"))),
            }
        }
    }
}
