use anyhow::Result;
use tracing::debug;

use super::ContentSource;
use super::query::ContentQuery;
use super::record::ContentRecord;

/// Records embedded in the configuration (or built in code).
#[derive(Debug, Clone, Default)]
pub struct InlineSource {
    records: Vec<ContentRecord>,
}

impl InlineSource {
    pub fn new(records: Vec<ContentRecord>) -> Self {
        Self { records }
    }

    /// A source that never yields anything.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl ContentSource for InlineSource {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn fetch(&self, query: &ContentQuery) -> Result<Vec<ContentRecord>> {
        let records = query.apply(self.records.clone());
        debug!(
            target: "owce::content",
            available = self.records.len(),
            selected = records.len(),
            "Selected inline records"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn applies_limit() {
        let records: Vec<ContentRecord> = (1..=6)
            .map(|id| {
                serde_json::from_value(json!({
                    "id": id, "title": format!("T{id}"), "date": format!("2024-01-0{id}"), "permalink": "/"
                }))
                .unwrap()
            })
            .collect();
        let source = InlineSource::new(records);
        let got = source.fetch(&ContentQuery::default()).unwrap();
        assert_eq!(got.len(), 4);
        assert_eq!(got[0].id, 1);
        assert!(InlineSource::empty().fetch(&ContentQuery::default()).unwrap().is_empty());
    }
}
