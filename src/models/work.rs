//! CrossRef `/works` response types.
//!
//! Only the fields the normalizer reads are modelled; everything else in a work
//! record is ignored.

use serde::Deserialize;
use serde_json::Value;

/// One page of results from the works endpoint.
#[derive(Debug, Clone, Default)]
pub struct WorksPage {
    pub items: Vec<RawItem>,
}

impl WorksPage {
    /// Decode a response body.
    ///
    /// Returns `Ok(None)` when the body lacks the `{message: {items: [...]}}`
    /// envelope. CrossRef error bodies carry `message` as a list, which lands here too.
    pub fn from_json(body: Value) -> Result<Option<Self>, serde_json::Error> {
        let items = match body {
            Value::Object(mut root) => match root.remove("message") {
                Some(Value::Object(mut message)) => message.remove("items"),
                _ => None,
            },
            _ => None,
        };

        items
            .map(|items| serde_json::from_value(items).map(|items| Self { items }))
            .transpose()
    }
}

/// A single work record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub title: Option<Vec<String>>,

    #[serde(rename = "URL", default)]
    pub url: Option<String>,

    #[serde(default)]
    pub issued: Option<RawDate>,

    #[serde(rename = "is-referenced-by-count", default)]
    pub is_referenced_by_count: Option<u64>,

    #[serde(default)]
    pub author: Option<Vec<RawAuthor>>,
}

impl RawItem {
    pub fn authors(&self) -> &[RawAuthor] {
        self.author.as_deref().unwrap_or_default()
    }

    /// First entry of the title list
    pub fn first_title(&self) -> Option<&str> {
        self.title
            .as_ref()
            .and_then(|titles| titles.first())
            .map(String::as_str)
    }

    /// `issued.date-parts[0][0]`
    pub fn year(&self) -> Option<i32> {
        self.issued
            .as_ref()
            .and_then(|issued| issued.date_parts.as_ref())
            .and_then(|parts| parts.first())
            .and_then(|first| first.first())
            .copied()
            .flatten()
    }
}

/// Author entry; organisations have neither `family` nor `given`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAuthor {
    #[serde(default)]
    pub family: Option<String>,

    #[serde(default)]
    pub given: Option<String>,
}

/// CrossRef partial date, e.g. `{"date-parts": [[2019, 4, 1]]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDate {
    #[serde(rename = "date-parts", default)]
    pub date_parts: Option<Vec<Vec<Option<i32>>>>,
}
