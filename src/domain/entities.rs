//! Domain entities. Pure data structures for the analysis pipeline.
//!
//! No HTTP/provider types here; adapters map into these.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A note as supplied by the caller. Read-only to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: None,
        }
    }
}

/// Summary of a single note. Both fields are always present; either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    /// Model order, duplicates kept.
    pub tags: Vec<String>,
}

/// Thematic categories across a set of notes.
///
/// Entries are kept exactly as the model returned them. They are expected to be
/// strings but are not checked; use [`InsightList::labels`] for the string view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsightList(pub Vec<Value>);

impl InsightList {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// String entries only, in order.
    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().filter_map(Value::as_str).collect()
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<String>> for InsightList {
    fn from(labels: Vec<String>) -> Self {
        Self(labels.into_iter().map(Value::String).collect())
    }
}
