//! Turn raw model replies into typed results.
//!
//! Extraction is span scanning, not structural parsing: the candidate is
//! everything from the first opening delimiter to the last closing one. A reply
//! with several fragments (or stray delimiters around the intended one) yields a
//! span that does not parse, and that surfaces as `MalformedResponse`. Only the
//! "no span at all" case falls back to a fixed value.

use crate::domain::{DomainError, InsightList, SummaryResult};
use serde_json::Value;

/// Summary returned when the reply holds no `{...}` span.
pub const SUMMARY_FALLBACK: &str = "Unable to generate summary";

/// First `open` through last `close`, inclusive. `None` unless the close comes after the open.
pub fn find_span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end > start {
        Some(&text[start..end + close.len_utf8()])
    } else {
        None
    }
}

/// Parse a summarization reply.
///
/// `summary` falls back to `""` and `tags` to `[]` when absent or of the wrong
/// type. Non-string tag entries keep their JSON rendering.
pub fn parse_summary(text: &str) -> Result<SummaryResult, DomainError> {
    let Some(span) = find_span(text, '{', '}') else {
        return Ok(SummaryResult {
            summary: SUMMARY_FALLBACK.to_string(),
            tags: Vec::new(),
        });
    };

    let parsed: Value = serde_json::from_str(span)?;

    let summary = parsed
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let tags = parsed
        .get("tags")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(SummaryResult { summary, tags })
}

/// Parse an insights reply. The array is returned as-is; no span gives an empty list.
pub fn parse_insights(text: &str) -> Result<InsightList, DomainError> {
    match find_span(text, '[', ']') {
        Some(span) => {
            let items: Vec<Value> = serde_json::from_str(span)?;
            Ok(InsightList(items))
        }
        None => Ok(InsightList::empty()),
    }
}
