//! Request handlers for the two analysis endpoints.
//!
//! Each handler takes the decoded JSON request body and returns a status plus a
//! JSON body. Routing and transport belong to whatever server mounts these.

use crate::domain::{DomainError, Note};
use crate::usecases::AnalysisService;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info};

pub const NOT_CONFIGURED_MESSAGE: &str = "AI service not configured. Please set GEMINI_API_KEY.";
pub const SUMMARIZE_INPUT_MESSAGE: &str = "Title and content are required";
pub const INSIGHTS_INPUT_MESSAGE: &str = "Notes array is required";
pub const INSIGHTS_FAILED_MESSAGE: &str = "Failed to generate insights";

/// Status and JSON body produced by a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl HandlerResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Handlers for `/api/summarize` and `/api/insights`.
pub struct AnalysisHandlers {
    service: Arc<AnalysisService>,
}

impl AnalysisHandlers {
    pub fn new(service: Arc<AnalysisService>) -> Self {
        Self { service }
    }

    /// Summarize a note. Body: `{"title": string, "content": string}`.
    ///
    /// The configuration check runs before the body is looked at.
    pub async fn summarize(&self, payload: &Value) -> HandlerResponse {
        if !self.service.is_configured() {
            error!("GEMINI_API_KEY is not set");
            return HandlerResponse::error(StatusCode::INTERNAL_SERVER_ERROR, NOT_CONFIGURED_MESSAGE);
        }

        let (Some(title), Some(content)) = (
            required_str(payload, "title"),
            required_str(payload, "content"),
        ) else {
            return HandlerResponse::error(StatusCode::BAD_REQUEST, SUMMARIZE_INPUT_MESSAGE);
        };

        info!(title, content_len = content.len(), "summarizing note");

        match self.service.summarize_note(title, content).await {
            Ok(result) => {
                info!(
                    summary_len = result.summary.len(),
                    tags = ?result.tags,
                    "summary result"
                );
                HandlerResponse::ok(json!(result))
            }
            // Port claimed a credential but refused at call time
            Err(DomainError::NotConfigured(reason)) => {
                error!(%reason, "summarization not configured");
                HandlerResponse::error(StatusCode::INTERNAL_SERVER_ERROR, NOT_CONFIGURED_MESSAGE)
            }
            Err(e) => {
                error!(error = %e, "summarization failed");
                HandlerResponse::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to summarize note: {}", e.detail()),
                )
            }
        }
    }

    /// Extract themes. Body: `{"notes": [{"title", "content", "tags"?}, ...]}`.
    ///
    /// Only the array itself is checked up front. A note without string
    /// `content` fails the request with 500 (no model call); `tags` is never read.
    ///
    /// Response: `{"categories": [...]}`.
    pub async fn insights(&self, payload: &Value) -> HandlerResponse {
        let Some(items) = payload.get("notes").and_then(Value::as_array) else {
            return HandlerResponse::error(StatusCode::BAD_REQUEST, INSIGHTS_INPUT_MESSAGE);
        };

        let Some(notes) = items.iter().map(note_from_value).collect::<Option<Vec<Note>>>() else {
            error!(notes = items.len(), "note without string content");
            return HandlerResponse::error(StatusCode::INTERNAL_SERVER_ERROR, INSIGHTS_FAILED_MESSAGE);
        };

        match self.service.generate_insights(&notes).await {
            Ok(categories) => {
                info!(
                    notes = notes.len(),
                    categories = categories.len(),
                    "insights generated"
                );
                HandlerResponse::ok(json!({ "categories": categories }))
            }
            Err(e) => {
                error!(error = %e, "insights failed");
                HandlerResponse::error(StatusCode::INTERNAL_SERVER_ERROR, INSIGHTS_FAILED_MESSAGE)
            }
        }
    }
}

/// Field as a non-empty string.
fn required_str<'a>(payload: &'a Value, field: &str) -> Option<&'a str> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Read one element of `notes`. `None` when `content` is missing or not a string.
///
/// Non-string titles keep their JSON text (`7` -> `"7"`); a missing title is empty.
fn note_from_value(item: &Value) -> Option<Note> {
    let content = item.get("content")?.as_str()?;
    let title = match item.get("title") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    Some(Note::new(title, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiAdapter;
    use crate::ports::GenerationPort;

    fn handlers(mock: &Arc<MockAiAdapter>) -> AnalysisHandlers {
        let ai = Arc::clone(mock) as Arc<dyn GenerationPort>;
        AnalysisHandlers::new(Arc::new(AnalysisService::new(ai)))
    }

    #[tokio::test]
    async fn test_summarize_success() {
        let mock = Arc::new(MockAiAdapter::with_response(
            r#"{"summary": "A short note.", "tags": ["a", "b", "c"]}"#,
        ));
        let res = handlers(&mock)
            .summarize(&json!({"title": "T", "content": "Body"}))
            .await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body, json!({"summary": "A short note.", "tags": ["a", "b", "c"]}));
    }

    #[tokio::test]
    async fn test_summarize_not_configured_checked_first() {
        let mock = Arc::new(MockAiAdapter::unconfigured());
        let res = handlers(&mock).summarize(&json!({})).await;

        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.body, json!({"error": NOT_CONFIGURED_MESSAGE}));
    }

    #[tokio::test]
    async fn test_summarize_missing_fields_rejected() {
        let mock = Arc::new(MockAiAdapter::with_response("{}"));
        let h = handlers(&mock);

        for payload in [
            json!({"title": "T"}),
            json!({"content": "C"}),
            json!({"title": "", "content": "C"}),
            json!({"title": "T", "content": 5}),
        ] {
            let res = h.summarize(&payload).await;
            assert_eq!(res.status, StatusCode::BAD_REQUEST);
            assert_eq!(res.body["error"], SUMMARIZE_INPUT_MESSAGE);
        }
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_summarize_provider_failure_carries_detail() {
        let mock = Arc::new(MockAiAdapter::failing("API error 429: quota"));
        let res = handlers(&mock)
            .summarize(&json!({"title": "T", "content": "C"}))
            .await;

        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            res.body,
            json!({"error": "Failed to summarize note: API error 429: quota"})
        );
    }

    /// Reports a credential but refuses every call.
    struct RevokedKeyPort;

    #[async_trait::async_trait]
    impl GenerationPort for RevokedKeyPort {
        async fn generate(&self, _prompt: &str) -> Result<String, DomainError> {
            Err(DomainError::NotConfigured("key revoked".to_string()))
        }

        fn model(&self) -> &str {
            "revoked"
        }

        fn is_configured(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_summarize_not_configured_at_call_time() {
        let ai: Arc<dyn GenerationPort> = Arc::new(RevokedKeyPort);
        let h = AnalysisHandlers::new(Arc::new(AnalysisService::new(ai)));
        let res = h.summarize(&json!({"title": "T", "content": "C"})).await;

        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.body, json!({"error": NOT_CONFIGURED_MESSAGE}));
    }

    #[tokio::test]
    async fn test_summarize_malformed_reply_is_500() {
        let mock = Arc::new(MockAiAdapter::with_response("{oops}"));
        let res = handlers(&mock)
            .summarize(&json!({"title": "T", "content": "C"}))
            .await;
        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_insights_success() {
        let mock = Arc::new(MockAiAdapter::with_response(r#"["Work", "Family"]"#));
        let res = handlers(&mock)
            .insights(&json!({"notes": [
                {"title": "Standup", "content": "Sprint goals"},
                {"title": "Dinner", "content": "Sunday at mum's", "tags": ["family"]}
            ]}))
            .await;

        assert!(res.is_success());
        assert_eq!(res.body, json!({"categories": ["Work", "Family"]}));
    }

    #[tokio::test]
    async fn test_insights_empty_notes_no_call() {
        let mock = Arc::new(MockAiAdapter::unconfigured());
        let res = handlers(&mock).insights(&json!({"notes": []})).await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body, json!({"categories": []}));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_insights_requires_array() {
        let mock = Arc::new(MockAiAdapter::with_response("[]"));
        let h = handlers(&mock);

        for payload in [
            json!({}),
            json!({"notes": "not an array"}),
            json!({"notes": {"title": "T", "content": "C"}}),
        ] {
            let res = h.insights(&payload).await;
            assert_eq!(res.status, StatusCode::BAD_REQUEST);
            assert_eq!(res.body, json!({"error": INSIGHTS_INPUT_MESSAGE}));
        }
    }

    #[tokio::test]
    async fn test_insights_ignores_tags_shape() {
        let mock = Arc::new(MockAiAdapter::with_response(r#"["Work"]"#));
        let res = handlers(&mock)
            .insights(&json!({"notes": [{"title": "T", "content": "C", "tags": "work"}]}))
            .await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body, json!({"categories": ["Work"]}));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_insights_non_string_title_rendered() {
        let mock = Arc::new(MockAiAdapter::with_response(r#"["Numbers"]"#));
        let res = handlers(&mock)
            .insights(&json!({"notes": [
                {"title": 7, "content": "Seven things"},
                {"content": "Untitled"}
            ]}))
            .await;

        assert_eq!(res.status, StatusCode::OK);
        let prompt = mock.last_prompt().unwrap();
        assert!(prompt.contains("Note 1: 7\nContent: Seven things..."));
        assert!(prompt.contains("Note 2: \nContent: Untitled..."));
    }

    #[tokio::test]
    async fn test_insights_note_without_content_fails() {
        let mock = Arc::new(MockAiAdapter::with_response("[]"));
        let h = handlers(&mock);

        for notes in [
            json!([{"title": "no content"}]),
            json!([{"title": "T", "content": 5}]),
            json!(["just a string"]),
        ] {
            let res = h.insights(&json!({ "notes": notes })).await;
            assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(res.body, json!({"error": INSIGHTS_FAILED_MESSAGE}));
        }
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_insights_failure_is_generic() {
        let mock = Arc::new(MockAiAdapter::failing("network down"));
        let res = handlers(&mock)
            .insights(&json!({"notes": [{"title": "T", "content": "C"}]}))
            .await;

        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.body, json!({"error": INSIGHTS_FAILED_MESSAGE}));
    }
}
