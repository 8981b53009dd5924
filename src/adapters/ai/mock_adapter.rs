//! Mock generation adapter for testing without API calls.
//!
//! Returns a scripted reply (or scripted failure) and records what it was asked.

use crate::domain::DomainError;
use crate::ports::GenerationPort;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

/// Canned replies used by the offline demo mode.
const DEMO_SUMMARY_REPLY: &str = r#"Here you go:
{"summary": "[MOCK] Offline summary. Set GEMINI_API_KEY for real output.", "tags": ["mock", "offline", "demo"]}"#;
const DEMO_INSIGHTS_REPLY: &str = r#"["Mock Theme 1", "Mock Theme 2", "Mock Theme 3"]"#;

enum Script {
    /// Pick a canned reply by looking at which task the prompt asks for.
    Demo,
    Reply(String),
    Fail(String),
}

/// Mock generation adapter.
///
/// Simulates network latency with configurable delay.
pub struct MockAiAdapter {
    script: Script,
    /// `false` mimics a provider with no credential: every call fails before any work.
    configured: bool,
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockAiAdapter {
    fn scripted(script: Script) -> Self {
        Self {
            script,
            configured: true,
            delay_ms: 0,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Demo adapter with default delay (100ms).
    pub fn new() -> Self {
        Self::scripted(Script::Demo).with_delay(100)
    }

    /// Always reply with `text`.
    pub fn with_response(text: impl Into<String>) -> Self {
        Self::scripted(Script::Reply(text.into()))
    }

    /// Always fail with a provider error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::scripted(Script::Fail(message.into()))
    }

    /// Behave like a provider with no credential.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::scripted(Script::Reply(String::new()))
        }
    }

    /// Set the simulated delay.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Number of `generate` calls that reached the mock.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Default for MockAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GenerationPort for MockAiAdapter {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        if !self.is_configured() {
            return Err(DomainError::NotConfigured("mock has no credential".to_string()));
        }

        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }

        info!(prompt_len = prompt.len(), "[MOCK] Simulating generation");

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        match &self.script {
            Script::Demo if prompt.contains("themes or categories") => {
                Ok(DEMO_INSIGHTS_REPLY.to_string())
            }
            Script::Demo => Ok(DEMO_SUMMARY_REPLY.to_string()),
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail(message) => Err(DomainError::Provider(message.clone())),
        }
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_adapter_records_calls() {
        let adapter = MockAiAdapter::with_response("ok").with_delay(10);

        let text = adapter.generate("first").await.unwrap();
        adapter.generate("second").await.unwrap();

        assert_eq!(text, "ok");
        assert_eq!(adapter.calls(), 2);
        assert_eq!(adapter.last_prompt().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_mock_adapter_failures() {
        let failing = MockAiAdapter::failing("quota exceeded");
        let err = failing.generate("p").await.unwrap_err();
        assert!(matches!(err, DomainError::Provider(ref m) if m == "quota exceeded"));

        let unconfigured = MockAiAdapter::unconfigured();
        assert!(!unconfigured.is_configured());
        assert!(unconfigured.generate("p").await.unwrap_err().is_not_configured());
        assert_eq!(unconfigured.calls(), 0);
    }

    #[tokio::test]
    async fn test_demo_replies_by_task() {
        let adapter = MockAiAdapter::new().with_delay(0);
        let summary = adapter.generate("Note Title: x").await.unwrap();
        let insights = adapter
            .generate("identify the top 3-5 main themes or categories")
            .await
            .unwrap();
        assert!(summary.contains("\"summary\""));
        assert!(insights.starts_with('['));
    }
}
