//! Analysis service. Orchestrates the note analysis pipeline.
//!
//! Prompt template -> generation port -> reply parser. Stateless; safe to share
//! across concurrent requests behind an `Arc`.

use crate::domain::prompt::{insights_prompt, summarize_prompt};
use crate::domain::response::{parse_insights, parse_summary};
use crate::domain::{DomainError, InsightList, Note, SummaryResult};
use crate::ports::GenerationPort;
use std::sync::Arc;

/// Service for AI-powered note analysis.
///
/// Each call makes at most one generation request and never retries. Replies are
/// not cached: the same input may produce different output.
pub struct AnalysisService {
    ai: Arc<dyn GenerationPort>,
}

impl AnalysisService {
    /// Create a new analysis service.
    ///
    /// # Arguments
    /// * `ai` - Generation port implementation (Gemini, Mock, etc.)
    pub fn new(ai: Arc<dyn GenerationPort>) -> Self {
        Self { ai }
    }

    /// Whether the underlying provider has a credential.
    pub fn is_configured(&self) -> bool {
        self.ai.is_configured()
    }

    pub fn model(&self) -> &str {
        self.ai.model()
    }

    /// Summarize one note and suggest tags.
    ///
    /// `title` and `content` are expected non-empty; the request layer checks that.
    ///
    /// # Errors
    /// `NotConfigured` / `Provider` from the generation call, `MalformedResponse`
    /// when the reply holds a `{...}` span that is not valid JSON.
    pub async fn summarize_note(
        &self,
        title: &str,
        content: &str,
    ) -> Result<SummaryResult, DomainError> {
        let prompt = summarize_prompt(title, content);
        let text = self.ai.generate(&prompt).await?;
        parse_summary(&text)
    }

    /// Extract the dominant themes across `notes`.
    ///
    /// An empty slice returns an empty list without calling the model.
    pub async fn generate_insights(&self, notes: &[Note]) -> Result<InsightList, DomainError> {
        if notes.is_empty() {
            return Ok(InsightList::empty());
        }
        let prompt = insights_prompt(notes);
        let text = self.ai.generate(&prompt).await?;
        parse_insights(&text)
    }
}
