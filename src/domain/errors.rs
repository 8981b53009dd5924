//! Domain errors. Used by ports, use cases and handlers.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// No provider credential. Distinct from a failed call so the boundary can say so.
    #[error("AI service not configured: {0}")]
    NotConfigured(String),

    #[error("AI provider error: {0}")]
    Provider(String),

    /// A JSON-looking span was found in the reply but did not parse.
    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("UI error: {0}")]
    Ui(String),
}

impl DomainError {
    pub fn is_not_configured(&self) -> bool {
        matches!(self, DomainError::NotConfigured(_))
    }

    /// Inner message without the category prefix.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::NotConfigured(msg)
            | DomainError::Provider(msg)
            | DomainError::MalformedResponse(msg)
            | DomainError::InvalidInput(msg)
            | DomainError::Ui(msg) => msg,
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_drops_prefix() {
        let err = DomainError::Provider("API error 404: model not found".to_string());
        assert_eq!(err.to_string(), "AI provider error: API error 404: model not found");
        assert_eq!(err.detail(), "API error 404: model not found");
    }
}
