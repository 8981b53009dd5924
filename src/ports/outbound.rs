//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::DomainError;

/// Text generation capability. One prompt in, one raw completion out.
///
/// Implementations make exactly one provider call per invocation: no retry,
/// no streaming, no timeout of their own.
#[async_trait::async_trait]
pub trait GenerationPort: Send + Sync {
    /// Send `prompt` to the model and return its reply text.
    ///
    /// # Errors
    /// `DomainError::NotConfigured` when no credential is set (no call is made),
    /// `DomainError::Provider` when the call itself fails.
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;

    /// Model identifier used for every task.
    fn model(&self) -> &str;

    /// Whether a provider credential is present.
    fn is_configured(&self) -> bool;
}
