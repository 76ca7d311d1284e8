//! LlmClient trait definition

use async_trait::async_trait;

use super::{LlmError, StructuredRequest, StructuredResponse};

/// Stateless LLM client - each call is independent
///
/// The gateway holds one of these behind an `Arc` and never cares which
/// provider sits behind it, so tests can hand it a scripted fake.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one prompt and wait for the schema-constrained response
    ///
    /// Exactly one attempt is made; failures are returned to the caller.
    async fn generate(&self, request: StructuredRequest) -> Result<StructuredResponse, LlmError>;
}
