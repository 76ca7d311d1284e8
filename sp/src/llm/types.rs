//! LLM request/response types
//!
//! Every call is a single prompt with a response schema. There is no
//! conversation state and no tool use.

use tracing::debug;

use crate::plan::SchemaDescriptor;

/// A structured generation request - everything needed for one model call
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    /// The full prompt text
    pub prompt: String,

    /// Shape the JSON response must follow
    pub response_schema: SchemaDescriptor,

    /// Max tokens for the response; `None` leaves the limit to the API
    pub max_output_tokens: Option<u32>,
}

impl StructuredRequest {
    pub fn new(prompt: impl Into<String>, response_schema: SchemaDescriptor) -> Self {
        let prompt = prompt.into();
        debug!(prompt_len = prompt.len(), "StructuredRequest::new: called");
        Self {
            prompt,
            response_schema,
            max_output_tokens: None,
        }
    }
}

/// Response from a structured generation request
#[derive(Debug, Clone, Default)]
pub struct StructuredResponse {
    /// Raw response text, expected to be JSON
    pub text: Option<String>,

    /// Why the model stopped, as reported by the API
    pub finish_reason: Option<String>,

    /// Token usage
    pub usage: TokenUsage,
}

impl StructuredResponse {
    /// Build a response carrying only text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            finish_reason: Some("STOP".to_string()),
            usage: TokenUsage::default(),
        }
    }

    /// Whether generation was cut off by the token limit
    pub fn is_truncated(&self) -> bool {
        self.finish_reason.as_deref() == Some("MAX_TOKENS")
    }
}

/// Token usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::days_schema;

    #[test]
    fn test_request_defaults() {
        let req = StructuredRequest::new("How many days?", days_schema());
        assert_eq!(req.prompt, "How many days?");
        assert_eq!(req.max_output_tokens, None);
    }

    #[test]
    fn test_response_truncated() {
        let mut resp = StructuredResponse::text("[{");
        assert!(!resp.is_truncated());
        resp.finish_reason = Some("MAX_TOKENS".to_string());
        assert!(resp.is_truncated());
    }
}
