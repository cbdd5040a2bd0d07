//! Pluggable generative-text provider trait.
//!
//! Implementations translate the provider-agnostic [`GenerateRequest`]
//! into vendor-specific API calls. Specialists and the orchestrator only
//! ever see this trait, so any provider implementing the contract is
//! substitutable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Default sampling temperature for coaching responses.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Default output token budget for coaching responses.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;

/// Where a piece of answer text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Text generated by the upstream model.
    Ai,
    /// Deterministic locally-computed text.
    Fallback,
}

/// A single text-generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Fully composed prompt (system instructions + context + question).
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_output_tokens: u32,
}

impl GenerateRequest {
    /// Creates a request with the default generation parameters.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Generated text with its provenance.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The generated text.
    pub text: String,
    /// Always [`Source::Ai`] for provider output; fallbacks are produced
    /// locally by the specialists, never by a provider.
    pub source: Source,
}

/// Trait for generative-text backends.
///
/// One synchronous request/response call, no retry logic: a failed call
/// is classified ([`AgentError::RateLimited`] vs the rest) and surfaced
/// immediately so the caller can fall back deterministically.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name (e.g., `"gemini"`).
    fn name(&self) -> &'static str;

    /// Executes a generation request.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::RateLimited`] on quota exhaustion,
    /// [`AgentError::Provider`] on any other non-success response, and
    /// [`AgentError::ResponseParse`] when the payload is missing the
    /// expected fields.
    async fn generate(&self, request: &GenerateRequest) -> Result<Generated, AgentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req = GenerateRequest::new("hello");
        assert_eq!(req.prompt, "hello");
        assert!((req.temperature - DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
        assert_eq!(req.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
    }

    #[test]
    fn test_source_serialization() {
        let json = serde_json::to_string(&Source::Ai).unwrap_or_default();
        assert_eq!(json, "\"ai\"");
    }
}
