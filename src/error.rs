//! Error types for the agent engine.
//!
//! Failures from the generative provider are classified here and caught
//! at the lowest layer that can produce deterministic fallback text.
//! No [`AgentError`] ever crosses the orchestrator's public boundary.

use thiserror::Error;

/// Errors raised by the agent engine.
#[derive(Debug, Error)]
pub enum AgentError {
    /// No API key was configured for the generative provider.
    #[error("No API key configured. Set GEMINI_API_KEY or CRADLE_API_KEY.")]
    ApiKeyMissing,

    /// The provider reported quota exhaustion (HTTP 429 / RESOURCE_EXHAUSTED).
    #[error("Provider rate limited: {message}")]
    RateLimited {
        /// Provider-supplied detail.
        message: String,
    },

    /// Any other non-success response from the provider.
    #[error("Provider request failed: {message}")]
    Provider {
        /// Transport or provider error detail.
        message: String,
        /// HTTP status, when the request reached the provider.
        status: Option<u16>,
    },

    /// The provider responded but the payload was missing expected fields.
    #[error("Failed to parse provider response: {message}")]
    ResponseParse {
        /// What was missing or malformed.
        message: String,
    },

    /// The configured provider name has no registered implementation.
    #[error("Unsupported provider: {name}")]
    UnsupportedProvider {
        /// The unrecognized provider name.
        name: String,
    },
}

impl AgentError {
    /// Whether this error is a quota/rate-limit condition.
    ///
    /// Specialists treat rate limiting identically to any other provider
    /// failure (immediate deterministic fallback, no retry); this exists
    /// for diagnostics and for callers that want to surface the
    /// distinction.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// Errors raised by the CLI command layer.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A command could not complete.
    #[error("Command failed: {0}")]
    ExecutionFailed(String),

    /// An argument value could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Result serialization for the requested output format failed.
    #[error("Output formatting failed: {0}")]
    OutputFormat(String),
}

/// Convenience alias for CLI command results.
pub type Result<T> = std::result::Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_classification() {
        let err = AgentError::RateLimited {
            message: "quota exceeded".to_string(),
        };
        assert!(err.is_rate_limited());

        let err = AgentError::Provider {
            message: "server error".to_string(),
            status: Some(500),
        };
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_display_includes_detail() {
        let err = AgentError::Provider {
            message: "connection refused".to_string(),
            status: None,
        };
        assert!(err.to_string().contains("connection refused"));
    }
}
