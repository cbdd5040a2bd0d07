//! Provider registry and factory.
//!
//! Maps provider names to concrete [`TextProvider`] implementations.

use crate::agent::config::AgentConfig;
use crate::agent::provider::TextProvider;
use crate::agent::providers::GeminiProvider;
use crate::error::AgentError;

/// Creates a [`TextProvider`] based on the configured provider name.
///
/// # Supported Providers
///
/// - `"gemini"` (default) — Google Gemini via the `generateContent` REST API
///
/// # Errors
///
/// Returns [`AgentError::UnsupportedProvider`] for unknown provider names,
/// or a construction error from the provider itself.
pub fn create_provider(config: &AgentConfig) -> Result<Box<dyn TextProvider>, AgentError> {
    match config.provider.as_str() {
        "gemini" => Ok(Box::new(GeminiProvider::new(config)?)),
        other => Err(AgentError::UnsupportedProvider {
            name: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_gemini_provider() {
        let config = AgentConfig::builder()
            .api_key("test")
            .provider("gemini")
            .build()
            .unwrap_or_else(|_| unreachable!());
        let provider = create_provider(&config);
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap_or_else(|_| unreachable!()).name(), "gemini");
    }

    #[test]
    fn test_create_unknown_provider() {
        let config = AgentConfig::builder()
            .api_key("test")
            .provider("unknown")
            .build()
            .unwrap_or_else(|_| unreachable!());
        let result = create_provider(&config);
        assert!(result.is_err());
    }
}
