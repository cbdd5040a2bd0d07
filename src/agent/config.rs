//! Agent configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AgentError;

/// Default Gemini model for all coaching calls.
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// Default sampling temperature.
const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Default output token budget.
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;
/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Delay strategy paced between orchestrator steps.
///
/// The delays exist purely so a UI consuming the step stream can render
/// each transition perceptibly; they carry no semantic meaning. Tests
/// run the full state machine with [`Pacing::none`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pacing {
    /// Pause while classifying the question.
    pub classify: Duration,
    /// Pause while routing to the primary specialist.
    pub route: Duration,
    /// Pause per consultation request.
    pub consult: Duration,
    /// Pause before each consultant's contribution step opens.
    pub contribute_lead: Duration,
    /// Pause while a consultant contributes its addendum.
    pub contribute: Duration,
    /// Pause while finalizing the response.
    pub finalize: Duration,
}

impl Pacing {
    /// Interactive pacing tuned for step-by-step UI rendering.
    #[must_use]
    pub const fn interactive() -> Self {
        Self {
            classify: Duration::from_millis(1000),
            route: Duration::from_millis(800),
            consult: Duration::from_millis(700),
            contribute_lead: Duration::from_millis(600),
            contribute: Duration::from_millis(800),
            finalize: Duration::from_millis(500),
        }
    }

    /// Zero delays everywhere; the state machine runs as fast as the
    /// provider allows.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            classify: Duration::ZERO,
            route: Duration::ZERO,
            consult: Duration::ZERO,
            contribute_lead: Duration::ZERO,
            contribute: Duration::ZERO,
            finalize: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::interactive()
    }
}

/// Configuration for the agent engine.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Provider name (e.g., "gemini").
    pub provider: String,
    /// API key for the provider.
    pub api_key: String,
    /// Optional base URL override (for proxies or compatible APIs).
    pub base_url: Option<String>,
    /// Model identifier for all coaching calls.
    pub model: String,
    /// Sampling temperature passed to the provider.
    pub temperature: f32,
    /// Maximum tokens the provider may generate per call.
    pub max_output_tokens: u32,
    /// Request timeout.
    pub timeout: Duration,
    /// Delay strategy between orchestrator steps.
    pub pacing: Pacing,
    /// Directory containing prompt template files.
    ///
    /// When set, specialist system prompts are loaded from markdown files
    /// in this directory, falling back to compiled-in defaults for any
    /// missing files.
    pub prompt_dir: Option<PathBuf>,
}

impl AgentConfig {
    /// Creates a new builder for `AgentConfig`.
    #[must_use]
    pub fn builder() -> AgentConfigBuilder {
        AgentConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiKeyMissing`] if no API key is found.
    pub fn from_env() -> Result<Self, AgentError> {
        Self::builder().from_env().build()
    }
}

/// Builder for [`AgentConfig`].
#[derive(Debug, Clone, Default)]
pub struct AgentConfigBuilder {
    provider: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
    timeout: Option<Duration>,
    pacing: Option<Pacing>,
    prompt_dir: Option<PathBuf>,
}

impl AgentConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if self.provider.is_none() {
            self.provider = std::env::var("CRADLE_PROVIDER").ok();
        }
        if self.api_key.is_none() {
            self.api_key = std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("CRADLE_API_KEY"))
                .ok();
        }
        if self.base_url.is_none() {
            self.base_url = std::env::var("CRADLE_BASE_URL").ok();
        }
        if self.model.is_none() {
            self.model = std::env::var("CRADLE_MODEL").ok();
        }
        if self.prompt_dir.is_none() {
            self.prompt_dir = std::env::var("CRADLE_PROMPT_DIR").ok().map(PathBuf::from);
        }
        self
    }

    /// Sets the provider name.
    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the base URL override.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, t: f32) -> Self {
        self.temperature = Some(t);
        self
    }

    /// Sets the output token budget.
    #[must_use]
    pub const fn max_output_tokens(mut self, n: u32) -> Self {
        self.max_output_tokens = Some(n);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets the step pacing strategy.
    #[must_use]
    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = Some(pacing);
        self
    }

    /// Sets the prompt template directory.
    #[must_use]
    pub fn prompt_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prompt_dir = Some(dir.into());
        self
    }

    /// Builds the [`AgentConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiKeyMissing`] if no API key was set.
    pub fn build(self) -> Result<AgentConfig, AgentError> {
        let api_key = self.api_key.ok_or(AgentError::ApiKeyMissing)?;

        Ok(AgentConfig {
            provider: self.provider.unwrap_or_else(|| "gemini".to_string()),
            api_key,
            base_url: self.base_url,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_output_tokens: self.max_output_tokens.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            pacing: self.pacing.unwrap_or_default(),
            prompt_dir: self.prompt_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = AgentConfig::builder()
            .api_key("test-key")
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.provider, "gemini");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
        assert_eq!(config.pacing, Pacing::interactive());
    }

    #[test]
    fn test_builder_missing_api_key() {
        let result = AgentConfig::builder().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AgentConfig::builder()
            .api_key("key")
            .provider("custom")
            .model("gemini-1.5-pro")
            .temperature(0.2)
            .timeout(Duration::from_secs(5))
            .pacing(Pacing::none())
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.provider, "custom");
        assert_eq!(config.model, "gemini-1.5-pro");
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.pacing, Pacing::none());
    }

    #[test]
    fn test_pacing_none_is_all_zero() {
        let p = Pacing::none();
        assert!(p.classify.is_zero());
        assert!(p.finalize.is_zero());
    }
}
