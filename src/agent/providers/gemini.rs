//! Gemini provider implementation over the `generateContent` REST API.
//!
//! Talks to `generativelanguage.googleapis.com` (or a compatible proxy
//! via the base URL override in `AgentConfig`). HTTP 429 and the
//! `RESOURCE_EXHAUSTED` status are classified as rate limiting; every
//! other failure is a generic provider error. No retries here - a failed
//! call is surfaced immediately so callers can fall back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::agent::config::AgentConfig;
use crate::agent::provider::{GenerateRequest, Generated, Source, TextProvider};
use crate::error::AgentError;

/// Default API base for the Gemini REST endpoint.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini generative-text provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    contents: Vec<WireContent>,
    generation_config: WireGenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct WireContent {
    parts: Vec<WirePart>,
}

#[derive(Serialize, Deserialize)]
struct WirePart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Deserialize)]
struct WireCandidate {
    content: Option<WireContent>,
}

#[derive(Deserialize, Default)]
struct WireErrorBody {
    #[serde(default)]
    error: WireErrorDetail,
}

#[derive(Deserialize, Default)]
struct WireErrorDetail {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

impl GeminiProvider {
    /// Creates a provider from agent configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Provider`] if the HTTP client cannot be
    /// constructed (invalid TLS backend or timeout configuration).
    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgentError::Provider {
                message: format!("Failed to build HTTP client: {e}"),
                status: None,
            })?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn build_body(request: &GenerateRequest) -> WireRequest {
        WireRequest {
            contents: vec![WireContent {
                parts: vec![WirePart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: WireGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        }
    }

    /// Classifies a non-success response body into the error taxonomy.
    fn classify_failure(status: u16, body: &str) -> AgentError {
        let detail: WireErrorBody = serde_json::from_str(body).unwrap_or_default();
        if status == 429 || detail.error.code == 429 || detail.error.status == "RESOURCE_EXHAUSTED" {
            AgentError::RateLimited {
                message: if detail.error.message.is_empty() {
                    "quota exceeded".to_string()
                } else {
                    detail.error.message
                },
            }
        } else {
            AgentError::Provider {
                message: if detail.error.message.is_empty() {
                    format!("API error: {status}")
                } else {
                    detail.error.message
                },
                status: Some(status),
            }
        }
    }

    /// Extracts `candidates[0].content.parts[0].text` from a payload.
    fn extract_text(response: WireResponse) -> Result<String, AgentError> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| AgentError::ResponseParse {
                message: "Response is missing candidates[0].content.parts[0].text".to_string(),
            })
    }
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<Generated, AgentError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_body(request))
            .send()
            .await
            .map_err(|e| AgentError::Provider {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = Self::classify_failure(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %err, "Gemini call failed");
            return Err(err);
        }

        let payload: WireResponse =
            response
                .json()
                .await
                .map_err(|e| AgentError::ResponseParse {
                    message: e.to_string(),
                })?;

        let text = Self::extract_text(payload)?;
        tracing::debug!(chars = text.len(), "Gemini response received");

        Ok(Generated {
            text,
            source: Source::Ai,
        })
    }
}
