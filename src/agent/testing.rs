//! Shared test support: a deterministic provider double and context
//! fixtures. Compiled only for tests.

use async_trait::async_trait;
use chrono::{Months, Utc};

use super::context::{ActivitySnapshot, AgentContext, ChildProfile};
use super::provider::{GenerateRequest, Generated, Source, TextProvider};
use crate::error::AgentError;

/// How the mock should behave on each call.
#[derive(Debug, Clone)]
enum Mode {
    Reply(String),
    RateLimited,
    Error,
}

/// Deterministic [`TextProvider`] double.
#[derive(Debug, Clone)]
pub(crate) struct MockProvider {
    mode: Mode,
}

impl MockProvider {
    /// Always succeeds with the given text.
    pub(crate) fn replying(text: &str) -> Self {
        Self {
            mode: Mode::Reply(text.to_string()),
        }
    }

    /// Always fails with a rate-limit classification.
    pub(crate) fn rate_limited() -> Self {
        Self {
            mode: Mode::RateLimited,
        }
    }

    /// Always fails with a generic provider error.
    pub(crate) fn failing() -> Self {
        Self { mode: Mode::Error }
    }
}

#[async_trait]
impl TextProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, _request: &GenerateRequest) -> Result<Generated, AgentError> {
        match &self.mode {
            Mode::Reply(text) => Ok(Generated {
                text: text.clone(),
                source: Source::Ai,
            }),
            Mode::RateLimited => Err(AgentError::RateLimited {
                message: "quota exceeded".to_string(),
            }),
            Mode::Error => Err(AgentError::Provider {
                message: "upstream unavailable".to_string(),
                status: Some(503),
            }),
        }
    }
}

/// Context for a child named Ava at the given age, with a small set of
/// today's logs (sleep=1, feed=5, diaper=3).
pub(crate) fn test_context(age_months: u32) -> AgentContext {
    let dob = Utc::now()
        .date_naive()
        .checked_sub_months(Months::new(age_months))
        .unwrap_or_default();
    AgentContext {
        child: ChildProfile {
            id: "child-1".to_string(),
            name: "Ava".to_string(),
            date_of_birth: dob,
        },
        recent_logs: Some(ActivitySnapshot {
            sleep: 1,
            feed: 5,
            diaper: 3,
            mood: Some("calm".to_string()),
        }),
        goals: vec!["better-sleep".to_string()],
    }
}
