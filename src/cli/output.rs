//! Output formatting for CLI results.
//!
//! Text output is for humans at a terminal; JSON output is stable and
//! intended for piping into other tools.

use crate::agent::{AgentStep, DailyStatus, RouteResult, StepStatus};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Parses a format name, defaulting to text for unknown values.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Serializes a value as pretty JSON, falling back to an empty
    /// object on serialization failure.
    #[must_use]
    pub fn to_json<T: serde::Serialize>(self, value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// One step transition as a progress line.
#[must_use]
pub fn format_step(step: &AgentStep) -> String {
    match step.status {
        StepStatus::Thinking => format!("[thinking]   {}: {}", step.agent, step.action),
        StepStatus::Consulting => format!("[consulting] {}: {}", step.agent, step.action),
        StepStatus::Complete => {
            let result = step.result.as_deref().unwrap_or("done");
            format!("[complete]   {}: {result}", step.agent)
        }
    }
}

/// Final answer block following the streamed steps.
#[must_use]
pub fn format_route_result(result: &RouteResult) -> String {
    format!("\n— {} —\n\n{}", result.agent, result.response)
}

/// Daily status line for the summary command.
#[must_use]
pub fn format_daily_status(status: &DailyStatus) -> String {
    format!("{} {}", status.emoji, status.status)
}
