//! Agent engine for CradleCoach.
//!
//! Routes a parent's free-text question to a domain specialist, streams
//! progress steps while working, and composes the final answer. Uses a
//! pluggable provider abstraction backed by the Gemini REST API.
//!
//! # Architecture
//!
//! ```text
//! Question → Orchestrator
//!   ├── classify (keyword tables) → primary + consultants
//!   ├── route to specialist
//!   │     SleepCoach | FeedingCoach | RoutinePlanner | EmotionalSupport
//!   │     └── provider call → AI answer, or deterministic fallback
//!   ├── consultant addenda (Routine Planner)
//!   └── safety footer → RouteResult { agent, response, steps }
//! ```
//!
//! Every provider failure is absorbed below the orchestrator; callers
//! always receive a completed [`RouteResult`].

pub mod classify;
pub mod client;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod safety;
pub mod specialists;
pub mod step;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types
pub use classify::{AgentKind, Classification, classify};
pub use client::create_provider;
pub use config::{AgentConfig, Pacing};
pub use context::{ActivitySnapshot, AgentContext, ChildProfile};
pub use dashboard::{DailyStatus, DailySummaryAgent, LogKind, TrendAnalyst, WeeklyTotals};
pub use orchestrator::{COORDINATOR_NAME, Orchestrator};
pub use prompt::PromptSet;
pub use provider::{GenerateRequest, Generated, Source, TextProvider};
pub use step::{AgentStep, ChannelSink, NullSink, ProgressSink, RouteResult, StepStatus};
pub use traits::Specialist;
