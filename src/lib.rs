//! CradleCoach: a multi-agent coaching engine for parents of 0-3
//! year-olds.
//!
//! The engine classifies a free-text question, routes it to a domain
//! specialist (sleep, feeding, routines, emotional support), streams
//! progress steps while working, and composes a final answer with a
//! safety footer. When the generative provider fails — rate limits
//! included — every agent degrades to deterministic, age-aware fallback
//! text, so the engine never returns an error or an empty response.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use cradlecoach::agent::{
//!     AgentConfig, AgentContext, ChildProfile, NullSink, Orchestrator, create_provider,
//! };
//!
//! # async fn run() -> Result<(), cradlecoach::AgentError> {
//! let config = AgentConfig::from_env()?;
//! let provider = create_provider(&config)?;
//! let orchestrator = Orchestrator::new(Arc::from(provider), &config);
//!
//! let child = ChildProfile {
//!     id: "child-1".to_string(),
//!     name: "Ava".to_string(),
//!     date_of_birth: chrono::NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
//! };
//! let ctx = AgentContext::new(child);
//!
//! let result = orchestrator
//!     .route_and_process("Why is she waking at night?", &ctx, &NullSink)
//!     .await;
//! println!("{}: {}", result.agent, result.response);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod cli;
pub mod error;

pub use agent::{
    AgentConfig, AgentContext, AgentKind, AgentStep, ChannelSink, NullSink, Orchestrator,
    ProgressSink, RouteResult, StepStatus, TextProvider, create_provider,
};
pub use error::{AgentError, CommandError};
