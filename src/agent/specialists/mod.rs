//! The four domain specialists.
//!
//! Each specialist owns a fixed system prompt, a question-enrichment
//! heuristic, and a deterministic fallback generator. They are
//! constructed once from a [`PromptSet`](crate::agent::prompt::PromptSet)
//! and shared; none hold per-request state.

pub mod emotional;
pub mod feeding;
pub mod routine;
pub mod sleep;

pub use emotional::EmotionalSupport;
pub use feeding::FeedingCoach;
pub use routine::RoutinePlanner;
pub use sleep::SleepCoach;
