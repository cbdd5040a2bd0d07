//! Concrete [`TextProvider`](crate::agent::provider::TextProvider)
//! implementations.

pub mod gemini;

pub use gemini::GeminiProvider;
