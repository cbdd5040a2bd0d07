//! Specialist trait definition.
//!
//! All four domain specialists implement this trait, which gives the
//! orchestrator a uniform interface and centralizes the
//! call-then-fallback shape: the provider is attempted once, and any
//! failure is converted to deterministic local text. A specialist never
//! returns an error.

use async_trait::async_trait;

use super::classify::AgentKind;
use super::context::AgentContext;
use super::prompt::AI_RESPONSE_MARKER;
use super::provider::{GenerateRequest, TextProvider};

/// Which answer shape the question asked for.
///
/// Detected while building the prompt and reused by the fallback so a
/// schedule request still gets a schedule when the provider is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// The parent asked for a concrete schedule or step list.
    Detailed,
    /// General advice.
    General,
}

/// A composed prompt plus the answer shape it requests.
#[derive(Debug, Clone)]
pub struct PromptPlan {
    /// Fully composed prompt text.
    pub prompt: String,
    /// Branch the fallback must mirror.
    pub shape: ResponseShape,
}

/// Trait implemented by all domain specialists.
///
/// Specialists are stateless service objects: constructed once from a
/// [`PromptSet`](super::prompt::PromptSet), shared for the process
/// lifetime, and handed an immutable context per call.
#[async_trait]
pub trait Specialist: Send + Sync {
    /// Which routing slot this specialist fills.
    fn kind(&self) -> AgentKind;

    /// Display name used in step traces.
    fn name(&self) -> &'static str {
        self.kind().display_name()
    }

    /// Fixed domain system prompt.
    fn system_prompt(&self) -> &str;

    /// Composes the enriched prompt for a question and picks the answer
    /// shape branch.
    fn build_prompt(&self, question: &str, ctx: &AgentContext) -> PromptPlan;

    /// Deterministic fallback answer for the given shape. Pure function
    /// of the context; never empty.
    fn fallback(&self, ctx: &AgentContext, shape: ResponseShape) -> String;

    /// Prompt for the single-sentence dashboard variant.
    fn tip_prompt(&self, ctx: &AgentContext) -> String;

    /// Deterministic fallback for the dashboard variant.
    fn tip_fallback(&self, ctx: &AgentContext) -> String;

    /// Short addendum paragraph contributed when this specialist is
    /// pulled in as a secondary consultant.
    fn consult_note(&self, ctx: &AgentContext) -> String {
        format!(
            "\n\n💡 **{} adds:** Keeping this consistent day to day helps {} know what to \
             expect, which supports self-regulation.",
            self.name(),
            ctx.child.name
        )
    }

    /// Analyzes a question: one provider call, then the deterministic
    /// fallback on any failure. Always returns text.
    async fn analyze_question(
        &self,
        provider: &dyn TextProvider,
        question: &str,
        ctx: &AgentContext,
    ) -> String {
        let plan = self.build_prompt(question, ctx);
        match provider.generate(&GenerateRequest::new(&plan.prompt)).await {
            Ok(generated) => format!("{AI_RESPONSE_MARKER}{}", generated.text),
            Err(e) => {
                tracing::warn!(
                    agent = self.name(),
                    rate_limited = e.is_rate_limited(),
                    error = %e,
                    "Provider call failed, using fallback response"
                );
                self.fallback(ctx, plan.shape)
            }
        }
    }

    /// Single-sentence dashboard tip, same call-then-fallback shape.
    async fn quick_tip(&self, provider: &dyn TextProvider, ctx: &AgentContext) -> String {
        let prompt = self.tip_prompt(ctx);
        match provider.generate(&GenerateRequest::new(&prompt)).await {
            Ok(generated) => generated.text,
            Err(e) => {
                tracing::debug!(agent = self.name(), error = %e, "Tip call failed, using fallback");
                self.tip_fallback(ctx)
            }
        }
    }
}
