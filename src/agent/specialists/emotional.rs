//! Emotional Support specialist.
//!
//! The only specialist whose prompt does not embed activity counts; it
//! addresses the parent, not the child's data.

use crate::agent::classify::AgentKind;
use crate::agent::context::AgentContext;
use crate::agent::prompt::{EMOTIONAL_SYSTEM_PROMPT, PromptSet};
use crate::agent::traits::{PromptPlan, ResponseShape, Specialist};

/// Rotating supportive one-liners for the dashboard surface.
pub const SUPPORT_MESSAGES: &[&str] = &[
    "Research shows parenting stress is valid. Problem-focused coping (making plans, asking \
     for help) is proven effective. You're doing great by reaching out.",
    "Studies find self-care isn't selfish - it's essential. Parents who practice stress \
     management have better emotional regulation. Take moments for yourself.",
    "Evidence shows reframing positively (\"I'm learning\") helps more than self-criticism. \
     Every day caring for your baby is an accomplishment.",
    "Research emphasizes: reaching out for support is strength. Parents who connect with \
     others cope better. You're not alone.",
];

/// Parental stress and coping specialist.
#[derive(Debug, Clone)]
pub struct EmotionalSupport {
    system_prompt: String,
}

impl EmotionalSupport {
    /// Creates the specialist with prompts from the given set.
    #[must_use]
    pub fn new(prompts: &PromptSet) -> Self {
        Self {
            system_prompt: prompts.emotional.clone(),
        }
    }

    /// Picks a supportive message deterministically from an arbitrary
    /// seed (e.g., a timestamp or request counter).
    #[must_use]
    pub fn support_message(seed: usize) -> &'static str {
        SUPPORT_MESSAGES[seed % SUPPORT_MESSAGES.len()]
    }
}

impl Default for EmotionalSupport {
    fn default() -> Self {
        Self {
            system_prompt: EMOTIONAL_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl Specialist for EmotionalSupport {
    fn kind(&self) -> AgentKind {
        AgentKind::Emotional
    }

    fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn build_prompt(&self, question: &str, ctx: &AgentContext) -> PromptPlan {
        let prompt = format!(
            "{system}\n\nParent of {name}. Concern: \"{question}\"\n\n\
             Provide research-based emotional support.",
            system = self.system_prompt,
            name = ctx.child.name,
        );
        PromptPlan {
            prompt,
            shape: ResponseShape::General,
        }
    }

    fn fallback(&self, _ctx: &AgentContext, _shape: ResponseShape) -> String {
        "It's completely normal to feel overwhelmed - research shows parenting stress is \
         common. Try cognitive reappraisal: \"this phase will pass.\" Studies show this \
         technique plus self-care and reaching out for support are most effective."
            .to_string()
    }

    fn tip_prompt(&self, ctx: &AgentContext) -> String {
        format!(
            "{system}\n\nGenerate ONE short supportive message for the parent of {name}.",
            system = self.system_prompt,
            name = ctx.child.name,
        )
    }

    fn tip_fallback(&self, _ctx: &AgentContext) -> String {
        Self::support_message(0).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::test_context;

    #[test]
    fn test_prompt_addresses_the_parent() {
        let agent = EmotionalSupport::default();
        let ctx = test_context(5);
        let plan = agent.build_prompt("I feel overwhelmed and exhausted", &ctx);
        assert!(plan.prompt.contains("Parent of Ava"));
        assert!(plan.prompt.contains("I feel overwhelmed and exhausted"));
        assert_eq!(plan.shape, ResponseShape::General);
    }

    #[test]
    fn test_fallback_is_fixed_and_non_empty() {
        let agent = EmotionalSupport::default();
        let ctx = test_context(5);
        let a = agent.fallback(&ctx, ResponseShape::General);
        let b = agent.fallback(&ctx, ResponseShape::General);
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn test_support_message_wraps_around() {
        assert_eq!(
            EmotionalSupport::support_message(0),
            EmotionalSupport::support_message(SUPPORT_MESSAGES.len())
        );
    }
}
