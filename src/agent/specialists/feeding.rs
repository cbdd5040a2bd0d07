//! Feeding Coach specialist.
//!
//! Feeding questions get the same prompt suffix regardless of phrasing;
//! the fallback branches on age instead (milk-only vs solids guidance).

use crate::agent::classify::AgentKind;
use crate::agent::context::AgentContext;
use crate::agent::prompt::{FEEDING_SYSTEM_PROMPT, PromptSet};
use crate::agent::traits::{PromptPlan, ResponseShape, Specialist};

/// Feeding and nutrition specialist.
#[derive(Debug, Clone)]
pub struct FeedingCoach {
    system_prompt: String,
}

impl FeedingCoach {
    /// Creates the specialist with prompts from the given set.
    #[must_use]
    pub fn new(prompts: &PromptSet) -> Self {
        Self {
            system_prompt: prompts.feeding.clone(),
        }
    }
}

impl Default for FeedingCoach {
    fn default() -> Self {
        Self {
            system_prompt: FEEDING_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl Specialist for FeedingCoach {
    fn kind(&self) -> AgentKind {
        AgentKind::Feeding
    }

    fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn build_prompt(&self, question: &str, ctx: &AgentContext) -> PromptPlan {
        let prompt = format!(
            "{system}\n\nChild: {name}, {age} months. Today's feeds: {feeds}.\n\
             Question: \"{question}\"\n\nProvide research-based feeding advice.",
            system = self.system_prompt,
            name = ctx.child.name,
            age = ctx.age_in_months(),
            feeds = ctx.feed_count(),
        );
        PromptPlan {
            prompt,
            shape: ResponseShape::General,
        }
    }

    // The age bracket, not the question shape, decides the fallback text:
    // exclusive milk guidance under 6 months, solids and textures after.
    fn fallback(&self, ctx: &AgentContext, _shape: ResponseShape) -> String {
        let age = ctx.age_in_months();
        let name = &ctx.child.name;
        if age < 6 {
            format!(
                "At {age} months, **breast milk or formula** provides complete nutrition. \
                 **Research emphasizes responsive feeding** - watch {name}'s hunger cues \
                 and feed on demand."
            )
        } else {
            format!(
                "For {age}-month-olds, offer **iron-rich foods** and varied textures. \
                 Studies show **responsive feeding** (following {name}'s cues without \
                 pressure) supports **healthy development**."
            )
        }
    }

    fn tip_prompt(&self, ctx: &AgentContext) -> String {
        format!(
            "{system}\n\nGenerate ONE feeding tip for {name}, {age} months, {feeds} feeds today.",
            system = self.system_prompt,
            name = ctx.child.name,
            age = ctx.age_in_months(),
            feeds = ctx.feed_count(),
        )
    }

    fn tip_fallback(&self, ctx: &AgentContext) -> String {
        format!(
            "**Research shows responsive feeding is key.** Watch {}'s hunger cues, offer \
             variety without pressure, make meals pleasant. This approach links to better \
             **self-regulation**.",
            ctx.child.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::test_context;

    #[test]
    fn test_prompt_embeds_feed_count() {
        let coach = FeedingCoach::default();
        let ctx = test_context(8);
        let plan = coach.build_prompt("Is 6 feeds a day enough?", &ctx);
        assert!(plan.prompt.contains("Today's feeds: 5"));
        assert!(plan.prompt.contains("Is 6 feeds a day enough?"));
        assert_eq!(plan.shape, ResponseShape::General);
    }

    #[test]
    fn test_fallback_under_six_months_mentions_milk() {
        let coach = FeedingCoach::default();
        let ctx = test_context(4);
        let text = coach.fallback(&ctx, ResponseShape::General);
        assert!(text.contains("breast milk or formula"));
    }

    #[test]
    fn test_fallback_from_six_months_mentions_solids() {
        let coach = FeedingCoach::default();
        let ctx = test_context(6);
        let text = coach.fallback(&ctx, ResponseShape::General);
        assert!(text.contains("iron-rich foods"));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let coach = FeedingCoach::default();
        let ctx = test_context(7);
        assert_eq!(
            coach.fallback(&ctx, ResponseShape::General),
            coach.fallback(&ctx, ResponseShape::General)
        );
    }
}
