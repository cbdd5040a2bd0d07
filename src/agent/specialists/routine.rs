//! Routine Planner specialist.
//!
//! Handles daily-schedule questions directly and contributes the
//! consultation addendum when Sleep or Feeding is primary. A schedule
//! request falls back to a full hour-labelled day plan.

use crate::agent::classify::{AgentKind, Pattern};
use crate::agent::context::AgentContext;
use crate::agent::prompt::{FALLBACK_HEADER, PromptSet, ROUTINE_SYSTEM_PROMPT};
use crate::agent::traits::{PromptPlan, ResponseShape, Specialist};

/// Patterns signalling a request for a concrete schedule.
const SCHEDULE_REQUEST: &[Pattern] = &[
    Pattern::Term("schedule"),
    Pattern::Term("timetable"),
    Pattern::Term("routine"),
    Pattern::Term("time"),
    Pattern::Term("when"),
    Pattern::Term("daily"),
    Pattern::Term("plan"),
    Pattern::Term("hour"),
];

/// Patterns steering the prompt toward sleep-routine framing.
const SLEEP_TOPIC: &[Pattern] = &[
    Pattern::Term("sleep"),
    Pattern::Term("bedtime"),
    Pattern::Term("nap"),
];

/// Daily routine and schedule specialist.
#[derive(Debug, Clone)]
pub struct RoutinePlanner {
    system_prompt: String,
}

impl RoutinePlanner {
    /// Creates the specialist with prompts from the given set.
    #[must_use]
    pub fn new(prompts: &PromptSet) -> Self {
        Self {
            system_prompt: prompts.routine.clone(),
        }
    }
}

impl Default for RoutinePlanner {
    fn default() -> Self {
        Self {
            system_prompt: ROUTINE_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Full templated day plan, pure function of name and age.
fn schedule_fallback(name: &str, age_months: u32) -> String {
    format!(
        "{FALLBACK_HEADER}\n\n\
         **Daily Schedule for {name} ({age_months} months):**\n\n\
         **Morning:**\n\
         • 7:00 AM - Wake up & feed\n\
         • 8:00 AM - Playtime/tummy time\n\
         • 9:30 AM - Morning nap (1-2 hours)\n\n\
         **Afternoon:**\n\
         • 11:30 AM - Feed\n\
         • 12:00 PM - Active play & activities\n\
         • 2:00 PM - Afternoon nap\n\
         • 4:00 PM - Feed & quiet play\n\n\
         **Evening:**\n\
         • 5:30 PM - Dinner/feed\n\
         • 6:30 PM - Bath time\n\
         • 7:00 PM - Bedtime routine (story, cuddles)\n\
         • 7:30 PM - Sleep\n\n\
         **Studies show** consistent schedules **improve cognitive development** and \
         **self-regulation**.\n\n\
         _Note: The AI service has reached its quota limit. It will work again once quota \
         resets._"
    )
}

impl Specialist for RoutinePlanner {
    fn kind(&self) -> AgentKind {
        AgentKind::Routine
    }

    fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn build_prompt(&self, question: &str, ctx: &AgentContext) -> PromptPlan {
        let lower = question.to_lowercase();
        let wants_schedule = SCHEDULE_REQUEST.iter().any(|p| p.matches(&lower));
        let about_sleep = SLEEP_TOPIC.iter().any(|p| p.matches(&lower));

        let mut prompt = format!(
            "{system}\n\nChild: {name}, {age} months.\nQuestion: \"{question}\"\n\n",
            system = self.system_prompt,
            name = ctx.child.name,
            age = ctx.age_in_months(),
        );

        let shape = if wants_schedule {
            prompt.push_str(
                "The parent is asking for a SPECIFIC SCHEDULE. Provide:\n\
                 1. Exact times for activities (e.g., \"7:00 AM - Wake up and feed\")\n\
                 2. Age-appropriate activities with durations\n\
                 3. Brief research note on why this schedule benefits development\n\
                 Format with times clearly listed.",
            );
            ResponseShape::Detailed
        } else if about_sleep {
            prompt.push_str(
                "Focus on sleep routine. Include specific bedtime ritual steps with times, \
                 safe sleep practices, and research-backed benefits.",
            );
            ResponseShape::General
        } else {
            prompt.push_str("Provide research-based routine planning with specific, actionable advice.");
            ResponseShape::General
        };

        PromptPlan { prompt, shape }
    }

    fn fallback(&self, ctx: &AgentContext, shape: ResponseShape) -> String {
        let age = ctx.age_in_months();
        match shape {
            ResponseShape::Detailed => schedule_fallback(&ctx.child.name, age),
            ResponseShape::General => format!(
                "**Research shows** stable routines **boost development**. For \
                 {age}-month-olds, create consistent **meal/nap times** plus plenty of \
                 **play**. Studies link regular schedules to better **self-regulation** \
                 and **cognitive skills**."
            ),
        }
    }

    fn tip_prompt(&self, ctx: &AgentContext) -> String {
        format!(
            "{system}\n\nSuggest ONE routine tip for {name}, {age} months.",
            system = self.system_prompt,
            name = ctx.child.name,
            age = ctx.age_in_months(),
        )
    }

    fn tip_fallback(&self, ctx: &AgentContext) -> String {
        format!(
            "Studies show routines enhance development. Create a predictable rhythm for \
             {} - consistent meal/sleep times plus unstructured play for cognitive growth.",
            ctx.child.name
        )
    }

    fn consult_note(&self, ctx: &AgentContext) -> String {
        format!(
            "\n\n💡 **{} adds:** Research shows building this into a consistent daily \
             routine supports {}'s development. Try scheduling regular times for this \
             activity.",
            self.name(),
            ctx.child.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::test_context;
    use test_case::test_case;

    #[test_case("What's a good daily schedule?", ResponseShape::Detailed; "schedule request")]
    #[test_case("Suggest a timetable for the day", ResponseShape::Detailed; "timetable request")]
    #[test_case("How much unstructured play is healthy?", ResponseShape::General; "general question")]
    fn test_branch_selection(question: &str, expected: ResponseShape) {
        let planner = RoutinePlanner::default();
        let ctx = test_context(8);
        assert_eq!(planner.build_prompt(question, &ctx).shape, expected);
    }

    #[test]
    fn test_sleep_topic_gets_sleep_framing() {
        let planner = RoutinePlanner::default();
        let ctx = test_context(8);
        let plan = planner.build_prompt("Struggling with bedtime battles", &ctx);
        assert_eq!(plan.shape, ResponseShape::General);
        assert!(plan.prompt.contains("Focus on sleep routine"));
    }

    #[test]
    fn test_schedule_fallback_is_hour_labelled() {
        let planner = RoutinePlanner::default();
        let ctx = test_context(8);
        let text = planner.fallback(&ctx, ResponseShape::Detailed);
        assert!(text.contains("7:00 AM"));
        assert!(text.contains("7:30 PM"));
        assert!(text.contains("Ava"));
        assert!(text.contains(FALLBACK_HEADER));
    }

    #[test]
    fn test_consult_note_attributes_routine_planner() {
        let planner = RoutinePlanner::default();
        let ctx = test_context(8);
        let note = planner.consult_note(&ctx);
        assert!(note.contains("**Routine Planner adds:**"));
        assert!(note.contains("Ava"));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let planner = RoutinePlanner::default();
        let ctx = test_context(8);
        assert_eq!(
            planner.fallback(&ctx, ResponseShape::Detailed),
            planner.fallback(&ctx, ResponseShape::Detailed)
        );
    }
}
