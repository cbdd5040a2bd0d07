//! Sleep Coach specialist.
//!
//! Detects whether the parent wants a concrete routine (times, steps) or
//! general advice, and mirrors that branch in the deterministic fallback
//! so a schedule request still yields a full schedule when the provider
//! is unavailable.

use crate::agent::classify::{AgentKind, Pattern};
use crate::agent::context::AgentContext;
use crate::agent::prompt::{FALLBACK_HEADER, PromptSet, SLEEP_SYSTEM_PROMPT};
use crate::agent::traits::{PromptPlan, ResponseShape, Specialist};

/// Patterns signalling a request for concrete routine guidance.
const ROUTINE_REQUEST: &[Pattern] = &[
    Pattern::Term("routine"),
    Pattern::Term("schedule"),
    Pattern::Term("best"),
    Pattern::Seq("what", "time"),
    Pattern::Term("when"),
    Pattern::Seq("how", "sleep"),
    Pattern::Term("suggest"),
];

/// Infant/toddler sleep specialist.
#[derive(Debug, Clone)]
pub struct SleepCoach {
    system_prompt: String,
}

impl SleepCoach {
    /// Creates the specialist with prompts from the given set.
    #[must_use]
    pub fn new(prompts: &PromptSet) -> Self {
        Self {
            system_prompt: prompts.sleep.clone(),
        }
    }
}

impl Default for SleepCoach {
    fn default() -> Self {
        Self {
            system_prompt: SLEEP_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Age-appropriate nap guidance line.
fn nap_schedule(age_months: u32) -> &'static str {
    if age_months < 6 {
        "3-4 naps throughout the day (wake windows: 1-2 hours)"
    } else if age_months < 12 {
        "2-3 naps (9:00 AM, 1:00 PM, optional late afternoon)"
    } else {
        "1-2 naps (usually around 1:00 PM)"
    }
}

/// Full templated bedtime schedule, pure function of name and age.
fn schedule_fallback(name: &str, age_months: u32) -> String {
    format!(
        "{FALLBACK_HEADER}\n\n\
         **Best Sleep Routine for {name} ({age_months} months):**\n\n\
         **Bedtime Routine (30-45 min before sleep):**\n\
         • 6:30 PM - Warm bath (calming)\n\
         • 7:00 PM - Gentle massage with lotion\n\
         • 7:10 PM - Put on sleep clothes\n\
         • 7:15 PM - Dim lights, quiet story time\n\
         • 7:30 PM - Cuddles, lullaby, place in crib drowsy but awake\n\
         • 7:45 PM - Lights out, sleep\n\n\
         **Daytime:** {naps}\n\n\
         **Safe Sleep:** Always back-to-sleep, firm mattress, no loose blankets/toys.\n\n\
         **Research shows** consistent routines 5+ nights/week significantly **improve sleep \
         quality** and **reduce behavior issues**. This predictable pattern helps {name}'s \
         brain recognize sleep cues.\n\n\
         _Note: The AI service has reached its quota limit. It will work again once quota \
         resets._",
        naps = nap_schedule(age_months),
    )
}

/// General-advice fallback prose.
fn advice_fallback(name: &str, age_months: u32) -> String {
    format!(
        "At {age_months} months, **research shows** consistent **bedtime routines** are \
         crucial. Try a calming sequence (bath, story, cuddles) at the same time nightly. \
         This helps {name} **sleep better** and supports **emotional regulation**."
    )
}

impl Specialist for SleepCoach {
    fn kind(&self) -> AgentKind {
        AgentKind::Sleep
    }

    fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn build_prompt(&self, question: &str, ctx: &AgentContext) -> PromptPlan {
        let lower = question.to_lowercase();
        let wants_routine = ROUTINE_REQUEST.iter().any(|p| p.matches(&lower));

        let mut prompt = format!(
            "{system}\n\nChild: {name}, {age} months. Today's sleep: {sleep} sessions.\n\
             Question: \"{question}\"\n\n",
            system = self.system_prompt,
            name = ctx.child.name,
            age = ctx.age_in_months(),
            sleep = ctx.sleep_count(),
        );

        let shape = if wants_routine {
            prompt.push_str(
                "The parent wants SPECIFIC sleep routine guidance. Provide:\n\
                 1. Exact bedtime routine with times (e.g., \"6:30 PM - Start bath\")\n\
                 2. Step-by-step pre-sleep activities\n\
                 3. Age-appropriate total sleep hours and nap schedule\n\
                 4. Safe sleep reminders\n\
                 5. Research-backed explanation of benefits\n\n\
                 Make it detailed and actionable.",
            );
            ResponseShape::Detailed
        } else {
            prompt.push_str("Provide research-based sleep coaching with specific, practical advice.");
            ResponseShape::General
        };

        PromptPlan { prompt, shape }
    }

    fn fallback(&self, ctx: &AgentContext, shape: ResponseShape) -> String {
        let age = ctx.age_in_months();
        match shape {
            ResponseShape::Detailed => schedule_fallback(&ctx.child.name, age),
            ResponseShape::General => advice_fallback(&ctx.child.name, age),
        }
    }

    fn tip_prompt(&self, ctx: &AgentContext) -> String {
        format!(
            "{system}\n\nGenerate ONE sleep tip for {name}, {age} months, {sleep} sleep \
             sessions today.",
            system = self.system_prompt,
            name = ctx.child.name,
            age = ctx.age_in_months(),
            sleep = ctx.sleep_count(),
        )
    }

    fn tip_fallback(&self, ctx: &AgentContext) -> String {
        format!(
            "Research shows bedtime routines improve sleep consolidation. Start a calming \
             30-minute routine before sleep for {}.",
            ctx.child.name
        )
    }
}
