//! Orchestrator for the question-routing workflow.
//!
//! Coordinates the full pipeline: classification → routing → optional
//! consultation → primary analysis → consultant contributions →
//! finalization. Emits a progress step at every transition and
//! guarantees a non-empty response even under total provider failure.

use std::sync::Arc;

use super::classify::{AgentKind, Classification, classify};
use super::config::{AgentConfig, Pacing};
use super::context::AgentContext;
use super::prompt::{AI_RESPONSE_MARKER, PromptSet, build_general_prompt, general_fallback};
use super::provider::{GenerateRequest, TextProvider};
use super::specialists::{EmotionalSupport, FeedingCoach, RoutinePlanner, SleepCoach};
use super::step::{NullSink, ProgressSink, RouteResult, StepStatus, StepTrace};
use super::traits::Specialist;
use crate::agent::safety::with_safety_footer;

/// Display name of the coordinating agent in step traces.
pub const COORDINATOR_NAME: &str = "AI Parenting Coach";

/// Routes questions to specialists and composes the final answer.
///
/// One instance serves the whole process; each invocation owns its own
/// step trace and result buffer, so concurrent questions do not share
/// mutable state. A routing sequence is strictly sequential and runs to
/// completion — there is no cancellation or timeout threaded through the
/// call chain.
pub struct Orchestrator {
    provider: Arc<dyn TextProvider>,
    pacing: Pacing,
    general_prompt: String,
    sleep: SleepCoach,
    feeding: FeedingCoach,
    routine: RoutinePlanner,
    emotional: EmotionalSupport,
}

impl Orchestrator {
    /// Creates a new orchestrator with the given provider and configuration.
    ///
    /// Loads prompt templates from the directory specified in
    /// [`AgentConfig::prompt_dir`], falling back to compiled-in defaults.
    #[must_use]
    pub fn new(provider: Arc<dyn TextProvider>, config: &AgentConfig) -> Self {
        let prompts = PromptSet::load(config.prompt_dir.as_deref());
        Self {
            provider,
            pacing: config.pacing.clone(),
            general_prompt: prompts.general.clone(),
            sleep: SleepCoach::new(&prompts),
            feeding: FeedingCoach::new(&prompts),
            routine: RoutinePlanner::new(&prompts),
            emotional: EmotionalSupport::new(&prompts),
        }
    }

    /// Classifies a question without running the pipeline.
    #[must_use]
    pub fn classify(question: &str) -> Classification {
        classify(question)
    }

    /// The specialist filling a routing slot, or `None` for the general
    /// coach path.
    #[must_use]
    pub fn specialist(&self, kind: AgentKind) -> Option<&dyn Specialist> {
        match kind {
            AgentKind::Sleep => Some(&self.sleep),
            AgentKind::Feeding => Some(&self.feeding),
            AgentKind::Routine => Some(&self.routine),
            AgentKind::Emotional => Some(&self.emotional),
            AgentKind::General => None,
        }
    }

    /// The shared text provider, for dashboard calls made outside a
    /// routing sequence.
    #[must_use]
    pub fn provider(&self) -> &dyn TextProvider {
        &*self.provider
    }

    /// Single-sentence dashboard tip from the given specialist.
    ///
    /// Returns `None` for [`AgentKind::General`], which has no tip surface.
    pub async fn tip(&self, kind: AgentKind, ctx: &AgentContext) -> Option<String> {
        match self.specialist(kind) {
            Some(s) => Some(s.quick_tip(&*self.provider, ctx).await),
            None => None,
        }
    }

    /// Routes a question and streams every step transition to `sink`.
    ///
    /// Infallible by contract: provider failures are absorbed by the
    /// specialists' deterministic fallbacks (or the canned general
    /// fallback), so every invocation yields a completed [`RouteResult`]
    /// with a non-empty response.
    pub async fn route_and_process(
        &self,
        question: &str,
        ctx: &AgentContext,
        sink: &dyn ProgressSink,
    ) -> RouteResult {
        let mut trace = StepTrace::new();

        // Classifying
        let step = trace.begin(
            COORDINATOR_NAME,
            "Analyzing your question",
            StepStatus::Thinking,
            sink,
        );
        self.pause(self.pacing.classify).await;
        let classification = classify(question);
        let primary_name = classification.primary.display_name();
        tracing::info!(
            primary = primary_name,
            consultants = classification.consultants.len(),
            "Question classified"
        );
        trace.complete(
            step,
            format!("Identified {primary_name} as primary specialist"),
            sink,
        );

        // Routing
        let step = trace.begin(
            COORDINATOR_NAME,
            format!("Routing to {primary_name}"),
            StepStatus::Thinking,
            sink,
        );
        self.pause(self.pacing.route).await;
        trace.complete(step, format!("Connected to {primary_name}"), sink);

        // Consulting
        for consultant in &classification.consultants {
            let name = consultant.display_name();
            let step = trace.begin(
                COORDINATOR_NAME,
                format!("Requesting {name} collaboration"),
                StepStatus::Consulting,
                sink,
            );
            self.pause(self.pacing.consult).await;
            trace.complete(
                step,
                format!("{name} will provide complementary insights"),
                sink,
            );
        }

        // Primary analysis
        let step = trace.begin(
            primary_name,
            "Analyzing based on research evidence",
            StepStatus::Thinking,
            sink,
        );
        let mut response = match self.specialist(classification.primary) {
            Some(specialist) => {
                specialist
                    .analyze_question(&*self.provider, question, ctx)
                    .await
            }
            None => self.general_answer(question, ctx).await,
        };
        trace.complete(step, "Generated research-based response", sink);

        // Consultant contributions
        for consultant in &classification.consultants {
            self.pause(self.pacing.contribute_lead).await;
            let name = consultant.display_name();
            let step = trace.begin(
                name,
                "Contributing additional insights",
                StepStatus::Thinking,
                sink,
            );
            self.pause(self.pacing.contribute).await;
            if let Some(specialist) = self.specialist(*consultant) {
                response.push_str(&specialist.consult_note(ctx));
            }
            trace.complete(step, format!("Added {name} perspective"), sink);
        }

        // Finalizing
        let step = trace.begin(
            COORDINATOR_NAME,
            "Finalizing response",
            StepStatus::Thinking,
            sink,
        );
        self.pause(self.pacing.finalize).await;
        response = with_safety_footer(&response, question);
        trace.complete(step, "Response ready", sink);

        RouteResult {
            agent: primary_name.to_string(),
            response,
            steps: trace.into_steps(),
        }
    }

    /// Routes a question without progress streaming.
    pub async fn route_question(&self, question: &str, ctx: &AgentContext) -> RouteResult {
        self.route_and_process(question, ctx, &NullSink).await
    }

    /// One-off generic prompt for questions matching no specialist.
    /// Falls back to a canned empathetic message on any provider failure.
    async fn general_answer(&self, question: &str, ctx: &AgentContext) -> String {
        let prompt = build_general_prompt(&self.general_prompt, question, ctx);
        match self.provider.generate(&GenerateRequest::new(prompt)).await {
            Ok(generated) => format!("{AI_RESPONSE_MARKER}{}", generated.text),
            Err(e) => {
                tracing::warn!(error = %e, "General path failed, using canned fallback");
                general_fallback(ctx)
            }
        }
    }

    async fn pause(&self, duration: std::time::Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("provider", &self.provider.name())
            .field("pacing", &self.pacing)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::step::AgentStep;
    use crate::agent::testing::{MockProvider, test_context};
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn orchestrator(provider: MockProvider) -> Orchestrator {
        let config = AgentConfig::builder()
            .api_key("test")
            .pacing(Pacing::none())
            .build()
            .unwrap_or_else(|_| unreachable!());
        Orchestrator::new(Arc::new(provider), &config)
    }

    #[tokio::test]
    async fn test_scenario_a_sleep_primary_no_consultants() {
        let orch = orchestrator(MockProvider::failing());
        let ctx = test_context(5);
        let result = orch
            .route_and_process("Why is baby waking up at night?", &ctx, &NullSink)
            .await;

        assert_eq!(result.agent, "Sleep Coach");
        assert!(!result.response.is_empty());
        assert!(result.steps.iter().all(|s| s.agent != "Routine Planner"));
        assert!(!result.steps.iter().any(|s| s.action.contains("collaboration")));
    }

    #[tokio::test]
    async fn test_scenario_b_routine_schedule_fallback() {
        let orch = orchestrator(MockProvider::failing());
        let ctx = test_context(8);
        let result = orch
            .route_and_process("What's a good daily schedule?", &ctx, &NullSink)
            .await;

        assert_eq!(result.agent, "Routine Planner");
        // Fallback branch must still produce an hour-labelled structure.
        assert!(result.response.contains("7:00 AM"));
    }

    #[tokio::test]
    async fn test_scenario_c_emotional_non_empty_under_failure() {
        let orch = orchestrator(MockProvider::rate_limited());
        let ctx = test_context(3);
        let result = orch
            .route_and_process("I feel overwhelmed and exhausted", &ctx, &NullSink)
            .await;

        assert_eq!(result.agent, "Emotional Support");
        assert!(!result.response.is_empty());
    }

    #[tokio::test]
    async fn test_scenario_d_feeding_with_routine_addendum() {
        let orch = orchestrator(MockProvider::replying("Six feeds is typical at this age."));
        let ctx = test_context(8);
        let result = orch
            .route_and_process("How often should I feed her each day?", &ctx, &NullSink)
            .await;

        assert_eq!(result.agent, "Feeding Coach");
        assert!(result.response.contains("**Routine Planner adds:**"));

        // The consulting step must precede the primary analysis step.
        let consulting_pos = result
            .steps
            .iter()
            .position(|s| s.action.contains("Routine Planner collaboration"));
        let analysis_pos = result
            .steps
            .iter()
            .position(|s| s.action == "Analyzing based on research evidence");
        assert!(consulting_pos.is_some());
        assert!(consulting_pos < analysis_pos);
    }

    #[tokio::test]
    async fn test_all_completed_steps_have_results() {
        for provider in [
            MockProvider::replying("ok"),
            MockProvider::rate_limited(),
            MockProvider::failing(),
        ] {
            let orch = orchestrator(provider);
            let ctx = test_context(5);
            let result = orch
                .route_and_process("sleep schedule for naps?", &ctx, &NullSink)
                .await;
            for step in &result.steps {
                assert_eq!(step.status, StepStatus::Complete);
                assert!(step.result.as_ref().is_some_and(|r| !r.is_empty()));
            }
        }
    }

    #[tokio::test]
    async fn test_each_transition_emitted_exactly_once() {
        let seen: Mutex<Vec<AgentStep>> = Mutex::new(Vec::new());
        let sink = |step: &AgentStep| {
            if let Ok(mut steps) = seen.lock() {
                steps.push(step.clone());
            }
        };

        let orch = orchestrator(MockProvider::failing());
        let ctx = test_context(8);
        let result = orch
            .route_and_process("What's the best sleep schedule?", &ctx, &sink)
            .await;

        let emitted = seen.into_inner().unwrap_or_default();
        // Two emissions per step: creation and completion.
        assert_eq!(emitted.len(), result.steps.len() * 2);

        // Grouped by identity key, each step appears exactly twice with
        // the completion carrying a result.
        let mut by_key: HashMap<(String, u64), Vec<AgentStep>> = HashMap::new();
        for step in emitted {
            by_key
                .entry((step.agent.clone(), step.timestamp))
                .or_default()
                .push(step);
        }
        assert_eq!(by_key.len(), result.steps.len());
        for transitions in by_key.values() {
            assert_eq!(transitions.len(), 2);
            assert_ne!(transitions[0].status, StepStatus::Complete);
            assert_eq!(transitions[1].status, StepStatus::Complete);
        }
    }

    #[tokio::test]
    async fn test_unmatched_question_takes_general_path() {
        let orch = orchestrator(MockProvider::replying("A lightweight stroller works well."));
        let ctx = test_context(20);
        let result = orch
            .route_and_process("Which stroller should we buy?", &ctx, &NullSink)
            .await;

        assert_eq!(result.agent, "General Coach");
        assert!(result.response.contains(AI_RESPONSE_MARKER.trim_end()));
    }

    #[tokio::test]
    async fn test_general_path_fallback_on_failure() {
        let orch = orchestrator(MockProvider::failing());
        let ctx = test_context(20);
        let result = orch
            .route_and_process("Which stroller should we buy?", &ctx, &NullSink)
            .await;

        assert_eq!(result.agent, "General Coach");
        assert!(result.response.contains("Every baby is unique"));
    }

    #[tokio::test]
    async fn test_response_carries_safety_footer() {
        let orch = orchestrator(MockProvider::replying("Advice."));
        let ctx = test_context(5);

        let plain = orch
            .route_and_process("Why is baby waking up at night?", &ctx, &NullSink)
            .await;
        assert!(plain.response.contains("informational support"));

        let medical = orch
            .route_and_process("Baby has a fever and won't sleep", &ctx, &NullSink)
            .await;
        assert!(medical.response.contains("not medical advice"));
    }

    #[tokio::test]
    async fn test_success_path_is_labelled_ai() {
        let orch = orchestrator(MockProvider::replying("Try a wind-down routine."));
        let ctx = test_context(5);
        let result = orch.route_question("Why is baby waking at night?", &ctx).await;
        assert!(result.response.starts_with(AI_RESPONSE_MARKER));
    }

    #[tokio::test]
    async fn test_tip_has_no_general_surface() {
        let orch = orchestrator(MockProvider::replying("tip"));
        let ctx = test_context(5);
        assert!(orch.tip(AgentKind::General, &ctx).await.is_none());
        assert_eq!(orch.tip(AgentKind::Sleep, &ctx).await.as_deref(), Some("tip"));
    }
}
