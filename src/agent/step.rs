//! Progress steps and the sinks that stream them.
//!
//! Each question produces an ordered trace of [`AgentStep`] records. A
//! step is created in `Thinking` or `Consulting` state and later updated
//! in place to `Complete` with a result attached. Both transitions are
//! pushed through a [`ProgressSink`] exactly once, carrying the same
//! `(agent, timestamp)` identity so a consumer tracking steps by that key
//! updates its copy rather than appending a duplicate.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Lifecycle state of a progress step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// An agent is working on this step.
    Thinking,
    /// The orchestrator is requesting a secondary specialist.
    Consulting,
    /// The step finished; `result` is populated.
    Complete,
}

/// One record in a question's processing trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentStep {
    /// Display name of the agent this step is attributed to.
    pub agent: String,
    /// Short description of what the agent is doing.
    pub action: String,
    /// Current lifecycle state.
    pub status: StepStatus,
    /// Short outcome description, set when the step completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Creation time in milliseconds since the Unix epoch, strictly
    /// increasing within one trace. Combined with `agent` it forms the
    /// step's identity key for in-place updates.
    pub timestamp: u64,
}

/// Final result of routing and processing one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResult {
    /// Display name of the primary specialist that answered.
    pub agent: String,
    /// Composed answer text. Never empty.
    pub response: String,
    /// Full ordered step trace for this exchange.
    pub steps: Vec<AgentStep>,
}

/// Receives step transitions as they happen.
///
/// Emission is synchronous and advisory: the orchestrator never consumes
/// a return value, and a sink must not block.
pub trait ProgressSink: Send + Sync {
    /// Called once per step transition, in emission order.
    fn emit(&self, step: &AgentStep);
}

/// Sink that discards all steps. Useful for tests and the non-streaming
/// convenience path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _step: &AgentStep) {}
}

impl<F> ProgressSink for F
where
    F: Fn(&AgentStep) + Send + Sync,
{
    fn emit(&self, step: &AgentStep) {
        self(step);
    }
}

/// Channel-backed sink for forwarding steps to another task.
///
/// Each transition is cloned into an unbounded channel so emission never
/// blocks the routing sequence. The receiving side is exposed as an async
/// stream, suitable for relaying over a persistent connection. A dropped
/// receiver is ignored; progress is best-effort.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<AgentStep>,
}

impl ChannelSink {
    /// Creates a sink and the stream of steps it will emit.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiverStream<AgentStep>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, UnboundedReceiverStream::new(rx))
    }
}

impl ProgressSink for ChannelSink {
    fn emit(&self, step: &AgentStep) {
        // Receiver gone means nobody is watching; drop silently.
        let _ = self.tx.send(step.clone());
    }
}

/// Accumulates the step trace for one routing sequence.
///
/// Owns the only mutable view of the steps; the orchestrator drives it
/// strictly sequentially. Timestamps are taken from the wall clock but
/// bumped to stay strictly increasing, keeping `(agent, timestamp)`
/// unique even when consecutive steps land in the same millisecond.
#[derive(Debug, Default)]
pub(crate) struct StepTrace {
    steps: Vec<AgentStep>,
    last_timestamp: u64,
}

impl StepTrace {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Opens a new step and emits its creation. Returns the step index
    /// for the matching [`StepTrace::complete`] call.
    pub(crate) fn begin(
        &mut self,
        agent: &str,
        action: impl Into<String>,
        status: StepStatus,
        sink: &dyn ProgressSink,
    ) -> usize {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        let timestamp = now.max(self.last_timestamp + 1);
        self.last_timestamp = timestamp;

        let step = AgentStep {
            agent: agent.to_string(),
            action: action.into(),
            status,
            result: None,
            timestamp,
        };
        sink.emit(&step);
        self.steps.push(step);
        self.steps.len() - 1
    }

    /// Marks a step complete with a non-empty result and emits the
    /// transition. The emitted step carries the same identity key as the
    /// creation emission.
    pub(crate) fn complete(&mut self, index: usize, result: impl Into<String>, sink: &dyn ProgressSink) {
        let result = result.into();
        debug_assert!(!result.is_empty(), "completed step requires a result");
        if let Some(step) = self.steps.get_mut(index) {
            step.status = StepStatus::Complete;
            step.result = Some(result);
            sink.emit(step);
        }
    }

    /// Consumes the trace, yielding the ordered step sequence.
    pub(crate) fn into_steps(self) -> Vec<AgentStep> {
        self.steps
    }
}
