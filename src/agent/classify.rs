//! Question classification.
//!
//! A pure function from question text to a primary specialist and an
//! optional set of secondary consultants. The keyword tables are data,
//! not code, so routing can be tested and extended without touching the
//! orchestration logic.

use serde::{Deserialize, Serialize};

/// The fixed set of agents a question can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Infant/toddler sleep specialist.
    Sleep,
    /// Feeding and nutrition specialist.
    Feeding,
    /// Daily routine and schedule specialist.
    Routine,
    /// Parental stress and coping specialist.
    Emotional,
    /// Generic coach used when no domain matches.
    General,
}

impl AgentKind {
    /// Display name shown in step traces and results.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Sleep => "Sleep Coach",
            Self::Feeding => "Feeding Coach",
            Self::Routine => "Routine Planner",
            Self::Emotional => "Emotional Support",
            Self::General => "General Coach",
        }
    }
}

/// A keyword pattern matched against the lowercased question.
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    /// Plain substring match.
    Term(&'static str),
    /// Two terms in order, any distance apart ("how" ... "often").
    Seq(&'static str, &'static str),
}

impl Pattern {
    /// Whether this pattern matches the (already lowercased) question.
    #[must_use]
    pub fn matches(self, question: &str) -> bool {
        match self {
            Self::Term(term) => question.contains(term),
            Self::Seq(first, second) => question
                .find(first)
                .is_some_and(|at| question[at + first.len()..].contains(second)),
        }
    }
}

/// One row of the routing table.
struct Route {
    kind: AgentKind,
    /// Terms that select this specialist as primary.
    terms: &'static [Pattern],
    /// Terms that additionally pull in the Routine Planner as consultant.
    consult_terms: &'static [Pattern],
}

/// Routing table, tested in priority order. First match wins.
const ROUTES: &[Route] = &[
    Route {
        kind: AgentKind::Sleep,
        terms: &[
            Pattern::Term("sleep"),
            Pattern::Term("nap"),
            Pattern::Term("bedtime"),
            Pattern::Term("night"),
            Pattern::Term("wake"),
            Pattern::Term("tired"),
            Pattern::Term("rest"),
        ],
        consult_terms: &[
            Pattern::Term("routine"),
            Pattern::Term("schedule"),
            Pattern::Term("when"),
            Pattern::Term("time"),
        ],
    },
    Route {
        kind: AgentKind::Feeding,
        terms: &[
            Pattern::Term("feed"),
            Pattern::Term("eat"),
            Pattern::Term("food"),
            Pattern::Term("milk"),
            Pattern::Term("bottle"),
            Pattern::Term("breast"),
            Pattern::Term("solid"),
            Pattern::Term("hungry"),
            Pattern::Term("meal"),
        ],
        consult_terms: &[
            Pattern::Term("routine"),
            Pattern::Term("schedule"),
            Pattern::Term("when"),
            Pattern::Term("how often"),
        ],
    },
    Route {
        kind: AgentKind::Routine,
        terms: &[
            Pattern::Term("routine"),
            Pattern::Term("schedule"),
            Pattern::Term("activity"),
            Pattern::Term("play"),
            Pattern::Term("day"),
            Pattern::Term("plan"),
        ],
        consult_terms: &[],
    },
    Route {
        kind: AgentKind::Emotional,
        terms: &[
            Pattern::Term("stress"),
            Pattern::Term("overwhelm"),
            Pattern::Term("tired"),
            Pattern::Term("cope"),
            Pattern::Term("help"),
            Pattern::Term("exhaust"),
            Pattern::Term("anxious"),
            Pattern::Term("worry"),
        ],
        consult_terms: &[],
    },
];

/// Outcome of classifying one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The single primary specialist selected for this question.
    pub primary: AgentKind,
    /// Secondary consultants, never containing the primary. At most the
    /// Routine Planner in the current routing table.
    pub consultants: Vec<AgentKind>,
}

/// Classifies a question into a primary specialist and consultants.
///
/// Case-insensitive, deterministic, and idempotent: the same question
/// always yields the same classification. A question matching no route
/// falls through to [`AgentKind::General`], which the orchestrator
/// answers with a generic prompt instead of a specialist.
#[must_use]
pub fn classify(question: &str) -> Classification {
    let lower = question.to_lowercase();

    for route in ROUTES {
        if route.terms.iter().any(|p| p.matches(&lower)) {
            let mut consultants = Vec::new();
            if matches!(route.kind, AgentKind::Sleep | AgentKind::Feeding)
                && route.consult_terms.iter().any(|p| p.matches(&lower))
            {
                consultants.push(AgentKind::Routine);
            }
            return Classification {
                primary: route.kind,
                consultants,
            };
        }
    }

    Classification {
        primary: AgentKind::General,
        consultants: Vec::new(),
    }
}
