//! Context snapshot passed into every agent call.
//!
//! The context is assembled by the calling layer (CLI, server) from the
//! child profile and today's activity logs. Agents only read it; nothing
//! in the engine mutates a context once built.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A child's profile as provided by the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildProfile {
    /// Opaque record identifier.
    pub id: String,
    /// Display name used throughout generated and fallback text.
    pub name: String,
    /// Date of birth, used to derive age in months.
    pub date_of_birth: NaiveDate,
}

/// Today's activity counts and the last observed mood.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    /// Sleep sessions logged today.
    pub sleep: u32,
    /// Feeds logged today.
    pub feed: u32,
    /// Diaper changes logged today.
    pub diaper: u32,
    /// Last known mood label, if any was logged.
    pub mood: Option<String>,
}

impl ActivitySnapshot {
    /// Total activities logged today.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.sleep + self.feed + self.diaper
    }
}

/// Immutable snapshot handed to every specialist call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentContext {
    /// The child this question is about.
    pub child: ChildProfile,
    /// Today's activity counts, when the caller has them.
    #[serde(default)]
    pub recent_logs: Option<ActivitySnapshot>,
    /// Parenting goal tags selected during onboarding.
    #[serde(default)]
    pub goals: Vec<String>,
}

impl AgentContext {
    /// Creates a context with no activity data or goals.
    #[must_use]
    pub const fn new(child: ChildProfile) -> Self {
        Self {
            child,
            recent_logs: None,
            goals: Vec::new(),
        }
    }

    /// Child age in whole months as of today, floored at zero.
    #[must_use]
    pub fn age_in_months(&self) -> u32 {
        age_in_months(self.child.date_of_birth, Utc::now().date_naive())
    }

    /// Sleep sessions logged today (0 when no logs were supplied).
    #[must_use]
    pub fn sleep_count(&self) -> u32 {
        self.recent_logs.as_ref().map_or(0, |l| l.sleep)
    }

    /// Feeds logged today (0 when no logs were supplied).
    #[must_use]
    pub fn feed_count(&self) -> u32 {
        self.recent_logs.as_ref().map_or(0, |l| l.feed)
    }

    /// Diaper changes logged today (0 when no logs were supplied).
    #[must_use]
    pub fn diaper_count(&self) -> u32 {
        self.recent_logs.as_ref().map_or(0, |l| l.diaper)
    }
}

/// Calendar-month age: `(y2 - y1) * 12 + (m2 - m1)`, floored at zero.
///
/// Day-of-month is deliberately ignored; a child born on the 31st is
/// "1 month" on the 1st of the next month. This mirrors how the
/// surrounding application reports age everywhere else.
#[must_use]
pub fn age_in_months(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let months = (today.year() - date_of_birth.year()) * 12
        + (i32::try_from(today.month()).unwrap_or(0)
            - i32::try_from(date_of_birth.month()).unwrap_or(0));
    u32::try_from(months).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    #[test_case(date(2025, 3, 15), date(2025, 8, 24), 5; "five months")]
    #[test_case(date(2024, 12, 1), date(2025, 8, 24), 8; "cross year")]
    #[test_case(date(2025, 8, 1), date(2025, 8, 24), 0; "same month")]
    #[test_case(date(2025, 8, 31), date(2025, 9, 1), 1; "day of month ignored")]
    #[test_case(date(2026, 1, 1), date(2025, 8, 24), 0; "future dob floors at zero")]
    fn test_age_in_months(dob: NaiveDate, today: NaiveDate, expected: u32) {
        assert_eq!(age_in_months(dob, today), expected);
    }

    #[test]
    fn test_counts_default_to_zero_without_logs() {
        let ctx = AgentContext::new(ChildProfile {
            id: "c1".to_string(),
            name: "Ava".to_string(),
            date_of_birth: date(2025, 3, 15),
        });
        assert_eq!(ctx.sleep_count(), 0);
        assert_eq!(ctx.feed_count(), 0);
        assert_eq!(ctx.diaper_count(), 0);
    }

    #[test]
    fn test_snapshot_total() {
        let logs = ActivitySnapshot {
            sleep: 2,
            feed: 5,
            diaper: 4,
            mood: Some("happy".to_string()),
        };
        assert_eq!(logs.total(), 11);
    }
}
