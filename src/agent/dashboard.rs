//! Dashboard agents: daily status, insight summary, and trend analysis.
//!
//! These surfaces are deliberately cheap: the status line and weekly
//! summary are pure functions of activity counts, and the two
//! provider-backed insights degrade to fixed observations on failure.

use serde::Serialize;

use super::context::AgentContext;
use super::provider::{GenerateRequest, TextProvider};

/// Kind of activity log a trend is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// Sleep sessions.
    Sleep,
    /// Feeds.
    Feed,
    /// Diaper changes.
    Diaper,
}

impl LogKind {
    /// Capitalized label used in fallback insight text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sleep => "Sleep",
            Self::Feed => "Feed",
            Self::Diaper => "Diaper",
        }
    }

    /// Lowercase name used in prompts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Feed => "feed",
            Self::Diaper => "diaper",
        }
    }
}

/// One-line status for the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyStatus {
    /// Short status phrase.
    pub status: String,
    /// Emoji marker shown next to the status.
    pub emoji: String,
    /// UI color hint (blue, green, yellow).
    pub color: String,
}

impl DailyStatus {
    fn new(status: &str, emoji: &str, color: &str) -> Self {
        Self {
            status: status.to_string(),
            emoji: emoji.to_string(),
            color: color.to_string(),
        }
    }
}

/// Totals of logged activities over a week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeeklyTotals {
    /// Sleep sessions logged this week.
    pub sleep: u32,
    /// Feeds logged this week.
    pub feed: u32,
    /// Diaper changes logged this week.
    pub diaper: u32,
}

/// Produces the at-a-glance daily summary for the dashboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailySummaryAgent;

impl DailySummaryAgent {
    /// Status line from today's activity counts. Pure; never calls the
    /// provider.
    #[must_use]
    pub fn daily_status(ctx: &AgentContext) -> DailyStatus {
        let Some(logs) = &ctx.recent_logs else {
            return DailyStatus::new("Ready to start tracking", "🌟", "blue");
        };
        if logs.total() == 0 {
            return DailyStatus::new("Ready to start tracking", "🌟", "blue");
        }
        match logs.total() {
            n if n >= 10 => DailyStatus::new("Active & engaged day", "🟢", "green"),
            n if n >= 5 => DailyStatus::new("Calm & steady", "🟢", "green"),
            _ => DailyStatus::new("Quiet morning so far", "🟡", "yellow"),
        }
    }

    /// One-sentence analyst observation on today's counts.
    ///
    /// Falls back to a fixed observation keyed on low sleep when the
    /// provider fails.
    pub async fn insight_summary(provider: &dyn TextProvider, ctx: &AgentContext) -> String {
        let prompt = format!(
            "As pediatric analyst, analyze: {sleep} sleep, {feed} feeds, {diaper} diapers \
             for {age}-month-old. ONE brief observation in 1 sentence.",
            sleep = ctx.sleep_count(),
            feed = ctx.feed_count(),
            diaper = ctx.diaper_count(),
            age = ctx.age_in_months(),
        );
        match provider.generate(&GenerateRequest::new(prompt)).await {
            Ok(generated) => generated.text,
            Err(e) => {
                tracing::debug!(error = %e, "Insight summary fell back");
                if ctx.sleep_count() < 2 && ctx.recent_logs.is_some() {
                    "Sleep is lower than typical. Baby might need extra comfort today.".to_string()
                } else {
                    "Activity levels look normal for the day so far.".to_string()
                }
            }
        }
    }
}

/// Weekly trend analysis over logged activity counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendAnalyst;

impl TrendAnalyst {
    /// One-sentence insight on a week of logs of one kind.
    pub async fn analyze_trend(provider: &dyn TextProvider, count: u32, kind: LogKind) -> String {
        let prompt = format!(
            "As pediatric data analyst, analyze: {count} {kind} logs past week. \
             ONE insight in 1 sentence.",
            kind = kind.as_str(),
        );
        match provider.generate(&GenerateRequest::new(prompt)).await {
            Ok(generated) => generated.text,
            Err(e) => {
                tracing::debug!(error = %e, kind = kind.as_str(), "Trend insight fell back");
                format!("{} patterns are within normal range.", kind.label())
            }
        }
    }

    /// Three-line weekly summary, one line per activity kind. Pure
    /// threshold checks, no provider involvement.
    #[must_use]
    pub fn weekly_summary(totals: WeeklyTotals) -> Vec<String> {
        vec![
            if totals.sleep > 40 {
                "Sleep is consistent - great routines!"
            } else {
                "Sleep needs more consistency - try steady bedtime."
            }
            .to_string(),
            if totals.feed > 35 {
                "Feeding rhythm well established."
            } else {
                "Track feeds more regularly to spot patterns."
            }
            .to_string(),
            if totals.diaper >= 30 {
                "Diaper changes indicate good hydration."
            } else {
                "Monitor diaper output as feeding indicator."
            }
            .to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::{MockProvider, test_context};
    use test_case::test_case;

    #[test]
    fn test_status_without_logs() {
        let mut ctx = test_context(5);
        ctx.recent_logs = None;
        let status = DailySummaryAgent::daily_status(&ctx);
        assert_eq!(status.status, "Ready to start tracking");
        assert_eq!(status.color, "blue");
    }

    #[test_case(4, 4, 4, "Active & engaged day"; "busy day")]
    #[test_case(2, 2, 1, "Calm & steady"; "moderate day")]
    #[test_case(1, 1, 1, "Quiet morning so far"; "quiet day")]
    #[test_case(0, 0, 0, "Ready to start tracking"; "empty day")]
    fn test_status_thresholds(sleep: u32, feed: u32, diaper: u32, expected: &str) {
        let mut ctx = test_context(5);
        if let Some(logs) = &mut ctx.recent_logs {
            logs.sleep = sleep;
            logs.feed = feed;
            logs.diaper = diaper;
        }
        assert_eq!(DailySummaryAgent::daily_status(&ctx).status, expected);
    }

    #[tokio::test]
    async fn test_insight_uses_provider_reply() {
        let provider = MockProvider::replying("Solid rhythm today.");
        let ctx = test_context(5);
        let text = DailySummaryAgent::insight_summary(&provider, &ctx).await;
        assert_eq!(text, "Solid rhythm today.");
    }

    #[tokio::test]
    async fn test_insight_fallback_keys_on_low_sleep() {
        let provider = MockProvider::rate_limited();
        let low = test_context(5);
        assert!(low.sleep_count() < 2);
        let text = DailySummaryAgent::insight_summary(&provider, &low).await;
        assert!(text.contains("lower than typical"));

        let mut ok = test_context(5);
        if let Some(logs) = &mut ok.recent_logs {
            logs.sleep = 3;
        }
        let text = DailySummaryAgent::insight_summary(&provider, &ok).await;
        assert!(text.contains("look normal"));
    }

    #[tokio::test]
    async fn test_trend_fallback_names_the_kind() {
        let provider = MockProvider::failing();
        let text = TrendAnalyst::analyze_trend(&provider, 12, LogKind::Diaper).await;
        assert_eq!(text, "Diaper patterns are within normal range.");
    }

    #[test]
    fn test_weekly_summary_thresholds() {
        let strong = TrendAnalyst::weekly_summary(WeeklyTotals {
            sleep: 45,
            feed: 40,
            diaper: 30,
        });
        assert!(strong[0].contains("consistent"));
        assert!(strong[1].contains("well established"));
        assert!(strong[2].contains("good hydration"));

        let weak = TrendAnalyst::weekly_summary(WeeklyTotals::default());
        assert!(weak[0].contains("more consistency"));
        assert!(weak[1].contains("Track feeds"));
        assert!(weak[2].contains("Monitor diaper"));
    }
}
