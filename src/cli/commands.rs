//! CLI command implementations.
//!
//! Contains the business logic for each CLI command. Commands build an
//! [`AgentContext`] from flags, bridge into the async engine with a
//! dedicated runtime, and return the formatted output for `main` to
//! print.

use std::io::{self, Write as IoWrite};
use std::sync::Arc;

use crate::agent::{
    ActivitySnapshot, AgentConfig, AgentContext, AgentKind, AgentStep, ChildProfile,
    DailySummaryAgent, LogKind, Orchestrator, Pacing, PromptSet, TrendAnalyst, WeeklyTotals,
    create_provider,
};
use crate::cli::output::{self, OutputFormat};
use crate::cli::parser::{ChildArgs, Cli, Commands};
use crate::error::{CommandError, Result};

/// Executes the CLI command.
///
/// Returns the formatted output string, or an error for `main` to
/// report.
pub fn execute(cli: Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match cli.command {
        Commands::Ask {
            question,
            child,
            fast,
            prompt_dir,
        } => cmd_ask(&question, &child, fast, prompt_dir.as_deref(), format),
        Commands::Tip { domain, child } => cmd_tip(&domain, &child, format),
        Commands::Summary {
            child,
            week_sleep,
            week_feed,
            week_diaper,
        } => cmd_summary(&child, week_sleep, week_feed, week_diaper, format),
        Commands::InitPrompts { dir } => cmd_init_prompts(dir.as_deref(), format),
    }
}

/// Assembles the agent context from CLI flags.
fn build_context(args: &ChildArgs) -> AgentContext {
    let mut ctx = AgentContext::new(ChildProfile {
        id: "cli".to_string(),
        name: args.child.clone(),
        date_of_birth: args.dob,
    });
    if args.sleep.is_some() || args.feed.is_some() || args.diaper.is_some() || args.mood.is_some() {
        ctx.recent_logs = Some(ActivitySnapshot {
            sleep: args.sleep.unwrap_or(0),
            feed: args.feed.unwrap_or(0),
            diaper: args.diaper.unwrap_or(0),
            mood: args.mood.clone(),
        });
    }
    ctx.goals = args.goals.clone();
    ctx
}

/// Maps a domain name to the specialist it selects.
fn parse_domain(s: &str) -> Result<AgentKind> {
    match s.to_lowercase().as_str() {
        "sleep" => Ok(AgentKind::Sleep),
        "feeding" | "feed" => Ok(AgentKind::Feeding),
        "routine" => Ok(AgentKind::Routine),
        "emotional" | "support" => Ok(AgentKind::Emotional),
        other => Err(CommandError::InvalidArgument(format!(
            "Unknown domain: {other} (expected sleep, feeding, routine, emotional)"
        ))),
    }
}

/// Builds the orchestrator from environment configuration plus CLI
/// overrides.
fn build_orchestrator(fast: bool, prompt_dir: Option<&std::path::Path>) -> Result<Orchestrator> {
    let mut builder = AgentConfig::builder().from_env();
    if fast {
        builder = builder.pacing(Pacing::none());
    }
    if let Some(dir) = prompt_dir {
        builder = builder.prompt_dir(dir);
    }
    let config = builder
        .build()
        .map_err(|e| CommandError::ExecutionFailed(format!("Agent configuration error: {e}")))?;

    let provider = create_provider(&config)
        .map_err(|e| CommandError::ExecutionFailed(format!("Provider creation failed: {e}")))?;

    Ok(Orchestrator::new(Arc::from(provider), &config))
}

/// Creates the sync/async bridge runtime.
fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CommandError::ExecutionFailed(format!("Failed to create async runtime: {e}")))
}

fn cmd_ask(
    question: &str,
    child: &ChildArgs,
    fast: bool,
    prompt_dir: Option<&std::path::Path>,
    format: OutputFormat,
) -> Result<String> {
    let ctx = build_context(child);
    let orchestrator = build_orchestrator(fast, prompt_dir)?;
    let rt = runtime()?;

    match format {
        OutputFormat::Text => {
            // Stream each step transition to the terminal as it happens.
            let sink = |step: &AgentStep| {
                let mut out = io::stdout().lock();
                let _ = writeln!(out, "{}", output::format_step(step));
            };
            let result =
                rt.block_on(async { orchestrator.route_and_process(question, &ctx, &sink).await });
            Ok(output::format_route_result(&result))
        }
        OutputFormat::Json => {
            let result = rt.block_on(async { orchestrator.route_question(question, &ctx).await });
            Ok(format.to_json(&result))
        }
    }
}

fn cmd_tip(domain: &str, child: &ChildArgs, format: OutputFormat) -> Result<String> {
    let kind = parse_domain(domain)?;
    let ctx = build_context(child);
    let orchestrator = build_orchestrator(true, None)?;
    let rt = runtime()?;

    let tip = rt
        .block_on(async { orchestrator.tip(kind, &ctx).await })
        .ok_or_else(|| {
            CommandError::ExecutionFailed(format!("No tip surface for domain: {domain}"))
        })?;

    match format {
        OutputFormat::Text => Ok(format!("{} tip: {tip}", kind.display_name())),
        OutputFormat::Json => Ok(format.to_json(&serde_json::json!({
            "domain": kind.display_name(),
            "tip": tip,
        }))),
    }
}

fn cmd_summary(
    child: &ChildArgs,
    week_sleep: Option<u32>,
    week_feed: Option<u32>,
    week_diaper: Option<u32>,
    format: OutputFormat,
) -> Result<String> {
    let ctx = build_context(child);
    let orchestrator = build_orchestrator(true, None)?;
    let rt = runtime()?;

    let status = DailySummaryAgent::daily_status(&ctx);
    let insight = rt
        .block_on(async { DailySummaryAgent::insight_summary(orchestrator.provider(), &ctx).await });

    let weekly = match (week_sleep, week_feed, week_diaper) {
        (None, None, None) => None,
        (s, f, d) => Some(WeeklyTotals {
            sleep: s.unwrap_or(0),
            feed: f.unwrap_or(0),
            diaper: d.unwrap_or(0),
        }),
    };

    let mut trend_lines = Vec::new();
    if let Some(totals) = weekly {
        trend_lines = TrendAnalyst::weekly_summary(totals);
        for (count, kind) in [
            (totals.sleep, LogKind::Sleep),
            (totals.feed, LogKind::Feed),
            (totals.diaper, LogKind::Diaper),
        ] {
            let trend = rt.block_on(async {
                TrendAnalyst::analyze_trend(orchestrator.provider(), count, kind).await
            });
            trend_lines.push(trend);
        }
    }

    match format {
        OutputFormat::Text => {
            let mut out = format!(
                "{}\n\nInsight: {insight}\n",
                output::format_daily_status(&status)
            );
            if !trend_lines.is_empty() {
                out.push_str("\nWeekly trends:\n");
                for line in &trend_lines {
                    out.push_str(&format!("  • {line}\n"));
                }
            }
            Ok(out)
        }
        OutputFormat::Json => Ok(format.to_json(&serde_json::json!({
            "status": status,
            "insight": insight,
            "weekly": trend_lines,
        }))),
    }
}

fn cmd_init_prompts(dir: Option<&std::path::Path>, format: OutputFormat) -> Result<String> {
    let target_dir = dir
        .map(std::path::PathBuf::from)
        .or_else(PromptSet::default_dir)
        .ok_or_else(|| {
            CommandError::ExecutionFailed(
                "Could not determine home directory for default prompt path".to_string(),
            )
        })?;

    let written = PromptSet::write_defaults(&target_dir).map_err(|e| {
        CommandError::ExecutionFailed(format!("Failed to write prompt templates: {e}"))
    })?;

    match format {
        OutputFormat::Text => {
            if written.is_empty() {
                Ok(format!(
                    "All prompt templates already exist in: {}\n",
                    target_dir.display()
                ))
            } else {
                let mut out = format!(
                    "Wrote {} prompt template(s) to: {}\n",
                    written.len(),
                    target_dir.display()
                );
                for path in &written {
                    out.push_str(&format!(
                        "  {}\n",
                        path.file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("unknown")
                    ));
                }
                out.push_str("\nEdit these files to customize specialist system prompts.\n");
                Ok(out)
            }
        }
        OutputFormat::Json => Ok(format.to_json(&serde_json::json!({
            "directory": target_dir.to_string_lossy(),
            "written": written.iter().map(|p| p.to_string_lossy().into_owned()).collect::<Vec<_>>(),
            "count": written.len(),
        }))),
    }
}
