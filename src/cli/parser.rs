//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CradleCoach: research-backed AI parenting coach.
///
/// Routes questions about sleep, feeding, routines, and parental
/// wellbeing to domain specialists, with deterministic fallbacks when
/// the AI provider is unavailable.
#[derive(Parser, Debug)]
#[command(name = "cradlecoach")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Child profile and activity context shared by coaching commands.
#[derive(Args, Debug, Clone)]
pub struct ChildArgs {
    /// Child's display name.
    #[arg(long, default_value = "Baby")]
    pub child: String,

    /// Child's date of birth (YYYY-MM-DD).
    #[arg(long)]
    pub dob: NaiveDate,

    /// Sleep sessions logged today.
    #[arg(long)]
    pub sleep: Option<u32>,

    /// Feeds logged today.
    #[arg(long)]
    pub feed: Option<u32>,

    /// Diaper changes logged today.
    #[arg(long)]
    pub diaper: Option<u32>,

    /// Last observed mood label.
    #[arg(long)]
    pub mood: Option<String>,

    /// Parenting goal tag (repeatable).
    #[arg(long = "goal")]
    pub goals: Vec<String>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the coaching team a question.
    ///
    /// Streams agent progress steps, then prints the composed answer.
    #[command(after_help = r#"Examples:
  cradlecoach ask --dob 2025-03-15 "Why is she waking at night?"
  cradlecoach ask --child Ava --dob 2025-03-15 --sleep 1 "Nap schedule?"
  cradlecoach --format json ask --dob 2025-03-15 "How often should I feed?"
"#)]
    Ask {
        /// The question to route.
        question: String,

        #[command(flatten)]
        child: ChildArgs,

        /// Skip interactive step pacing.
        #[arg(long)]
        fast: bool,

        /// Directory containing prompt template files.
        #[arg(long, env = "CRADLE_PROMPT_DIR")]
        prompt_dir: Option<PathBuf>,
    },

    /// Get a one-sentence tip from a specialist.
    #[command(after_help = r#"Examples:
  cradlecoach tip sleep --child Ava --dob 2025-03-15
  cradlecoach tip feeding --dob 2025-01-02 --feed 4
"#)]
    Tip {
        /// Specialist domain: sleep, feeding, routine, emotional.
        domain: String,

        #[command(flatten)]
        child: ChildArgs,
    },

    /// Summarize today's activity, with optional weekly trends.
    #[command(after_help = r#"Examples:
  cradlecoach summary --child Ava --dob 2025-03-15 --sleep 2 --feed 6 --diaper 4
  cradlecoach summary --dob 2025-03-15 --week-sleep 42 --week-feed 38 --week-diaper 31
"#)]
    Summary {
        #[command(flatten)]
        child: ChildArgs,

        /// Sleep sessions logged over the past week.
        #[arg(long)]
        week_sleep: Option<u32>,

        /// Feeds logged over the past week.
        #[arg(long)]
        week_feed: Option<u32>,

        /// Diaper changes logged over the past week.
        #[arg(long)]
        week_diaper: Option<u32>,
    },

    /// Write default prompt templates for customization.
    InitPrompts {
        /// Target directory (defaults to the user config directory).
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_parses_question_and_context() {
        let cli = Cli::try_parse_from([
            "cradlecoach",
            "ask",
            "--child",
            "Ava",
            "--dob",
            "2025-03-15",
            "--sleep",
            "2",
            "Why is she waking at night?",
        ])
        .unwrap_or_else(|_| unreachable!());

        match cli.command {
            Commands::Ask {
                question, child, ..
            } => {
                assert_eq!(question, "Why is she waking at night?");
                assert_eq!(child.child, "Ava");
                assert_eq!(child.sleep, Some(2));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_dob_is_required() {
        let result = Cli::try_parse_from(["cradlecoach", "ask", "question"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_is_global() {
        let cli = Cli::try_parse_from([
            "cradlecoach",
            "--format",
            "json",
            "tip",
            "sleep",
            "--dob",
            "2025-03-15",
        ])
        .unwrap_or_else(|_| unreachable!());
        assert_eq!(cli.format, "json");
    }

    #[test]
    fn test_repeatable_goals() {
        let cli = Cli::try_parse_from([
            "cradlecoach",
            "summary",
            "--dob",
            "2025-03-15",
            "--goal",
            "better-sleep",
            "--goal",
            "solid-foods",
        ])
        .unwrap_or_else(|_| unreachable!());
        match cli.command {
            Commands::Summary { child, .. } => {
                assert_eq!(child.goals, vec!["better-sleep", "solid-foods"]);
            }
            _ => unreachable!(),
        }
    }
}
