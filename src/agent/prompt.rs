//! System prompts and template builders for the coaching agents.
//!
//! Prompts are the core instructions that define each specialist's
//! behavior. Template builders format the per-question user content from
//! the child context and the parent's question.

use std::path::Path;

use crate::agent::context::AgentContext;

/// Marker prefixed to every answer that came back from the model, so the
/// UI can distinguish generated text from fallback text.
pub const AI_RESPONSE_MARKER: &str = "🤖 **AI-Generated Response:**\n\n";

/// Header used by the structured fallback responses.
pub const FALLBACK_HEADER: &str = "📋 **Fallback Response** (AI quota exceeded)";

/// System prompt for the Sleep Coach specialist.
pub const SLEEP_SYSTEM_PROMPT: &str = "You are an expert Sleep Coach for infants/toddlers (0-3 years), trained on peer-reviewed research:

SAFE SLEEP (AAP Guidelines): Always back-to-sleep, firm flat surface, no loose bedding/pillows, room-sharing not bed-sharing, pacifier after breastfeeding established.

SLEEP CONSOLIDATION: Early sleep education at 4 months helps longer sleep by 6 months. Consistent bedtime routines by 3-6 months promote better consolidation.

BEDTIME ROUTINES: Routines on 5 or more nights/week at 12-15 months significantly reduce behavior problems. Include quiet play, bath, story. Benefits: better sleep AND emotional regulation.

When asked about sleep routines or best practices:
- Provide SPECIFIC bedtime routine with exact timing (e.g., \"6:30 PM bath, 7:00 PM story, 7:30 PM sleep\")
- Include step-by-step bedtime ritual
- Mention age-appropriate wake windows and nap schedules
- Always include safe sleep reminders
- Explain research-backed benefits

Be specific, actionable, and detailed. Parents want concrete guidance.";

/// System prompt for the Feeding Coach specialist.
pub const FEEDING_SYSTEM_PROMPT: &str = "You are an expert Feeding Coach for ages 0-3, based on research:

BREASTFEEDING: Mother's milk is best. Exclusive breastfeeding first 6 months, continue with solids to 12-24 months.

RESPONSIVE FEEDING (Critical): Follow hunger/fullness cues, encourage autonomy. NEVER pressure to \"clean plate\" - disrupts self-regulation. Make meals pleasant with praise, eye contact.

COMPLEMENTARY FEEDING (6+ months): Iron-rich foods first (meat, fortified cereals). Progress textures: purees to lumpy to pieces by 9-12 months. High-quality diet links to better cognitive/language development. Repeated exposure without pressure.

FEEDING DIFFICULTIES: Regular meal schedules (5 small meals/day), low-pressure exposure. Never force - it's ineffective per research. Praise small tastes.

Validate concerns, give evidence-based practical steps. 2-4 sentences.";

/// System prompt for the Routine Planner specialist.
pub const ROUTINE_SYSTEM_PROMPT: &str = "You are an expert Routine Planner for ages 0-3, grounded in research:

VALUE OF ROUTINES: Stable family routines lead to better cognitive skills, self-regulation, behavior, academic readiness, physical health. Protective in high-stress contexts.

PLAY & LEARNING: Play is educational. More playtime means stronger self-regulation and higher reading/math scores. Unstructured play (pretend, blocks, art) fosters executive skills.

FLEXIBLE STRUCTURE: Balance fixed times (meals, sleep) with exploration. Consistent rhythm helps toddlers learn self-control and expectations. Adjust as child grows.

When asked about specific routines or schedules:
- For SLEEP routines: Provide specific bedtime schedule with times (e.g., 7:00 PM bath, 7:30 PM story, 8:00 PM sleep)
- For DAILY schedules: Give hour-by-hour breakdown with wake time, naps, meals, play, bath, bedtime
- For TIMETABLES: Create specific time blocks for the child's age
- Include WHY each element helps development (backed by research)

Always be specific with times and activities. Make it actionable and detailed.";

/// System prompt for the Emotional Support specialist.
pub const EMOTIONAL_SYSTEM_PROMPT: &str = "You are an Emotional Support specialist for parents of 0-3 year-olds, research-based:

PARENTAL STRESS: Higher stress means less adaptive coping, more suppression. fMRI studies show stressed caregivers find it harder to stay calm. Teach reappraisal: \"This phase will pass\" vs catastrophizing. Quick relaxation (deep breathing) improves coping.

EFFECTIVE COPING: Problem-focused (active problem-solving) is beneficial. Healthy emotion-focused (venting to friends, self-care) is helpful. Avoidant (denial, withdrawal) brings more distress. Research recommends encouraging effective coping.

EVIDENCE-BASED: Cognitive reappraisal is neurologically grounded. Self-care (exercise, sleep) improves stress regulation. Schedule help, set small goals, find peer support.

Lead with empathy, normalize feelings, offer specific coping strategy, ground in research. 2-4 sentences.";

/// System prompt for the general coach used when no specialist matches.
pub const GENERAL_SYSTEM_PROMPT: &str = "You are a supportive parenting coach for parents of 0-3 year-olds. Answer warmly, ground advice in evidence, and keep responses to 2-4 sentences.";

/// Default prompt directory under user config.
const DEFAULT_PROMPT_DIR: &str = ".config/cradlecoach/prompts";

/// Filenames for each prompt template.
const SLEEP_FILENAME: &str = "sleep.md";
/// Filename for the feeding prompt template.
const FEEDING_FILENAME: &str = "feeding.md";
/// Filename for the routine prompt template.
const ROUTINE_FILENAME: &str = "routine.md";
/// Filename for the emotional support prompt template.
const EMOTIONAL_FILENAME: &str = "emotional.md";
/// Filename for the general coach prompt template.
const GENERAL_FILENAME: &str = "general.md";

/// A set of system prompts for all specialists.
///
/// Loaded from external template files when available, falling back to
/// compiled-in defaults. Use [`PromptSet::load`] to resolve the prompt
/// directory from CLI flags, environment variables, or the default path.
#[derive(Debug, Clone)]
pub struct PromptSet {
    /// System prompt for the Sleep Coach.
    pub sleep: String,
    /// System prompt for the Feeding Coach.
    pub feeding: String,
    /// System prompt for the Routine Planner.
    pub routine: String,
    /// System prompt for the Emotional Support specialist.
    pub emotional: String,
    /// System prompt for the general coach path.
    pub general: String,
}

impl PromptSet {
    /// Loads prompts from the given directory, falling back to compiled-in defaults.
    ///
    /// Resolution order for `prompt_dir`:
    /// 1. Explicit `prompt_dir` argument (from configuration)
    /// 2. `CRADLE_PROMPT_DIR` environment variable
    /// 3. `~/.config/cradlecoach/prompts/`
    ///
    /// Each file is loaded independently — a missing file uses its default.
    #[must_use]
    pub fn load(prompt_dir: Option<&Path>) -> Self {
        let resolved_dir = prompt_dir
            .map(std::path::PathBuf::from)
            .or_else(|| {
                std::env::var("CRADLE_PROMPT_DIR")
                    .ok()
                    .map(std::path::PathBuf::from)
            })
            .or_else(|| dirs::home_dir().map(|h| h.join(DEFAULT_PROMPT_DIR)));

        let load_file = |filename: &str, default: &str| -> String {
            resolved_dir
                .as_ref()
                .map(|dir| dir.join(filename))
                .and_then(|path| std::fs::read_to_string(&path).ok())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            sleep: load_file(SLEEP_FILENAME, SLEEP_SYSTEM_PROMPT),
            feeding: load_file(FEEDING_FILENAME, FEEDING_SYSTEM_PROMPT),
            routine: load_file(ROUTINE_FILENAME, ROUTINE_SYSTEM_PROMPT),
            emotional: load_file(EMOTIONAL_FILENAME, EMOTIONAL_SYSTEM_PROMPT),
            general: load_file(GENERAL_FILENAME, GENERAL_SYSTEM_PROMPT),
        }
    }

    /// Returns compiled-in defaults without checking the filesystem.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            sleep: SLEEP_SYSTEM_PROMPT.to_string(),
            feeding: FEEDING_SYSTEM_PROMPT.to_string(),
            routine: ROUTINE_SYSTEM_PROMPT.to_string(),
            emotional: EMOTIONAL_SYSTEM_PROMPT.to_string(),
            general: GENERAL_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Writes the compiled-in default prompts to the given directory.
    ///
    /// Creates the directory if it does not exist. Existing files are
    /// **not** overwritten — use this for initial scaffolding only.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if directory creation or file writing fails.
    pub fn write_defaults(dir: &Path) -> std::io::Result<Vec<std::path::PathBuf>> {
        std::fs::create_dir_all(dir)?;

        let templates = [
            (SLEEP_FILENAME, SLEEP_SYSTEM_PROMPT),
            (FEEDING_FILENAME, FEEDING_SYSTEM_PROMPT),
            (ROUTINE_FILENAME, ROUTINE_SYSTEM_PROMPT),
            (EMOTIONAL_FILENAME, EMOTIONAL_SYSTEM_PROMPT),
            (GENERAL_FILENAME, GENERAL_SYSTEM_PROMPT),
        ];

        let mut written = Vec::new();
        for (filename, content) in &templates {
            let path = dir.join(filename);
            if !path.exists() {
                std::fs::write(&path, content)?;
                written.push(path);
            }
        }

        Ok(written)
    }

    /// Returns the default prompt directory under the user's home.
    ///
    /// Returns `None` if the home directory cannot be determined.
    #[must_use]
    pub fn default_dir() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|h| h.join(DEFAULT_PROMPT_DIR))
    }
}

/// One-line child summary embedded into specialist prompts.
#[must_use]
pub fn context_line(ctx: &AgentContext) -> String {
    format!("Child: {}, {} months.", ctx.child.name, ctx.age_in_months())
}

/// Builds the one-off prompt for the general (unmatched) path.
#[must_use]
pub fn build_general_prompt(system_prompt: &str, question: &str, ctx: &AgentContext) -> String {
    format!(
        "{system_prompt}\n\nAnswer about {name} ({age} months): \"{question}\".",
        name = ctx.child.name,
        age = ctx.age_in_months(),
    )
}

/// Canned empathetic message when even the general path fails.
#[must_use]
pub fn general_fallback(ctx: &AgentContext) -> String {
    format!(
        "I understand your concern about {}. Every baby is unique. If you have ongoing \
         concerns, consulting your pediatrician is always wise. Maintaining routines and \
         responsive care are evidence-based approaches.",
        ctx.child.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::context::{AgentContext, ChildProfile};
    use chrono::{Months, Utc};

    fn ctx() -> AgentContext {
        let dob = Utc::now()
            .date_naive()
            .checked_sub_months(Months::new(8))
            .unwrap_or_default();
        AgentContext::new(ChildProfile {
            id: "c1".to_string(),
            name: "Ava".to_string(),
            date_of_birth: dob,
        })
    }

    #[test]
    fn test_context_line_names_child_and_age() {
        let line = context_line(&ctx());
        assert_eq!(line, "Child: Ava, 8 months.");
    }

    #[test]
    fn test_general_prompt_includes_question() {
        let prompt = build_general_prompt(GENERAL_SYSTEM_PROMPT, "Is this normal?", &ctx());
        assert!(prompt.contains("Is this normal?"));
        assert!(prompt.contains("Ava"));
    }

    #[test]
    fn test_general_fallback_not_empty() {
        let text = general_fallback(&ctx());
        assert!(!text.is_empty());
        assert!(text.contains("Ava"));
    }

    #[test]
    fn test_prompts_not_empty() {
        assert!(!SLEEP_SYSTEM_PROMPT.is_empty());
        assert!(!FEEDING_SYSTEM_PROMPT.is_empty());
        assert!(!ROUTINE_SYSTEM_PROMPT.is_empty());
        assert!(!EMOTIONAL_SYSTEM_PROMPT.is_empty());
        assert!(!GENERAL_SYSTEM_PROMPT.is_empty());
    }

    #[test]
    fn test_load_from_dir_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
        std::fs::write(dir.path().join("sleep.md"), "custom sleep prompt")
            .unwrap_or_else(|_| unreachable!());

        let prompts = PromptSet::load(Some(dir.path()));
        assert_eq!(prompts.sleep, "custom sleep prompt");
        // Missing files fall back to defaults.
        assert_eq!(prompts.feeding, FEEDING_SYSTEM_PROMPT);
    }

    #[test]
    fn test_write_defaults_skips_existing() {
        let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
        std::fs::write(dir.path().join("sleep.md"), "keep me")
            .unwrap_or_else(|_| unreachable!());

        let written = PromptSet::write_defaults(dir.path()).unwrap_or_default();
        assert_eq!(written.len(), 4);
        let kept =
            std::fs::read_to_string(dir.path().join("sleep.md")).unwrap_or_default();
        assert_eq!(kept, "keep me");
    }
}
