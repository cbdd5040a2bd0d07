//! Safety footer appended to every composed answer.
//!
//! The engine is not a medical service; answers touching on health get
//! an explicit disclaimer, everything else gets the standard
//! informational footer.

/// Keywords in the question that indicate a possible medical concern.
const MEDICAL_KEYWORDS: &[&str] = &[
    "sick",
    "fever",
    "rash",
    "vomit",
    "diarrhea",
    "cough",
    "blood",
    "emergency",
    "pain",
    "injury",
];

/// Medical disclaimer for health-adjacent exchanges.
const MEDICAL_DISCLAIMER: &str = "\n\n⚠️ Important: This is not medical advice. If you're \
     concerned about your child's health, please consult your pediatrician or seek \
     immediate medical attention if it's an emergency.";

/// Standard informational footer.
const STANDARD_FOOTER: &str = "\n\nRemember: CradleCoach provides informational support \
     only. For health concerns, always consult your pediatrician.";

/// Appends the appropriate safety footer to a composed response.
///
/// The medical disclaimer is used when the question contains a medical
/// keyword or the response itself already points at a doctor.
#[must_use]
pub fn with_safety_footer(response: &str, question: &str) -> String {
    let question_lower = question.to_lowercase();
    let response_lower = response.to_lowercase();

    let medical = MEDICAL_KEYWORDS.iter().any(|k| question_lower.contains(k))
        || response_lower.contains("doctor")
        || response_lower.contains("pediatrician");

    let footer = if medical {
        MEDICAL_DISCLAIMER
    } else {
        STANDARD_FOOTER
    };
    format!("{response}{footer}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Baby has a fever since last night"; "fever keyword")]
    #[test_case("There was blood in the diaper"; "blood keyword")]
    #[test_case("She keeps VOMITING after feeds"; "case insensitive vomit")]
    fn test_medical_questions_get_disclaimer(question: &str) {
        let out = with_safety_footer("Some advice.", question);
        assert!(out.contains("not medical advice"));
    }

    #[test]
    fn test_doctor_mention_in_response_gets_disclaimer() {
        let out = with_safety_footer("Ask your pediatrician about this.", "sleep question");
        assert!(out.contains("not medical advice"));
    }

    #[test]
    fn test_ordinary_question_gets_standard_footer() {
        let out = with_safety_footer("Try an earlier bedtime.", "Why is baby waking at night?");
        assert!(out.contains("informational support"));
        assert!(!out.contains("not medical advice"));
    }

    #[test]
    fn test_original_response_is_preserved() {
        let out = with_safety_footer("Try an earlier bedtime.", "bedtime");
        assert!(out.starts_with("Try an earlier bedtime."));
    }
}
