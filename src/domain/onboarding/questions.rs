//! The onboarding questionnaire definition.
//!
//! Pure data consumed by the external form layer: question ids, localized
//! prompts, option lists, and which answer field each question feeds. The
//! engine itself only reads the collected [`super::OnboardingAnswers`].

use crate::domain::coaching::Language;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Exactly one option.
    Select,
    /// Any number of options.
    MultiSelect,
}

/// One onboarding question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDefinition {
    /// Stable question id; doubles as the answers field it feeds.
    pub id: &'static str,
    /// English prompt.
    pub prompt_en: &'static str,
    /// German prompt.
    pub prompt_de: &'static str,
    /// Input kind.
    pub kind: QuestionKind,
    /// Offered options, in display order.
    pub options: &'static [&'static str],
    /// Whether an answer is mandatory for submission.
    pub required: bool,
}

impl QuestionDefinition {
    /// Localized prompt; languages without a translation fall back to English.
    pub fn prompt(&self, language: Language) -> &'static str {
        match language {
            Language::De => self.prompt_de,
            _ => self.prompt_en,
        }
    }
}

const QUESTIONS: &[QuestionDefinition] = &[
    QuestionDefinition {
        id: "language",
        prompt_en: "Which language would you like to use?",
        prompt_de: "Welche Sprache möchtest du verwenden?",
        kind: QuestionKind::Select,
        options: &["English", "Deutsch", "العربية (Arabic)", "Français"],
        required: true,
    },
    QuestionDefinition {
        id: "role",
        prompt_en: "What best describes you?",
        prompt_de: "Was beschreibt dich am besten?",
        kind: QuestionKind::Select,
        options: &[
            "Parent with young children",
            "Student",
            "Working professional",
            "Entrepreneur",
            "Homemaker",
            "Other",
        ],
        required: true,
    },
    QuestionDefinition {
        id: "goals",
        prompt_en: "What are your main goals? (Select all that apply)",
        prompt_de: "Was sind deine Hauptziele? (Wähle alle zutreffenden)",
        kind: QuestionKind::MultiSelect,
        options: &[
            "Quran memorization/study",
            "Islamic knowledge",
            "Career development",
            "Family time",
            "Personal projects",
            "Health & fitness",
            "Financial goals",
        ],
        required: true,
    },
    QuestionDefinition {
        id: "available_time",
        prompt_en: "How much focused time do you typically have per day?",
        prompt_de: "Wie viel fokussierte Zeit hast du normalerweise pro Tag?",
        kind: QuestionKind::Select,
        options: &[
            "Less than 1 hour",
            "1-2 hours",
            "2-4 hours",
            "4+ hours",
            "Varies greatly",
        ],
        required: true,
    },
    QuestionDefinition {
        id: "challenges",
        prompt_en: "What's your biggest productivity challenge?",
        prompt_de: "Was ist deine größte Produktivitäts-Herausforderung?",
        kind: QuestionKind::Select,
        options: &[
            "Finding time with kids",
            "Staying consistent",
            "Prioritizing tasks",
            "Avoiding distractions",
            "Balancing multiple roles",
            "Morning routine",
            "Evening routine",
        ],
        required: false,
    },
    QuestionDefinition {
        id: "islamic_practice",
        prompt_en: "How would you describe your Islamic practice?",
        prompt_de: "Wie würdest du deine islamische Praxis beschreiben?",
        kind: QuestionKind::Select,
        options: &[
            "Beginner - learning the basics",
            "Practicing - working on consistency",
            "Committed - established routine",
            "Prefer not to say",
        ],
        required: false,
    },
    QuestionDefinition {
        id: "motivation_style",
        prompt_en: "What motivates you most?",
        prompt_de: "Was motiviert dich am meisten?",
        kind: QuestionKind::Select,
        options: &[
            "Spiritual reminders (Quran, Hadith)",
            "Practical tips and strategies",
            "Success stories",
            "Accountability and tracking",
            "Mix of everything",
        ],
        required: false,
    },
];

/// The full questionnaire, in presentation order.
pub fn questions() -> &'static [QuestionDefinition] {
    QUESTIONS
}

/// Looks up a question by id.
pub fn question_by_id(id: &str) -> Option<&'static QuestionDefinition> {
    QUESTIONS.iter().find(|q| q.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn questionnaire_has_seven_questions() {
        assert_eq!(questions().len(), 7);
    }

    #[test]
    fn required_questions_are_the_first_four() {
        let required: Vec<&str> = questions()
            .iter()
            .filter(|q| q.required)
            .map(|q| q.id)
            .collect();
        assert_eq!(required, vec!["language", "role", "goals", "available_time"]);
    }

    #[test]
    fn goals_is_the_only_multi_select() {
        let multi: Vec<&str> = questions()
            .iter()
            .filter(|q| q.kind == QuestionKind::MultiSelect)
            .map(|q| q.id)
            .collect();
        assert_eq!(multi, vec!["goals"]);
    }

    #[test]
    fn prompts_fall_back_to_english() {
        let q = question_by_id("role").unwrap();
        assert_eq!(q.prompt(Language::De), "Was beschreibt dich am besten?");
        assert_eq!(q.prompt(Language::Fr), q.prompt_en);
        assert_eq!(q.prompt(Language::Ar), q.prompt_en);
    }

    #[test]
    fn language_options_match_supported_languages() {
        let q = question_by_id("language").unwrap();
        for lang in Language::ALL {
            assert!(q.options.contains(&lang.display_name()));
        }
    }

    #[test]
    fn unknown_id_returns_none() {
        assert!(question_by_id("shoe_size").is_none());
    }
}
