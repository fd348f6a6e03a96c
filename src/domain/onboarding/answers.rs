//! Onboarding questionnaire answers.
//!
//! The raw answers collected by the (external) onboarding form. Retained on
//! the profile verbatim so generation can be audited or redone later.

use serde::{Deserialize, Serialize};

use crate::domain::coaching::Language;

/// Answers from the one-time onboarding questionnaire.
///
/// Every field is optional: a *valid* submission needs a language and at
/// least one goal, but that check belongs to the caller. Unknown extra
/// fields in serialized form are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingAnswers {
    /// Preferred language, as a display name ("English", "Deutsch", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// What best describes the user ("Student", "Working professional", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Main goals, multi-select.
    #[serde(default)]
    pub goals: Vec<String>,

    /// Daily focused-time bucket ("1-2 hours", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_time: Option<String>,

    /// Biggest productivity challenge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<String>,

    /// Self-described Islamic practice level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub islamic_practice: Option<String>,

    /// Preferred motivation style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivation_style: Option<String>,
}

impl OnboardingAnswers {
    /// True when the submission carries everything profile generation needs:
    /// a language choice and a non-empty goals list.
    pub fn is_valid_submission(&self) -> bool {
        self.language.is_some() && !self.goals.is_empty()
    }

    /// Resolves the chosen language; unanswered or unknown maps to English.
    pub fn language(&self) -> Language {
        self.language
            .as_deref()
            .map(Language::from_name)
            .unwrap_or_default()
    }

    /// Role with the generic fallback used in prompts.
    pub fn role_or_default(&self) -> &str {
        self.role.as_deref().unwrap_or("individual")
    }

    /// Goals joined for prompt interpolation.
    pub fn goals_joined(&self) -> String {
        self.goals.join(", ")
    }

    /// Availability bucket with the generic fallback used in prompts.
    pub fn available_time_or_default(&self) -> &str {
        self.available_time.as_deref().unwrap_or("varies")
    }

    /// Challenge with the generic fallback used in prompts.
    pub fn challenges_or_default(&self) -> &str {
        self.challenges.as_deref().unwrap_or("general productivity")
    }

    /// Practice level with the neutral fallback used in prompts.
    pub fn islamic_practice_or_default(&self) -> &str {
        self.islamic_practice.as_deref().unwrap_or("Prefer not to say")
    }

    /// Motivation style with the generic fallback used in prompts.
    pub fn motivation_style_or_default(&self) -> &str {
        self.motivation_style.as_deref().unwrap_or("Mix of everything")
    }
}
