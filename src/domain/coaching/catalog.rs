//! Static catalog of assistant features and their model settings.
//!
//! Each feature maps to a model id, sampling temperature, token budget, and
//! a default system instruction. Lookups are total: unrecognized feature
//! names resolve to the quick-task definition instead of failing, so callers
//! never branch on "unknown feature".

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// A coaching assistant feature with its own model configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    DailyPlanning,
    WeeklyReview,
    QuickTask,
    Motivational,
    Onboarding,
}

impl Feature {
    /// All catalogued features.
    pub const ALL: [Feature; 5] = [
        Feature::DailyPlanning,
        Feature::WeeklyReview,
        Feature::QuickTask,
        Feature::Motivational,
        Feature::Onboarding,
    ];

    /// Canonical feature name.
    pub fn name(&self) -> &'static str {
        match self {
            Feature::DailyPlanning => "daily_planning",
            Feature::WeeklyReview => "weekly_review",
            Feature::QuickTask => "quick_task",
            Feature::Motivational => "motivational",
            Feature::Onboarding => "onboarding",
        }
    }

    /// Resolves a feature name. Total: unrecognized names map to the
    /// quick-task fallback. Accepts spaces or underscores as separators.
    pub fn from_name(name: &str) -> Feature {
        let normalized = name.trim().to_ascii_lowercase().replace(' ', "_");
        Feature::ALL
            .iter()
            .copied()
            .find(|feature| feature.name() == normalized)
            .unwrap_or(Feature::QuickTask)
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Model invocation defaults for one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureDefinition {
    /// Model identifier as the completion API expects it.
    pub model_id: &'static str,
    /// Sampling temperature in [0, 2].
    pub temperature: f32,
    /// Completion token budget.
    pub max_tokens: u32,
    /// Default system instruction used when no personalization applies.
    pub default_instruction: &'static str,
}

const DAILY_PLANNING_INSTRUCTION: &str = "\
You are an Islamic productivity coach specializing in time management for busy individuals.

Your responses should:
- Create realistic, time-blocked schedules
- Prioritize spiritual growth (Quran, prayer times)
- Acknowledge real-world constraints
- Be encouraging and practical
- Format as a clear schedule with times";

const WEEKLY_REVIEW_INSTRUCTION: &str = "\
You are a reflective productivity coach analyzing weekly progress.

Your responses should:
- Start by celebrating wins (even small ones)
- Identify patterns in productivity
- Suggest 2-3 specific adjustments for next week
- Be constructive and encouraging, never critical
- Reference principles of continuous improvement";

const QUICK_TASK_INSTRUCTION: &str = "\
You are a helpful productivity assistant for quick questions.

Keep responses:
- Brief (2-3 sentences maximum)
- Immediately actionable
- Positive and encouraging";

const MOTIVATIONAL_INSTRUCTION: &str = "\
You are an Islamic motivational speaker focused on productivity.

Provide:
- A relevant Quranic verse or Hadith (with translation)
- Brief reflection on its meaning for productivity
- One actionable reminder
- Keep total response under 100 words";

static CATALOG: Lazy<HashMap<Feature, FeatureDefinition>> = Lazy::new(|| {
    HashMap::from([
        (
            Feature::DailyPlanning,
            FeatureDefinition {
                model_id: "llama-3.3-70b-versatile",
                temperature: 0.4,
                max_tokens: 500,
                default_instruction: DAILY_PLANNING_INSTRUCTION,
            },
        ),
        (
            Feature::WeeklyReview,
            FeatureDefinition {
                // Long context for a week of plan data.
                model_id: "llama-3.1-70b-versatile",
                temperature: 0.8,
                max_tokens: 600,
                default_instruction: WEEKLY_REVIEW_INSTRUCTION,
            },
        ),
        (
            Feature::QuickTask,
            FeatureDefinition {
                model_id: "llama-3.1-8b-instant",
                temperature: 0.5,
                max_tokens: 150,
                default_instruction: QUICK_TASK_INSTRUCTION,
            },
        ),
        (
            Feature::Motivational,
            FeatureDefinition {
                model_id: "llama-3.1-8b-instant",
                temperature: 1.1,
                max_tokens: 200,
                default_instruction: MOTIVATIONAL_INSTRUCTION,
            },
        ),
        (
            Feature::Onboarding,
            FeatureDefinition {
                // High quality for profile generation. Onboarding has no
                // conversational persona of its own; the quick-task text
                // stands in and the generator supplies its own prompt.
                model_id: "llama-3.3-70b-versatile",
                temperature: 0.7,
                max_tokens: 800,
                default_instruction: QUICK_TASK_INSTRUCTION,
            },
        ),
    ])
});

/// Looks up the definition for a feature. Total function.
pub fn definition_for(feature: Feature) -> &'static FeatureDefinition {
    // Every Feature variant has a catalog entry; the map is exhaustive.
    CATALOG
        .get(&feature)
        .unwrap_or_else(|| &CATALOG[&Feature::QuickTask])
}

/// Looks up the definition by feature name. Total: unknown names get the
/// quick-task fallback definition.
pub fn definition_for_name(name: &str) -> &'static FeatureDefinition {
    definition_for(Feature::from_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_feature_has_a_definition() {
        for feature in Feature::ALL {
            let def = definition_for(feature);
            assert!(!def.model_id.is_empty());
            assert!(def.max_tokens > 0);
            assert!((0.0..=2.0).contains(&def.temperature));
            assert!(!def.default_instruction.is_empty());
        }
    }

    #[test]
    fn from_name_resolves_canonical_names() {
        assert_eq!(Feature::from_name("daily_planning"), Feature::DailyPlanning);
        assert_eq!(Feature::from_name("weekly_review"), Feature::WeeklyReview);
        assert_eq!(Feature::from_name("motivational"), Feature::Motivational);
        assert_eq!(Feature::from_name("onboarding"), Feature::Onboarding);
    }

    #[test]
    fn from_name_accepts_spaces() {
        assert_eq!(Feature::from_name("daily planning"), Feature::DailyPlanning);
        assert_eq!(Feature::from_name("Quick Task"), Feature::QuickTask);
    }

    #[test]
    fn unknown_names_fall_back_to_quick_task() {
        assert_eq!(Feature::from_name("unknown_feature_xyz"), Feature::QuickTask);
        assert_eq!(
            definition_for_name("unknown_feature_xyz"),
            definition_for(Feature::QuickTask)
        );
    }

    #[test]
    fn onboarding_uses_high_quality_model() {
        let def = definition_for(Feature::Onboarding);
        assert_eq!(def.model_id, "llama-3.3-70b-versatile");
        assert_eq!(def.max_tokens, 800);
    }

    #[test]
    fn quick_features_use_instant_model() {
        assert_eq!(definition_for(Feature::QuickTask).model_id, "llama-3.1-8b-instant");
        assert_eq!(definition_for(Feature::Motivational).model_id, "llama-3.1-8b-instant");
    }
}
