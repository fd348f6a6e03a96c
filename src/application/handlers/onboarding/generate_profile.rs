//! GenerateProfile - AI-assisted profile generation from onboarding answers.
//!
//! One completion call turns questionnaire answers into a structured
//! coaching profile. Generation failure is never surfaced: any provider
//! error, malformed payload, or missing field degrades to the deterministic
//! default profile, so onboarding always ends with a usable profile. The
//! failure reason is kept as a typed value internally and logged for
//! diagnostics before it is collapsed at the boundary.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::coaching::{resolve, Feature, Language, MessageRole};
use crate::domain::foundation::Timestamp;
use crate::domain::onboarding::OnboardingAnswers;
use crate::domain::profile::{EmphasisLevel, UserProfile};
use crate::ports::{CompletionError, CompletionProvider, CompletionRequest, RequestMetadata};

/// Fixed system message for the generation call.
const GENERATION_SYSTEM_MESSAGE: &str = "You are an expert at creating personalized \
productivity coaching profiles. Always respond with valid JSON only, no markdown formatting.";

/// Why a generation attempt fell back to the default profile.
#[derive(Debug, thiserror::Error)]
enum GenerationFailure {
    #[error("completion failed: {0}")]
    Provider(#[from] CompletionError),
    #[error("response was not a usable profile: {0}")]
    Parse(String),
}

/// The structured object the model is asked to return. Every field is
/// required: a response missing any of the six keys is treated as a failed
/// generation.
#[derive(Debug, Deserialize)]
struct GeneratedProfile {
    system_message_daily_planning: String,
    system_message_weekly_review: String,
    coaching_tone: String,
    key_focus_areas: Vec<String>,
    time_block_size: u32,
    islamic_emphasis: EmphasisLevel,
}

/// Handler for generating coaching profiles from onboarding answers.
pub struct GenerateProfileHandler {
    provider: Arc<dyn CompletionProvider>,
}

impl GenerateProfileHandler {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Generates a profile for the given answers.
    ///
    /// Callers are expected to have checked
    /// [`OnboardingAnswers::is_valid_submission`] first; the generator does
    /// not re-validate and will still produce a usable (default) profile
    /// for degenerate input.
    pub async fn generate(&self, answers: &OnboardingAnswers) -> UserProfile {
        match self.try_generate(answers).await {
            Ok(profile) => profile,
            Err(failure) => {
                tracing::warn!(reason = %failure, "profile generation fell back to default");
                default_profile(answers)
            }
        }
    }

    async fn try_generate(&self, answers: &OnboardingAnswers) -> Result<UserProfile, GenerationFailure> {
        let language = answers.language();
        let config = resolve(Feature::Onboarding.name(), None);

        let request = CompletionRequest::new(
            config.model,
            RequestMetadata::for_operation("profile-generation"),
        )
        .with_message(MessageRole::System, GENERATION_SYSTEM_MESSAGE)
        .with_message(MessageRole::User, generation_prompt(answers, language))
        .with_temperature(config.temperature);

        let response = self.provider.complete(request).await?;

        let cleaned = strip_code_fence(&response.content);
        let generated: GeneratedProfile = serde_json::from_str(cleaned)
            .map_err(|e| GenerationFailure::Parse(e.to_string()))?;

        Ok(UserProfile {
            daily_planning_instruction: generated.system_message_daily_planning,
            weekly_review_instruction: generated.system_message_weekly_review,
            coaching_tone: generated.coaching_tone,
            key_focus_areas: generated.key_focus_areas,
            time_block_size: generated.time_block_size,
            islamic_emphasis: generated.islamic_emphasis,
            language,
            onboarding_data: answers.clone(),
            created_at: Timestamp::now(),
            is_default: false,
        })
    }
}

/// Builds the generation prompt from the user's answers.
fn generation_prompt(answers: &OnboardingAnswers, language: Language) -> String {
    format!(
        r#"Based on this user information, create a personalized productivity coaching profile.

USER INFORMATION:
- Language: {language}
- Role: {role}
- Goals: {goals}
- Available Time: {available_time}
- Main Challenge: {challenges}
- Islamic Practice Level: {islamic_practice}
- Motivation Style: {motivation_style}

TASK:
Generate a JSON response with these fields:

1. "system_message_daily_planning": A personalized system message for daily planning (150-200 words)
   - Should address their specific role and challenges
   - Acknowledge their time constraints
   - Focus on their stated goals
   - Use appropriate Islamic references based on their practice level

2. "system_message_weekly_review": A personalized system message for weekly reviews (100-150 words)
   - Should focus on their motivation style
   - Encourage based on their challenges
   - Reference their goals

3. "coaching_tone": Best coaching tone for this user (2-3 words, e.g., "encouraging, practical")

4. "key_focus_areas": Top 3 areas to emphasize based on their goals (array of strings)

5. "time_block_size": Recommended time block size in minutes (15, 30, 45, or 60)
   - Base this on their available time and role

6. "islamic_emphasis": Level of Islamic content to include ("high", "medium", "low", "minimal")
   - Base this on their islamic_practice level

IMPORTANT:
- {directive}
- Respond ONLY with valid JSON
- No markdown, no code blocks, just pure JSON
- Make it specific to their situation"#,
        language = language.display_name(),
        role = answers.role_or_default(),
        goals = answers.goals_joined(),
        available_time = answers.available_time_or_default(),
        challenges = answers.challenges_or_default(),
        islamic_practice = answers.islamic_practice_or_default(),
        motivation_style = answers.motivation_style_or_default(),
        directive = language.directive(),
    )
}

/// Deterministic fallback profile built from the answers alone.
///
/// Guarantees onboarding always ends with a profile that passes
/// [`UserProfile::validate`], even with no external capability available.
pub fn default_profile(answers: &OnboardingAnswers) -> UserProfile {
    let role = answers.role_or_default();
    let goals = if answers.goals.is_empty() {
        "general productivity".to_string()
    } else {
        answers.goals_joined()
    };

    let key_focus_areas = if answers.goals.is_empty() {
        vec![
            "productivity".to_string(),
            "balance".to_string(),
            "growth".to_string(),
        ]
    } else {
        answers.goals.iter().take(3).cloned().collect()
    };

    UserProfile {
        daily_planning_instruction: format!(
            "You are a productivity coach for a {role}.\n\n\
             Focus on these goals: {goals}.\n\n\
             Provide:\n\
             - Realistic time-blocked schedules\n\
             - Practical, actionable advice\n\
             - Encouragement and support\n\
             - Clear structure with specific times"
        ),
        weekly_review_instruction: "You are a reflective productivity coach.\n\n\
             Provide:\n\
             - Celebration of wins\n\
             - Pattern identification\n\
             - Constructive suggestions\n\
             - Encouragement for next week"
            .to_string(),
        coaching_tone: "encouraging, practical".to_string(),
        key_focus_areas,
        time_block_size: 30,
        islamic_emphasis: EmphasisLevel::Medium,
        language: answers.language(),
        onboarding_data: answers.clone(),
        created_at: Timestamp::now(),
        is_default: true,
    }
}

/// Strips a fenced code block wrapper if the model added one despite the
/// JSON-only instruction.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let mut parts = trimmed.splitn(3, "```");
    parts.next();
    let inner = parts.next().unwrap_or("");
    inner.strip_prefix("json").unwrap_or(inner).trim()
}
