//! User coaching profile: the durable personalization unit.
//!
//! A profile carries the personalized system instructions plus the coaching
//! preferences derived from onboarding. The serialized field names match the
//! stored JSON payload layout, so profiles written by earlier versions load
//! unchanged.

use serde::{Deserialize, Serialize};

use crate::domain::coaching::{Feature, Language};
use crate::domain::foundation::{ProfileId, Timestamp};
use crate::domain::onboarding::OnboardingAnswers;

/// How much Islamic content coaching responses should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmphasisLevel {
    High,
    Medium,
    Low,
    Minimal,
}

impl Default for EmphasisLevel {
    fn default() -> Self {
        EmphasisLevel::Medium
    }
}

/// Time block sizes the planner understands, in minutes.
pub const SUPPORTED_TIME_BLOCKS: [u32; 4] = [15, 30, 45, 60];

const DEFAULT_TIME_BLOCK: u32 = 30;

fn default_time_block() -> u32 {
    DEFAULT_TIME_BLOCK
}

/// A user's coaching profile.
///
/// Produced once by profile generation and then read on every model
/// invocation. Personalization only covers instruction text and coaching
/// preferences; model settings stay with the feature catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Personalized system instruction for daily planning.
    #[serde(rename = "system_message_daily_planning")]
    pub daily_planning_instruction: String,

    /// Personalized system instruction for weekly reviews.
    #[serde(rename = "system_message_weekly_review")]
    pub weekly_review_instruction: String,

    /// Short descriptive coaching tone, e.g. "encouraging, practical".
    pub coaching_tone: String,

    /// Up to three areas coaching should emphasize.
    pub key_focus_areas: Vec<String>,

    /// Preferred time block size in minutes; see [`SUPPORTED_TIME_BLOCKS`].
    #[serde(default = "default_time_block")]
    pub time_block_size: u32,

    /// Level of Islamic content to include.
    #[serde(default)]
    pub islamic_emphasis: EmphasisLevel,

    /// Response language.
    #[serde(rename = "language_code", default)]
    pub language: Language,

    /// Original questionnaire answers, retained for audit/redo.
    pub onboarding_data: OnboardingAnswers,

    /// When this profile was generated.
    pub created_at: Timestamp,

    /// True when generation fell back to the deterministic default.
    #[serde(default)]
    pub is_default: bool,
}

impl UserProfile {
    /// Returns the personalized instruction override for a feature, if the
    /// profile carries one. Only daily planning and weekly review are
    /// personalized.
    pub fn instruction_for(&self, feature: Feature) -> Option<&str> {
        let instruction = match feature {
            Feature::DailyPlanning => &self.daily_planning_instruction,
            Feature::WeeklyReview => &self.weekly_review_instruction,
            _ => return None,
        };
        if instruction.is_empty() {
            None
        } else {
            Some(instruction)
        }
    }

    /// Time block size clamped to the supported set; out-of-range values
    /// read as the 30-minute default.
    pub fn effective_time_block(&self) -> u32 {
        if SUPPORTED_TIME_BLOCKS.contains(&self.time_block_size) {
            self.time_block_size
        } else {
            DEFAULT_TIME_BLOCK
        }
    }

    /// Presence check gating persistence: both instructions, the coaching
    /// tone, focus areas, and a time block size must be there. Deeper range
    /// checks are deliberately left to consumers, which tolerate drift.
    pub fn validate(&self) -> bool {
        !self.daily_planning_instruction.is_empty()
            && !self.weekly_review_instruction.is_empty()
            && !self.coaching_tone.is_empty()
            && !self.key_focus_areas.is_empty()
            && self.time_block_size > 0
    }
}

/// A profile as stored: the profile payload plus record metadata owned by
/// the persistence store.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRecord {
    /// Store-assigned identity, immutable after first persistence.
    pub id: ProfileId,
    /// Whether this is the single active profile.
    pub is_active: bool,
    /// Row creation time.
    pub created_at: Timestamp,
    /// Last payload update time.
    pub updated_at: Timestamp,
    /// The profile payload.
    pub profile: UserProfile,
}
