//! Generated coaching artifacts: daily plans and weekly reviews.
//!
//! Artifacts are append-only. A regeneration for the same date or week adds
//! a new row; the newest row for a key is the current one, older rows stay
//! as history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PlanId, ProfileId, ReviewId, Timestamp};

/// A generated plan for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    /// Store-assigned identity.
    pub id: PlanId,
    /// Owning profile.
    pub profile_id: ProfileId,
    /// The day this plan covers.
    pub date: NaiveDate,
    /// The generated plan text.
    pub content: String,
    /// Hours the user had available when generating.
    pub available_hours: f64,
    /// Row creation time.
    pub created_at: Timestamp,
}

/// A generated review of one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReview {
    /// Store-assigned identity.
    pub id: ReviewId,
    /// Owning profile.
    pub profile_id: ProfileId,
    /// First day of the reviewed week.
    pub week_start: NaiveDate,
    /// Last day of the reviewed week.
    pub week_end: NaiveDate,
    /// The generated review text.
    pub content: String,
    /// Row creation time.
    pub created_at: Timestamp,
}
