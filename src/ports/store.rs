//! Coach Store Port - durable storage contract for profiles and artifacts.
//!
//! The store owns the canonical representation of profiles, daily plans,
//! weekly reviews, and metadata. It enforces the single-active-profile
//! invariant and keeps artifact history append-only: regenerations insert,
//! they never overwrite. Persistence failures are fatal for the operation
//! that hit them; there is no retry layer.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::artifacts::{DailyPlan, WeeklyReview};
use crate::domain::foundation::{DomainError, PlanId, ProfileId, ReviewId};
use crate::domain::profile::{ProfileRecord, UserProfile};

/// Aggregate counts over the persisted state. Purely observational.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Profiles ever persisted, active or not.
    pub total_profiles: u64,
    /// Profiles currently flagged active (0 or 1 under the invariant).
    pub active_profiles: u64,
    /// Daily plan rows, including superseded generations.
    pub total_daily_plans: u64,
    /// Weekly review rows, including superseded generations.
    pub total_weekly_reviews: u64,
    /// Storage size in bytes.
    pub size_bytes: u64,
}

/// Port for the persistence store.
#[async_trait]
pub trait CoachStore: Send + Sync {
    /// Persists a new profile as the active one.
    ///
    /// Atomically deactivates every currently-active profile, then inserts
    /// the new row as active. Existing rows are never mutated beyond the
    /// deactivation flag.
    async fn save_profile(&self, profile: &UserProfile) -> Result<ProfileId, DomainError>;

    /// Returns the most recently created active profile, or `None` before
    /// the first onboarding.
    async fn active_profile(&self) -> Result<Option<ProfileRecord>, DomainError>;

    /// Returns every persisted profile, newest first. Deactivated history
    /// included.
    async fn all_profiles(&self) -> Result<Vec<ProfileRecord>, DomainError>;

    /// Rewrites the payload of an existing profile in place, preserving its
    /// identity and active flag. Returns false when the id is unknown.
    async fn update_profile(&self, id: ProfileId, profile: &UserProfile) -> Result<bool, DomainError>;

    /// Inserts a daily plan. No uniqueness on (owner, date): regenerating a
    /// day keeps the older rows as history.
    async fn save_daily_plan(
        &self,
        owner: ProfileId,
        date: NaiveDate,
        content: &str,
        available_hours: f64,
    ) -> Result<PlanId, DomainError>;

    /// Returns the most recently created plan for (owner, date), if any.
    async fn plan_for(&self, owner: ProfileId, date: NaiveDate) -> Result<Option<DailyPlan>, DomainError>;

    /// Returns up to `limit` plans ordered by plan date descending (not by
    /// creation time), for weekly-summary consumption.
    async fn recent_plans(&self, owner: ProfileId, limit: u32) -> Result<Vec<DailyPlan>, DomainError>;

    /// Inserts a weekly review. Same non-uniqueness policy as plans.
    async fn save_weekly_review(
        &self,
        owner: ProfileId,
        week_start: NaiveDate,
        week_end: NaiveDate,
        content: &str,
    ) -> Result<ReviewId, DomainError>;

    /// Returns the most recently created review for (owner, week_start).
    async fn review_for(
        &self,
        owner: ProfileId,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklyReview>, DomainError>;

    /// Returns every review for an owner, newest week first.
    async fn all_reviews(&self, owner: ProfileId) -> Result<Vec<WeeklyReview>, DomainError>;

    /// Read-only aggregate counts.
    async fn stats(&self) -> Result<StoreStats, DomainError>;

    /// Destroys all persisted state and reinitializes an empty schema.
    /// Irreversible; confirmation is the caller's job.
    async fn reset(&self) -> Result<(), DomainError>;
}
