//! GenerateWeeklyReview - Command handler producing a week retrospective.
//!
//! Summarizes the most recent daily plans (plus optional user reflections)
//! into a review prompt, invokes the completion provider once, and appends
//! the result to review history.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::artifacts::{DailyPlan, WeeklyReview};
use crate::domain::coaching::{build_messages, resolve, Feature};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::profile::ProfileRecord;
use crate::ports::{CoachStore, CompletionProvider, CompletionRequest, RequestMetadata};

/// How many recent plans feed one review.
const PLANS_PER_REVIEW: u32 = 7;

/// How much of each plan is quoted in the review prompt.
const PLAN_EXCERPT_CHARS: usize = 300;

/// Command to generate a review for one week.
#[derive(Debug, Clone)]
pub struct GenerateWeeklyReviewCommand {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub reflections: Option<String>,
}

impl GenerateWeeklyReviewCommand {
    /// Builds the command for the Monday-aligned week containing `day`.
    pub fn for_week_of(day: NaiveDate) -> Self {
        let (week_start, week_end) = week_window(day);
        Self {
            week_start,
            week_end,
            reflections: None,
        }
    }

    /// Attaches the user's own reflections.
    pub fn with_reflections(mut self, reflections: impl Into<String>) -> Self {
        self.reflections = Some(reflections.into());
        self
    }
}

/// Returns the Monday..Sunday window containing `day`.
pub fn week_window(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let week_start = day - Duration::days(day.weekday().num_days_from_monday() as i64);
    (week_start, week_start + Duration::days(6))
}

/// Handler for generating weekly reviews.
pub struct GenerateWeeklyReviewHandler {
    provider: Arc<dyn CompletionProvider>,
    store: Arc<dyn CoachStore>,
}

impl GenerateWeeklyReviewHandler {
    pub fn new(provider: Arc<dyn CompletionProvider>, store: Arc<dyn CoachStore>) -> Self {
        Self { provider, store }
    }

    pub async fn handle(
        &self,
        record: &ProfileRecord,
        cmd: GenerateWeeklyReviewCommand,
    ) -> Result<WeeklyReview, DomainError> {
        let plans = self.store.recent_plans(record.id, PLANS_PER_REVIEW).await?;
        if plans.is_empty() {
            return Err(DomainError::new(
                ErrorCode::PlanNotFound,
                "no daily plans recorded yet; generate some plans first",
            ));
        }

        let prompt = review_prompt(&plans, cmd.reflections.as_deref());
        let feature = Feature::WeeklyReview.name();
        let messages = build_messages(feature, &prompt, Some(&record.profile), &[]);
        let config = resolve(feature, Some(&record.profile));

        let request = CompletionRequest::new(
            config.model,
            RequestMetadata::for_operation("weekly-review"),
        )
        .with_messages(messages)
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens);

        let response = self.provider.complete(request).await.map_err(|e| {
            DomainError::new(
                ErrorCode::AIProviderError,
                format!("review generation failed: {}", e),
            )
        })?;

        self.store
            .save_weekly_review(record.id, cmd.week_start, cmd.week_end, &response.content)
            .await?;

        self.store
            .review_for(record.id, cmd.week_start)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::InternalError, "saved review could not be read back")
            })
    }
}

fn review_prompt(plans: &[DailyPlan], reflections: Option<&str>) -> String {
    let plans_summary = plans
        .iter()
        .map(|plan| format!("**{}**: {}", plan.date, excerpt(&plan.content, PLAN_EXCERPT_CHARS)))
        .collect::<Vec<_>>()
        .join("\n\n");

    let reflections_block = reflections
        .filter(|text| !text.is_empty())
        .map(|text| format!("My reflections: {}\n\n", text))
        .unwrap_or_default();

    format!(
        "Here are my daily plans from this week:\n\n\
         {plans_summary}\n\n\
         {reflections_block}\
         Please provide:\n\
         1. Celebration of wins (even small ones)\n\
         2. Patterns you notice\n\
         3. 2-3 specific suggestions for next week\n\
         4. Encouragement and motivation"
    )
}

/// First `limit` characters of `text`, on char boundaries.
fn excerpt(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
