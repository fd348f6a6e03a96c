//! GenerateDailyPlan - Command handler producing a time-blocked day plan.
//!
//! Resolves the daily-planning configuration against the active profile,
//! invokes the completion provider once, and appends the result to plan
//! history. Unlike profile generation there is no silent fallback here:
//! a failed completion propagates so the caller can show the error.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::artifacts::DailyPlan;
use crate::domain::coaching::{build_messages, resolve, Feature};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::profile::ProfileRecord;
use crate::ports::{CoachStore, CompletionProvider, CompletionRequest, RequestMetadata};

/// Command to generate a plan for one day.
#[derive(Debug, Clone)]
pub struct GenerateDailyPlanCommand {
    pub date: NaiveDate,
    pub available_hours: f64,
    pub additional_context: Option<String>,
}

/// Handler for generating daily plans.
pub struct GenerateDailyPlanHandler {
    provider: Arc<dyn CompletionProvider>,
    store: Arc<dyn CoachStore>,
}

impl GenerateDailyPlanHandler {
    pub fn new(provider: Arc<dyn CompletionProvider>, store: Arc<dyn CoachStore>) -> Self {
        Self { provider, store }
    }

    pub async fn handle(
        &self,
        record: &ProfileRecord,
        cmd: GenerateDailyPlanCommand,
    ) -> Result<DailyPlan, DomainError> {
        if cmd.available_hours <= 0.0 {
            return Err(DomainError::validation(
                "available_hours",
                "must be positive",
            ));
        }

        let prompt = plan_prompt(record, &cmd);
        let feature = Feature::DailyPlanning.name();
        let messages = build_messages(feature, &prompt, Some(&record.profile), &[]);
        let config = resolve(feature, Some(&record.profile));

        let request = CompletionRequest::new(
            config.model,
            RequestMetadata::for_operation("daily-plan"),
        )
        .with_messages(messages)
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens);

        let response = self.provider.complete(request).await.map_err(|e| {
            DomainError::new(ErrorCode::AIProviderError, format!("plan generation failed: {}", e))
        })?;

        self.store
            .save_daily_plan(record.id, cmd.date, &response.content, cmd.available_hours)
            .await?;

        self.store
            .plan_for(record.id, cmd.date)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::InternalError, "saved plan could not be read back")
            })
    }
}

fn plan_prompt(record: &ProfileRecord, cmd: &GenerateDailyPlanCommand) -> String {
    let context_text = cmd
        .additional_context
        .as_deref()
        .filter(|context| !context.is_empty())
        .map(|context| format!("\nAdditional context: {}", context))
        .unwrap_or_default();

    format!(
        "I have {hours} hours available today ({date}).\n\n\
         My focus areas: {focus}\n\
         Preferred time blocks: {blocks} minutes\n\
         {context}\n\n\
         Please create a realistic, time-blocked schedule for today.",
        hours = cmd.available_hours,
        date = cmd.date,
        focus = record.profile.key_focus_areas.join(", "),
        blocks = record.profile.effective_time_block(),
        context = context_text,
    )
}
