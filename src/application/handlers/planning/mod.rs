//! Planning handlers.

mod generate_daily_plan;
mod generate_weekly_review;

pub use generate_daily_plan::{GenerateDailyPlanCommand, GenerateDailyPlanHandler};
pub use generate_weekly_review::{
    week_window, GenerateWeeklyReviewCommand, GenerateWeeklyReviewHandler,
};
