//! Onboarding questionnaire data: the questions asked and the answers kept.

mod answers;
mod questions;

pub use answers::OnboardingAnswers;
pub use questions::{question_by_id, questions, QuestionDefinition, QuestionKind};
