//! Onboarding handlers.

mod generate_profile;

pub use generate_profile::{default_profile, GenerateProfileHandler};
