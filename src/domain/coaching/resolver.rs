//! Configuration resolver: feature defaults merged with a user's profile.
//!
//! Resolution is total and side-effect free. Personalization only ever
//! replaces instruction text; model, temperature, and token budget always
//! come from the feature catalog so cost and latency stay predictable per
//! feature. A missing or partial profile degrades to the catalog defaults,
//! never to an error.

use crate::domain::coaching::{definition_for, Feature, Language, Message};
use crate::domain::profile::UserProfile;

/// Fully resolved configuration for one model invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationConfig {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Completion token budget.
    pub max_tokens: u32,
    /// Composed system instruction, language directive included.
    pub system_instruction: String,
}

/// Resolves the invocation configuration for a feature, optionally
/// personalized by a profile.
///
/// The instruction is the profile's per-feature override when present,
/// otherwise the catalog default. When a profile is supplied its language
/// directive is appended so the model answers in the user's language.
pub fn resolve(feature_name: &str, profile: Option<&UserProfile>) -> InvocationConfig {
    let feature = Feature::from_name(feature_name);
    let definition = definition_for(feature);

    let mut system_instruction = profile
        .and_then(|p| p.instruction_for(feature))
        .unwrap_or(definition.default_instruction)
        .to_string();

    if let Some(profile) = profile {
        system_instruction.push_str("\n\nIMPORTANT: ");
        system_instruction.push_str(profile.language.directive());
    }

    InvocationConfig {
        model: definition.model_id.to_string(),
        temperature: definition.temperature,
        max_tokens: definition.max_tokens,
        system_instruction,
    }
}

/// Builds the ordered message list for a model invocation: one system
/// message from [`resolve`], any prior turns in order, then the current
/// user input. Pure construction, no I/O.
pub fn build_messages(
    feature_name: &str,
    user_text: &str,
    profile: Option<&UserProfile>,
    history: &[Message],
) -> Vec<Message> {
    let config = resolve(feature_name, profile);

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::system(config.system_instruction));
    messages.extend(history.iter().cloned());
    messages.push(Message::user(user_text));
    messages
}

/// Returns the language directive for a code, defaulting to English for
/// unsupported or missing codes.
pub fn language_directive(code: &str) -> &'static str {
    Language::from_code(code).directive()
}
