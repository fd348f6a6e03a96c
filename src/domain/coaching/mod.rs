//! Coaching configuration: feature catalog, languages, and the resolver
//! that merges both with a user's profile into invocation configurations.

mod catalog;
mod language;
mod message;
mod resolver;

pub use catalog::{definition_for, definition_for_name, Feature, FeatureDefinition};
pub use language::{Language, TextDirection};
pub use message::{Message, MessageRole};
pub use resolver::{build_messages, language_directive, resolve, InvocationConfig};
