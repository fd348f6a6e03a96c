//! Adapters: concrete implementations of the ports.

pub mod ai;
pub mod sqlite;

pub use ai::{GroqConfig, GroqProvider, MockCompletionProvider, MockResponse};
pub use sqlite::SqliteCoachStore;
