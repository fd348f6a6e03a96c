//! Application layer: command handlers consumed by the UI layer.

pub mod handlers;
