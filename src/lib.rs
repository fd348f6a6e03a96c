//! Productivity Coach - Personalization engine for an AI coaching assistant.
//!
//! This crate turns a one-time onboarding questionnaire into a durable
//! coaching profile, resolves that profile into per-feature model invocation
//! configurations, and persists the profile together with the daily plans
//! and weekly reviews generated from it.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
