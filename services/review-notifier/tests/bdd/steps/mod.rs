//! BDD step definitions for the review notifier

pub mod config_steps;
pub mod polling_steps;
pub mod status_steps;
