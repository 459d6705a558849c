//! CLI command handlers

pub mod commands;

pub use commands::{extract, load_roster, skip_submission, submit};
