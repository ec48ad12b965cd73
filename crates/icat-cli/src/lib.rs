//! CLI library components for the intervention catalog converter.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
