//! CLI command implementations.

pub mod play;
pub mod show_config;
