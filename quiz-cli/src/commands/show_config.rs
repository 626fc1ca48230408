//! Show the effective configuration.

use anyhow::{Context, Result};

use crate::config::LoadedConfig;

/// Run the config command.
pub fn run(loaded: &LoadedConfig) -> Result<()> {
    match &loaded.source {
        Some(path) => println!("# Loaded from {}", path.display()),
        None => println!("# Built-in defaults (no config file found)"),
    }
    let rendered =
        toml::to_string_pretty(&loaded.config).context("Failed to serialize configuration")?;
    print!("{}", rendered);
    Ok(())
}
