// Command handlers module
pub mod restore;
pub mod run;
pub mod scan;
pub mod status;

use crate::core::config::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// Resolve the configuration, honoring the global `--home` override
pub fn load_config(matches: &clap::ArgMatches) -> Result<Config> {
    match matches.get_one::<String>("home") {
        Some(home) => Config::load_from(Path::new(home))
            .with_context(|| format!("Failed to load configuration from {}", home)),
        None => Config::load().context("Failed to load configuration"),
    }
}
