use crate::core::{EventLog, FsAttributes, HiddenRegistry, Hider, PatternStore};
use crate::platform::ShellWindows;
use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

/// Show what the next tick would hide without touching anything
pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let config = super::load_config(matches)?;
    let patterns = PatternStore::load(&config.patterns_file)?;

    if patterns.is_empty() {
        println!("{}", "No extension patterns configured.".yellow());
        println!();
        println!("{}", "Add one glob per line to:".white());
        println!("  {}", config.patterns_file.display().to_string().cyan().bold());
        return Ok(());
    }

    let hider = Hider::new(
        Arc::new(patterns),
        HiddenRegistry::new(&config.registry_file),
        Arc::new(ShellWindows),
        Arc::new(FsAttributes),
        EventLog::new(&config.log_file),
    );

    println!("{}", "Scanning open Explorer windows...".dimmed());
    let candidates = hider.candidates();

    if candidates.is_empty() {
        println!("{}", "Nothing to hide right now.".green());
        return Ok(());
    }

    println!();
    for path in &candidates {
        println!("  {}", path.display());
    }
    println!();
    println!(
        "{} {}",
        format!("{} file(s)", candidates.len()).yellow().bold(),
        "would be hidden".white()
    );

    Ok(())
}
