use crate::core::{EventLog, FsAttributes, HiddenRegistry, Restorer};
use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let config = super::load_config(matches)?;
    config.ensure_files()?;

    let restorer = Restorer::new(
        HiddenRegistry::new(&config.registry_file),
        Arc::new(FsAttributes),
        EventLog::new(&config.log_file),
    );

    let report = restorer.restore().context("Failed to restore hidden files")?;

    if report.attempted() == 0 {
        println!("{}", "No hidden files recorded.".yellow());
        return Ok(());
    }

    for path in &report.restored {
        println!("  {} {}", "✓".green(), path.display());
    }
    for path in &report.failed {
        println!("  {} {}", "✗".red(), path.display().to_string().dimmed());
    }

    println!();
    println!(
        "{} {}",
        "Restored".green().bold(),
        format!("{}/{} file(s)", report.restored.len(), report.attempted())
            .yellow()
            .bold()
    );
    if !report.failed.is_empty() {
        println!(
            "{}",
            format!("Failures were written to {}", config.log_file.display()).dimmed()
        );
    }

    Ok(())
}
