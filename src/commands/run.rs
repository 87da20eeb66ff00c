use crate::core::Service;
use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::mpsc;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let config = super::load_config(matches)?;
    let interval = config.interval;
    let log_file = config.log_file.clone();

    let mut service = Service::with_platform_defaults(config);

    println!("{}", "Restoring files hidden by the previous run...".cyan());
    let report = service.start().context("Failed to start service")?;

    if report.attempted() == 0 {
        println!("{}", "Nothing to restore.".dimmed());
    } else {
        println!(
            "{} {}",
            "Restored".green().bold(),
            format!("{} file(s)", report.restored.len()).yellow().bold()
        );
        if !report.failed.is_empty() {
            println!(
                "{}",
                format!(
                    "{} file(s) could not be restored, see {}",
                    report.failed.len(),
                    log_file.display()
                )
                .yellow()
            );
        }
    }

    let (stop_tx, stop_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })
    .context("Failed to install Ctrl+C handler")?;

    println!();
    println!(
        "{} {}",
        "Watching Explorer windows every".white(),
        format!("{} ms", interval.as_millis()).cyan().bold()
    );
    println!("{}", "Press Ctrl+C to stop.".dimmed());

    let _ = stop_rx.recv();

    println!();
    println!("{}", "Stopping after the current tick...".cyan());
    let ticks = service.stop().context("Failed to stop service")?;
    println!("{} after {} tick(s)", "Stopped".green().bold(), ticks);

    Ok(())
}
