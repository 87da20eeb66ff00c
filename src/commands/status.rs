use crate::core::{HiddenRegistry, PatternStore};
use anyhow::Result;
use colored::Colorize;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let config = super::load_config(matches)?;

    println!("{}", "Files:".white().bold());
    println!("  {:<10} {}", "patterns", config.patterns_file.display());
    println!("  {:<10} {}", "registry", config.registry_file.display());
    println!("  {:<10} {}", "log", config.log_file.display());
    println!("  {:<10} {} ms", "interval", config.interval.as_millis());
    println!();

    let patterns = PatternStore::load(&config.patterns_file)?;
    if patterns.is_empty() {
        println!("{}", "No extension patterns configured.".yellow());
    } else {
        println!("{}", "Patterns:".white().bold());
        for pattern in patterns.iter() {
            println!("  {}", pattern.as_str().cyan());
        }
    }
    println!();

    let hidden = HiddenRegistry::new(&config.registry_file).read_all()?;
    if hidden.is_empty() {
        println!("{}", "No files currently hidden.".dimmed());
    } else {
        println!(
            "{} {}",
            "Currently hidden:".white().bold(),
            format!("({})", hidden.len()).dimmed()
        );
        for path in &hidden {
            let marker = if path.exists() {
                "•".normal()
            } else {
                "missing".red()
            };
            println!("  {} {}", marker, path.display());
        }
    }

    Ok(())
}
