use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use exhide::commands;

fn main() -> Result<()> {
    let matches = Command::new("exhide")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Hides configured file types in open Explorer windows and restores them on restart")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("home")
                .long("home")
                .value_name("DIR")
                .help("Data directory (defaults to $EXHIDE_HOME or the user config directory)")
                .global(true),
        )
        .subcommand(
            Command::new("run")
                .about("Restore leftovers, then hide matching files until Ctrl+C"),
        )
        .subcommand(Command::new("restore").about("Unhide every recorded file and clear the list"))
        .subcommand(Command::new("scan").about("List files the next tick would hide"))
        .subcommand(Command::new("status").about("Show paths, patterns and hidden files"))
        .get_matches();

    exhide::init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("run", sub_matches)) => commands::run::execute(sub_matches)?,
        Some(("restore", sub_matches)) => commands::restore::execute(sub_matches)?,
        Some(("scan", sub_matches)) => commands::scan::execute(sub_matches)?,
        Some(("status", sub_matches)) => commands::status::execute(sub_matches)?,
        _ => {
            println!("Welcome to exhide!");
            println!("Use 'exhide --help' for more information.");
        }
    }

    Ok(())
}
