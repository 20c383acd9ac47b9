//! splice CLI
//!
//! Replaces balanced blocks and inserts anchored lines in text files,
//! keeping every untouched byte as it was.

mod cli;
mod commands;
mod error;
mod logging;
mod plan;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands};
use commands::OutputMode;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}[{}]: {}", "error".red().bold(), e.code(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose).map_err(|e| CliError::user(format!("logging setup failed: {e}")))?;

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            // No command provided - show help hint
            println!("{} balanced block editor", "splice".green().bold());
            println!();
            println!("Run {} for available commands.", "splice --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Locate {
            file,
            anchor,
            delimiters,
            print,
            json,
        } => commands::run_locate(&file, &anchor, &delimiters, print, json),
        Commands::Replace {
            file,
            anchor,
            delimiters,
            payload,
            no_check_payload,
            dry_run,
            json,
        } => commands::run_replace(
            &file,
            &anchor,
            &delimiters,
            &payload,
            !no_check_payload,
            OutputMode { dry_run, json },
        ),
        Commands::Insert {
            file,
            anchor,
            lines,
            payload,
            ending,
            dry_run,
            json,
        } => commands::run_insert(
            &file,
            &anchor,
            &lines,
            payload.as_deref(),
            ending,
            OutputMode { dry_run, json },
        ),
        Commands::Apply {
            plan,
            dry_run,
            json,
        } => commands::run_apply(&plan, OutputMode { dry_run, json }),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "splice", &mut std::io::stdout());
            Ok(())
        }
    }
}
