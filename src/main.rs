//! Hexzoe CLI - play levels, preview maps, and manage the profile.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Hexzoe - a hex-grid exploration puzzle
#[derive(Parser, Debug)]
#[command(name = "hexzoe")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in the terminal
    Play {
        #[command(flatten)]
        grid: cli::GridArgs,
    },

    /// Generate a level and print its map
    Generate {
        #[command(flatten)]
        grid: cli::GridArgs,

        /// Generate as if Zoe were already found (no Zoe tile)
        #[arg(long)]
        found_zoe: bool,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Show or reset the saved profile
    Profile {
        /// What to do: show or reset
        #[arg(default_value = "show")]
        action: cli::profile::ProfileAction,

        #[command(flatten)]
        grid: cli::GridArgs,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Play { grid } => cli::play::execute(&grid),

        Commands::Generate {
            grid,
            found_zoe,
            format,
        } => cli::init_logging(false).and_then(|()| cli::generate::execute(&grid, found_zoe, format)),

        Commands::Profile { action, grid, format } => {
            cli::init_logging(false).and_then(|()| cli::profile::execute(&grid, action, format))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_flags() {
        let args = Args::try_parse_from([
            "hexzoe", "generate", "--rows", "6", "--cols", "9", "--seed", "3", "--format", "json",
        ])
        .unwrap();
        match args.command {
            Commands::Generate { grid, format, found_zoe } => {
                assert_eq!(grid.rows, Some(6));
                assert_eq!(grid.cols, Some(9));
                assert_eq!(grid.seed, Some(3));
                assert_eq!(format, cli::OutputFormat::Json);
                assert!(!found_zoe);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_profile_default_action() {
        let args = Args::try_parse_from(["hexzoe", "profile"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Profile {
                action: cli::profile::ProfileAction::Show,
                ..
            }
        ));
    }

    #[test]
    fn test_out_of_range_rows_rejected_by_settings() {
        let args = Args::try_parse_from(["hexzoe", "play", "--rows", "2"]).unwrap();
        let Commands::Play { grid } = args.command else {
            panic!("expected play");
        };
        let err = grid.settings().unwrap_err();
        assert!(err.to_string().contains("rows must be between 3 and 20"));
    }
}
