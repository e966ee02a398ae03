// src/cli.rs
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Log workout sets against a fixed program catalog", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitsCli {
    Metric,
    Imperial,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List workout programs
    Programs,
    /// Show the exercises of a program
    Show {
        /// Program key (e.g. "push", "legs"); defaults to push
        program: Option<String>,
    },
    /// Log a completed set
    Log {
        /// Program key the set belongs to
        program: String,
        /// Exercise name or its 1-based position in the program
        #[arg(short, long)]
        exercise: Option<String>,
        /// Weight used
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        weight: String,
        /// Repetitions performed
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        reps: String,
        /// Free-form notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Show the most recently logged sets
    Recent {
        /// Number of sets to show (defaults to the configured recent_limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Write the logged-set history as CSV to stdout
    Export,
    /// Show the sync settings
    Settings,
    /// Set the Google Sheets URL used for sync
    SetSheetUrl { url: String },
    /// Remove the Google Sheets URL (sync is skipped)
    ClearSheetUrl,
    /// Set the weight units used for display
    SetUnits {
        #[arg(value_enum)]
        units: UnitsCli,
    },
    /// Set how many sets `recent` shows by default
    SetRecentLimit { limit: usize },
    /// Show the path to the config file
    ConfigPath,
    /// Show the path to the database file
    DbPath,
    /// Generate a shell completion script
    GenerateCompletion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

// Function to parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
