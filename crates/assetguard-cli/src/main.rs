//! AssetGuard CLI - Command-line interface for asset convention checks
//!
//! This binary scans a game project's asset tree for naming and location
//! violations and manages the project's rule configuration.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use assetguard_cli::{commands, logging};

/// AssetGuard - Asset Naming and Location Checker
#[derive(Parser)]
#[command(name = "assetguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a project for naming and location violations
    Scan {
        /// Project directory (the one containing `Assets/`)
        #[arg(short, long, default_value = ".")]
        project: String,

        /// Configuration file (default: <project>/assetguard.json)
        #[arg(short, long)]
        config: Option<String>,

        /// Maximum number of violations to report
        #[arg(long)]
        max_violations: Option<usize>,

        /// Export results as CSV (default: Assets/AssetGuard_Results.csv)
        #[arg(long, value_name = "FILE", num_args = 0..=1)]
        export: Option<Option<String>>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,

        /// Disable a check: special-folders, folders, conditions or a category (can be repeated)
        #[arg(long, value_name = "CHECK")]
        skip: Vec<String>,
    },

    /// Write a default configuration file into a project
    Init {
        /// Project directory
        #[arg(short, long, default_value = ".")]
        project: String,

        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },

    /// List the naming styles and category suffixes
    Patterns {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Scan {
            project,
            config,
            max_violations,
            export,
            json,
            skip,
        } => {
            let options = commands::scan::ScanOptions {
                config,
                max_violations,
                export,
                skip,
            };
            let format = if json {
                commands::scan::OutputFormat::Json
            } else {
                commands::scan::OutputFormat::Text
            };
            commands::scan::run(&project, &options, format)
        }
        Commands::Init { project, force } => commands::init::run(&project, force),
        Commands::Patterns { json } => commands::patterns::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
