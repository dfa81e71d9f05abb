//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands;
use assetcheck::config::AppConfig;
use assetcheck::output::OutputMode;

/// assetcheck - Loan asset case intake and officer review
#[derive(Parser, Debug)]
#[command(
    name = "assetcheck",
    version,
    about = "Loan asset case intake and officer review",
    long_about = "Accept synced loan-asset cases, attach a verification verdict,\n\
                  and let an officer approve or reject each case once.\n\n\
                  Every decision is written to an append-only audit trail."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    #[cfg(feature = "server")]
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run a case batch and optional decisions offline, then print the cases
    Replay {
        /// JSON file with `{"cases": [...]}` or a bare array of case records
        cases: PathBuf,

        /// JSON file with `[{"case_id": ..., "action": ...}]`
        #[arg(short, long)]
        reviews: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        #[cfg(feature = "server")]
        Some(Command::Serve { host, port }) => commands::serve(config, host, port),
        Some(Command::Replay { cases, reviews }) => {
            commands::replay(&config, &cases, reviews.as_deref(), output_mode)
        },
        Some(Command::Config) => commands::show_config(&config, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("assetcheck v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("assetcheck v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'assetcheck --help' for usage");
                println!("Run 'assetcheck serve' to start the server");
            }
            Ok(())
        },
    }
}
