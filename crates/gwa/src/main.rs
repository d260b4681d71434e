//! gwa CLI - Garmin wellness API client.
//!
//! Provides commands for:
//! - `auth generate-tokens`: Run the OAuth handshake and print token credentials
//! - `fetch`: Pull summaries as raw JSON
//! - `backfill`: Request historic summaries
//! - `user-id`, `deregister`: User registration endpoints

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AuthCommand, BackfillArgs, FetchArgs, GlobalArgs};
use output::Output;

/// gwa - Garmin wellness API client.
#[derive(Parser)]
#[command(name = "gwa", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover gwa.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API environment variant: international or regional (overrides config).
    #[arg(long, global = true, env = "GWA_VARIANT")]
    variant: Option<String>,

    /// HTTP timeout in seconds (overrides config).
    #[arg(long, global = true, env = "GWA_TIMEOUT")]
    timeout: Option<u64>,

    /// Enable info-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// OAuth authorization commands.
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Fetch summaries and print the raw JSON.
    Fetch(FetchArgs),
    /// Request a backfill of historic summaries.
    Backfill(BackfillArgs),
    /// Print the Garmin user ID bound to the configured token.
    UserId,
    /// Deregister the user and revoke the configured token.
    Deregister,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let global = GlobalArgs {
        config: cli.config,
        variant: cli.variant,
        timeout_secs: cli.timeout,
    };

    let result = match cli.command {
        Commands::Auth(cmd) => cmd.execute(&global),
        Commands::Fetch(args) => args.execute(&global),
        Commands::Backfill(args) => args.execute(&global),
        Commands::UserId => commands::user::user_id(&global),
        Commands::Deregister => commands::user::deregister(&global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
