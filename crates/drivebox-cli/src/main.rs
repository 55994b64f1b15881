//! drivebox CLI - Command-line interface for drivebox
//!
//! Provides commands for:
//! - Authentication with Google Drive
//! - Browsing the remote file listing
//! - Uploading local files
//! - Viewing configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use drivebox_core::config::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod source;
mod view;

use commands::{
    auth::AuthCommand, completions::CompletionsCommand, config::ConfigCommand, ls::LsCommand,
    upload::UploadCommand,
};
use output::{get_formatter, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "drivebox", version, about = "Google Drive browser and uploader")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Authentication commands
    #[command(subcommand)]
    Auth(AuthCommand),
    /// List files in the remote backend
    Ls(LsCommand),
    /// Upload a local file
    Upload(UploadCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup tracing; --quiet wins over -v
    let filter = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path);

    let result = match cli.command {
        Commands::Auth(cmd) => cmd.execute(format, &config).await,
        Commands::Ls(cmd) => cmd.execute(format, &config).await,
        Commands::Upload(cmd) => cmd.execute(format, &config).await,
        Commands::Config(cmd) => cmd.execute(format, &config_path).await,
        Commands::Completions(cmd) => cmd.execute(format).await,
    };

    // Failures are reported, not swallowed: print the chain and exit non-zero
    if let Err(e) = result {
        let formatter = get_formatter(cli.json);
        formatter.error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
