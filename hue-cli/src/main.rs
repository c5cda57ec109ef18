//! Hue CLI - command-line access to a bridge on the local network.
//!
//! Probes a bridge, bootstraps a connection, and issues authenticated calls
//! against its REST API. Useful for scripting and debugging.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use hue_core::config::AppConfig;
use hue_core::error::HueResult;
use hue_core::logging;
use hue_core::platform::Platform;

/// Hue - talk to a home-automation bridge from the terminal.
#[derive(Parser)]
#[command(
    name = "hue",
    version,
    about = "Hue bridge command-line client",
    long_about = "A command-line client for a Hue bridge on the local network.\n\
                  Discovers the bridge identity and issues REST calls as a whitelisted user."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(flatten)]
    bridge: BridgeArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Connection overrides applied on top of the config file.
#[derive(Debug, Clone, clap::Args)]
pub struct BridgeArgs {
    /// Bridge IP address or hostname.
    #[arg(long, global = true)]
    host: Option<String>,

    /// Bridge port.
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Connect over plain HTTP.
    #[arg(long, global = true)]
    insecure: bool,

    /// Whitelisted bridge username.
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// Request timeout in milliseconds.
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the bridge's unauthenticated config endpoint.
    Probe,
    /// Bootstrap a connection and show the resulting client configuration.
    Connect {
        /// Entertainment API client key.
        #[arg(long)]
        client_key: Option<String>,
        /// Save connection settings to the config file after connecting.
        #[arg(long)]
        save: bool,
    },
    /// Authenticated GET of a path under the user, e.g. `lights`.
    Get {
        path: String,
    },
    /// Authenticated PUT of a JSON body, e.g. `lights/1/state '{"on":true}'`.
    Put {
        path: String,
        body: String,
    },
}

#[tokio::main]
async fn main() -> HueResult<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::default_config_path()?,
    };
    let mut config = if config_path.exists() {
        AppConfig::load_from_file(&config_path)?
    } else {
        AppConfig::default()
    };
    commands::apply_overrides(&mut config, &cli.bridge);

    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let log_dir = config.effective_log_dir()?;
    let _guard = logging::init_logging(&log_level, &log_dir, config.logging.json_output)?;

    info!(
        "Hue CLI v{} on {}",
        hue_core::constants::APP_VERSION,
        Platform::current()
    );

    match cli.command {
        Commands::Probe => commands::probe::run(&config, cli.format).await,
        Commands::Connect { client_key, save } => {
            commands::connect::run(config, &config_path, client_key, save, cli.format).await
        }
        Commands::Get { path } => commands::call::get(&config, &path).await,
        Commands::Put { path, body } => commands::call::put(&config, &path, &body).await,
    }
}
