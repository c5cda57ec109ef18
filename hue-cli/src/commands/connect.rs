//! Connect command - bootstrap a connection and report the bound client.

use std::path::Path;

use console::style;
use serde_json::json;

use hue_core::config::AppConfig;
use hue_core::error::HueResult;

use crate::OutputFormat;

/// Run the connect command.
pub async fn run(
    mut config: AppConfig,
    config_path: &Path,
    client_key: Option<String>,
    save: bool,
    format: OutputFormat,
) -> HueResult<()> {
    if client_key.is_some() {
        config.bridge.client_key = client_key;
    }

    let scheme = if config.bridge.insecure { "http" } else { "https" };
    println!(
        "{} Connecting to {} over {}...",
        style("[1/2]").bold().dim(),
        config.bridge.host,
        scheme
    );

    let api = match super::connect(&config).await {
        Ok(api) => api,
        Err(e) => {
            println!("  {} Failed to reach bridge: {e}", style("FAIL").red().bold());
            return Err(e);
        }
    };
    println!("  {} Bridge is reachable.", style("OK").green().bold());

    println!("{} Client configuration:", style("[2/2]").bold().dim());
    let bound = api.config();
    match format {
        OutputFormat::Json => super::print_json(&json!({
            "bridgeId": api.bridge_id(),
            "bridgeName": bound.bridge_name(),
            "baseUrl": bound.base_url(),
            "username": bound.username(),
            "hasClientKey": bound.client_key().is_some(),
            "remote": bound.is_remote(),
        }))?,
        OutputFormat::Text => {
            println!("  Bridge ID:   {}", api.bridge_id().unwrap_or("unknown"));
            println!("  Bridge name: {}", bound.bridge_name());
            println!("  Base URL:    {}", bound.base_url());
            println!("  Username:    {}", bound.username().unwrap_or("(none)"));
            println!(
                "  Client key:  {}",
                if bound.client_key().is_some() {
                    style("set").green()
                } else {
                    style("not set").yellow()
                }
            );
        }
    }

    if save {
        config.save_to_file(config_path)?;
        println!("  {} Config saved to {}", style("OK").green(), config_path.display());
    }

    Ok(())
}
