//! Probe command - read the bridge identity without credentials.

use console::style;

use hue_api::bootstrap::probe_bridge_id;
use hue_core::config::AppConfig;
use hue_core::error::HueResult;

use super::Bootstrap;
use crate::OutputFormat;

/// Run the probe command.
pub async fn run(config: &AppConfig, format: OutputFormat) -> HueResult<()> {
    let bootstrap = Bootstrap::from_config(config)?;
    let base = bootstrap.base_url();
    let res = bootstrap.probe(Some(config.bridge.timeout())).await?;

    match format {
        OutputFormat::Json => match res.data.as_json() {
            Some(value) => super::print_json(value)?,
            None => println!("{}", res.data.to_json_string()),
        },
        OutputFormat::Text => {
            let id = probe_bridge_id(&res.data);
            let field = |key: &str| {
                res.data
                    .as_json()
                    .and_then(|v| v.get(key))
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown")
                    .to_string()
            };
            println!("{} {}", style("Bridge").bold(), base);
            println!("  Name:        {}", field("name"));
            println!("  Bridge ID:   {}", id.as_deref().unwrap_or("unknown"));
            println!("  Model:       {}", field("modelid"));
            println!("  API version: {}", field("apiversion"));
            println!("  SW version:  {}", field("swversion"));
        }
    }

    Ok(())
}
