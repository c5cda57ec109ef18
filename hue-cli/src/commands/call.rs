//! Authenticated REST calls under the configured username.

use hue_core::config::AppConfig;
use hue_core::error::{HueError, HueResult};

/// GET `path` and print the JSON response.
pub async fn get(config: &AppConfig, path: &str) -> HueResult<()> {
    let api = super::connect(config).await?;
    let value: serde_json::Value = api.transport().get_json(path).await?;
    super::print_json(&value)
}

/// PUT a JSON `body` to `path` and print the JSON response.
pub async fn put(config: &AppConfig, path: &str, body: &str) -> HueResult<()> {
    let body: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| HueError::Serialization(format!("request body is not valid JSON: {e}")))?;
    let api = super::connect(config).await?;
    let value: serde_json::Value = api.transport().put_json(path, body).await?;
    super::print_json(&value)
}
