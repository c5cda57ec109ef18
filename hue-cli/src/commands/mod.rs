//! CLI command implementations.

pub mod call;
pub mod connect;
pub mod probe;

use std::time::Duration;

use hue_api::Url;
use hue_api::{Api, FetchResult, LocalBootstrap, LocalInsecureBootstrap};
use hue_core::config::AppConfig;
use hue_core::error::{HueError, HueResult};

use crate::BridgeArgs;

/// Apply command-line overrides to the loaded configuration.
pub fn apply_overrides(config: &mut AppConfig, args: &BridgeArgs) {
    if let Some(host) = &args.host {
        config.bridge.host = host.clone();
    }
    if args.port.is_some() {
        config.bridge.port = args.port;
    }
    if args.insecure {
        config.bridge.insecure = true;
    }
    if let Some(username) = &args.username {
        config.bridge.username = Some(username.clone());
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.bridge.timeout_ms = timeout_ms;
    }
}

/// The configured bridge's bootstrap, secure or insecure.
pub enum Bootstrap {
    Secure(LocalBootstrap),
    Insecure(LocalInsecureBootstrap),
}

impl Bootstrap {
    /// Build the bootstrap for `config`, loading `[bridge].ca_certificate`
    /// on the secure path.
    pub fn from_config(config: &AppConfig) -> HueResult<Self> {
        if !config.is_bridge_configured() {
            return Err(HueError::MissingConfig(
                "bridge host (use --host or set [bridge].host)".into(),
            ));
        }

        let bridge = &config.bridge;
        if bridge.insecure {
            let bootstrap =
                hue_api::create_insecure_local(&bridge.host, bridge.port, Some(config.rate_limits))?;
            return Ok(Self::Insecure(bootstrap));
        }

        let mut bootstrap =
            hue_api::create_local(&bridge.host, bridge.port, Some(config.rate_limits))?;
        if let Some(path) = &bridge.ca_certificate {
            let pem = std::fs::read(path)?;
            bootstrap = bootstrap.with_root_certificate(&pem)?;
        }
        Ok(Self::Secure(bootstrap))
    }

    pub fn base_url(&self) -> &Url {
        match self {
            Self::Secure(b) => b.base_url(),
            Self::Insecure(b) => b.base_url(),
        }
    }

    /// Read the bridge's unauthenticated config.
    pub async fn probe(&self, timeout: Option<Duration>) -> HueResult<FetchResult> {
        match self {
            Self::Secure(b) => b.probe(timeout).await,
            Self::Insecure(b) => b.probe(timeout).await,
        }
    }

    pub async fn connect(
        &self,
        username: Option<&str>,
        client_key: Option<&str>,
        timeout: Option<Duration>,
    ) -> HueResult<Api> {
        match self {
            Self::Secure(b) => b.connect(username, client_key, timeout).await,
            Self::Insecure(b) => b.connect(username, client_key, timeout).await,
        }
    }
}

/// Bootstrap a connection using the configured bridge settings.
pub async fn connect(config: &AppConfig) -> HueResult<Api> {
    let bootstrap = Bootstrap::from_config(config)?;
    let bridge = &config.bridge;
    bootstrap
        .connect(
            bridge.username.as_deref(),
            bridge.client_key.as_deref(),
            Some(bridge.timeout()),
        )
        .await
}

/// Pretty-print a JSON value.
pub fn print_json(value: &serde_json::Value) -> HueResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
