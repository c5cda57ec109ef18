//! Local network bootstraps.
//!
//! A bootstrap probes the bridge's unauthenticated config endpoint to learn
//! its identity, then builds an [`Api`] bound to `{origin}/api`. The secure
//! variant talks HTTPS with certificate validation (default port 443); the
//! insecure variant talks plain HTTP (default port 80). There is no fallback
//! between the two.

use std::time::Duration;

use reqwest::Certificate;
use tracing::{debug, info};
use url::Url;

use hue_core::body::ResponseData;
use hue_core::config::RateLimits;
use hue_core::constants::{API_ROOT, DEFAULT_TIMEOUT_MS, HTTPS_PORT, HTTP_PORT, PROBE_PATH};
use hue_core::error::{HueError, HueResult};

use crate::api::Api;
use crate::config::{ApiConfig, ConfigParameters};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::rate_limit::{RateLimitLogger, RateLimiter};
use crate::response::FetchResult;
use crate::transport::Transport;
use crate::url_util::{clean_hostname, http_url, https_url};

/// Bootstrap for a bridge on the local network over HTTPS.
#[derive(Clone)]
pub struct LocalBootstrap {
    base_url: Url,
    hostname: String,
    rate_limits: RateLimits,
    root_certificate: Option<Certificate>,
}

impl LocalBootstrap {
    /// `port` defaults to 443 and rarely needs setting.
    pub fn new(hostname: &str, rate_limits: RateLimits, port: Option<u16>) -> HueResult<Self> {
        Ok(Self {
            base_url: https_url(hostname, port.unwrap_or(HTTPS_PORT))?,
            hostname: clean_hostname(hostname),
            rate_limits,
            root_certificate: None,
        })
    }

    /// Trust an additional PEM root, such as the bridge vendor's CA.
    pub fn with_root_certificate(mut self, pem: &[u8]) -> HueResult<Self> {
        let cert = Certificate::from_pem(pem)
            .map_err(|e| HueError::Config(format!("invalid root certificate: {e}")))?;
        self.root_certificate = Some(cert);
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn rate_limits(&self) -> &RateLimits {
        &self.rate_limits
    }

    /// Probe the bridge and return a connected [`Api`].
    ///
    /// Without a `username` only unauthenticated endpoints are usable.
    /// `timeout` defaults to 20 seconds.
    pub async fn connect(
        &self,
        username: Option<&str>,
        client_key: Option<&str>,
        timeout: Option<Duration>,
    ) -> HueResult<Api> {
        connect_local(self.target(), username, client_key, timeout).await
    }
}

/// Bootstrap for a bridge on the local network over plain HTTP.
#[derive(Debug, Clone)]
pub struct LocalInsecureBootstrap {
    base_url: Url,
    hostname: String,
    rate_limits: RateLimits,
}

impl LocalInsecureBootstrap {
    /// `port` defaults to 80.
    pub fn new(hostname: &str, rate_limits: RateLimits, port: Option<u16>) -> HueResult<Self> {
        Ok(Self {
            base_url: http_url(hostname, port.unwrap_or(HTTP_PORT))?,
            hostname: clean_hostname(hostname),
            rate_limits,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn rate_limits(&self) -> &RateLimits {
        &self.rate_limits
    }

    /// Probe the bridge and return a connected [`Api`].
    pub async fn connect(
        &self,
        username: Option<&str>,
        client_key: Option<&str>,
        timeout: Option<Duration>,
    ) -> HueResult<Api> {
        connect_local(self.target(), username, client_key, timeout).await
    }
}

/// Create a bootstrap for a bridge on the local network over HTTPS.
///
/// `rate_limits` of `None` uses a fresh [`RateLimits::default`].
pub fn create_local(
    host: &str,
    port: Option<u16>,
    rate_limits: Option<RateLimits>,
) -> HueResult<LocalBootstrap> {
    LocalBootstrap::new(host, rate_limits.unwrap_or_default(), port)
}

/// Create a bootstrap for a bridge on the local network over plain HTTP.
pub fn create_insecure_local(
    host: &str,
    port: Option<u16>,
    rate_limits: Option<RateLimits>,
) -> HueResult<LocalInsecureBootstrap> {
    LocalInsecureBootstrap::new(host, rate_limits.unwrap_or_default(), port)
}

struct Target<'a> {
    base_url: &'a Url,
    hostname: &'a str,
    rate_limits: RateLimits,
    root_certificate: Option<&'a Certificate>,
    require_identity: bool,
}

impl LocalBootstrap {
    fn target(&self) -> Target<'_> {
        Target {
            base_url: &self.base_url,
            hostname: &self.hostname,
            rate_limits: self.rate_limits,
            root_certificate: self.root_certificate.as_ref(),
            require_identity: true,
        }
    }

    /// Fetch the unauthenticated config payload, trusting any pinned root.
    pub async fn probe(&self, timeout: Option<Duration>) -> HueResult<FetchResult> {
        probe(&self.base_url, self.root_certificate.as_ref(), timeout).await
    }
}

impl LocalInsecureBootstrap {
    fn target(&self) -> Target<'_> {
        Target {
            base_url: &self.base_url,
            hostname: &self.hostname,
            rate_limits: self.rate_limits,
            root_certificate: None,
            require_identity: false,
        }
    }

    /// Fetch the unauthenticated config payload.
    pub async fn probe(&self, timeout: Option<Duration>) -> HueResult<FetchResult> {
        probe(&self.base_url, None, timeout).await
    }
}

/// Unauthenticated JSON GET of `{base_url}api/config`.
pub async fn probe(
    base_url: &Url,
    root_certificate: Option<&Certificate>,
    timeout: Option<Duration>,
) -> HueResult<FetchResult> {
    let client = HttpClient::new(HttpClientConfig {
        root_certificate: root_certificate.cloned(),
        ..HttpClientConfig::default()
    })?;
    let probe_url = format!("{base_url}{PROBE_PATH}");
    debug!("probing bridge at {probe_url}");

    client
        .request(
            RequestConfig::get(probe_url)
                .json()
                .timeout(effective_timeout(timeout)),
        )
        .await
}

async fn connect_local(
    target: Target<'_>,
    username: Option<&str>,
    client_key: Option<&str>,
    timeout: Option<Duration>,
) -> HueResult<Api> {
    let res = probe(target.base_url, target.root_certificate, timeout).await?;
    let bridge_id = require_bridge_id(&res.data, target.hostname, target.require_identity)?;
    bind_api(&target, username, client_key, timeout, bridge_id)
}

/// The bridge id from a probe body; missing is an error when `required`.
fn require_bridge_id(
    data: &ResponseData,
    hostname: &str,
    required: bool,
) -> HueResult<Option<String>> {
    match probe_bridge_id(data) {
        None if required => Err(HueError::BridgeIdentity(format!(
            "{hostname} did not report a bridgeid"
        ))),
        id => Ok(id),
    }
}

/// Build the client bound to `{base_url}api` for a probed bridge.
fn bind_api(
    target: &Target<'_>,
    username: Option<&str>,
    client_key: Option<&str>,
    timeout: Option<Duration>,
    bridge_id: Option<String>,
) -> HueResult<Api> {
    let api_base_url = format!("{}{API_ROOT}", target.base_url);
    let client = HttpClient::new(HttpClientConfig {
        base_url: Some(api_base_url.clone()),
        timeout: Some(effective_timeout(timeout)),
        root_certificate: target.root_certificate.cloned(),
        ..HttpClientConfig::default()
    })?;

    let limiter = RateLimiter::new("transport", target.rate_limits.transport);
    RateLimitLogger::install("transport", &limiter);

    let transport = Transport::new(client, limiter, username.map(str::to_string));
    let params = ConfigParameters {
        base_url: api_base_url,
        bridge_name: target.hostname.to_string(),
        username: username.map(str::to_string),
        client_key: client_key.map(str::to_string),
        remote: false,
        ..ConfigParameters::default()
    };

    info!(
        "connected to bridge {} ({})",
        params.bridge_name,
        bridge_id.as_deref().unwrap_or("unknown id")
    );

    Ok(Api::new(
        ApiConfig::new(params, transport),
        target.rate_limits,
        bridge_id,
    ))
}

fn effective_timeout(timeout: Option<Duration>) -> Duration {
    timeout
        .filter(|t| !t.is_zero())
        .unwrap_or(Duration::from_millis(DEFAULT_TIMEOUT_MS))
}

/// Extract the bridge id from a probe body, matching the key case-insensitively.
pub fn probe_bridge_id(data: &ResponseData) -> Option<String> {
    data.as_json()?
        .as_object()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("bridgeid"))
        .and_then(|(_, value)| value.as_str())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_secure_defaults() {
        let bootstrap = create_local("192.168.1.20", None, None).unwrap();
        assert_eq!(bootstrap.base_url().as_str(), "https://192.168.1.20/");
        assert_eq!(bootstrap.hostname(), "192.168.1.20");
        assert_eq!(*bootstrap.rate_limits(), RateLimits::default());
    }

    #[test]
    fn test_insecure_defaults() {
        let bootstrap = create_insecure_local("http://bridge.local/", None, None).unwrap();
        assert_eq!(bootstrap.base_url().as_str(), "http://bridge.local/");
        assert_eq!(bootstrap.hostname(), "bridge.local");
    }

    #[test]
    fn test_explicit_port_and_limits() {
        let mut limits = RateLimits::default();
        limits.transport.max_concurrent = 4;
        let bootstrap = create_local("bridge.local", Some(8443), Some(limits)).unwrap();
        assert_eq!(bootstrap.base_url().as_str(), "https://bridge.local:8443/");
        assert_eq!(bootstrap.rate_limits().transport.max_concurrent, 4);
    }

    #[test]
    fn test_bridge_id_extraction() {
        let data = ResponseData::Json(json!({"name": "Hue", "bridgeid": "AABBCCDDEEFF"}));
        assert_eq!(probe_bridge_id(&data).as_deref(), Some("aabbccddeeff"));

        let data = ResponseData::Json(json!({"BridgeID": "001788FFFE000000"}));
        assert_eq!(probe_bridge_id(&data).as_deref(), Some("001788fffe000000"));

        assert_eq!(probe_bridge_id(&ResponseData::Json(json!({"name": "Hue"}))), None);
        assert_eq!(probe_bridge_id(&ResponseData::Text(String::new())), None);
    }

    #[test]
    fn test_secure_path_requires_bridge_id() {
        let data = ResponseData::Json(json!({"name": "Philips hue"}));
        let err = require_bridge_id(&data, "192.168.1.20", true).unwrap_err();
        assert!(matches!(err, HueError::BridgeIdentity(_)));
        assert!(err.to_string().contains("192.168.1.20"));

        let data = ResponseData::Json(json!({"bridgeid": "AABBCCDDEEFF"}));
        assert_eq!(
            require_bridge_id(&data, "192.168.1.20", true).unwrap().as_deref(),
            Some("aabbccddeeff")
        );
    }

    #[test]
    fn test_insecure_path_tolerates_missing_bridge_id() {
        let data = ResponseData::Text(String::new());
        assert_eq!(require_bridge_id(&data, "bridge.local", false).unwrap(), None);
    }

    #[test]
    fn test_secure_bind_carries_credentials() {
        let bootstrap = create_local("https://192.168.1.20/", None, None).unwrap();
        let data = ResponseData::Json(json!({"bridgeid": "AABBCCDDEEFF"}));
        let bridge_id = require_bridge_id(&data, bootstrap.hostname(), true).unwrap();

        let api = bind_api(
            &bootstrap.target(),
            Some("user-1234"),
            Some("CLIENTKEY"),
            None,
            bridge_id,
        )
        .unwrap();

        let config = api.config();
        assert!(!config.is_remote());
        assert_eq!(config.base_url(), "https://192.168.1.20/api");
        assert!(config.base_url().ends_with("/api"));
        assert_eq!(config.bridge_name(), "192.168.1.20");
        assert_eq!(config.username(), Some("user-1234"));
        assert_eq!(config.client_key(), Some("CLIENTKEY"));
        assert_eq!(api.bridge_id(), Some("aabbccddeeff"));
        assert_eq!(api.transport().client().timeout(), Some(Duration::from_secs(20)));
        assert_eq!(
            api.transport().client().base_url(),
            Some("https://192.168.1.20/api")
        );
    }

    #[test]
    fn test_effective_timeout() {
        assert_eq!(effective_timeout(None), Duration::from_secs(20));
        assert_eq!(effective_timeout(Some(Duration::ZERO)), Duration::from_secs(20));
        assert_eq!(effective_timeout(Some(Duration::from_secs(5))), Duration::from_secs(5));
    }
}
