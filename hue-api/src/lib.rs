//! Hue API - HTTP client for a home-automation bridge's local REST API.
//!
//! This crate wraps the bridge's HTTP endpoints: a request/response layer
//! that resolves URLs, encodes bodies and turns rejected statuses into
//! structured errors, and the local bootstraps that probe a bridge and hand
//! back a connected [`Api`].

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod http;
pub mod rate_limit;
pub mod response;
pub mod transport;
pub mod url_util;

// Re-export key types
pub use api::Api;
pub use bootstrap::{create_insecure_local, create_local, LocalBootstrap, LocalInsecureBootstrap};
pub use config::{ApiConfig, ConfigParameters};
pub use http::{HttpClient, HttpClientConfig, RequestConfig, StatusPolicy};
pub use rate_limit::{RateLimitLogger, RateLimiter};
pub use response::FetchResult;
pub use transport::Transport;
pub use url::Url;
