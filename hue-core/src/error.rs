//! Global error types for the Hue bridge client.
//!
//! All error categories are unified into a single `HueError` enum with
//! conversions from the underlying library errors. Non-2xx responses are
//! carried as a structured [`HttpError`].

use std::fmt;

use reqwest::header::HeaderMap;
use thiserror::Error;

use crate::body::ResponseData;

/// Convenience type alias for Results using HueError.
pub type HueResult<T> = Result<T, HueError>;

/// Unified error type covering all error categories.
#[derive(Error, Debug)]
pub enum HueError {
    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Request construction errors --
    /// A URL could not be built or parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// A header name or value was rejected.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    // -- Network errors --
    /// The bridge answered with a status the request did not accept.
    #[error(transparent)]
    Http(Box<HttpError>),

    /// Network, DNS or TLS failure reported by the HTTP stack.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The probe response did not identify the bridge.
    #[error("bridge identity error: {0}")]
    BridgeIdentity(String),

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl HueError {
    /// The HTTP status when this is a status failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            HueError::Http(e) => Some(e.status),
            HueError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<HttpError> for HueError {
    fn from(e: HttpError) -> Self {
        HueError::Http(Box::new(e))
    }
}

impl From<serde_json::Error> for HueError {
    fn from(e: serde_json::Error) -> Self {
        HueError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for HueError {
    fn from(e: toml::de::Error) -> Self {
        HueError::Config(e.to_string())
    }
}

/// A call that completed at the HTTP level but failed status validation.
#[derive(Debug, Clone)]
pub struct HttpError {
    /// Response status code.
    pub status: u16,
    /// Final URL of the request.
    pub url: String,
    /// Response headers.
    pub headers: Option<HeaderMap>,
    /// Response body, decoded by content type.
    pub data: Option<ResponseData>,
}

impl HttpError {
    pub fn new(
        status: u16,
        url: impl Into<String>,
        headers: Option<HeaderMap>,
        data: Option<ResponseData>,
    ) -> Self {
        Self {
            status,
            url: url.into(),
            headers,
            data,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> Option<&HeaderMap> {
        self.headers.as_ref()
    }

    pub fn data(&self) -> Option<&ResponseData> {
        self.data.as_ref()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP error status: {}", self.status)?;
        match self.data.as_ref().filter(|d| d.is_truthy()) {
            Some(data) => write!(f, "; {}", data.to_json_string()),
            None => Ok(()),
        }
    }
}

impl std::error::Error for HttpError {}
