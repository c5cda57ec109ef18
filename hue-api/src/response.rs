//! Result of a completed bridge call.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use hue_core::body::ResponseData;
use hue_core::error::HueResult;

/// A response that passed status validation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Body decoded by content type.
    pub data: ResponseData,
}

impl FetchResult {
    /// Deserialize the JSON body into `T`.
    pub fn json<T: DeserializeOwned>(self) -> HueResult<T> {
        self.data.into_typed()
    }

    /// Header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
