//! Transport: the component that issues calls on behalf of an [`Api`].
//!
//! Routes every request through the rate limiter and provides helpers for
//! authenticated JSON calls under `/{username}`.
//!
//! [`Api`]: crate::api::Api

use serde::de::DeserializeOwned;
use tracing::debug;

use hue_core::error::{HueError, HueResult};

use crate::http::{HttpClient, RequestConfig};
use crate::rate_limit::RateLimiter;
use crate::response::FetchResult;

#[derive(Clone)]
pub struct Transport {
    client: HttpClient,
    limiter: RateLimiter,
    username: Option<String>,
}

impl Transport {
    pub fn new(client: HttpClient, limiter: RateLimiter, username: Option<String>) -> Self {
        Self {
            client,
            limiter,
            username,
        }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Path of `path` under the authenticated user, e.g. `/{username}/lights`.
    pub fn user_path(&self, path: &str) -> HueResult<String> {
        let username = self
            .username
            .as_deref()
            .ok_or_else(|| HueError::MissingConfig("username".into()))?;
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            Ok(format!("/{username}"))
        } else {
            Ok(format!("/{username}/{path}"))
        }
    }

    /// Execute a request through the rate limiter.
    pub async fn execute(&self, req: RequestConfig) -> HueResult<FetchResult> {
        debug!(limiter = self.limiter.name(), "{} {}", req.method, req.url);
        self.limiter.schedule(self.client.request(req)).await
    }

    /// Authenticated GET returning a typed JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> HueResult<T> {
        let req = RequestConfig::get(self.user_path(path)?).json();
        self.execute(req).await?.json()
    }

    /// Authenticated PUT with a JSON body.
    pub async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> HueResult<T> {
        let req = RequestConfig::put(self.user_path(path)?).json().data(body);
        self.execute(req).await?.json()
    }

    /// Authenticated POST with a JSON body.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> HueResult<T> {
        let req = RequestConfig::post(self.user_path(path)?).json().data(body);
        self.execute(req).await?.json()
    }

    /// Authenticated DELETE.
    pub async fn delete(&self, path: &str) -> HueResult<FetchResult> {
        let req = RequestConfig::delete(self.user_path(path)?).json();
        self.execute(req).await
    }

    /// Replace the bearer token used by every subsequent call.
    pub async fn refresh_authorization_header(&self, token: &str) -> HueResult<()> {
        self.client.refresh_authorization_header(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpClientConfig;
    use hue_core::config::RateLimit;

    fn transport(username: Option<&str>) -> Transport {
        let client = HttpClient::new(HttpClientConfig {
            base_url: Some("http://bridge/api".into()),
            ..HttpClientConfig::default()
        })
        .unwrap();
        Transport::new(
            client,
            RateLimiter::new("transport", RateLimit::new(50, 50)),
            username.map(str::to_string),
        )
    }

    #[test]
    fn test_user_path() {
        let t = transport(Some("abc"));
        assert_eq!(t.user_path("lights").unwrap(), "/abc/lights");
        assert_eq!(t.user_path("/groups/0").unwrap(), "/abc/groups/0");
        assert_eq!(t.user_path("").unwrap(), "/abc");
    }

    #[test]
    fn test_user_path_requires_username() {
        let t = transport(None);
        assert!(matches!(t.user_path("lights"), Err(HueError::MissingConfig(_))));
    }
}
