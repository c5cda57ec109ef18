//! HTTP client wrapper for the bridge REST API.
//!
//! Builds requests from a [`RequestConfig`] (URL resolution against a base
//! URL, header merging, body encoding, timeout), issues them with reqwest,
//! validates the status and decodes the body by content type.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Certificate, Client, Method, Request};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use hue_core::body::ResponseData;
use hue_core::constants::{CONTENT_TYPE_FORM, CONTENT_TYPE_JSON};
use hue_core::error::{HttpError, HueError, HueResult};

use crate::response::FetchResult;

/// Settings shared by every request from one [`HttpClient`].
#[derive(Clone, Default)]
pub struct HttpClientConfig {
    /// Headers sent with every request.
    pub headers: HeaderMap,
    /// Prefix for relative request URLs.
    pub base_url: Option<String>,
    /// Default timeout; zero or `None` disables it.
    pub timeout: Option<Duration>,
    /// Extra trust root added on top of the system store.
    pub root_certificate: Option<Certificate>,
}

/// Decides which response statuses count as success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Any 2xx status.
    #[default]
    Success,
    /// Any status inside the range.
    Range(RangeInclusive<u16>),
}

impl StatusPolicy {
    pub fn accepts(&self, status: u16) -> bool {
        match self {
            StatusPolicy::Success => (200..300).contains(&status),
            StatusPolicy::Range(range) => range.contains(&status),
        }
    }
}

/// Description of a single call. Nothing here outlives the call.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub method: Method,
    pub url: String,
    /// Send and accept JSON; `data` is serialized as JSON text.
    pub json: bool,
    pub data: Option<serde_json::Value>,
    /// Per-request headers, applied over the client's headers.
    pub headers: HeaderMap,
    /// Form parameters. When set they replace any other body.
    pub params: Option<Vec<(String, String)>>,
    pub timeout: Option<Duration>,
    pub validate_status: StatusPolicy,
}

impl RequestConfig {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            json: false,
            data: None,
            headers: HeaderMap::new(),
            params: None,
            timeout: None,
            validate_status: StatusPolicy::Success,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn json(mut self) -> Self {
        self.json = true;
        self
    }

    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params = Some(
            params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn validate_status(mut self, policy: StatusPolicy) -> Self {
        self.validate_status = policy;
        self
    }

    /// The body value, ignoring `null` and the empty string.
    fn body_data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref().filter(|d| match d {
            serde_json::Value::Null => false,
            serde_json::Value::String(s) => !s.is_empty(),
            _ => true,
        })
    }
}

/// HTTP client for talking to a bridge.
///
/// Cloning is cheap and clones share the persisted header set, so a token
/// refresh on one clone is seen by all of them.
#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    base_url: Option<String>,
    timeout: Option<Duration>,
    /// Replaced wholesale on refresh, never edited in place.
    headers: Arc<RwLock<Arc<HeaderMap>>>,
}

impl HttpClient {
    /// Create a client from its shared settings.
    pub fn new(config: HttpClientConfig) -> HueResult<Self> {
        let mut builder = Client::builder();
        if let Some(cert) = config.root_certificate {
            builder = builder.add_root_certificate(cert);
        }

        let inner = builder
            .build()
            .map_err(|e| HueError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            base_url: config.base_url.filter(|b| !b.is_empty()),
            timeout: config.timeout.filter(|t| !t.is_zero()),
            headers: Arc::new(RwLock::new(Arc::new(config.headers))),
        })
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn has_base_url(&self) -> bool {
        self.base_url.is_some()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Snapshot of the current persisted header set.
    pub async fn headers(&self) -> Arc<HeaderMap> {
        self.headers.read().await.clone()
    }

    /// Install a new header set carrying `Authorization: Bearer {token}`.
    pub async fn refresh_authorization_header(&self, token: &str) -> HueResult<()> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| HueError::InvalidHeader(format!("authorization token: {e}")))?;
        value.set_sensitive(true);

        let mut guard = self.headers.write().await;
        let mut next = HeaderMap::clone(&guard);
        next.insert(AUTHORIZATION, value);
        *guard = Arc::new(next);

        debug!("authorization header refreshed");
        Ok(())
    }

    /// Resolve a request URL against the base URL.
    ///
    /// Absolute URLs and clients without a base URL pass through unchanged.
    pub fn resolve_url(&self, url: &str) -> String {
        let base = match self.base_url.as_deref() {
            Some(base) if !url.starts_with("http") => base,
            _ => return url.to_string(),
        };

        if url.starts_with('/') {
            format!("{base}{url}")
        } else {
            format!("{base}/{url}")
        }
    }

    fn effective_timeout(&self, timeout: Option<Duration>) -> Option<Duration> {
        match timeout {
            Some(t) if t.is_zero() => None,
            Some(t) => Some(t),
            None => self.timeout,
        }
    }

    /// Build the outgoing request without sending it.
    pub async fn build_request(&self, req: &RequestConfig) -> HueResult<Request> {
        let url = self.resolve_url(&req.url);
        let mut headers = HeaderMap::clone(&*self.headers().await);
        let mut body: Option<Vec<u8>> = None;

        if req.json {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
            headers.insert(ACCEPT, HeaderValue::from_static(CONTENT_TYPE_JSON));
            if let Some(data) = req.body_data() {
                body = Some(serde_json::to_vec(data)?);
            }
        } else if let Some(data) = req.body_data() {
            body = Some(match data {
                serde_json::Value::String(s) => s.clone().into_bytes(),
                other => other.to_string().into_bytes(),
            });
        }

        for (name, value) in &req.headers {
            headers.insert(name.clone(), value.clone());
        }

        if let Some(params) = &req.params {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            body = Some(encoded.into_bytes());
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_FORM));
        }

        let mut builder = self.inner.request(req.method.clone(), &url).headers(headers);
        if let Some(timeout) = self.effective_timeout(req.timeout) {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        builder
            .build()
            .map_err(|e| HueError::InvalidUrl(format!("{url}: {e}")))
    }

    /// Issue a request, validate its status and decode the body.
    pub async fn request(&self, req: RequestConfig) -> HueResult<FetchResult> {
        let request = self.build_request(&req).await?;
        let method = request.method().clone();
        debug!("{} {}", method, request.url());

        let response = self.inner.execute(request).await?;

        let status = response.status().as_u16();
        let url = response.url().to_string();
        let headers = response.headers().clone();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let text = response.text().await?;
        let data = ResponseData::decode(content_type.as_deref(), text);

        if !req.validate_status.accepts(status) {
            warn!("{} {} returned status {}", method, url, status);
            return Err(HttpError::new(status, url, Some(headers), Some(data)).into());
        }

        Ok(FetchResult {
            status,
            headers,
            data,
        })
    }
}

/// Create a client from its shared settings.
pub fn create(config: HttpClientConfig) -> HueResult<HttpClient> {
    HttpClient::new(config)
}

/// Issue a one-off request with a default client.
pub async fn request(req: RequestConfig) -> HueResult<FetchResult> {
    HttpClient::new(HttpClientConfig::default())?.request(req).await
}
