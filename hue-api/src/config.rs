//! Connection parameters for one bridge.

use crate::transport::Transport;

/// How to reach a bridge and which credentials to present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigParameters {
    pub base_url: String,
    pub bridge_name: String,
    pub username: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub client_key: Option<String>,
    pub remote: bool,
}

/// Immutable configuration bound to the transport that serves it.
#[derive(Clone)]
pub struct ApiConfig {
    params: ConfigParameters,
    transport: Transport,
}

impl ApiConfig {
    pub fn new(params: ConfigParameters, transport: Transport) -> Self {
        Self { params, transport }
    }

    /// Transport used to talk to the bridge.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn parameters(&self) -> &ConfigParameters {
        &self.params
    }

    /// Username used to interact with the bridge.
    pub fn username(&self) -> Option<&str> {
        self.params.username.as_deref()
    }

    /// Base URL for bridge API calls, e.g. `https://192.168.1.20/api`.
    pub fn base_url(&self) -> &str {
        &self.params.base_url
    }

    pub fn bridge_name(&self) -> &str {
        &self.params.bridge_name
    }

    /// Client key for the entertainment streaming endpoints.
    pub fn client_key(&self) -> Option<&str> {
        self.params.client_key.as_deref()
    }

    pub fn client_id(&self) -> Option<&str> {
        self.params.client_id.as_deref()
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.params.client_secret.as_deref()
    }

    /// Whether the connection goes through the remote cloud API.
    pub fn is_remote(&self) -> bool {
        self.params.remote
    }
}
