//! The connected client returned by a bootstrap.

use hue_core::config::RateLimits;

use crate::config::ApiConfig;
use crate::transport::Transport;

/// A client bound to one bridge.
#[derive(Clone)]
pub struct Api {
    config: ApiConfig,
    rate_limits: RateLimits,
    bridge_id: Option<String>,
}

impl Api {
    pub fn new(config: ApiConfig, rate_limits: RateLimits, bridge_id: Option<String>) -> Self {
        Self {
            config,
            rate_limits,
            bridge_id,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &Transport {
        self.config.transport()
    }

    pub fn rate_limits(&self) -> &RateLimits {
        &self.rate_limits
    }

    /// Lowercased bridge id learned from the probe, when it reported one.
    pub fn bridge_id(&self) -> Option<&str> {
        self.bridge_id.as_deref()
    }
}
