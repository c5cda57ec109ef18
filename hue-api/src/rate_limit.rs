//! Rate limiting hook for bridge requests.
//!
//! The limiter is a named pass-through: it carries its configured limits so
//! the transport and logs can report them, but scheduling runs the request
//! immediately.

use std::future::Future;

use tracing::trace;

use hue_core::config::RateLimit;

/// Named limiter wrapping every request a transport issues.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    name: String,
    limit: RateLimit,
}

impl RateLimiter {
    pub fn new(name: impl Into<String>, limit: RateLimit) -> Self {
        Self {
            name: name.into(),
            limit,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn limit(&self) -> RateLimit {
        self.limit
    }

    /// Run `task` under this limiter.
    pub async fn schedule<F, T>(&self, task: F) -> T
    where
        F: Future<Output = T>,
    {
        task.await
    }
}

/// Attachment point for limiter event logging.
pub struct RateLimitLogger;

impl RateLimitLogger {
    /// Attach logging to a limiter. Currently records nothing beyond a trace event.
    pub fn install(name: &str, limiter: &RateLimiter) {
        trace!(
            limiter = limiter.name(),
            max_concurrent = limiter.limit().max_concurrent,
            min_time_ms = limiter.limit().min_time_ms,
            "rate limit logger installed for {name}"
        );
    }
}
