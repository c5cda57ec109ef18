//! Hue Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by the other Hue crates:
//! - Application configuration (bridge address, credentials, rate limits)
//! - The unified error type, including structured HTTP status failures
//! - Content-type aware response body decoding
//! - Structured logging with tracing
//! - Platform directories and common constants

pub mod body;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod platform;

// Re-export commonly used items at the crate root
pub use body::ResponseData;
pub use config::{AppConfig, RateLimit, RateLimits};
pub use error::{HttpError, HueError, HueResult};
pub use logging::init_logging;
pub use platform::Platform;
