//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "HueBridge";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix of the daily-rotated log file.
pub const LOG_FILE_NAME: &str = "hue.log";

/// Default bridge request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;

/// Default port for TLS connections to the bridge.
pub const HTTPS_PORT: u16 = 443;

/// Default port for plain HTTP connections to the bridge.
pub const HTTP_PORT: u16 = 80;

/// Path segment under which the bridge REST API lives.
pub const API_ROOT: &str = "api";

/// Unauthenticated configuration endpoint, relative to the bridge origin.
pub const PROBE_PATH: &str = "api/config";

/// JSON media type.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Form media type sent with URL-encoded parameters.
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded; charset=UTF-8";
