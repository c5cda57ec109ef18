//! Helpers for turning a user supplied host into a bridge base URL.

use std::net::Ipv6Addr;

use hue_core::error::{HueError, HueResult};
use url::Url;

/// Strip any scheme, path and surrounding whitespace from a host string.
///
/// `"https://192.168.1.20/api"` becomes `"192.168.1.20"`.
pub fn clean_hostname(hostname: &str) -> String {
    let trimmed = hostname.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);

    let host = match without_scheme.find('/') {
        Some(idx) => &without_scheme[..idx],
        None => without_scheme,
    };
    host.to_string()
}

/// Base HTTPS URL for a bridge, always with a trailing slash.
pub fn https_url(hostname: &str, port: u16) -> HueResult<Url> {
    base_url("https", hostname, port)
}

/// Base HTTP URL for a bridge, always with a trailing slash.
pub fn http_url(hostname: &str, port: u16) -> HueResult<Url> {
    base_url("http", hostname, port)
}

fn base_url(scheme: &str, hostname: &str, port: u16) -> HueResult<Url> {
    let host = clean_hostname(hostname);
    if host.is_empty() {
        return Err(HueError::InvalidUrl("bridge hostname is empty".into()));
    }

    // Bare IPv6 literals need brackets before a port can follow.
    let unbracketed = host.trim_start_matches('[').trim_end_matches(']');
    let host = if unbracketed.parse::<Ipv6Addr>().is_ok() {
        format!("[{unbracketed}]")
    } else if host.contains(':') {
        return Err(HueError::InvalidUrl(format!(
            "{host}: host must not include a port; pass it separately"
        )));
    } else {
        host
    };

    // The url crate drops the port when it is the scheme default.
    Url::parse(&format!("{scheme}://{host}:{port}/"))
        .map_err(|e| HueError::InvalidUrl(format!("{host}: {e}")))
}
