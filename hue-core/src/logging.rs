//! Tracing subscriber for the bridge client.
//!
//! Events go to stderr in compact form and to a daily-rotated `hue.log`
//! under the configured log directory. The file copy can be JSON.

use std::path::Path;

use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::constants::LOG_FILE_NAME;
use crate::error::{HueError, HueResult};

/// Install the global subscriber.
///
/// `level` is an `EnvFilter` directive such as `info` or
/// `hue_api=debug,reqwest=warn`; an unparsable directive falls back to
/// `info`. Fails if a global subscriber is already set.
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> HueResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE_NAME));
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    macro_rules! file_layer {
        () => {
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
        };
    }
    let (json_file, text_file) = if json_output {
        (Some(file_layer!().json()), None)
    } else {
        (None, Some(file_layer!()))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(json_file)
        .with(text_file)
        .try_init()
        .map_err(|e| HueError::Config(format!("logging already initialized: {e}")))?;

    tracing::debug!(level, dir = %log_dir.display(), json_output, "logging initialized");

    Ok(LogGuard { _guard: guard })
}

/// Flushes buffered file output when dropped; hold it for the life of the process.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_dir_and_rejects_second_subscriber() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");

        let guard = init_logging("not a [valid directive", &log_dir, true).unwrap();
        assert!(log_dir.is_dir());

        let err = init_logging("debug", &log_dir, false).err().unwrap();
        assert!(matches!(err, HueError::Config(_)));
        drop(guard);
    }
}
