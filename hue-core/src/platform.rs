//! Where the client keeps its files on each OS.

use std::path::PathBuf;

use crate::constants::APP_NAME;
use crate::error::{HueError, HueResult};

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// The OS this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Parent of the default `logs/` directory.
    ///
    /// - Windows: `%APPDATA%\HueBridge`
    /// - macOS: `~/Library/Application Support/HueBridge`
    /// - Linux: `$XDG_DATA_HOME/HueBridge` or `~/.local/share/HueBridge`
    pub fn data_dir() -> HueResult<PathBuf> {
        let base = dirs::data_dir()
            .ok_or_else(|| HueError::Config("could not determine data directory".into()))?;
        Ok(base.join(APP_NAME))
    }

    /// Holds `config.toml` with the bridge host and credentials.
    ///
    /// - Windows: `%APPDATA%\HueBridge`
    /// - macOS: `~/Library/Application Support/HueBridge`
    /// - Linux: `$XDG_CONFIG_HOME/HueBridge` or `~/.config/HueBridge`
    pub fn config_dir() -> HueResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| HueError::Config("could not determine config directory".into()))?;
        Ok(base.join(APP_NAME))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
