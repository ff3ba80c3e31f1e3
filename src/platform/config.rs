// wfh-tracker - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for wfh-tracker data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/wfh-tracker/).
    pub config_dir: PathBuf,

    /// Data directory holding the persisted project collection.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be
    /// determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility — a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logging]` section.
    pub logging: LoggingSection,
    /// `[storage]` section.
    pub storage: StorageSection,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: trace, debug, info, warn, or error.
    pub level: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Override for the data directory holding the project collection.
    pub data_dir: Option<PathBuf>,
}

/// Load `config.toml` from the config directory, if present.
///
/// A missing file yields the defaults; a malformed file is reported once at
/// warn level and then treated as absent — configuration problems must
/// never prevent startup.
pub fn load_config(config_dir: &Path) -> RawConfig {
    let path = config_dir.join(constants::CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read config file — using defaults");
            }
            return RawConfig::default();
        }
    };

    match toml::from_str::<RawConfig>(&content) {
        Ok(config) => {
            validate_config(&config);
            config
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Config file is malformed — using defaults"
            );
            RawConfig::default()
        }
    }
}

/// Warn about values that will be ignored downstream.
fn validate_config(config: &RawConfig) {
    if let Some(level) = &config.logging.level {
        let known = ["trace", "debug", "info", "warn", "error"];
        if !known.contains(&level.as_str()) {
            tracing::warn!(level, "Unknown logging level in config.toml");
        }
    }
}

// =============================================================================
// Unit tests
// =============================================================================
