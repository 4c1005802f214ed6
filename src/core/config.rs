//! # Configuration
//!
//! Optional runtime tuning with a clear override hierarchy:
//! defaults → config file → env vars.
//!
//! Everything has a default; a config file is never required. The library
//! takes an explicit path rather than guessing at a home directory, since
//! the embedding application owns that decision.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WaypointConfig {
    #[serde(default)]
    pub presentation: PresentationConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PresentationConfig {
    /// Seconds before a timed presentation dismisses itself.
    pub auto_dismiss_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_AUTO_DISMISS_SECS: u64 = 3;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub auto_dismiss: Duration,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            auto_dismiss: Duration::from_secs(DEFAULT_AUTO_DISMISS_SECS),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading & Resolution
// ============================================================================

/// Load config from a TOML file. A missing file is not an error: the
/// defaults apply. A present but malformed file is `ConfigError::Parse`.
pub fn load_config(path: &Path) -> Result<WaypointConfig, ConfigError> {
    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(WaypointConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: WaypointConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Collapse defaults → config file → env vars into concrete values.
pub fn resolve(config: &WaypointConfig) -> ResolvedConfig {
    // Auto-dismiss delay: env → config → default
    let auto_dismiss_secs = std::env::var("WAYPOINT_AUTO_DISMISS_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .or(config.presentation.auto_dismiss_secs)
        .unwrap_or(DEFAULT_AUTO_DISMISS_SECS);

    ResolvedConfig {
        auto_dismiss: Duration::from_secs(auto_dismiss_secs),
    }
}
