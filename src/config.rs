//! Configuration file support
//!
//! ```toml
//! [playback]
//! base_tick_ms = 800
//! speed = 1.0
//!
//! [log]
//! filter = "dsatty=debug"
//! file = "dsatty.log"
//! ```
//!
//! Every field is optional. Command-line flags override file values.

use crate::error::Result;
use crate::playback::BASE_TICK_MS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Delay between auto-play ticks at 1x speed
    pub base_tick_ms: u64,
    /// Initial speed multiplier
    pub speed: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            base_tick_ms: BASE_TICK_MS,
            speed: 1.0,
        }
    }
}

impl PlaybackConfig {
    pub fn base_tick(&self) -> Duration {
        Duration::from_millis(self.base_tick_ms.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub filter: String,
    /// Write logs here instead of stderr
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: "warn".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}
