//! Configuration file handling.
//!
//! Configuration is stored in ~/.kitwav/config.yaml. Every field has a
//! default, so a missing file or a partial one is fine.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use kitwav::pcm::Format;
use serde::{Deserialize, Serialize};

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".kitwav";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Export defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output sample rate in Hz.
    pub sample_rate: u32,

    /// Output channel count, 1 or 2.
    pub channels: u16,

    /// Longest export accepted, in seconds.
    pub max_duration_secs: f64,

    /// Decode sources concurrently.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 1,
            max_duration_secs: 20.0,
            parallel: false,
        }
    }
}

impl Config {
    /// Gets the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR).join(DEFAULT_CONFIG_FILE))
    }

    /// Resolves `custom` or the default path.
    pub fn resolve_path(custom: Option<&str>) -> anyhow::Result<PathBuf> {
        match custom {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path().ok_or_else(|| anyhow::anyhow!("cannot determine config path")),
        }
    }

    /// Loads the configuration at `path`, falling back to defaults if the
    /// file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let cfg: Config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_yaml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?
        } else {
            Config::default()
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Checks that the values describe a usable export.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sample_rate == 0 {
            anyhow::bail!("config: sample_rate must be positive");
        }
        if !matches!(self.channels, 1 | 2) {
            anyhow::bail!("config: channels must be 1 or 2, got {}", self.channels);
        }
        if self.max_duration_secs.is_nan() || self.max_duration_secs <= 0.0 {
            anyhow::bail!("config: max_duration_secs must be positive");
        }
        Ok(())
    }

    /// Returns the export format, with optional overrides.
    pub fn format(&self, rate: Option<u32>, channels: Option<u16>) -> anyhow::Result<Format> {
        let rate = rate.unwrap_or(self.sample_rate);
        let channels = channels.unwrap_or(self.channels);
        if rate == 0 {
            anyhow::bail!("sample rate must be positive");
        }
        Format::with_channels(rate, channels)
            .ok_or_else(|| anyhow::anyhow!("channels must be 1 or 2, got {}", channels))
    }
}
