//! Drawing proxy configuration.
//!
//! Configuration is organized into logical sections:
//! - Layout (grid mode, surface resolution, paper speed, gain)
//! - Clipping (microvolt clip applied to traces)
//! - Markers (beat pinning and floating offsets)
//! - Retention (window kept alive by the eviction pass)
//! - Events (change-event history)

use std::path::{Path, PathBuf};

use ecgdraw_core::constants::{
    BEAT_FLOAT_OFFSET, EVENT_HISTORY_SIZE, GAIN_MM_MV, PAPER_SPEED_MM_S, PQRST_BAND_OFFSET,
    PX_PER_MM, RETENTION_MARGIN_PX,
};
use ecgdraw_core::GridMode;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Layout and scale settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Lead layout of the drawing surface
    pub grid_mode: GridMode,
    /// Surface pixels per millimetre
    pub px_per_mm: f64,
    /// Paper speed in mm/s
    pub paper_speed_mm_s: f64,
    /// Amplitude gain in mm/mV
    pub gain_mm_mv: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            grid_mode: GridMode::Twelve,
            px_per_mm: PX_PER_MM,
            paper_speed_mm_s: PAPER_SPEED_MM_S,
            gain_mm_mv: GAIN_MM_MV,
        }
    }
}

/// Trace clipping settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipSettings {
    /// Absolute microvolt clip; 0 disables clipping
    pub clip_uv: f64,
}

/// Marker placement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSettings {
    /// Snap beat markers onto the signal trace
    pub pin_beats: bool,
    /// Offset above the container top for unpinned beats
    pub beat_float_offset: f64,
    /// Offset below the container top for PQRST segment lines
    pub pqrst_band_offset: f64,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            pin_beats: true,
            beat_float_offset: BEAT_FLOAT_OFFSET,
            pqrst_band_offset: PQRST_BAND_OFFSET,
        }
    }
}

/// Eviction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionSettings {
    /// Columns kept on each side of the visible window
    pub margin_px: f64,
}

impl Default for RetentionSettings {
    fn default() -> Self {
        Self {
            margin_px: RETENTION_MARGIN_PX,
        }
    }
}

/// Change-event settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    /// Keep emitted change events in memory
    pub enable_history: bool,
    /// Maximum number of events kept
    pub history_size: usize,
    /// Capacity of the async broadcast channel
    pub channel_capacity: usize,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            enable_history: false,
            history_size: EVENT_HISTORY_SIZE,
            channel_capacity: 64,
        }
    }
}

/// Complete drawing proxy configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub layout: LayoutSettings,
    pub clip: ClipSettings,
    pub markers: MarkerSettings,
    pub retention: RetentionSettings,
    pub events: EventSettings,
}

impl ProxyConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location: `<config dir>/ecgdraw/proxy.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join("ecgdraw").join("proxy.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        config.validate()?;
        tracing::debug!("Loaded proxy config from {}", path.display());
        Ok(config)
    }

    /// Load config from `path`, falling back to defaults when the file is missing.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        positive("layout.px_per_mm", self.layout.px_per_mm)?;
        positive("layout.paper_speed_mm_s", self.layout.paper_speed_mm_s)?;
        positive("layout.gain_mm_mv", self.layout.gain_mm_mv)?;
        non_negative("clip.clip_uv", self.clip.clip_uv)?;
        non_negative("retention.margin_px", self.retention.margin_px)?;

        if self.events.channel_capacity == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "events.channel_capacity".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn positive(key: &str, value: f64) -> ConfigResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

fn non_negative(key: &str, value: f64) -> ConfigResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}
