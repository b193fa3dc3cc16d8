//! ecgdraw Settings Crate
//!
//! Handles drawing proxy configuration: layout scale, clipping, marker
//! placement, retention and change-event history. Files may be TOML or JSON.

pub mod config;
pub mod error;

pub use config::{
    ClipSettings, EventSettings, LayoutSettings, MarkerSettings, ProxyConfig, RetentionSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
