//! # ecgdraw
//!
//! Incremental drawing proxy for multi-lead ECG recordings. Records are
//! turned into positioned drawing objects once; every scroll, pointer move,
//! click or drag then emits a change set holding only what the visible
//! window needs, for canvas, SVG or mixed render back-ends to paint.
//!
//! ## Architecture
//!
//! The workspace is split into:
//!
//! 1. **ecgdraw-core** - Geometry primitives, ECG records, error types
//! 2. **ecgdraw-settings** - Proxy configuration (TOML / JSON)
//! 3. **ecgdraw-proxy** - Drawing objects, viewport state, change bus and
//!    the `DrawingProxy` orchestrator
//! 4. **ecgdraw** - This crate, re-exporting the above plus logging setup

pub use ecgdraw_core as model;
pub use ecgdraw_proxy as proxy;
pub use ecgdraw_settings as settings;

pub use ecgdraw_core::{
    Annotation, EcgRecord, GridMode, Lead, Point, PrepareError, PrimitiveState, Rectangle, Signal,
    WavePoint, WavePointKind,
};
pub use ecgdraw_proxy::{
    ChangeCause, ChangeEvent, DragEvent, DrawingClient, DrawingGeometry, DrawingObject,
    DrawingObjectType, DrawingProxy, EventFilter, PointerEvent, ProxyState, RenderMode,
    RetentionPolicy, WindowRetention,
};
pub use ecgdraw_settings::{ConfigError, ProxyConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with(LogFormat::Pretty)
}

/// Initialize logging in the given format.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(true)
                .with_level(true)
                .with_thread_names(true)
                .with_line_number(true)
                .pretty();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(true)
                .json();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}
