//! Drawing constants shared across ecgdraw crates.

/// Standard ECG paper speed in millimetres per second.
pub const PAPER_SPEED_MM_S: f64 = 25.0;

/// Standard ECG amplitude gain in millimetres per millivolt.
pub const GAIN_MM_MV: f64 = 10.0;

/// Pixels per millimetre on a 96 DPI surface.
pub const PX_PER_MM: f64 = 96.0 / 25.4;

/// Vertical distance (world pixels) between the container top and unpinned beat markers.
pub const BEAT_FLOAT_OFFSET: f64 = 12.0;

/// Vertical distance (world pixels) between the container top and PQRST segment lines.
pub const PQRST_BAND_OFFSET: f64 = 24.0;

/// Horizontal half-width of a peak marker container.
pub const PEAK_HALF_WIDTH: f64 = 3.0;

/// Extra columns kept on each side of the visible window by the default retention pass.
pub const RETENTION_MARGIN_PX: f64 = 5_000.0;

/// Default number of change events kept in the bus history.
pub const EVENT_HISTORY_SIZE: usize = 256;

/// Microvolts per millivolt.
pub const UV_PER_MV: f64 = 1_000.0;
