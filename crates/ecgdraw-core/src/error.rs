//! Error handling for ecgdraw
//!
//! Build inputs that cannot produce drawing objects are described by
//! [`PrepareError`]. The drawing proxy never lets these cross its public
//! boundary: every variant is logged and absorbed as a no-op.

use thiserror::Error;

/// Reasons a domain record was rejected by a builder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrepareError {
    /// Record carries no signal.
    #[error("Record {record} has no signal")]
    MissingSignal {
        /// The record identifier.
        record: String,
    },

    /// Signal exists but holds no samples.
    #[error("Record {record} has an empty signal")]
    EmptySignal {
        /// The record identifier.
        record: String,
    },

    /// Signal declares a non-positive sample rate.
    #[error("Record {record} has invalid sample rate {rate}")]
    InvalidSampleRate {
        /// The record identifier.
        record: String,
        /// The declared sample rate.
        rate: f64,
    },

    /// Record carries no beat list.
    #[error("Record {record} has no beats")]
    MissingBeats {
        /// The record identifier.
        record: String,
    },

    /// Record carries no wave-points.
    #[error("Record {record} has no wave-points")]
    MissingWavePoints {
        /// The record identifier.
        record: String,
    },

    /// Record carries no annotations.
    #[error("Record {record} has no annotations")]
    MissingAnnotations {
        /// The record identifier.
        record: String,
    },

    /// An operation ran before the proxy was initialised.
    #[error("Drawing proxy is not initialised")]
    NotInitialized,

    /// Pointer event fell outside the proxy screen rectangle.
    #[error("Pointer ({x}, {y}) is outside the drawing surface")]
    PointerOutside {
        /// Screen X.
        x: f64,
        /// Screen Y.
        y: f64,
    },
}

/// Result type alias for builder operations.
pub type PrepareResult<T> = Result<T, PrepareError>;
