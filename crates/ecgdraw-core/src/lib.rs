//! # ecgdraw Core
//!
//! Core types shared by every ecgdraw crate:
//! - Geometry primitives (points, rectangles, lines, polylines, labels, peaks)
//!   with the coordinate algebra the drawing proxy relies on
//! - The read-only ECG domain model (records, signals, leads, wave-points,
//!   annotations) produced by an external ingestion layer
//! - Error types describing why a build input was rejected

pub mod constants;
pub mod error;
pub mod geometry;
pub mod record;

pub use error::{PrepareError, PrepareResult};

pub use geometry::{
    Anchor, Label, Line, Peak, Point, Polyline, PrimitiveState, Rectangle, CODE_BOTTOM,
    CODE_LEFT, CODE_RIGHT, CODE_TOP, OUTSIDE,
};

pub use record::{
    Annotation, EcgRecord, GridMode, Lead, Signal, WavePoint, WavePointKind,
};
