//! Drawing object type definitions: DrawingObjectType, DrawingGeometry, Trace.

use ecgdraw_core::{Label, Line, Peak, Point, Polyline, Rectangle};
use serde::{Deserialize, Serialize};

/// Discriminates the geometry carried by a drawing object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawingObjectType {
    Signal,
    Beats,
    Annotations,
    Pqrst,
    Measure,
    Object,
    Grid,
}

/// One lead's trace inside a signal object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub cell_index: usize,
    pub polyline: Polyline,
}

/// Type-specific geometry; each variant carries only what its type draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawingGeometry {
    /// Per-cell traces; Y stays in raw microvolts.
    Signal { traces: Vec<Trace> },
    /// Beat markers.
    Beats { points: Vec<Point> },
    /// Annotated span with its caption.
    Annotations {
        rectangles: Vec<Rectangle>,
        labels: Vec<Label>,
        cluster: Option<usize>,
    },
    /// Interval between two wave-points with per-cell peak markers.
    Pqrst {
        lines: Vec<Line>,
        labels: Vec<Label>,
        peaks: Vec<Peak>,
    },
    /// Caliper between two columns.
    Measure { lines: Vec<Line>, labels: Vec<Label> },
    /// Floating crosshair pinned to the pointer.
    Object { lines: Vec<Line>, peaks: Vec<Peak> },
    /// Cell frame, baseline and lead caption.
    Grid {
        rectangles: Vec<Rectangle>,
        lines: Vec<Line>,
        labels: Vec<Label>,
    },
}

impl DrawingGeometry {
    pub fn object_type(&self) -> DrawingObjectType {
        match self {
            DrawingGeometry::Signal { .. } => DrawingObjectType::Signal,
            DrawingGeometry::Beats { .. } => DrawingObjectType::Beats,
            DrawingGeometry::Annotations { .. } => DrawingObjectType::Annotations,
            DrawingGeometry::Pqrst { .. } => DrawingObjectType::Pqrst,
            DrawingGeometry::Measure { .. } => DrawingObjectType::Measure,
            DrawingGeometry::Object { .. } => DrawingObjectType::Object,
            DrawingGeometry::Grid { .. } => DrawingObjectType::Grid,
        }
    }

    /// True when nothing would be painted.
    pub fn is_empty(&self) -> bool {
        match self {
            DrawingGeometry::Signal { traces } => traces.iter().all(|t| t.polyline.is_empty()),
            DrawingGeometry::Beats { points } => points.is_empty(),
            DrawingGeometry::Annotations {
                rectangles, labels, ..
            } => rectangles.is_empty() && labels.is_empty(),
            DrawingGeometry::Pqrst {
                lines,
                labels,
                peaks,
            } => lines.is_empty() && labels.is_empty() && peaks.is_empty(),
            DrawingGeometry::Measure { lines, labels } => lines.is_empty() && labels.is_empty(),
            DrawingGeometry::Object { lines, peaks } => lines.is_empty() && peaks.is_empty(),
            DrawingGeometry::Grid {
                rectangles,
                lines,
                labels,
            } => rectangles.is_empty() && lines.is_empty() && labels.is_empty(),
        }
    }
}
