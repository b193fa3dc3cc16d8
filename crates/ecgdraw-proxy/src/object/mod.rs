//! Positioned drawing primitives built from the domain model.

mod types;

pub use types::{DrawingGeometry, DrawingObjectType, Trace};

use ecgdraw_core::{PrimitiveState, Rectangle};
use serde::{Deserialize, Serialize};

use crate::client::ClientId;

/// A positioned drawing primitive.
///
/// `container` is always present and is the only thing culling looks at.
/// The object's interaction state is the container's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingObject {
    /// Source position in the record list the object was built from.
    pub index: Option<usize>,
    pub owner: ClientId,
    pub container: Rectangle,
    /// Grid cell the object belongs to; `None` spans all cells.
    pub cell_index: Option<usize>,
    pub geometry: DrawingGeometry,
}

impl DrawingObject {
    pub fn new(
        index: Option<usize>,
        owner: ClientId,
        container: Rectangle,
        cell_index: Option<usize>,
        geometry: DrawingGeometry,
    ) -> Self {
        Self {
            index,
            owner,
            container,
            cell_index,
            geometry,
        }
    }

    pub fn object_type(&self) -> DrawingObjectType {
        self.geometry.object_type()
    }

    pub fn state(&self) -> PrimitiveState {
        self.container.state
    }

    pub fn set_state(&mut self, state: PrimitiveState) {
        self.container.state = state;
    }

    /// True when the object's container touches the column window `[min_px, max_px]`.
    pub fn is_visible_in(&self, min_px: f64, max_px: f64) -> bool {
        self.container.overlaps_columns(min_px, max_px)
    }

    /// True for objects a click can select.
    pub fn is_selectable(&self) -> bool {
        matches!(
            self.object_type(),
            DrawingObjectType::Annotations | DrawingObjectType::Pqrst | DrawingObjectType::Measure
        ) && self.state() != PrimitiveState::Hidden
    }

    /// Trace Y (raw microvolts) at world column `left` for grid cell `cell`.
    pub fn trace_top_at(&self, cell: usize, left: f64) -> Option<f64> {
        match &self.geometry {
            DrawingGeometry::Signal { traces } => traces
                .iter()
                .find(|t| t.cell_index == cell)
                .and_then(|t| t.polyline.top_at(left)),
            _ => None,
        }
    }

    /// Trace Y at world column `left` on the first trace of a signal object.
    pub fn first_trace_top_at(&self, left: f64) -> Option<f64> {
        match &self.geometry {
            DrawingGeometry::Signal { traces } => {
                traces.first().and_then(|t| t.polyline.top_at(left))
            }
            _ => None,
        }
    }
}
