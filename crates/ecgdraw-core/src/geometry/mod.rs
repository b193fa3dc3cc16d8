//! Geometry primitives for the drawing surface.
//!
//! All coordinates are world pixels: X counts sample columns from the start
//! of the first record, Y is either a surface pixel or a raw microvolt value
//! depending on the primitive's owner (signal traces keep microvolts and let
//! the back-end scale them at paint time).

use serde::{Deserialize, Serialize};

mod label;
mod line;
mod point;
mod polyline;
mod rectangle;

pub use label::{Label, Peak};
pub use line::Line;
pub use point::Point;
pub use polyline::Polyline;
pub use rectangle::{Rectangle, CODE_BOTTOM, CODE_LEFT, CODE_RIGHT, CODE_TOP, OUTSIDE};

/// Interaction state carried by every primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrimitiveState {
    #[default]
    Default,
    Activated,
    Selected,
    Hidden,
}

/// Viewport pinning flags.
///
/// A floating axis is recomputed from the pointer on every move instead of
/// following world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Anchor {
    pub floating_x: bool,
    pub floating_y: bool,
}

impl Anchor {
    /// Anchored to world coordinates on both axes.
    pub const WORLD: Anchor = Anchor {
        floating_x: false,
        floating_y: false,
    };

    /// Pinned to the viewport on both axes.
    pub const FLOATING: Anchor = Anchor {
        floating_x: true,
        floating_y: true,
    };

    /// Returns true when either axis floats.
    pub fn is_floating(&self) -> bool {
        self.floating_x || self.floating_y
    }
}
