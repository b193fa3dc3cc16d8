//! Eviction policies for the drawing object collection.

use crate::object::DrawingObject;
use crate::state::ProxyState;

/// Decides which drawing objects survive a collection pass.
pub trait RetentionPolicy {
    /// Returns true to keep `object`.
    fn retain(&self, object: &DrawingObject, state: &ProxyState) -> bool;
}

/// Keeps objects within `margin_px` world columns of the visible window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowRetention {
    pub margin_px: f64,
}

impl WindowRetention {
    pub fn new(margin_px: f64) -> Self {
        Self {
            margin_px: margin_px.max(0.0),
        }
    }
}

impl RetentionPolicy for WindowRetention {
    fn retain(&self, object: &DrawingObject, state: &ProxyState) -> bool {
        object.is_visible_in(state.min_px() - self.margin_px, state.max_px() + self.margin_px)
    }
}

impl<F> RetentionPolicy for F
where
    F: Fn(&DrawingObject, &ProxyState) -> bool,
{
    fn retain(&self, object: &DrawingObject, state: &ProxyState) -> bool {
        self(object, state)
    }
}
