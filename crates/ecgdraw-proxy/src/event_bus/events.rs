//! Change event definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::ClientId;
use crate::object::DrawingObject;
use crate::state::ProxyState;

/// Interaction that produced a change set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeCause {
    Scroll,
    MouseMove,
    Click,
    DoubleClick,
    Drag,
}

impl fmt::Display for ChangeCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeCause::Scroll => "scroll",
            ChangeCause::MouseMove => "mousemove",
            ChangeCause::Click => "click",
            ChangeCause::DoubleClick => "dblclick",
            ChangeCause::Drag => "drag",
        };
        f.write_str(name)
    }
}

/// Pointer position in host screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Drag step: current pointer position and movement since the previous step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragEvent {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl DragEvent {
    pub fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self { x, y, dx, dy }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.dx.is_finite() && self.dy.is_finite()
    }

    pub fn pointer(&self) -> PointerEvent {
        PointerEvent::new(self.x, self.y)
    }
}

/// Bounded change set emitted after an interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub sender: ChangeCause,
    /// State snapshot at emission time.
    pub state: ProxyState,
    /// World objects overlapping the visible window.
    pub objects: Vec<DrawingObject>,
    /// Floating overlay, already repositioned.
    pub overlay: Vec<DrawingObject>,
    /// Reserved for per-client diffing; always empty.
    pub clients: Vec<ClientId>,
    pub pointer: Option<PointerEvent>,
}

impl ChangeEvent {
    /// Number of objects a back-end has to paint.
    pub fn len(&self) -> usize {
        self.objects.len() + self.overlay.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.overlay.is_empty()
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} objects, {} floating",
            self.sender,
            self.objects.len(),
            self.overlay.len()
        )
    }
}
