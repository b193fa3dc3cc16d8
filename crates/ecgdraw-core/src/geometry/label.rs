use serde::{Deserialize, Serialize};

use super::{Anchor, Line, Point, PrimitiveState, Rectangle};

/// Text placed at a position inside a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub position: Point,
    pub container: Rectangle,
    pub text: String,
    #[serde(default)]
    pub state: PrimitiveState,
    #[serde(default)]
    pub anchor: Anchor,
}

impl Label {
    pub fn new(position: Point, container: Rectangle, text: impl Into<String>) -> Self {
        Self {
            position,
            container,
            text: text.into(),
            state: PrimitiveState::Default,
            anchor: Anchor::WORLD,
        }
    }
}

/// Marker on one grid cell: a tick line, its caption and its hit box.
///
/// On the floating crosshair the caption Y holds the trace microvolts while
/// `line` and `container` stay in surface pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub container: Rectangle,
    pub label: Label,
    pub line: Line,
    pub cell_index: usize,
    #[serde(default)]
    pub state: PrimitiveState,
    #[serde(default)]
    pub anchor: Anchor,
}

impl Peak {
    pub fn new(container: Rectangle, label: Label, line: Line, cell_index: usize) -> Self {
        Self {
            container,
            label,
            line,
            cell_index,
            state: PrimitiveState::Default,
            anchor: Anchor::WORLD,
        }
    }

    /// Marks the peak and all of its parts as viewport-pinned.
    pub fn into_floating(mut self) -> Self {
        self.anchor = Anchor::FLOATING;
        self.container.anchor = Anchor::FLOATING;
        self.label.anchor = Anchor::FLOATING;
        self.label.position.anchor = Anchor::FLOATING;
        self.label.container.anchor = Anchor::FLOATING;
        self.line = Line::floating(self.line.a, self.line.b);
        self
    }
}
