use serde::{Deserialize, Serialize};

use super::{Anchor, Point, PrimitiveState};

/// Segment between two ordered endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub a: Point,
    pub b: Point,
    #[serde(default)]
    pub state: PrimitiveState,
    #[serde(default)]
    pub anchor: Anchor,
}

impl Line {
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            a,
            b,
            state: PrimitiveState::Default,
            anchor: Anchor::WORLD,
        }
    }

    /// Creates a line whose endpoints and flags are all viewport-pinned.
    pub fn floating(a: Point, b: Point) -> Self {
        Self {
            a: Point {
                anchor: Anchor::FLOATING,
                ..a
            },
            b: Point {
                anchor: Anchor::FLOATING,
                ..b
            },
            state: PrimitiveState::Default,
            anchor: Anchor::FLOATING,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.a.left + self.b.left) / 2.0,
            (self.a.top + self.b.top) / 2.0,
        )
    }

    pub fn length(&self) -> f64 {
        (self.b - self.a).length()
    }

    /// Moves both endpoints in place.
    pub fn set(&mut self, a: (f64, f64), b: (f64, f64)) {
        self.a.move_to(a.0, a.1);
        self.b.move_to(b.0, b.1);
    }
}
