use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use super::{Anchor, PrimitiveState};

/// A pixel position, or a displacement when produced by subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub left: f64,
    pub top: f64,
    #[serde(default)]
    pub state: PrimitiveState,
    #[serde(default)]
    pub anchor: Anchor,
}

impl Point {
    pub fn new(left: f64, top: f64) -> Self {
        Self {
            left,
            top,
            state: PrimitiveState::Default,
            anchor: Anchor::WORLD,
        }
    }

    /// Creates a point pinned to the viewport on both axes.
    pub fn floating(left: f64, top: f64) -> Self {
        Self {
            anchor: Anchor::FLOATING,
            ..Self::new(left, top)
        }
    }

    /// Euclidean length of the point taken as a vector from the origin.
    pub fn length(&self) -> f64 {
        self.left.hypot(self.top)
    }

    /// True when the horizontal component dominates (ties count as horizontal).
    pub fn is_horizontal(&self) -> bool {
        self.left.abs() >= self.top.abs()
    }

    /// Moves the point in place.
    pub fn move_to(&mut self, left: f64, top: f64) {
        self.left = left;
        self.top = top;
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Component-wise difference; state and anchor are taken from the left operand.
impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point {
            left: self.left - rhs.left,
            top: self.top - rhs.top,
            ..self
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point {
            left: self.left + rhs.left,
            top: self.top + rhs.top,
            ..self
        }
    }
}
