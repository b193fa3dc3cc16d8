use serde::{Deserialize, Serialize};

use super::{Anchor, Point, PrimitiveState};

/// `check_point` result for a point outside the rectangle.
pub const OUTSIDE: i32 = -1;
/// `check_point` result (non-detailed, horizontal): left of the midpoint.
pub const CODE_LEFT: i32 = 5;
/// `check_point` result (non-detailed, horizontal): at or right of the midpoint.
pub const CODE_RIGHT: i32 = 6;
/// `check_point` result (non-detailed, vertical): above the midpoint.
pub const CODE_TOP: i32 = 7;
/// `check_point` result (non-detailed, vertical): at or below the midpoint.
pub const CODE_BOTTOM: i32 = 8;

/// Axis-aligned rectangle in world pixels.
///
/// Width and height may be negative. Floating containers mirrored around the
/// pointer rely on this, so the overflow checks intentionally compare against
/// the raw `[left, left + width]` interval instead of a normalised one: a
/// rectangle with negative width contains no point at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub state: PrimitiveState,
    #[serde(default)]
    pub anchor: Anchor,
}

impl Rectangle {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            state: PrimitiveState::Default,
            anchor: Anchor::WORLD,
        }
    }

    /// Creates a rectangle pinned to the viewport on both axes.
    pub fn floating(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            anchor: Anchor::FLOATING,
            ..Self::new(left, top, width, height)
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn min_ox(&self) -> f64 {
        self.left.min(self.right())
    }

    pub fn max_ox(&self) -> f64 {
        self.left.max(self.right())
    }

    pub fn mid_ox(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn min_oy(&self) -> f64 {
        self.top.min(self.bottom())
    }

    pub fn max_oy(&self) -> f64 {
        self.top.max(self.bottom())
    }

    pub fn mid_oy(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// True when `x` lies outside the raw `[left, left + width]` interval.
    pub fn check_horizontal_overflow(&self, x: f64) -> bool {
        x < self.left || x > self.left + self.width
    }

    /// True when `y` lies outside the raw `[top, top + height]` interval.
    pub fn check_vertical_overflow(&self, y: f64) -> bool {
        y < self.top || y > self.top + self.height
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        !self.check_horizontal_overflow(x) && !self.check_vertical_overflow(y)
    }

    /// Classifies a contained point against the rectangle's midpoint.
    ///
    /// With `detailed` the result is a quadrant: 1 upper-right, 2 upper-left,
    /// 3 lower-right, 4 lower-left. Otherwise a single axis is tested:
    /// horizontal when `ox` ([`CODE_LEFT`] / [`CODE_RIGHT`]), vertical when not
    /// ([`CODE_TOP`] / [`CODE_BOTTOM`]). Points on the midpoint fall to the
    /// right / bottom side. Returns [`OUTSIDE`] when the point is not contained.
    pub fn check_point(&self, x: f64, y: f64, detailed: bool, ox: bool) -> i32 {
        if !self.contains_point(x, y) {
            return OUTSIDE;
        }

        let left_half = x < self.mid_ox();
        let lower_half = y >= self.mid_oy();

        if detailed {
            1 + i32::from(left_half) + 2 * i32::from(lower_half)
        } else if ox {
            if left_half {
                CODE_LEFT
            } else {
                CODE_RIGHT
            }
        } else if lower_half {
            CODE_BOTTOM
        } else {
            CODE_TOP
        }
    }

    /// True when this rectangle, shifted horizontally by `limit`, stays within
    /// `outer`'s horizontal extent. The upper bound is `outer.right() - 1`.
    pub fn inside_limit(&self, outer: &Rectangle, limit: f64) -> bool {
        let shifted_left = self.left + limit;
        let shifted_right = self.right() + limit;
        shifted_left >= outer.left && shifted_right <= outer.right() - 1.0
    }

    /// Clamps a proposed movement so the rectangle stays inside `outer`.
    ///
    /// Only the horizontal component is clamped; `action.top` is returned
    /// untouched.
    pub fn limit_action_point(&self, outer: &Rectangle, action: Point) -> Point {
        if self.inside_limit(outer, action.left) {
            return action;
        }

        let mut clamped = action;
        if self.left + action.left < outer.left {
            clamped.left = outer.left - self.left;
        } else if self.right() + action.left > outer.right() - 1.0 {
            clamped.left = outer.right() - 1.0 - self.right();
        }
        clamped
    }

    /// Maps a time offset onto the rectangle width for a span of `length`.
    pub fn time_to_pixel(&self, time: f64, length: f64) -> f64 {
        time * self.width / length
    }

    /// Inverse of [`Rectangle::time_to_pixel`].
    pub fn pixel_to_time(&self, pos_x: f64, length: f64) -> f64 {
        pos_x * length / self.width
    }

    /// True when the horizontal extent touches the closed column window `[min_px, max_px]`.
    pub fn overlaps_columns(&self, min_px: f64, max_px: f64) -> bool {
        self.max_ox() >= min_px && self.min_ox() <= max_px
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}
