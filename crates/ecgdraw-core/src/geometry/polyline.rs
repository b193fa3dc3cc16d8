use serde::{Deserialize, Serialize};

use super::{Anchor, Point, PrimitiveState};

/// Ordered chain of points, rebuildable in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point>,
    #[serde(default)]
    pub state: PrimitiveState,
    #[serde(default)]
    pub anchor: Anchor,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            state: PrimitiveState::Default,
            anchor: Anchor::WORLD,
        }
    }

    /// Number of points in the chain.
    pub fn sections(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Replaces the points, reusing the existing allocation.
    pub fn rebuild<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = Point>,
    {
        self.points.clear();
        self.points.extend(points);
    }

    /// Y of the point whose X equals `left`, assuming one point per column
    /// starting at the first point's X.
    pub fn top_at(&self, left: f64) -> Option<f64> {
        let first = self.points.first()?;
        let offset = left - first.left;
        if offset < 0.0 {
            return None;
        }
        self.points.get(offset.round() as usize).map(|p| p.top)
    }
}
