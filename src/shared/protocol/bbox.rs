use geo::Rect;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds in lon/lat, serialized as `[min_x, min_y, max_x, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Grow this box to cover `rect`.
    pub fn expand(&mut self, rect: &Rect<f64>) {
        let min = rect.min();
        let max = rect.max();
        self.min_x = self.min_x.min(min.x);
        self.min_y = self.min_y.min(min.y);
        self.max_x = self.max_x.max(max.x);
        self.max_y = self.max_y.max(max.y);
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        let min = rect.min();
        let max = rect.max();
        Self::new(min.x, min.y, max.x, max.y)
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(bounds: [f64; 4]) -> Self {
        Self::new(bounds[0], bounds[1], bounds[2], bounds[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        bbox.to_array()
    }
}
