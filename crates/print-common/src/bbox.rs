//! Bounding box (extent) type.

use serde::{Deserialize, Serialize};

/// A geographic or projected bounding box.
///
/// Serialized as a `[min_x, min_y, max_x, max_y]` array, which is how both
/// the map model and the print service express extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(e: [f64; 4]) -> Self {
        Self::new(e[0], e[1], e[2], e[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.min_x, b.min_y, b.max_x, b.max_y]
    }
}
