//! WMTS tile grid definitions.
//!
//! A tile grid describes how a tiled source is sliced: one resolution per
//! tile matrix, an optional extent, and the matrix identifiers the source
//! uses in its tile requests.

use crate::BoundingBox;
use serde::{Deserialize, Serialize};

fn default_tile_size() -> u32 {
    256
}

/// Tile grid of a WMTS source, as exposed by the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileGrid {
    /// Resolutions (units per pixel), one per tile matrix, coarsest first
    pub resolutions: Vec<f64>,

    /// Extent covered by the grid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<BoundingBox>,

    /// Matrix identifiers used by the source (parallel to `resolutions`)
    #[serde(default)]
    pub matrix_ids: Vec<String>,

    /// Tile width/height in pixels
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
}

impl TileGrid {
    pub fn new(resolutions: Vec<f64>) -> Self {
        let matrix_ids = (0..resolutions.len()).map(|z| z.to_string()).collect();
        Self {
            resolutions,
            extent: None,
            matrix_ids,
            tile_size: default_tile_size(),
        }
    }

    pub fn with_extent(mut self, extent: BoundingBox) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn with_matrix_ids(mut self, matrix_ids: Vec<String>) -> Self {
        self.matrix_ids = matrix_ids;
        self
    }

    /// Zero-based matrix indices parallel to `resolutions`.
    pub fn matrix_indices(&self) -> Vec<usize> {
        (0..self.resolutions.len()).collect()
    }

    /// Whether the source identifiers are exactly `"0"`..`"N-1"`.
    ///
    /// A grid without identifiers counts as contiguous.
    pub fn has_contiguous_matrix_ids(&self) -> bool {
        if self.matrix_ids.is_empty() {
            return true;
        }
        self.matrix_ids.len() == self.resolutions.len()
            && self
                .matrix_ids
                .iter()
                .enumerate()
                .all(|(i, id)| id.trim() == i.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matrix_ids_are_contiguous() {
        let grid = TileGrid::new(vec![400.0, 200.0, 100.0]);
        assert_eq!(grid.matrix_ids, vec!["0", "1", "2"]);
        assert_eq!(grid.matrix_indices(), vec![0, 1, 2]);
        assert!(grid.has_contiguous_matrix_ids());
    }

    #[test]
    fn test_prefixed_matrix_ids_are_not_contiguous() {
        let grid = TileGrid::new(vec![100.0, 50.0]).with_matrix_ids(vec![
            "EPSG:3857:0".to_string(),
            "EPSG:3857:1".to_string(),
        ]);
        assert!(!grid.has_contiguous_matrix_ids());
        assert_eq!(grid.matrix_indices(), vec![0, 1]);
    }

    #[test]
    fn test_offset_matrix_ids_are_not_contiguous() {
        let grid = TileGrid::new(vec![100.0, 50.0])
            .with_matrix_ids(vec!["1".to_string(), "2".to_string()]);
        assert!(!grid.has_contiguous_matrix_ids());
    }

    #[test]
    fn test_missing_matrix_ids_count_as_contiguous() {
        let grid = TileGrid::new(vec![100.0]).with_matrix_ids(Vec::new());
        assert!(grid.has_contiguous_matrix_ids());
    }
}
