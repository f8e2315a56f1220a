//! Coordinate Reference System codes and center reprojection.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::{PrintError, PrintResult};

/// Spherical Mercator earth radius (meters).
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Half the width of the Web Mercator square (meters).
pub const MERCATOR_MAX_EXTENT: f64 = 20037508.342789244;

/// Projection codes a map view may be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 Geographic (lon/lat in degrees)
    Epsg4326,
    /// Web Mercator (meters)
    Epsg3857,
    /// NAD83 Geographic
    Epsg4269,
}

impl CrsCode {
    /// Parse a projection code as reported by the map view.
    ///
    /// Accepts formats like:
    /// - "EPSG:4326"
    /// - "epsg:3857"
    /// - "CRS:84" (equivalent to EPSG:4326 with lon/lat axis order)
    /// - "EPSG:900913" (legacy alias of Web Mercator)
    pub fn from_code(s: &str) -> PrintResult<Self> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "EPSG:4326" | "CRS:84" => Ok(CrsCode::Epsg4326),
            "EPSG:3857" | "EPSG:900913" | "EPSG:102100" => Ok(CrsCode::Epsg3857),
            "EPSG:4269" => Ok(CrsCode::Epsg4269),
            _ => Err(PrintError::UnsupportedProjection(s.to_string())),
        }
    }

    /// Reproject a coordinate in this CRS to geographic `[lon, lat]` degrees.
    pub fn to_lon_lat(&self, coord: [f64; 2]) -> [f64; 2] {
        match self {
            CrsCode::Epsg4326 | CrsCode::Epsg4269 => coord,
            CrsCode::Epsg3857 => {
                let lon = (coord[0] / EARTH_RADIUS).to_degrees();
                let lat = (2.0 * (coord[1] / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
                [lon, lat]
            }
        }
    }
}

/// Reproject a center coordinate given the view's projection code.
pub fn center_to_lon_lat(projection: &str, center: [f64; 2]) -> PrintResult<[f64; 2]> {
    Ok(CrsCode::from_code(projection)?.to_lon_lat(center))
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            CrsCode::Epsg4326 => "EPSG:4326",
            CrsCode::Epsg3857 => "EPSG:3857",
            CrsCode::Epsg4269 => "EPSG:4269",
        };
        write!(f, "{}", code)
    }
}
