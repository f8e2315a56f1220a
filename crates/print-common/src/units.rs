//! Map unit systems and their meters-per-unit factors.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::PrintError;

/// Sphere radius the degree and radian factors are derived from.
const NORMAL_SPHERE_RADIUS: f64 = 6370997.0;

/// Unit system of a map view's native projection.
///
/// Only units with a meters-per-unit factor are representable. Parsing any
/// other unit name (e.g. `pixels`) fails with [`PrintError::InvalidUnitKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Units {
    Radians,
    Degrees,
    Feet,
    Meters,
    UsFeet,
}

impl Units {
    /// Meters covered by one unit.
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            Units::Radians => NORMAL_SPHERE_RADIUS / (2.0 * PI),
            Units::Degrees => (2.0 * PI * NORMAL_SPHERE_RADIUS) / 360.0,
            Units::Feet => 0.3048,
            Units::Meters => 1.0,
            Units::UsFeet => 1200.0 / 3937.0,
        }
    }

    /// Short code as used by web map libraries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Radians => "radians",
            Units::Degrees => "degrees",
            Units::Feet => "ft",
            Units::Meters => "m",
            Units::UsFeet => "us-ft",
        }
    }
}

impl FromStr for Units {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "radians" | "rad" => Ok(Units::Radians),
            "degrees" | "deg" => Ok(Units::Degrees),
            "ft" | "feet" => Ok(Units::Feet),
            "m" | "meters" | "metres" => Ok(Units::Meters),
            "us-ft" => Ok(Units::UsFeet),
            _ => Err(PrintError::InvalidUnitKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for Units {
    type Error = PrintError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Units> for String {
    fn from(u: Units) -> Self {
        u.as_str().to_string()
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_per_unit_table() {
        assert_eq!(Units::Meters.meters_per_unit(), 1.0);
        assert_eq!(Units::Feet.meters_per_unit(), 0.3048);
        assert!((Units::Degrees.meters_per_unit() - 111194.87428468118).abs() < 1e-6);
        assert!((Units::Radians.meters_per_unit() - 1013975.6649736359).abs() < 1e-6);
        assert!((Units::UsFeet.meters_per_unit() - 0.3048006096).abs() < 1e-9);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("m".parse::<Units>().unwrap(), Units::Meters);
        assert_eq!("degrees".parse::<Units>().unwrap(), Units::Degrees);
        assert_eq!("us-ft".parse::<Units>().unwrap(), Units::UsFeet);
        assert!(matches!(
            "pixels".parse::<Units>(),
            Err(PrintError::InvalidUnitKind(kind)) if kind == "pixels"
        ));
    }

    #[test]
    fn test_serde_uses_short_codes() {
        let json = serde_json::to_string(&Units::UsFeet).unwrap();
        assert_eq!(json, "\"us-ft\"");

        let units: Units = serde_json::from_str("\"ft\"").unwrap();
        assert_eq!(units, Units::Feet);

        assert!(serde_json::from_str::<Units>("\"tile-pixels\"").is_err());
    }
}
