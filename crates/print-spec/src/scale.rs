//! Resolution to scale denominator conversion.

use print_common::Units;

/// Inches per meter.
const INCHES_PER_METER: f64 = 39.37;

/// Assumed screen resolution in dots per inch (0.28mm pixels, ~90.7 DPI).
pub const ASSUMED_DPI: f64 = 25.4 / 0.28;

/// Scale denominator for a view resolution.
///
/// `resolution` is in native units per pixel. The result is linear in
/// `resolution`; a zero resolution yields a zero scale, and callers are
/// expected to reject absent resolutions before getting here.
pub fn compute_scale(resolution: f64, units: Units) -> f64 {
    resolution * units.meters_per_unit() * INCHES_PER_METER * ASSUMED_DPI
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_UNITS: [Units; 5] = [
        Units::Radians,
        Units::Degrees,
        Units::Feet,
        Units::Meters,
        Units::UsFeet,
    ];

    #[test]
    fn test_scale_in_meters() {
        let scale = compute_scale(1.0, Units::Meters);
        assert!((scale - 3571.421428571428).abs() < 1e-9);
    }

    #[test]
    fn test_scale_in_degrees() {
        let scale = compute_scale(1.0, Units::Degrees);
        assert!((scale - 397123756.76761633).abs() < 1e-3);
    }

    #[test]
    fn test_web_mercator_zoom_zero() {
        // Level 0 of the standard Web Mercator grid is ~1:559M at 0.28mm pixels.
        let scale = compute_scale(156543.03392804097, Units::Meters);
        assert!((scale / 559082264.0287178 - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_scale_is_linear_in_resolution() {
        for units in ALL_UNITS {
            for r in [0.5, 1.0, 13.37, 2445.98] {
                assert_eq!(compute_scale(2.0 * r, units), 2.0 * compute_scale(r, units));
            }
        }
    }

    #[test]
    fn test_zero_resolution_gives_zero_scale() {
        for units in ALL_UNITS {
            assert_eq!(compute_scale(0.0, units), 0.0);
        }
    }
}
