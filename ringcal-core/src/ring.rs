//! Ring generation from a base circle and a multiplier list.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{Circle, Point};

/// One concentric measurement ring derived from the base circle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ring {
    /// Shared center of all rings of a calibration.
    pub center: Point,
    /// `round(base.radius * multiplier)`; negative for negative multipliers.
    pub radius: i64,
    /// Multiplier that produced this ring.
    pub multiplier: f64,
    /// Source image file name (provenance).
    pub file_name: String,
}

impl Ring {
    /// The ring as a drawable circle, or `None` when the radius is negative.
    #[must_use]
    pub fn circle(&self) -> Option<Circle> {
        u32::try_from(self.radius)
            .ok()
            .map(|radius| Circle::new(self.center, radius))
    }

    /// Whether the ring has a strictly positive radius.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.radius > 0
    }
}

/// Scales a radius by a multiplier, rounding half away from zero.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn scaled_radius(radius: u32, multiplier: f64) -> i64 {
    // `as` saturates on overflow and maps NaN to 0.
    (f64::from(radius) * multiplier).round() as i64
}

/// Generates one ring per multiplier, in input order.
///
/// Total: zero, negative and duplicate multipliers are all accepted and each
/// produce exactly one ring.
#[must_use]
pub fn generate_rings(base: &Circle, multipliers: &[f64], file_name: &str) -> Vec<Ring> {
    multipliers
        .iter()
        .map(|&multiplier| Ring {
            center: base.center,
            radius: scaled_radius(base.radius, multiplier),
            multiplier,
            file_name: file_name.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Circle {
        Circle::new(Point::new(20, 10), 10)
    }

    #[test]
    fn test_generate_preserves_order_and_count() {
        let rings = generate_rings(&base(), &[2.0, 1.0, 1.5], "disc.png");
        let radii: Vec<i64> = rings.iter().map(|r| r.radius).collect();
        assert_eq!(radii, vec![20, 10, 15]);
        assert!(rings.iter().all(|r| r.center == Point::new(20, 10)));
        assert!(rings.iter().all(|r| r.file_name == "disc.png"));
    }

    #[test]
    fn test_generate_empty_multipliers() {
        assert!(generate_rings(&base(), &[], "disc.png").is_empty());
    }

    #[test]
    fn test_generate_keeps_duplicates() {
        let rings = generate_rings(&base(), &[1.5, 1.5], "disc.png");
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0], rings[1]);
    }

    #[test]
    fn test_generate_degenerate_multipliers() {
        let rings = generate_rings(&base(), &[0.0, -1.0, 0.04], "disc.png");
        assert_eq!(rings[0].radius, 0);
        assert_eq!(rings[1].radius, -10);
        assert_eq!(rings[2].radius, 0);
        assert_eq!(rings[0].circle(), Some(Circle::new(Point::new(20, 10), 0)));
        assert_eq!(rings[1].circle(), None);
        assert!(!rings[0].is_drawable());
        assert!(!rings[1].is_drawable());
    }

    #[test]
    fn test_scaled_radius_rounds() {
        assert_eq!(scaled_radius(7, 1.5), 11); // 10.5 -> 11
        assert_eq!(scaled_radius(7, -1.5), -11);
        assert_eq!(scaled_radius(3, 1.1), 3); // 3.3 -> 3
        assert_eq!(scaled_radius(0, 2.5), 0);
    }
}
