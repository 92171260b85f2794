//! Geometry primitives: pixel points and circles.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Pixel coordinate on the rendered image, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// X coordinate (column).
    pub x: i32,
    /// Y coordinate (row).
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    #[inline]
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }

    /// Integer midpoint, floor division per axis.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn midpoint(&self, other: &Self) -> Self {
        // Sum in i64 so extreme coordinates cannot overflow; the floored
        // half of two i32 values always fits back into i32.
        let x = (i64::from(self.x) + i64::from(other.x)).div_euclid(2);
        let y = (i64::from(self.y) + i64::from(other.y)).div_euclid(2);
        Self::new(x as i32, y as i32)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = Error;

    /// Parses `"x,y"` (whitespace around either number is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPoint(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse().map_err(|_| invalid())?;
        let y = y.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(x, y))
    }
}

/// Circle with an integer center and a non-negative integer radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Circle {
    /// Circle center.
    pub center: Point,
    /// Radius in pixels.
    pub radius: u32,
}

impl Circle {
    /// Creates a new circle.
    #[inline]
    #[must_use]
    pub fn new(center: Point, radius: u32) -> Self {
        Self { center, radius }
    }

    /// Derives the circle whose diameter spans `p1`..`p2`.
    ///
    /// `radius = round(|p1 - p2| / 2)`, `center` is the floored midpoint.
    /// Identical points give a zero radius.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_diameter(p1: Point, p2: Point) -> Self {
        // The distance between two i32 points is below 2^33, so half of it
        // rounds into u32 without saturation.
        let radius = (p1.distance(&p2) / 2.0).round() as u32;
        Self::new(p1.midpoint(&p2), radius)
    }
}
