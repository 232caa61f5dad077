// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core planar types for floor plan drafting
//!
//! Drafting happens on the ground plane, so points carry world `x` and `z`;
//! the vertical `y` is implied by whatever level or preview height is active.

use crate::error::{Error, Result};
use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Segments shorter than this (in metres) are treated as zero length
pub const DEGENERATE_LENGTH: f64 = 1e-6;

/// A point on the ground plane (simplified for serialization)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub z: f64,
}

impl Point2D {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.z)
    }

    pub fn from_nalgebra(p: &Point2<f64>) -> Self {
        Self { x: p.x, z: p.y }
    }

    /// Lift onto the 3D world at height `y`
    pub fn at_height(&self, y: f64) -> Point3<f64> {
        Point3::new(self.x, y, self.z)
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Whether two picks land on the same spot
    pub fn coincides_with(&self, other: &Point2D) -> bool {
        self.distance_to(other) < DEGENERATE_LENGTH
    }
}

/// A 3D vector record used for poses and extents in emitted objects
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_nalgebra(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(v: &Vector3<f64>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }

    /// Multiply every component by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

/// Stable identifier of a committed segment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(pub u64);

/// A straight, non-degenerate segment on the ground plane
///
/// Immutable once built. Construction rejects zero-length input, so every
/// `Segment` in circulation has `length() > 0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub id: SegmentId,
    pub start: Point2D,
    pub end: Point2D,
}

impl Segment {
    pub fn new(id: SegmentId, start: Point2D, end: Point2D) -> Result<Self> {
        let length = start.distance_to(&end);
        if length < DEGENERATE_LENGTH {
            return Err(Error::DegenerateSegment(length));
        }
        Ok(Self { id, start, end })
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Direction angle in degrees, `atan2(dz, dx)`, in (-180, 180]
    pub fn bearing_deg(&self) -> f64 {
        bearing_deg(&self.start, &self.end)
    }

    /// Direction angle in radians
    pub fn bearing_rad(&self) -> f64 {
        (self.end.z - self.start.z).atan2(self.end.x - self.start.x)
    }

    pub fn midpoint(&self) -> Point2D {
        Point2D::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.z + self.end.z) / 2.0,
        )
    }

    /// The same segment traversed end to start
    pub fn reversed(&self) -> Self {
        Self {
            id: self.id,
            start: self.end,
            end: self.start,
        }
    }
}

/// Bearing from `start` towards `end` in degrees
pub fn bearing_deg(start: &Point2D, end: &Point2D) -> f64 {
    (end.z - start.z).atan2(end.x - start.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_length_and_midpoint() {
        let seg = Segment::new(SegmentId(1), Point2D::new(0.0, 0.0), Point2D::new(3.0, 4.0)).unwrap();

        assert_relative_eq!(seg.length(), 5.0);
        assert_eq!(seg.midpoint(), Point2D::new(1.5, 2.0));
    }

    #[test]
    fn test_zero_length_segment_rejected() {
        let p = Point2D::new(2.0, 2.0);
        let result = Segment::new(SegmentId(0), p, p);
        assert!(matches!(result, Err(Error::DegenerateSegment(_))));
    }

    #[test]
    fn test_bearing_quadrants() {
        let origin = Point2D::new(0.0, 0.0);
        assert_relative_eq!(bearing_deg(&origin, &Point2D::new(1.0, 0.0)), 0.0);
        assert_relative_eq!(bearing_deg(&origin, &Point2D::new(0.0, 1.0)), 90.0);
        assert_relative_eq!(bearing_deg(&origin, &Point2D::new(-1.0, 0.0)), 180.0);
        assert_relative_eq!(bearing_deg(&origin, &Point2D::new(0.0, -1.0)), -90.0);
        assert_relative_eq!(bearing_deg(&origin, &Point2D::new(1.0, 1.0)), 45.0);
    }

    #[test]
    fn test_reversed_keeps_id() {
        let seg = Segment::new(SegmentId(7), Point2D::new(0.0, 0.0), Point2D::new(5.0, 0.0)).unwrap();
        let rev = seg.reversed();

        assert_eq!(rev.id, seg.id);
        assert_eq!(rev.start, seg.end);
        assert_relative_eq!(rev.bearing_deg(), 180.0);
    }
}
