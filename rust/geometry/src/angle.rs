// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bearing classification against the eight canonical drafting directions

use crate::types::Segment;

/// Default angular tolerance in degrees
pub const DEFAULT_ANGLE_TOLERANCE_DEG: f64 = 0.3;

/// Canonical bearings in degrees.
///
/// Both +180 and -180 are listed because bearings come straight out of
/// `atan2` without wrap-around normalization.
pub const CANONICAL_BEARINGS: [f64; 9] = [0.0, 45.0, 90.0, 135.0, 180.0, -45.0, -90.0, -135.0, -180.0];

/// Returns the canonical bearing within `tolerance_deg` of `bearing_deg`, if any
pub fn snap_bearing(bearing_deg: f64, tolerance_deg: f64) -> Option<f64> {
    CANONICAL_BEARINGS
        .iter()
        .copied()
        .find(|canonical| (bearing_deg - canonical).abs() < tolerance_deg)
}

/// Whether `bearing_deg` lies strictly within `tolerance_deg` of a canonical bearing
#[inline]
pub fn is_aligned(bearing_deg: f64, tolerance_deg: f64) -> bool {
    snap_bearing(bearing_deg, tolerance_deg).is_some()
}

/// Classify a segment's bearing
#[inline]
pub fn is_segment_aligned(segment: &Segment, tolerance_deg: f64) -> bool {
    is_aligned(segment.bearing_deg(), tolerance_deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{bearing_deg, Point2D, SegmentId};

    #[test]
    fn test_canonical_directions_are_aligned() {
        for bearing in CANONICAL_BEARINGS {
            assert!(is_aligned(bearing, DEFAULT_ANGLE_TOLERANCE_DEG), "{bearing}");
        }
    }

    #[test]
    fn test_tolerance_window() {
        assert!(is_aligned(90.29, DEFAULT_ANGLE_TOLERANCE_DEG));
        assert!(!is_aligned(90.31, DEFAULT_ANGLE_TOLERANCE_DEG));
        assert!(!is_aligned(30.0, DEFAULT_ANGLE_TOLERANCE_DEG));
        assert!(is_aligned(-44.8, DEFAULT_ANGLE_TOLERANCE_DEG));
    }

    #[test]
    fn test_snap_reports_matched_value() {
        assert_eq!(snap_bearing(134.9, 0.3), Some(135.0));
        assert_eq!(snap_bearing(-179.95, 0.3), Some(-180.0));
        assert_eq!(snap_bearing(10.0, 0.3), None);
    }

    #[test]
    fn test_reversal_symmetry() {
        let pairs = [
            (Point2D::new(0.0, 0.0), Point2D::new(5.0, 0.0)),
            (Point2D::new(1.0, 1.0), Point2D::new(1.0, 7.0)),
            (Point2D::new(-2.0, 3.0), Point2D::new(2.0, -1.0)),
            (Point2D::new(0.0, 0.0), Point2D::new(3.0, 1.0)),
        ];

        for (a, b) in pairs {
            let forward = is_aligned(bearing_deg(&a, &b), DEFAULT_ANGLE_TOLERANCE_DEG);
            let backward = is_aligned(bearing_deg(&b, &a), DEFAULT_ANGLE_TOLERANCE_DEG);
            assert_eq!(forward, backward, "{a:?} -> {b:?}");
        }
    }

    #[test]
    fn test_segment_classification() {
        let seg = Segment::new(SegmentId(0), Point2D::new(5.0, 0.0), Point2D::new(0.0, 0.0)).unwrap();
        assert!(is_segment_aligned(&seg, DEFAULT_ANGLE_TOLERANCE_DEG));
    }
}
