// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Segment crossing tests against previously committed geometry
//!
//! Uses the determinant form of the 2x2 segment/segment system. Parallel and
//! collinear pairs are reported as not crossing, including collinear overlap.

use crate::types::{Point2D, Segment, SegmentId};

/// Determinants smaller than this are treated as parallel
const PARALLEL_EPSILON: f64 = 1e-12;

/// Parameter slack used when ignoring contact at a segment's own start point
pub const ANCHOR_EPSILON: f64 = 1e-9;

/// Solve for the segment parameters `(ua, ub)` where line `p1→p2` meets line `p3→p4`
///
/// `ua` is measured along `p1→p2`, `ub` along `p3→p4`. Returns `None` when the
/// lines are parallel or collinear.
pub fn intersection_params(p1: &Point2D, p2: &Point2D, p3: &Point2D, p4: &Point2D) -> Option<(f64, f64)> {
    let denom = (p4.z - p3.z) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.z - p1.z);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let ua = ((p4.x - p3.x) * (p1.z - p3.z) - (p4.z - p3.z) * (p1.x - p3.x)) / denom;
    let ub = ((p2.x - p1.x) * (p1.z - p3.z) - (p2.z - p1.z) * (p1.x - p3.x)) / denom;

    Some((ua, ub))
}

/// Whether two segments meet within both parameter ranges `[0, 1]`
#[inline]
pub fn segments_cross(a: &Segment, b: &Segment) -> bool {
    match intersection_params(&a.start, &a.end, &b.start, &b.end) {
        Some((ua, ub)) => (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub),
        None => false,
    }
}

/// Whether `candidate` crosses any of the `committed` segments
///
/// The scan stops at the first hit.
pub fn intersects(candidate: &Segment, committed: &[Segment]) -> bool {
    committed.iter().any(|other| segments_cross(candidate, other))
}

/// First committed segment crossed by `candidate` away from the candidate's start point
///
/// A run's new segment always touches the segment it continues from (and any
/// other segment ending at the same anchor) at `ua = 0`. Those contacts are
/// skipped so that only crossings further along the candidate count.
pub fn first_crossing_beyond_anchor<'a, I>(candidate: &Segment, committed: I) -> Option<SegmentId>
where
    I: IntoIterator<Item = &'a Segment>,
{
    committed.into_iter().find_map(|other| {
        let (ua, ub) = intersection_params(&candidate.start, &candidate.end, &other.start, &other.end)?;
        let on_candidate = ua > ANCHOR_EPSILON && ua <= 1.0;
        let on_other = (0.0..=1.0).contains(&ub);
        (on_candidate && on_other).then_some(other.id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(id: u64, x1: f64, z1: f64, x2: f64, z2: f64) -> Segment {
        Segment::new(SegmentId(id), Point2D::new(x1, z1), Point2D::new(x2, z2)).unwrap()
    }

    #[test]
    fn test_crossing_segments() {
        let a = seg(0, 0.0, 0.0, 5.0, 0.0);
        let b = seg(1, 2.0, 5.0, 2.0, -5.0);

        assert!(segments_cross(&a, &b));
        assert!(segments_cross(&b, &a));
        assert!(intersects(&b, &[a]));
    }

    #[test]
    fn test_disjoint_segments() {
        let a = seg(0, 0.0, 0.0, 5.0, 0.0);
        let b = seg(1, 6.0, 5.0, 6.0, -5.0);

        assert!(!segments_cross(&a, &b));
        assert!(!intersects(&b, &[a]));
    }

    #[test]
    fn test_parallel_and_collinear_do_not_cross() {
        let a = seg(0, 0.0, 0.0, 5.0, 0.0);
        let parallel = seg(1, 0.0, 1.0, 5.0, 1.0);
        let overlapping = seg(2, 2.0, 0.0, 8.0, 0.0);

        assert!(!segments_cross(&a, &parallel));
        assert!(!segments_cross(&a, &overlapping));
    }

    #[test]
    fn test_params_on_crossing() {
        let (ua, ub) = intersection_params(
            &Point2D::new(0.0, 0.0),
            &Point2D::new(4.0, 0.0),
            &Point2D::new(1.0, -1.0),
            &Point2D::new(1.0, 3.0),
        )
        .unwrap();

        assert!((ua - 0.25).abs() < 1e-12);
        assert!((ub - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_touching_endpoint_counts_for_plain_detector() {
        let a = seg(0, 0.0, 0.0, 5.0, 0.0);
        let b = seg(1, 5.0, 0.0, 5.0, 5.0);

        assert!(segments_cross(&a, &b));
    }

    #[test]
    fn test_anchor_contact_is_skipped() {
        let previous = seg(0, 0.0, 0.0, 5.0, 0.0);
        let next = seg(1, 5.0, 0.0, 5.0, 5.0);

        assert_eq!(first_crossing_beyond_anchor(&next, &[previous]), None);
    }

    #[test]
    fn test_closing_a_loop_is_a_crossing() {
        let committed = [
            seg(0, 0.0, 0.0, 5.0, 0.0),
            seg(1, 5.0, 0.0, 5.0, 5.0),
            seg(2, 5.0, 5.0, 0.0, 5.0),
        ];
        let closing = seg(3, 0.0, 5.0, 0.0, 0.0);

        assert_eq!(first_crossing_beyond_anchor(&closing, &committed), Some(SegmentId(0)));
    }

    #[test]
    fn test_first_hit_wins() {
        let committed = [seg(0, 0.0, 0.0, 0.0, 10.0), seg(1, 4.0, 0.0, 4.0, 10.0)];
        let candidate = seg(2, -1.0, 5.0, 6.0, 5.0);

        assert_eq!(first_crossing_beyond_anchor(&candidate, &committed), Some(SegmentId(0)));
    }
}
