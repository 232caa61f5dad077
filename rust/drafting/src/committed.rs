// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The owned collection of committed segments across every line run.
//!
//! Crossing tests for a new pick are evaluated against this collection before
//! the pick itself is added, so a test only ever sees segments committed
//! strictly earlier. Each segment is tagged with the building level it was
//! drawn on, and only segments on the active level take part in crossing tests.

use blueprint_geometry::{first_crossing_beyond_anchor, Point2D, Segment, SegmentId};

/// Committed floor plan segments, in commit order.
#[derive(Debug, Default, Clone)]
pub struct CommittedSegments {
    /// `(floor_index, segment)` pairs.
    segments: Vec<(u32, Segment)>,
    active_floor: u32,
    next_id: u64,
}

impl CommittedSegments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level that new commits are tagged with and crossings are tested on.
    pub fn active_floor(&self) -> u32 {
        self.active_floor
    }

    pub fn set_active_floor(&mut self, floor_index: u32) {
        self.active_floor = floor_index;
    }

    /// Build a candidate segment carrying the id it would receive on commit.
    ///
    /// Does not consume the id; a rejected candidate leaves the collection untouched.
    pub fn candidate(&self, start: Point2D, end: Point2D) -> blueprint_geometry::Result<Segment> {
        Segment::new(SegmentId(self.next_id), start, end)
    }

    /// First segment on the active level the candidate crosses beyond its own start point.
    pub fn first_crossing(&self, candidate: &Segment) -> Option<SegmentId> {
        first_crossing_beyond_anchor(candidate, self.on_floor(self.active_floor))
    }

    /// Append a segment produced by [`candidate`](Self::candidate) on the active level.
    pub fn commit(&mut self, segment: Segment) -> Segment {
        self.next_id = self.next_id.max(segment.id.0 + 1);
        self.segments.push((self.active_floor, segment));
        segment
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().map(|(_, segment)| segment)
    }

    /// Segments drawn on one building level.
    pub fn on_floor(&self, floor_index: u32) -> impl Iterator<Item = &Segment> {
        self.segments
            .iter()
            .filter(move |(floor, _)| *floor == floor_index)
            .map(|(_, segment)| segment)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Drop every committed segment. Ids are never reused.
    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_assigned_on_commit() {
        let mut committed = CommittedSegments::new();

        let a = committed.candidate(Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)).unwrap();
        assert_eq!(a.id, SegmentId(0));
        // Candidate does not consume the id
        let again = committed.candidate(Point2D::new(0.0, 0.0), Point2D::new(2.0, 0.0)).unwrap();
        assert_eq!(again.id, SegmentId(0));

        committed.commit(a);
        let b = committed.candidate(Point2D::new(1.0, 0.0), Point2D::new(1.0, 1.0)).unwrap();
        assert_eq!(b.id, SegmentId(1));
    }

    #[test]
    fn test_clear_does_not_reuse_ids() {
        let mut committed = CommittedSegments::new();
        let a = committed.candidate(Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)).unwrap();
        committed.commit(a);
        committed.clear();

        assert!(committed.is_empty());
        let b = committed.candidate(Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)).unwrap();
        assert_eq!(b.id, SegmentId(1));
    }

    #[test]
    fn test_degenerate_candidate() {
        let committed = CommittedSegments::new();
        let p = Point2D::new(3.0, 3.0);
        assert!(committed.candidate(p, p).is_err());
    }

    #[test]
    fn test_crossings_only_on_active_floor() {
        let mut committed = CommittedSegments::new();
        let ground = committed.candidate(Point2D::new(0.0, 0.0), Point2D::new(5.0, 0.0)).unwrap();
        committed.commit(ground);

        committed.set_active_floor(1);
        let upper = committed.candidate(Point2D::new(2.0, 5.0), Point2D::new(2.0, -5.0)).unwrap();

        assert_eq!(committed.first_crossing(&upper), None);
        committed.commit(upper);
        assert_eq!(committed.on_floor(0).count(), 1);
        assert_eq!(committed.on_floor(1).count(), 1);

        committed.set_active_floor(0);
        let again = committed.candidate(Point2D::new(3.0, 5.0), Point2D::new(3.0, -5.0)).unwrap();
        assert_eq!(committed.first_crossing(&again), Some(SegmentId(0)));
    }
}
