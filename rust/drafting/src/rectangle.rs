// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rectangle state machine for room drafting.
//!
//! One pick fixes a corner, pointer moves drag the opposite corner, and a
//! second pick (or an explicit finalize) hands both corners to room synthesis.
//! The rectangle only ever exists as a preview until it is finalized.

use blueprint_geometry::{format_metres, Point2D, Segment, SegmentId, DEGENERATE_LENGTH};

use crate::error::{DraftError, Result};
use crate::types::RectanglePreview;

/// State of the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RectangleState {
    #[default]
    Idle,
    /// `start` is fixed, `end` tracks the pointer.
    Defining { start: Point2D, end: Point2D },
}

/// Result of a pick in room mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RectanglePick {
    CornerFixed(Point2D),
    /// Both corners are known and the machine is idle again.
    Finalized { start: Point2D, end: Point2D },
}

/// Axis-aligned corners of the rectangle spanned by two opposite points,
/// counter-clockwise starting at `start`'s row.
pub fn rectangle_corners(start: Point2D, end: Point2D) -> [Point2D; 4] {
    [
        start,
        Point2D::new(end.x, start.z),
        end,
        Point2D::new(start.x, end.z),
    ]
}

/// The four edges of the rectangle; collapsed edges are omitted.
pub fn rectangle_edges(start: Point2D, end: Point2D) -> Vec<Segment> {
    let corners = rectangle_corners(start, end);
    (0..4)
        .filter_map(|i| Segment::new(SegmentId(i as u64), corners[i], corners[(i + 1) % 4]).ok())
        .collect()
}

/// Reject a rectangle that has no area.
pub fn check_extent(start: Point2D, end: Point2D) -> Result<()> {
    let extent = (end.x - start.x).abs().min((end.z - start.z).abs());
    if extent < DEGENERATE_LENGTH {
        return Err(DraftError::DegenerateSegment(extent));
    }
    Ok(())
}

/// Accumulates exactly one rectangle from two opposite corners.
#[derive(Debug, Clone, Default)]
pub struct RectangleStateMachine {
    state: RectangleState,
}

impl RectangleStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RectangleState {
        self.state
    }

    pub fn is_defining(&self) -> bool {
        matches!(self.state, RectangleState::Defining { .. })
    }

    /// Fix the first corner, or finalize at the picked point when one is already fixed.
    pub fn pick(&mut self, point: Point2D) -> Result<RectanglePick> {
        match self.state {
            RectangleState::Idle => {
                self.state = RectangleState::Defining { start: point, end: point };
                tracing::debug!(x = point.x, z = point.z, "Rectangle corner fixed");
                Ok(RectanglePick::CornerFixed(point))
            }
            RectangleState::Defining { .. } => {
                let (start, end) = self.finalize_at(point)?;
                Ok(RectanglePick::Finalized { start, end })
            }
        }
    }

    /// Track the pointer with the live corner; preview only, nothing is committed.
    pub fn pointer_move(&mut self, point: Point2D) -> Option<RectanglePreview> {
        if let RectangleState::Defining { start, .. } = self.state {
            self.state = RectangleState::Defining { start, end: point };
        }
        self.preview()
    }

    /// Preview of the live rectangle.
    pub fn preview(&self) -> Option<RectanglePreview> {
        let RectangleState::Defining { start, end } = self.state else {
            return None;
        };

        let width = (end.x - start.x).abs();
        let length = (end.z - start.z).abs();

        Some(RectanglePreview {
            start,
            end,
            width,
            length,
            corners: rectangle_corners(start, end),
            edges: rectangle_edges(start, end),
            label: format!("{} x {}", format_metres(width), format_metres(length)),
        })
    }

    /// Release both corners for synthesis and return to idle.
    ///
    /// A rectangle with no area is rejected and stays in progress.
    pub fn finalize(&mut self) -> Result<(Point2D, Point2D)> {
        let RectangleState::Defining { end, .. } = self.state else {
            return Err(DraftError::InvalidModeTransition("finalize with no corner defined"));
        };
        self.finalize_at(end)
    }

    /// Finalize with the opposite corner at `end`.
    ///
    /// Nothing changes unless the rectangle is accepted.
    pub fn finalize_at(&mut self, end: Point2D) -> Result<(Point2D, Point2D)> {
        let RectangleState::Defining { start, .. } = self.state else {
            return Err(DraftError::InvalidModeTransition("finalize with no corner defined"));
        };

        check_extent(start, end)?;

        self.state = RectangleState::Idle;
        Ok((start, end))
    }

    /// Discard any partially defined rectangle.
    pub fn reset(&mut self) {
        self.state = RectangleState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_preview_dimensions() {
        let mut rect = RectangleStateMachine::new();
        rect.pick(Point2D::new(0.0, 0.0)).unwrap();

        let preview = rect.pointer_move(Point2D::new(4.0, 3.0)).unwrap();

        assert_relative_eq!(preview.width, 4.0);
        assert_relative_eq!(preview.length, 3.0);
        assert_eq!(preview.label, "4.00m x 3.00m");
        assert_eq!(preview.edges.len(), 4);
        assert!(rect.is_defining());
    }

    #[test]
    fn test_edges_are_orthogonal() {
        let edges = rectangle_edges(Point2D::new(1.0, -2.0), Point2D::new(-3.0, 4.0));

        for edge in &edges {
            let b = edge.bearing_deg().abs();
            assert!([0.0, 90.0, 180.0].iter().any(|a| (b - a).abs() < 1e-9), "bearing {b}");
        }
        let perimeter: f64 = edges.iter().map(Segment::length).sum();
        assert_relative_eq!(perimeter, 2.0 * (4.0 + 6.0));
    }

    #[test]
    fn test_second_pick_finalizes() {
        let mut rect = RectangleStateMachine::new();
        rect.pick(Point2D::new(0.0, 0.0)).unwrap();

        let pick = rect.pick(Point2D::new(4.0, 3.0)).unwrap();

        assert_eq!(
            pick,
            RectanglePick::Finalized {
                start: Point2D::new(0.0, 0.0),
                end: Point2D::new(4.0, 3.0)
            }
        );
        assert_eq!(rect.state(), RectangleState::Idle);
    }

    #[test]
    fn test_flat_rectangle_is_rejected() {
        let mut rect = RectangleStateMachine::new();
        rect.pick(Point2D::new(0.0, 0.0)).unwrap();
        rect.pointer_move(Point2D::new(4.0, 0.0));

        assert!(matches!(rect.finalize(), Err(DraftError::DegenerateSegment(_))));
        assert!(rect.is_defining());
    }

    #[test]
    fn test_rejected_pick_keeps_live_corner() {
        let mut rect = RectangleStateMachine::new();
        rect.pick(Point2D::new(0.0, 0.0)).unwrap();
        rect.pointer_move(Point2D::new(4.0, 3.0));

        assert!(rect.pick(Point2D::new(0.0, 3.0)).is_err());

        assert_eq!(
            rect.state(),
            RectangleState::Defining {
                start: Point2D::new(0.0, 0.0),
                end: Point2D::new(4.0, 3.0)
            }
        );
    }

    #[test]
    fn test_finalize_while_idle_is_invalid() {
        let mut rect = RectangleStateMachine::new();
        assert!(matches!(rect.finalize(), Err(DraftError::InvalidModeTransition(_))));
    }

    #[test]
    fn test_reset_discards_corner() {
        let mut rect = RectangleStateMachine::new();
        rect.pick(Point2D::new(0.0, 0.0)).unwrap();
        rect.reset();

        assert!(rect.preview().is_none());
        assert!(rect.pointer_move(Point2D::new(1.0, 1.0)).is_none());
    }
}
