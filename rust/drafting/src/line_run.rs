// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line-run state machine for freehand wall drafting.
//!
//! The first pick anchors a run; every following pick commits a segment from
//! the anchor and moves the anchor forward. A segment that crosses earlier
//! geometry is still committed, but it ends the run: drafting cannot continue
//! from a crossing point.
//!
//! ```text
//!   Idle --pick--> Drawing --pick (no crossing)--> Drawing
//!                     |--pick (crossing)---------> Idle
//!                     |--finish / reset----------> Idle
//! ```

use blueprint_geometry::{format_metres, snap_bearing, Point2D, Segment};

use crate::committed::CommittedSegments;
use crate::error::{DraftError, Result};
use crate::types::LinePreview;

/// State of the line run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LineRunState {
    #[default]
    Idle,
    /// `anchor` is the last committed point of the run (the temp point).
    Drawing { anchor: Point2D },
}

/// A segment committed by a pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitRecord {
    pub segment: Segment,
    pub aligned: bool,
    /// The segment crossed earlier geometry and the run ended.
    pub crossed: bool,
}

/// Result of a pick in wall mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinePick {
    /// The run was anchored; nothing was committed.
    Anchored(Point2D),
    Committed(CommitRecord),
}

/// Accumulates connected wall segments from successive picks.
#[derive(Debug, Clone, Default)]
pub struct LineRunStateMachine {
    state: LineRunState,
    /// Segments of the run in progress, in order.
    run: Vec<Segment>,
    angle_tolerance_deg: f64,
}

impl LineRunStateMachine {
    pub fn new(angle_tolerance_deg: f64) -> Self {
        Self {
            state: LineRunState::Idle,
            run: Vec::new(),
            angle_tolerance_deg,
        }
    }

    pub fn state(&self) -> LineRunState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, LineRunState::Drawing { .. })
    }

    /// Last committed point of the run, if one is in progress.
    pub fn anchor(&self) -> Option<Point2D> {
        match self.state {
            LineRunState::Idle => None,
            LineRunState::Drawing { anchor } => Some(anchor),
        }
    }

    /// Segments committed by the run in progress.
    pub fn current_run(&self) -> &[Segment] {
        &self.run
    }

    /// Handle a picked ground point.
    ///
    /// Crossing is tested against `committed` before the new segment joins it.
    pub fn pick(&mut self, point: Point2D, committed: &mut CommittedSegments) -> Result<LinePick> {
        let anchor = match self.state {
            LineRunState::Idle => {
                self.state = LineRunState::Drawing { anchor: point };
                self.run.clear();
                tracing::debug!(x = point.x, z = point.z, "Line run anchored");
                return Ok(LinePick::Anchored(point));
            }
            LineRunState::Drawing { anchor } => anchor,
        };

        let candidate = committed.candidate(anchor, point)?;
        let aligned = snap_bearing(candidate.bearing_deg(), self.angle_tolerance_deg).is_some();
        let crossing = committed.first_crossing(&candidate);

        let segment = committed.commit(candidate);
        self.run.push(segment);

        match crossing {
            Some(other) => {
                tracing::info!(
                    segment_id = segment.id.0,
                    crossed_id = other.0,
                    run_segments = self.run.len(),
                    "Segment crosses committed geometry, ending run"
                );
                self.state = LineRunState::Idle;
                self.run.clear();
            }
            None => {
                self.state = LineRunState::Drawing { anchor: point };
            }
        }

        tracing::debug!(
            segment_id = segment.id.0,
            length = segment.length(),
            bearing = segment.bearing_deg(),
            aligned,
            "Committed segment"
        );

        Ok(LinePick::Committed(CommitRecord {
            segment,
            aligned,
            crossed: crossing.is_some(),
        }))
    }

    /// Close the run in progress. Committed segments stay.
    ///
    /// Returns how many segments the run committed.
    pub fn finish(&mut self) -> Result<usize> {
        if !self.is_drawing() {
            return Err(DraftError::InvalidModeTransition("finish line while idle"));
        }
        let count = self.run.len();
        self.reset();
        Ok(count)
    }

    /// Discard the run in progress without touching committed geometry.
    pub fn reset(&mut self) {
        self.state = LineRunState::Idle;
        self.run.clear();
    }

    /// Preview from the anchor to the pointer; `None` while idle or on the anchor itself.
    pub fn preview(&self, pointer: Point2D, committed: &CommittedSegments) -> Option<LinePreview> {
        let anchor = self.anchor()?;
        let candidate = committed.candidate(anchor, pointer).ok()?;

        let length = candidate.length();
        let bearing_deg = candidate.bearing_deg();
        let snapped_angle = snap_bearing(bearing_deg, self.angle_tolerance_deg);
        let aligned = snapped_angle.is_some();
        let would_cross = committed.first_crossing(&candidate).is_some();

        let label = match snapped_angle {
            Some(angle) => format!("{} {}°", format_metres(length), angle),
            None => format_metres(length),
        };

        Some(LinePreview {
            start: anchor,
            end: pointer,
            length,
            bearing_deg,
            snapped_angle,
            aligned,
            would_cross,
            highlighted: aligned || would_cross,
            label,
        })
    }
}
