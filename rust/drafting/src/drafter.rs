// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event-driven drafting facade.
//!
//! [`Drafter`] owns both state machines, the committed segments and the level
//! stack, and routes each pointer event to whichever machine the active
//! [`Mode`] selects. Every event runs to completion before the next one.
//!
//! Errors never escape: a pick that cannot be applied is logged and reported
//! as [`Outcome::Unchanged`], with no state touched.

use std::slice;

use blueprint_geometry::Point2D;

use crate::committed::CommittedSegments;
use crate::config::DraftingConfig;
use crate::error::{DraftError, Result};
use crate::floor_stack::FloorStack;
use crate::line_run::{LinePick, LineRunStateMachine};
use crate::picker::GroundPicker;
use crate::rectangle::{check_extent, RectanglePick, RectangleState, RectangleStateMachine};
use crate::room_synth::{ObjectIdAllocator, RoomFootprint, RoomSynthesizer};
use crate::store::ObjectSink;
use crate::types::{FloorLevel, Mode, Outcome, Preview};
use crate::wall_synth::WallSynthesizer;

/// Interactive floor plan drafter.
#[derive(Debug, Clone)]
pub struct Drafter {
    config: DraftingConfig,
    mode: Mode,
    lines: LineRunStateMachine,
    rectangle: RectangleStateMachine,
    committed: CommittedSegments,
    floors: FloorStack,
    walls: WallSynthesizer,
    rooms: RoomSynthesizer,
    ids: ObjectIdAllocator,
}

impl Drafter {
    /// Create a drafter in wall mode on the ground level.
    pub fn new(config: DraftingConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            mode: Mode::default(),
            lines: LineRunStateMachine::new(config.angle_tolerance_deg),
            rectangle: RectangleStateMachine::new(),
            committed: CommittedSegments::new(),
            floors: FloorStack::new(&config),
            walls: WallSynthesizer::from_config(&config),
            rooms: RoomSynthesizer::from_config(&config),
            ids: ObjectIdAllocator::new(),
            config,
        })
    }

    pub fn config(&self) -> &DraftingConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn committed(&self) -> &CommittedSegments {
        &self.committed
    }

    pub fn line_run(&self) -> &LineRunStateMachine {
        &self.lines
    }

    pub fn rectangle(&self) -> &RectangleStateMachine {
        &self.rectangle
    }

    pub fn floors(&self) -> &FloorStack {
        &self.floors
    }

    pub fn current_level(&self) -> &FloorLevel {
        self.floors.current_level()
    }

    /// Switch the active mode, discarding whatever was in progress.
    pub fn set_mode(&mut self, mode: Mode) -> Outcome {
        if mode == self.mode {
            return Outcome::Unchanged;
        }

        self.cancel_in_progress();
        self.mode = mode;
        tracing::debug!(?mode, "Drafting mode changed");
        Outcome::ModeChanged(mode)
    }

    /// Handle a click on the ground plane.
    pub fn pick<S: ObjectSink>(&mut self, point: Point2D, sink: &mut S) -> Outcome {
        let result = match self.mode {
            Mode::Wall => self.pick_wall(point, sink),
            Mode::Room => self.pick_room(point, sink),
        };
        absorb("pick", result)
    }

    /// Handle a click given as host pointer input.
    pub fn pick_from<P: GroundPicker, S: ObjectSink>(
        &mut self,
        picker: &P,
        input: &P::Input,
        sink: &mut S,
    ) -> Outcome {
        match picker.ground_point(input) {
            Some(point) => self.pick(point, sink),
            None => absorb("pick", Err(DraftError::NoGroundIntersection)),
        }
    }

    /// Update the live preview. Never touches committed geometry.
    pub fn pointer_move(&mut self, point: Point2D) -> Option<Preview> {
        match self.mode {
            Mode::Wall => self.lines.preview(point, &self.committed).map(Preview::Line),
            Mode::Room => self.rectangle.pointer_move(point).map(Preview::Rectangle),
        }
    }

    /// Pointer move given as host pointer input; a miss leaves the preview as it was.
    pub fn pointer_move_from<P: GroundPicker>(&mut self, picker: &P, input: &P::Input) -> Option<Preview> {
        let point = picker.ground_point(input)?;
        self.pointer_move(point)
    }

    /// End the line run in progress.
    pub fn finish_line(&mut self) -> Outcome {
        absorb(
            "finish line",
            self.lines.finish().map(|segments| {
                tracing::info!(segments, "Line run finished");
                Outcome::RunFinished { segments }
            }),
        )
    }

    /// Turn the live rectangle into a room on the current level.
    pub fn finalize_rectangle<S: ObjectSink>(&mut self, sink: &mut S) -> Outcome {
        absorb("finalize rectangle", self.emit_rectangle(sink))
    }

    /// Discard all committed segments and anything in progress.
    ///
    /// Objects already handed to the sink are not affected.
    pub fn clear_all(&mut self) -> Outcome {
        self.cancel_in_progress();
        self.committed.clear();
        tracing::info!("Cleared drafting state");
        Outcome::Cleared
    }

    /// Emit a room of the configured size, centered on the origin, on the current level.
    pub fn generate_room<S: ObjectSink>(&mut self, sink: &mut S) -> Outcome {
        let footprint = RoomFootprint::centered(self.config.room_width, self.config.room_length);
        let floor_index = self.floors.current_index();

        absorb(
            "generate room",
            self.floors
                .emit_room(footprint, &self.rooms, &mut self.ids, sink)
                .map(|objects| Outcome::RoomEmitted { floor_index, objects }),
        )
    }

    /// Stack another level on top, repeating the last room.
    ///
    /// Walls drawn afterwards belong to the new level and only cross geometry on it.
    pub fn add_level<S: ObjectSink>(&mut self, sink: &mut S) -> Outcome {
        let result = self.floors.add_level(&self.rooms, &mut self.ids, sink).map(|(level, objects)| {
            self.committed.set_active_floor(level.index);
            Outcome::LevelAdded { level, objects }
        });
        absorb("add level", result)
    }

    fn cancel_in_progress(&mut self) {
        self.lines.reset();
        self.rectangle.reset();
    }

    fn pick_wall<S: ObjectSink>(&mut self, point: Point2D, sink: &mut S) -> Result<Outcome> {
        // Synthesize ahead of the commit so a failure leaves the run untouched
        let pending = match self.lines.anchor() {
            Some(anchor) => {
                let candidate = self.committed.candidate(anchor, point)?;
                Some(
                    self.walls
                        .synthesize(self.ids.peek(), &candidate, self.floors.current_level())?,
                )
            }
            None => None,
        };

        match self.lines.pick(point, &mut self.committed)? {
            LinePick::Anchored(anchor) => Ok(Outcome::RunStarted(anchor)),
            LinePick::Committed(record) => {
                let wall = pending.ok_or(DraftError::InvalidModeTransition("commit without an anchor"))?;
                let object = self.ids.next_id();
                debug_assert_eq!(object, wall.id);

                self.floors.record(slice::from_ref(&wall));
                sink.append(wall);

                Ok(Outcome::WallCommitted {
                    segment: record.segment,
                    object,
                    aligned: record.aligned,
                    terminated: record.crossed,
                })
            }
        }
    }

    fn pick_room<S: ObjectSink>(&mut self, point: Point2D, sink: &mut S) -> Result<Outcome> {
        if let RectangleState::Defining { start, .. } = self.rectangle.state() {
            return self.emit_room_between(start, point, sink);
        }

        match self.rectangle.pick(point)? {
            RectanglePick::CornerFixed(corner) => Ok(Outcome::CornerFixed(corner)),
            RectanglePick::Finalized { .. } => Err(DraftError::InvalidModeTransition("rectangle finalized on first pick")),
        }
    }

    fn emit_rectangle<S: ObjectSink>(&mut self, sink: &mut S) -> Result<Outcome> {
        let RectangleState::Defining { start, end } = self.rectangle.state() else {
            return Err(DraftError::InvalidModeTransition("finalize with no corner defined"));
        };
        self.emit_room_between(start, end, sink)
    }

    /// Emit the room spanned by two corners and close the rectangle.
    ///
    /// Every check runs before the sink or the rectangle is touched.
    fn emit_room_between<S: ObjectSink>(&mut self, start: Point2D, end: Point2D, sink: &mut S) -> Result<Outcome> {
        check_extent(start, end)?;

        let floor_index = self.floors.current_index();
        let footprint = RoomFootprint::from_corners(start, end);
        let objects = self.floors.emit_room(footprint, &self.rooms, &mut self.ids, sink)?;
        self.rectangle.reset();

        tracing::info!(
            floor_index,
            width = footprint.width(),
            length = footprint.length(),
            "Room emitted from rectangle"
        );

        Ok(Outcome::RoomEmitted { floor_index, objects })
    }
}

fn absorb(event: &'static str, result: Result<Outcome>) -> Outcome {
    result.unwrap_or_else(|err| {
        tracing::debug!(event, reason = %err, "Event ignored");
        Outcome::Unchanged
    })
}
