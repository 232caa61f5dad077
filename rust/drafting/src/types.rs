// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for drafting and 3D synthesis

use blueprint_geometry::{BoundingBox, Point2D, Segment, SegmentId, Vec3};
use serde::{Deserialize, Serialize};

/// Identifier assigned to every synthesized object
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// What a synthesized object represents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Wall,
    Floor,
}

/// A priced 3D box emitted by synthesis
///
/// `scale` is (length, height, thickness) for walls and
/// (width, thickness, length) for floors. Only the yaw component of
/// `rotation` is meaningful.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WallObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub bounding_box: BoundingBox,
    pub price: f64,
    pub floor_index: u32,
    /// Source segment for walls drawn in line mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<SegmentId>,
    /// Level color tag for objects produced by room synthesis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One vertical story of the building
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FloorLevel {
    pub index: u32,
    pub vertical_offset: f64,
    pub color: String,
}

impl FloorLevel {
    pub fn new(index: u32, level_height: f64, color: String) -> Self {
        Self {
            index,
            vertical_offset: index as f64 * level_height,
            color,
        }
    }
}

/// Which state machine receives picks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Wall,
    Room,
}

/// Live preview of the next wall segment (never committed)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinePreview {
    pub start: Point2D,
    pub end: Point2D,
    pub length: f64,
    pub bearing_deg: f64,
    /// Canonical bearing the preview snaps to, if aligned
    pub snapped_angle: Option<f64>,
    pub aligned: bool,
    /// Committing this preview would cross earlier geometry
    pub would_cross: bool,
    /// Render the preview in the highlight color (`aligned || would_cross`)
    pub highlighted: bool,
    pub label: String,
}

/// Live preview of a room rectangle (never committed)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RectanglePreview {
    pub start: Point2D,
    pub end: Point2D,
    /// |dx|
    pub width: f64,
    /// |dz|
    pub length: f64,
    pub corners: [Point2D; 4],
    pub edges: Vec<Segment>,
    pub label: String,
}

/// Preview produced by a pointer move
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Preview {
    Line(LinePreview),
    Rectangle(RectanglePreview),
}

/// What an event did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing happened (the reason is logged)
    Unchanged,
    /// A line run was anchored at its first point
    RunStarted(Point2D),
    /// A wall segment was committed and synthesized
    WallCommitted {
        segment: Segment,
        object: ObjectId,
        aligned: bool,
        /// The segment crossed earlier geometry and ended the run
        terminated: bool,
    },
    /// The active line run was closed
    RunFinished { segments: usize },
    /// A rectangle's first corner was fixed
    CornerFixed(Point2D),
    /// A floor and its perimeter walls were emitted
    RoomEmitted { floor_index: u32, objects: Vec<ObjectId> },
    /// A level was stacked on top of the building
    LevelAdded { level: FloorLevel, objects: Vec<ObjectId> },
    /// In-progress drafting was discarded
    Cleared,
    /// The active mode changed
    ModeChanged(Mode),
}
