// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Blueprint Drafting
//!
//! Interactive floor plan drafting and 3D synthesis. Picked ground points
//! become wall runs or room rectangles; committed geometry is turned into
//! priced, box-shaped wall and floor objects that can be stacked level by
//! level.
//!
//! ```rust,ignore
//! use blueprint_drafting::{Drafter, DraftingConfig, Point2D, WallObject};
//!
//! let mut drafter = Drafter::new(DraftingConfig::default())?;
//! let mut objects: Vec<WallObject> = Vec::new();
//!
//! drafter.pick(Point2D::new(0.0, 0.0), &mut objects);
//! drafter.pick(Point2D::new(5.0, 0.0), &mut objects);
//! assert_eq!(objects[0].price, 50.0);
//! ```

pub mod committed;
pub mod config;
pub mod drafter;
pub mod error;
pub mod floor_stack;
pub mod line_run;
pub mod picker;
pub mod rectangle;
pub mod room_synth;
pub mod store;
pub mod types;
pub mod wall_synth;

pub use blueprint_geometry::{Point2D, Segment, SegmentId, Vec3};

pub use committed::CommittedSegments;
pub use config::DraftingConfig;
pub use drafter::Drafter;
pub use error::{DraftError, Result};
pub use floor_stack::{FloorStack, LevelRecord};
pub use line_run::{CommitRecord, LinePick, LineRunState, LineRunStateMachine};
pub use picker::{GroundPicker, GroundPlane, Ray};
pub use rectangle::{check_extent, rectangle_corners, rectangle_edges, RectanglePick, RectangleState, RectangleStateMachine};
pub use room_synth::{ObjectIdAllocator, RoomFootprint, RoomSynthesizer};
pub use store::{ObjectKey, ObjectSink, ObjectStore};
pub use types::{
    FloorLevel, LinePreview, Mode, ObjectId, ObjectKind, Outcome, Preview, RectanglePreview, WallObject,
};
pub use wall_synth::WallSynthesizer;
