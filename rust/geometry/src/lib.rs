// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Blueprint Geometry
//!
//! Planar geometry for floor plan drafting: ground-plane points and segments,
//! bearing classification against canonical directions, segment crossing
//! tests, and box meshing used to derive extents of synthesized walls.

pub mod angle;
pub mod error;
pub mod extrusion;
pub mod intersection;
pub mod mesh;
pub mod profile;
pub mod types;
pub mod units;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use angle::{is_aligned, is_segment_aligned, snap_bearing, CANONICAL_BEARINGS, DEFAULT_ANGLE_TOLERANCE_DEG};
pub use error::{Error, Result};
pub use extrusion::{apply_transform, box_mesh, extrude_profile, posed_box_mesh};
pub use intersection::{first_crossing_beyond_anchor, intersection_params, intersects, segments_cross};
pub use mesh::{BoundingBox, Mesh};
pub use profile::{create_rectangle, Profile2D};
pub use types::{bearing_deg, Point2D, Segment, SegmentId, Vec3, DEGENERATE_LENGTH};
pub use units::{format_metres, round3, round3_vec};
