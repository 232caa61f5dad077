// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 3D wall synthesis from committed segments

use blueprint_geometry::{
    posed_box_mesh, round3, BoundingBox, Point3, Segment, Vec3, DEGENERATE_LENGTH,
};

use crate::config::DraftingConfig;
use crate::error::{DraftError, Result};
use crate::types::{FloorLevel, ObjectId, ObjectKind, WallObject};

/// Everything needed to emit one box-shaped object
pub(crate) struct BoxSpec {
    pub kind: ObjectKind,
    /// Box center in world units
    pub center: Point3<f64>,
    pub yaw: f64,
    /// Box extents, already rounded
    pub scale: Vec3,
    pub price: f64,
}

/// Turn a box spec into an emitted object.
///
/// The bounding box is measured on the posed box geometry and stays in world
/// units, like `scale`. Positions are converted to output units here and
/// nowhere else.
pub(crate) fn emit_box(
    id: ObjectId,
    spec: BoxSpec,
    level: &FloorLevel,
    world_to_output_scale: f64,
) -> Result<WallObject> {
    let mesh = posed_box_mesh(spec.scale, spec.yaw, spec.center)?;
    let position = Vec3::new(spec.center.x, spec.center.y, spec.center.z).scaled(world_to_output_scale);

    Ok(WallObject {
        id,
        kind: spec.kind,
        position,
        rotation: Vec3::new(0.0, spec.yaw, 0.0),
        scale: spec.scale,
        bounding_box: BoundingBox::from_mesh(&mesh),
        price: spec.price,
        floor_index: level.index,
        segment: None,
        color: None,
    })
}

/// Converts committed segments into priced walls
#[derive(Debug, Clone, PartialEq)]
pub struct WallSynthesizer {
    pub wall_height: f64,
    pub wall_thickness: f64,
    pub price_per_unit_length: f64,
    pub world_to_output_scale: f64,
}

impl WallSynthesizer {
    pub fn from_config(config: &DraftingConfig) -> Self {
        Self {
            wall_height: config.wall_height,
            wall_thickness: config.wall_thickness,
            price_per_unit_length: config.price_per_unit_length,
            world_to_output_scale: config.world_to_output_scale,
        }
    }

    /// Synthesize one wall running along `segment` on `level`.
    ///
    /// The wall's local X axis follows the segment, so yaw is the negated bearing.
    /// Pure: the same inputs always give the same object.
    pub fn synthesize(&self, id: ObjectId, segment: &Segment, level: &FloorLevel) -> Result<WallObject> {
        let length = segment.length();
        if length < DEGENERATE_LENGTH {
            return Err(DraftError::DegenerateSegment(length));
        }

        let mid = segment.midpoint();
        let spec = BoxSpec {
            kind: ObjectKind::Wall,
            center: mid.at_height(level.vertical_offset + self.wall_height / 2.0),
            yaw: -segment.bearing_rad(),
            scale: Vec3::new(round3(length), round3(self.wall_height), round3(self.wall_thickness)),
            price: (length * self.price_per_unit_length).round(),
        };

        let mut wall = emit_box(id, spec, level, self.world_to_output_scale)?;
        wall.segment = Some(segment.id);
        Ok(wall)
    }
}
