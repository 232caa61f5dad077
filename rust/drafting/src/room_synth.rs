// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room synthesis: a floor slab plus four perimeter walls from a rectangle

use blueprint_geometry::{round3, Point2D, Vec3};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use crate::config::DraftingConfig;
use crate::error::{DraftError, Result};
use crate::types::{FloorLevel, ObjectId, ObjectKind, WallObject};
use crate::wall_synth::{emit_box, BoxSpec};

/// Axis-aligned room footprint on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomFootprint {
    pub min: Point2D,
    pub max: Point2D,
}

impl RoomFootprint {
    /// Footprint spanned by two opposite corners, in any order
    pub fn from_corners(a: Point2D, b: Point2D) -> Self {
        Self {
            min: Point2D::new(a.x.min(b.x), a.z.min(b.z)),
            max: Point2D::new(a.x.max(b.x), a.z.max(b.z)),
        }
    }

    /// Footprint of the given size centered on the origin
    pub fn centered(width: f64, length: f64) -> Self {
        Self {
            min: Point2D::new(-width / 2.0, -length / 2.0),
            max: Point2D::new(width / 2.0, length / 2.0),
        }
    }

    /// X extent
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Z extent
    pub fn length(&self) -> f64 {
        self.max.z - self.min.z
    }

    pub fn area(&self) -> f64 {
        self.width() * self.length()
    }

    pub fn center(&self) -> Point2D {
        Point2D::new((self.min.x + self.max.x) / 2.0, (self.min.z + self.max.z) / 2.0)
    }
}

/// Allocates object ids in emission order
#[derive(Debug, Clone, Default)]
pub struct ObjectIdAllocator {
    next: u64,
}

impl ObjectIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next call to [`next_id`](Self::next_id) returns.
    pub fn peek(&self) -> ObjectId {
        ObjectId(self.next)
    }

    pub fn next_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next);
        self.next += 1;
        id
    }
}

/// Converts rectangles into a floor slab and four perimeter walls
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSynthesizer {
    pub room_height: f64,
    pub wall_thickness: f64,
    pub price_per_area: f64,
    /// Flat price per perimeter wall, independent of its length
    pub room_wall_price: f64,
    pub world_to_output_scale: f64,
}

impl RoomSynthesizer {
    pub fn from_config(config: &DraftingConfig) -> Self {
        Self {
            room_height: config.room_height,
            wall_thickness: config.wall_thickness,
            price_per_area: config.price_per_area,
            room_wall_price: config.room_wall_price,
            world_to_output_scale: config.world_to_output_scale,
        }
    }

    /// Emit `[floor, front, back, left, right]` for `footprint` on `level`.
    ///
    /// Walls sit inside the footprint, their centerlines inset by half the
    /// wall thickness, so each wall is `thickness` shorter than its edge.
    /// A footprint too small to hold its walls is rejected before any id is drawn.
    pub fn synthesize(
        &self,
        ids: &mut ObjectIdAllocator,
        footprint: &RoomFootprint,
        level: &FloorLevel,
    ) -> Result<Vec<WallObject>> {
        let width = footprint.width();
        let length = footprint.length();
        let t = self.wall_thickness;

        let shortest = width.min(length);
        if shortest <= t {
            return Err(DraftError::DegenerateSegment(shortest - t));
        }

        let center = footprint.center();
        let offset = level.vertical_offset;
        let wall_y = offset + self.room_height / 2.0;
        let wall_scale = |span: f64| Vec3::new(round3(span), round3(self.room_height), round3(t));

        let mut specs = Vec::with_capacity(5);
        specs.push(BoxSpec {
            kind: ObjectKind::Floor,
            center: center.at_height(offset),
            yaw: 0.0,
            scale: Vec3::new(round3(width), round3(t), round3(length)),
            price: (footprint.area() * self.price_per_area).round(),
        });

        // Front and back run along X
        for z in [footprint.min.z + t / 2.0, footprint.max.z - t / 2.0] {
            specs.push(BoxSpec {
                kind: ObjectKind::Wall,
                center: Point2D::new(center.x, z).at_height(wall_y),
                yaw: 0.0,
                scale: wall_scale(width - t),
                price: self.room_wall_price,
            });
        }

        // Left and right run along Z
        for x in [footprint.min.x + t / 2.0, footprint.max.x - t / 2.0] {
            specs.push(BoxSpec {
                kind: ObjectKind::Wall,
                center: Point2D::new(x, center.z).at_height(wall_y),
                yaw: -FRAC_PI_2,
                scale: wall_scale(length - t),
                price: self.room_wall_price,
            });
        }

        let objects = specs
            .into_iter()
            .map(|spec| {
                let mut object = emit_box(ids.next_id(), spec, level, self.world_to_output_scale)?;
                object.color = Some(level.color.clone());
                Ok(object)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            floor_index = level.index,
            width,
            length,
            vertical_offset = offset,
            "Synthesized room"
        );

        Ok(objects)
    }
}
