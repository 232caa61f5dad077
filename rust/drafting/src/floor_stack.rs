// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Multi-level stacking of rooms.
//!
//! The ground level is built by an explicit room command; every added level
//! repeats the last room footprint one `level_height` higher. Level indices
//! only ever grow, so no index is reused.

use rustc_hash::FxHashMap;

use crate::config::DraftingConfig;
use crate::error::{DraftError, Result};
use crate::room_synth::{ObjectIdAllocator, RoomFootprint, RoomSynthesizer};
use crate::store::ObjectSink;
use crate::types::{FloorLevel, ObjectId, WallObject};

/// Bookkeeping for one level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRecord {
    pub level: FloorLevel,
    pub objects: Vec<ObjectId>,
    pub price: f64,
}

/// Tracks the active level and the footprint reused for new levels.
#[derive(Debug, Clone)]
pub struct FloorStack {
    current: FloorLevel,
    footprint: Option<RoomFootprint>,
    levels: FxHashMap<u32, LevelRecord>,
    /// Source of level height and palette.
    config: DraftingConfig,
}

impl FloorStack {
    pub fn new(config: &DraftingConfig) -> Self {
        let ground = FloorLevel::new(0, config.level_height, config.level_color(0));
        let mut levels = FxHashMap::default();
        levels.insert(
            0,
            LevelRecord {
                level: ground.clone(),
                objects: Vec::new(),
                price: 0.0,
            },
        );

        Self {
            current: ground,
            footprint: None,
            levels,
            config: config.clone(),
        }
    }

    /// The level new geometry is placed on.
    pub fn current_level(&self) -> &FloorLevel {
        &self.current
    }

    pub fn current_index(&self) -> u32 {
        self.current.index
    }

    /// Footprint reused by [`add_level`](Self::add_level).
    pub fn footprint(&self) -> Option<&RoomFootprint> {
        self.footprint.as_ref()
    }

    pub fn level(&self, index: u32) -> Option<&LevelRecord> {
        self.levels.get(&index)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Price of everything emitted across all levels.
    pub fn total_price(&self) -> f64 {
        self.levels.values().map(|record| record.price).sum()
    }

    /// Record objects emitted on the current level.
    pub fn record(&mut self, objects: &[WallObject]) {
        let current = self.current.clone();
        let record = self.levels.entry(current.index).or_insert_with(|| LevelRecord {
            level: current,
            objects: Vec::new(),
            price: 0.0,
        });
        for object in objects {
            record.objects.push(object.id);
            record.price += object.price;
        }
    }

    /// Synthesize a room on the current level, append it, and remember its footprint.
    pub fn emit_room<S: ObjectSink>(
        &mut self,
        footprint: RoomFootprint,
        rooms: &RoomSynthesizer,
        ids: &mut ObjectIdAllocator,
        sink: &mut S,
    ) -> Result<Vec<ObjectId>> {
        let objects = rooms.synthesize(ids, &footprint, &self.current)?;
        self.footprint = Some(footprint);
        Ok(self.commit(objects, sink))
    }

    /// Stack a new level on top and repeat the last footprint there.
    pub fn add_level<S: ObjectSink>(
        &mut self,
        rooms: &RoomSynthesizer,
        ids: &mut ObjectIdAllocator,
        sink: &mut S,
    ) -> Result<(FloorLevel, Vec<ObjectId>)> {
        let footprint = self
            .footprint
            .ok_or(DraftError::InvalidModeTransition("add level before any room exists"))?;

        let index = self.current.index + 1;
        let level = FloorLevel::new(index, self.config.level_height, self.config.level_color(index));

        // Synthesize before switching levels so a failure changes nothing
        let objects = rooms.synthesize(ids, &footprint, &level)?;

        self.current = level.clone();
        let ids = self.commit(objects, sink);

        tracing::info!(
            floor_index = level.index,
            vertical_offset = level.vertical_offset,
            objects = ids.len(),
            "Added building level"
        );

        Ok((level, ids))
    }

    fn commit<S: ObjectSink>(&mut self, objects: Vec<WallObject>, sink: &mut S) -> Vec<ObjectId> {
        self.record(&objects);
        let ids = objects.iter().map(|o| o.id).collect();
        for object in objects {
            sink.append(object);
        }
        ids
    }
}
