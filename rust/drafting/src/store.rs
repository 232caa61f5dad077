// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Destination for synthesized objects.
//!
//! The drafting engine only ever appends. [`ObjectStore`] is a ready-made sink
//! with stable generational keys for hosts that also need lookup and removal.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::types::{ObjectId, WallObject};

/// Append-only destination for emitted objects.
pub trait ObjectSink {
    fn append(&mut self, object: WallObject);
}

impl ObjectSink for Vec<WallObject> {
    fn append(&mut self, object: WallObject) {
        self.push(object);
    }
}

new_key_type! {
    /// Key for an object held by an [`ObjectStore`].
    pub struct ObjectKey;
}

/// Slot-map backed object list.
#[derive(Debug, Default)]
pub struct ObjectStore {
    objects: SlotMap<ObjectKey, WallObject>,
    by_id: FxHashMap<ObjectId, ObjectKey>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: WallObject) -> ObjectKey {
        let id = object.id;
        let key = self.objects.insert(object);
        self.by_id.insert(id, key);
        key
    }

    pub fn get(&self, key: ObjectKey) -> Option<&WallObject> {
        self.objects.get(key)
    }

    pub fn get_by_id(&self, id: ObjectId) -> Option<&WallObject> {
        self.by_id.get(&id).and_then(|key| self.objects.get(*key))
    }

    /// Explicit removal; the key is never valid again.
    pub fn remove(&mut self, key: ObjectKey) -> Option<WallObject> {
        let object = self.objects.remove(key)?;
        self.by_id.remove(&object.id);
        Some(object)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &WallObject)> {
        self.objects.iter()
    }

    /// Objects on one building level.
    pub fn on_floor(&self, floor_index: u32) -> impl Iterator<Item = &WallObject> {
        self.objects.values().filter(move |o| o.floor_index == floor_index)
    }

    pub fn total_price(&self) -> f64 {
        self.objects.values().map(|o| o.price).sum()
    }

    /// Objects ordered by id, i.e. in emission order.
    pub fn to_sorted_vec(&self) -> Vec<WallObject> {
        let mut objects: Vec<WallObject> = self.objects.values().cloned().collect();
        objects.sort_by_key(|o| o.id);
        objects
    }
}

impl ObjectSink for ObjectStore {
    fn append(&mut self, object: WallObject) {
        self.insert(object);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObjectKind;
    use blueprint_geometry::{BoundingBox, Vec3};

    fn object(id: u64, floor_index: u32, price: f64) -> WallObject {
        WallObject {
            id: ObjectId(id),
            kind: ObjectKind::Wall,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::new(1.0, 3.0, 0.2),
            bounding_box: BoundingBox::default(),
            price,
            floor_index,
            segment: None,
            color: None,
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut store = ObjectStore::new();
        let key = store.insert(object(3, 0, 10.0));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(key).map(|o| o.id), Some(ObjectId(3)));
        assert!(store.get_by_id(ObjectId(3)).is_some());
    }

    #[test]
    fn test_removed_key_stays_invalid() {
        let mut store = ObjectStore::new();
        let key = store.insert(object(0, 0, 10.0));
        store.remove(key);
        store.insert(object(1, 0, 10.0));

        assert!(store.get(key).is_none());
        assert!(store.get_by_id(ObjectId(0)).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_floor_queries_and_totals() {
        let mut store = ObjectStore::new();
        store.append(object(0, 0, 10.0));
        store.append(object(1, 1, 20.0));
        store.append(object(2, 1, 5.0));

        assert_eq!(store.on_floor(1).count(), 2);
        assert_eq!(store.total_price(), 35.0);
        let ids: Vec<u64> = store.to_sorted_vec().iter().map(|o| o.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<WallObject> = Vec::new();
        ObjectSink::append(&mut sink, object(0, 0, 1.0));
        assert_eq!(sink.len(), 1);
    }
}
