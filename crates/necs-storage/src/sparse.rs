//! Sparse set mapping entity ids to densely packed records.
//!
//! [`SparseSet`] keeps three arrays in step:
//!
//! ```text
//! sparse:    [ 1 | ~ | 0 | ~ ]   entity id -> dense index (or stale)
//! entities:  [ 2 | 0 ]           dense index -> owning entity id
//! dense:     [ c | a ]           dense index -> payload record
//! ```
//!
//! For every mapped entity `e` at dense index `i`, `sparse[e] == i` and
//! `entities[i] == e`. Removal swaps the last dense slot into the hole and
//! re-points the moved entity's sparse entry, so all three operations are
//! O(1) and the dense arrays stay gap-free for iteration.
//!
//! Sparse entries are never cleared. An entry is only trusted after
//! checking that it is below `count()` and that the owning-entity slot it
//! points at names the same entity; anything else is a leftover from an
//! earlier add/remove cycle.

use std::fmt;

use necs_core::{ConfigError, EntityId, Record, StorageError};

use crate::blob_vec::{BlobVec, Records, RecordsMut};
use crate::config::SparseSetConfig;

/// Sparse entry value for ids that have never been mapped.
///
/// Never a valid dense index because `count() <= sparse_capacity() <= u32::MAX`.
pub const UNMAPPED: u32 = u32::MAX;

/// A type-erased sparse set over a fixed entity key space.
///
/// Payload records are untyped byte slices of [`element_size`](Self::element_size)
/// bytes. Views into dense storage borrow the set, so they end before the
/// next `add`, `remove` or `clear`.
#[derive(Clone)]
pub struct SparseSet {
    /// Payload records, index-aligned with `entities`.
    dense: BlobVec,
    /// Owning entity id of each dense slot, stored as `EntityId` records.
    entities: BlobVec,
    /// Entity id -> dense index. Possibly stale; see module docs.
    sparse: Box<[u32]>,
}

impl SparseSet {
    /// Create an empty set of `element_size`-byte records for entity ids in
    /// `[0, sparse_capacity)`.
    pub fn new(element_size: usize, sparse_capacity: u32) -> Self {
        Self::with_dense_capacity(element_size, sparse_capacity, 0)
    }

    /// Create an empty set from a validated configuration.
    pub fn from_config(config: &SparseSetConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_dense_capacity(
            config.element_size,
            config.sparse_capacity,
            config.initial_dense_capacity,
        ))
    }

    fn with_dense_capacity(element_size: usize, sparse_capacity: u32, dense_capacity: u32) -> Self {
        Self {
            dense: BlobVec::with_capacity(element_size, dense_capacity),
            entities: BlobVec::with_capacity(EntityId::SIZE, dense_capacity),
            sparse: vec![UNMAPPED; sparse_capacity as usize].into_boxed_slice(),
        }
    }

    /// Whether `entity` currently has a record.
    ///
    /// Ids outside the key space are never present.
    #[inline]
    pub fn has(&self, entity: EntityId) -> bool {
        self.dense_index(entity).is_some()
    }

    /// The dense index `entity` resolves to, if it is present.
    #[inline]
    pub fn dense_index(&self, entity: EntityId) -> Option<u32> {
        let &index = self.sparse.get(entity.index())?;
        (index < self.count() && self.entity_at(index) == entity).then_some(index)
    }

    /// Map `entity` to a new dense slot and return the slot's payload bytes.
    ///
    /// The returned slot may hold bytes from an earlier record; the caller
    /// writes the whole record. Fails without touching the set if `entity`
    /// is already present or outside the key space.
    pub fn add(&mut self, entity: EntityId) -> Result<&mut [u8], StorageError> {
        if entity.index() >= self.sparse.len() {
            return Err(StorageError::EntityOutOfRange {
                entity,
                capacity: self.sparse_capacity(),
            });
        }
        if self.has(entity) {
            return Err(StorageError::AlreadyPresent { entity });
        }

        let index = self.count();
        self.entities.push_record(&entity);
        self.sparse[entity.index()] = index;
        Ok(self.dense.append())
    }

    /// Map `entity` to a copy of `record`.
    ///
    /// `record` must be exactly [`element_size`](Self::element_size) bytes.
    pub fn insert(&mut self, entity: EntityId, record: &[u8]) -> Result<(), StorageError> {
        if record.len() != self.element_size() {
            return Err(StorageError::RecordSizeMismatch {
                expected: self.element_size(),
                actual: record.len(),
            });
        }
        self.add(entity)?.copy_from_slice(record);
        Ok(())
    }

    /// The payload of `entity`, or `None` if it is absent.
    pub fn get(&self, entity: EntityId) -> Option<&[u8]> {
        let index = self.dense_index(entity)?;
        Some(self.dense.get(index))
    }

    /// The payload of `entity` for in-place mutation, or `None` if absent.
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut [u8]> {
        let index = self.dense_index(entity)?;
        Some(self.dense.get_mut(index))
    }

    /// Unmap `entity`, returning whether it was present.
    ///
    /// The last dense record moves into the vacated slot, and the moved
    /// entity's sparse entry is re-pointed at it. The removed entity's own
    /// sparse entry is left stale.
    pub fn remove(&mut self, entity: EntityId) -> bool {
        let Some(index) = self.dense_index(entity) else {
            return false;
        };
        let last = self.count() - 1;

        self.dense.remove(index);
        self.entities.remove(index);

        if index != last {
            let moved = self.entity_at(index);
            self.sparse[moved.index()] = index;
        }
        true
    }

    /// Unmap every entity. Dense capacity is kept.
    ///
    /// The sparse array is not touched: with no live dense slots, every
    /// entry fails the presence check.
    pub fn clear(&mut self) {
        self.dense.clear();
        self.entities.clear();
    }

    /// Payload at dense `index`. `index` must be below [`count`](Self::count).
    #[inline]
    pub fn component_at(&self, index: u32) -> &[u8] {
        self.dense.get(index)
    }

    /// Payload at dense `index`, mutably. `index` must be below [`count`](Self::count).
    #[inline]
    pub fn component_at_mut(&mut self, index: u32) -> &mut [u8] {
        self.dense.get_mut(index)
    }

    /// Owning entity of dense `index`. `index` must be below [`count`](Self::count).
    #[inline]
    pub fn entity_at(&self, index: u32) -> EntityId {
        self.entities.read_record(index)
    }

    /// Number of mapped entities.
    #[inline]
    pub fn count(&self) -> u32 {
        self.dense.len()
    }

    /// Whether no entity is mapped.
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Size of one payload record in bytes.
    pub fn element_size(&self) -> usize {
        self.dense.element_size()
    }

    /// Size of the entity key space. Fixed at construction.
    pub fn sparse_capacity(&self) -> u32 {
        self.sparse.len() as u32
    }

    /// Number of dense slots available without reallocating.
    pub fn dense_capacity(&self) -> u32 {
        self.dense.capacity().min(self.entities.capacity())
    }

    /// Ensure room for `additional` more entities in both dense arrays.
    pub fn reserve(&mut self, additional: u32) {
        self.dense.reserve(additional);
        self.entities.reserve(additional);
    }

    /// Total memory held by the dense and sparse arrays in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.dense.memory_bytes()
            + self.entities.memory_bytes()
            + std::mem::size_of_val(&*self.sparse)
    }

    /// Iterate over the mapped entities in dense order.
    pub fn entities(&self) -> Entities<'_> {
        Entities {
            records: self.entities.iter(),
        }
    }

    /// Iterate over `(entity, payload)` pairs in dense order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            entities: self.entities(),
            records: self.dense.iter(),
        }
    }

    /// Iterate over `(entity, payload)` pairs with mutable payloads.
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            entities: Entities {
                records: self.entities.iter(),
            },
            records: self.dense.iter_mut(),
        }
    }
}

impl fmt::Debug for SparseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseSet")
            .field("element_size", &self.element_size())
            .field("sparse_capacity", &self.sparse_capacity())
            .field("count", &self.count())
            .field("entities", &self.entities().collect::<Vec<_>>())
            .finish()
    }
}

/// Iterator over the entities of a [`SparseSet`] in dense order.
#[derive(Clone, Debug)]
pub struct Entities<'a> {
    records: Records<'a>,
}

impl Iterator for Entities<'_> {
    type Item = EntityId;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(EntityId::read_bytes)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for Entities<'_> {}

/// Iterator over `(entity, payload)` pairs of a [`SparseSet`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    entities: Entities<'a>,
    records: Records<'a>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (EntityId, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        Some((self.entities.next()?, self.records.next()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entities.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Iterator over `(entity, mutable payload)` pairs of a [`SparseSet`].
#[derive(Debug)]
pub struct IterMut<'a> {
    entities: Entities<'a>,
    records: RecordsMut<'a>,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (EntityId, &'a mut [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        Some((self.entities.next()?, self.records.next()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entities.size_hint()
    }
}

impl ExactSizeIterator for IterMut<'_> {}
