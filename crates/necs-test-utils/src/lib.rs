//! Test utilities for necs development.
//!
//! Provides a reference model ([`ModelSet`]) that mirrors a [`SparseSet`]
//! with an ordinary map, and [`assert_consistent`] which checks a set's
//! internal invariants through its public API.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use indexmap::IndexMap;

use necs_core::EntityId;
use necs_storage::SparseSet;

/// Reference model of a sparse set: entity -> payload bytes.
///
/// Backed by an `IndexMap` so iteration order is deterministic across runs.
/// Apply the same operations to a `ModelSet` and a [`SparseSet`], then
/// compare them with [`assert_matches_model`].
#[derive(Clone, Debug, Default)]
pub struct ModelSet {
    entries: IndexMap<EntityId, Vec<u8>>,
}

impl ModelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an add. Returns `false` if the entity was already present,
    /// mirroring `SparseSet::add` failing.
    pub fn add(&mut self, entity: EntityId, payload: &[u8]) -> bool {
        if self.entries.contains_key(&entity) {
            return false;
        }
        self.entries.insert(entity, payload.to_vec());
        true
    }

    /// Record a remove. Returns whether the entity was present.
    pub fn remove(&mut self, entity: EntityId) -> bool {
        self.entries.swap_remove(&entity).is_some()
    }

    pub fn get(&self, entity: EntityId) -> Option<&[u8]> {
        self.entries.get(&entity).map(|v| v.as_slice())
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.entries.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Check the bidirectional invariant of `set`.
///
/// For every dense index `i`, the owning entity must resolve back to `i`
/// and must be reported present. No entity may own two slots.
///
/// # Panics
///
/// Panics with a description of the first violation found.
pub fn assert_consistent(set: &SparseSet) {
    let mut seen = std::collections::HashSet::new();
    for i in 0..set.count() {
        let owner = set.entity_at(i);
        assert!(
            owner.0 < set.sparse_capacity(),
            "dense slot {i} owned by {owner}, outside key space {}",
            set.sparse_capacity()
        );
        assert!(seen.insert(owner), "entity {owner} owns more than one slot");
        assert_eq!(
            set.dense_index(owner),
            Some(i),
            "entity {owner} at dense slot {i} does not resolve back"
        );
        assert!(set.has(owner), "entity {owner} at dense slot {i} reported absent");
        assert_eq!(set.component_at(i).len(), set.element_size());
    }
    assert_eq!(set.entities().len(), set.count() as usize);
}

/// Check that `set` holds exactly the entries of `model`.
///
/// Every id in the key space is probed, so absent ids are checked too.
pub fn assert_matches_model(set: &SparseSet, model: &ModelSet) {
    assert_consistent(set);
    assert_eq!(set.count() as usize, model.len(), "count differs from model");
    for id in 0..set.sparse_capacity() {
        let entity = EntityId(id);
        assert_eq!(
            set.has(entity),
            model.contains(entity),
            "presence of {entity} differs from model"
        );
        assert_eq!(set.get(entity), model.get(entity), "payload of {entity} differs");
    }
}
