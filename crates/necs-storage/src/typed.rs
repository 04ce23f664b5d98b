//! Statically typed view over a [`SparseSet`].
//!
//! [`ComponentSet<T>`] fixes the element size to `T::SIZE` at compile time,
//! so callers cannot hand a record of the wrong size to the erased set.

use std::marker::PhantomData;

use necs_core::{ConfigError, EntityId, Record, StorageError};

use crate::config::SparseSetConfig;
use crate::sparse::SparseSet;

/// A sparse set of `T` values keyed by [`EntityId`].
#[derive(Clone, Debug)]
pub struct ComponentSet<T: Record> {
    set: SparseSet,
    _marker: PhantomData<T>,
}

impl<T: Record> ComponentSet<T> {
    /// Create an empty set for entity ids in `[0, sparse_capacity)`.
    pub fn new(sparse_capacity: u32) -> Self {
        Self {
            set: SparseSet::new(T::SIZE, sparse_capacity),
            _marker: PhantomData,
        }
    }

    /// Create an empty set with `initial_capacity` dense slots preallocated.
    pub fn with_capacity(sparse_capacity: u32, initial_capacity: u32) -> Result<Self, ConfigError> {
        let config =
            SparseSetConfig::for_record::<T>(sparse_capacity).initial_dense_capacity(initial_capacity);
        Ok(Self {
            set: SparseSet::from_config(&config)?,
            _marker: PhantomData,
        })
    }

    /// Store `value` for `entity`.
    ///
    /// Fails with [`StorageError::AlreadyPresent`] rather than overwriting;
    /// use [`replace`](Self::replace) to change an existing value.
    pub fn insert(&mut self, entity: EntityId, value: T) -> Result<(), StorageError> {
        value.write_bytes(self.set.add(entity)?);
        Ok(())
    }

    /// The value stored for `entity`.
    pub fn get(&self, entity: EntityId) -> Option<T> {
        self.set.get(entity).map(T::read_bytes)
    }

    /// Whether `entity` has a value.
    pub fn contains(&self, entity: EntityId) -> bool {
        self.set.has(entity)
    }

    /// Overwrite the value of a present `entity`, returning the old value.
    ///
    /// Returns `None` and stores nothing if `entity` is absent.
    pub fn replace(&mut self, entity: EntityId, value: T) -> Option<T> {
        let slot = self.set.get_mut(entity)?;
        let old = T::read_bytes(slot);
        value.write_bytes(slot);
        Some(old)
    }

    /// Apply `f` to the value of `entity` in place. Returns whether it was present.
    pub fn update(&mut self, entity: EntityId, f: impl FnOnce(&mut T)) -> bool {
        let Some(slot) = self.set.get_mut(entity) else {
            return false;
        };
        let mut value = T::read_bytes(slot);
        f(&mut value);
        value.write_bytes(slot);
        true
    }

    /// Remove and return the value of `entity`.
    pub fn remove(&mut self, entity: EntityId) -> Option<T> {
        let value = self.get(entity)?;
        self.set.remove(entity);
        Some(value)
    }

    /// Remove every value.
    pub fn clear(&mut self) {
        self.set.clear();
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.set.count() as usize
    }

    /// Whether the set holds no values.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Size of the entity key space.
    pub fn sparse_capacity(&self) -> u32 {
        self.set.sparse_capacity()
    }

    /// Iterate over `(entity, value)` pairs in dense order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (EntityId, T)> + '_ {
        self.set
            .iter()
            .map(|(entity, bytes)| (entity, T::read_bytes(bytes)))
    }

    /// The underlying type-erased set.
    pub fn as_sparse(&self) -> &SparseSet {
        &self.set
    }
}
