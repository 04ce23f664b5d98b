//! Sparse set configuration parameters.

use necs_core::{ConfigError, Record};

/// Configuration for a [`SparseSet`](crate::SparseSet).
///
/// Controls record size, the fixed key space, and how many dense slots to
/// allocate up front. Validated by
/// [`SparseSet::from_config`](crate::SparseSet::from_config).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseSetConfig {
    /// Size of one payload record in bytes. Zero is allowed.
    pub element_size: usize,

    /// Number of entity ids the set can map: ids in `[0, sparse_capacity)`.
    ///
    /// Fixed for the set's lifetime.
    pub sparse_capacity: u32,

    /// Dense slots allocated at construction.
    ///
    /// Default: 0 (no dense allocation until the first `add`).
    /// Must not exceed `sparse_capacity`.
    pub initial_dense_capacity: u32,
}

impl SparseSetConfig {
    /// Default number of dense slots allocated at construction.
    pub const DEFAULT_INITIAL_DENSE_CAPACITY: u32 = 0;

    /// Create a config for `element_size`-byte records over
    /// `sparse_capacity` entity ids.
    pub fn new(element_size: usize, sparse_capacity: u32) -> Self {
        Self {
            element_size,
            sparse_capacity,
            initial_dense_capacity: Self::DEFAULT_INITIAL_DENSE_CAPACITY,
        }
    }

    /// Create a config whose element size matches the record type `R`.
    pub fn for_record<R: Record>(sparse_capacity: u32) -> Self {
        Self::new(R::SIZE, sparse_capacity)
    }

    /// Set the number of dense slots allocated at construction.
    pub fn initial_dense_capacity(mut self, capacity: u32) -> Self {
        self.initial_dense_capacity = capacity;
        self
    }

    /// Check the configuration for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_dense_capacity > self.sparse_capacity {
            return Err(ConfigError::InitialCapacityTooLarge {
                initial: self.initial_dense_capacity,
                sparse_capacity: self.sparse_capacity,
            });
        }
        let records = self.initial_dense_capacity.max(1);
        if self.element_size.checked_mul(records as usize).is_none() {
            return Err(ConfigError::RecordTooLarge {
                element_size: self.element_size,
                capacity: records,
            });
        }
        Ok(())
    }

    /// Size of the initial dense payload allocation in bytes.
    pub fn dense_bytes(&self) -> usize {
        self.element_size
            .saturating_mul(self.initial_dense_capacity as usize)
    }
}
