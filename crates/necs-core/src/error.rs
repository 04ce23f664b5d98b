//! Error types for the necs storage layer.
//!
//! Only domain failures with a defined outcome are represented here.
//! Precondition violations on the unchecked accessors (dense index out of
//! range, reading the last record of an empty array) are debug assertions,
//! and allocation failure aborts through the global allocator.

use std::error::Error;
use std::fmt;

use crate::id::EntityId;

/// Errors from sparse set mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// The entity already has a record in this set. The set is unchanged.
    AlreadyPresent {
        /// The entity that was added twice.
        entity: EntityId,
    },
    /// The entity id lies outside the set's fixed key space.
    EntityOutOfRange {
        /// The rejected entity.
        entity: EntityId,
        /// The set's sparse capacity (exclusive upper bound on ids).
        capacity: u32,
    },
    /// A byte record did not match the set's element size.
    RecordSizeMismatch {
        /// Element size the set was created with.
        expected: usize,
        /// Length of the supplied record.
        actual: usize,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyPresent { entity } => {
                write!(f, "entity {entity} already has a record in this set")
            }
            Self::EntityOutOfRange { entity, capacity } => {
                write!(f, "entity {entity} out of range for sparse capacity {capacity}")
            }
            Self::RecordSizeMismatch { expected, actual } => {
                write!(f, "record size mismatch: expected {expected} bytes, got {actual}")
            }
        }
    }
}

impl Error for StorageError {}

/// Errors from validating a sparse set configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// More dense slots were requested up front than keys can ever be mapped.
    InitialCapacityTooLarge {
        /// Requested initial dense capacity.
        initial: u32,
        /// The configured sparse capacity.
        sparse_capacity: u32,
    },
    /// The dense payload buffer size would overflow `usize`.
    RecordTooLarge {
        /// Configured element size in bytes.
        element_size: usize,
        /// Number of records the buffer must hold.
        capacity: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitialCapacityTooLarge {
                initial,
                sparse_capacity,
            } => {
                write!(
                    f,
                    "initial dense capacity {initial} exceeds sparse capacity {sparse_capacity}"
                )
            }
            Self::RecordTooLarge {
                element_size,
                capacity,
            } => {
                write!(
                    f,
                    "{capacity} records of {element_size} bytes overflow the address space"
                )
            }
        }
    }
}

impl Error for ConfigError {}
