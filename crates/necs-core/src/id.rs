//! Strongly-typed entity identifiers.

use std::fmt;

use crate::record::Record;

/// Identifies an entity within a sparse set's key space.
///
/// Entity ids are small non-negative integers handed out by an allocator
/// outside this crate. A sparse set accepts ids in `[0, sparse_capacity)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The id as an index into a sparse array.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl Record for EntityId {
    const SIZE: usize = <u32 as Record>::SIZE;

    #[inline]
    fn write_bytes(&self, out: &mut [u8]) {
        self.0.write_bytes(out);
    }

    #[inline]
    fn read_bytes(bytes: &[u8]) -> Self {
        Self(u32::read_bytes(bytes))
    }
}
