//! Reusable payloads and pre-populated sets.
//!
//! - [`payload`]: a 4-byte record encoding a `u32`.
//! - [`populated_set`]: a set holding ids `0..n` with `payload(id * 10)`.
//! - [`Op`] / [`apply`]: drive a set and a [`ModelSet`] in lockstep.

use necs_core::{EntityId, Record};
use necs_storage::SparseSet;

use crate::ModelSet;

/// Encode `value` as a 4-byte record.
pub fn payload(value: u32) -> [u8; 4] {
    value.to_ne_bytes()
}

/// Decode a 4-byte record produced by [`payload`].
pub fn read_payload(bytes: &[u8]) -> u32 {
    u32::read_bytes(bytes)
}

/// A set of 4-byte records over `sparse_capacity` ids holding entities
/// `0..n`, each with `payload(id * 10)`.
///
/// # Panics
///
/// Panics if `n > sparse_capacity`.
pub fn populated_set(n: u32, sparse_capacity: u32) -> SparseSet {
    let mut set = SparseSet::new(4, sparse_capacity);
    for id in 0..n {
        set.insert(EntityId(id), &payload(id * 10))
            .expect("fixture ids are distinct and in range");
    }
    set
}

/// One mutation applied to both a set and its model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add { entity: u32, value: u32 },
    Remove { entity: u32 },
    Clear,
}

/// Apply `op` to `set` and `model`, asserting they agree on the outcome.
pub fn apply(set: &mut SparseSet, model: &mut ModelSet, op: Op) {
    match op {
        Op::Add { entity, value } => {
            let bytes = payload(value);
            let expected = model.add(EntityId(entity), &bytes);
            let added = set.insert(EntityId(entity), &bytes).is_ok();
            assert_eq!(added, expected, "add({entity}) outcome differs from model");
        }
        Op::Remove { entity } => {
            let expected = model.remove(EntityId(entity));
            assert_eq!(
                set.remove(EntityId(entity)),
                expected,
                "remove({entity}) outcome differs from model"
            );
        }
        Op::Clear => {
            model.clear();
            set.clear();
        }
    }
}
