//! Workload profiles for benchmarking necs storage.
//!
//! - [`churn_ops`]: a deterministic add/remove sequence over a key space
//! - [`run_churn`]: replays such a sequence against a [`SparseSet`]
//! - [`filled_set`]: a set with every id in its key space present

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use necs_core::EntityId;
use necs_storage::SparseSet;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One step of a churn workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChurnOp {
    /// Add the entity (a no-op failure if already present).
    Add(EntityId),
    /// Remove the entity (a no-op if absent).
    Remove(EntityId),
}

/// Generate `len` churn operations over ids in `[0, key_space)`.
///
/// Adds and removes are equally likely. The sequence depends only on
/// `seed`, so benchmark runs are comparable.
pub fn churn_ops(seed: u64, key_space: u32, len: usize) -> Vec<ChurnOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let entity = EntityId(rng.random_range(0..key_space.max(1)));
            if rng.random_bool(0.5) {
                ChurnOp::Add(entity)
            } else {
                ChurnOp::Remove(entity)
            }
        })
        .collect()
}

/// Replay `ops` against `set`, writing `element_size` bytes of the entity id
/// into each new slot. Returns the number of operations that changed the set.
pub fn run_churn(set: &mut SparseSet, ops: &[ChurnOp]) -> usize {
    let mut changed = 0;
    for &op in ops {
        match op {
            ChurnOp::Add(entity) => {
                if let Ok(slot) = set.add(entity) {
                    slot.fill(entity.0 as u8);
                    changed += 1;
                }
            }
            ChurnOp::Remove(entity) => {
                if set.remove(entity) {
                    changed += 1;
                }
            }
        }
    }
    changed
}

/// A set of `element_size`-byte records with all `key_space` ids present.
pub fn filled_set(element_size: usize, key_space: u32) -> SparseSet {
    let mut set = SparseSet::new(element_size, key_space);
    set.reserve(key_space);
    for id in 0..key_space {
        if let Ok(slot) = set.add(EntityId(id)) {
            slot.fill(id as u8);
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn churn_ops_deterministic() {
        assert_eq!(churn_ops(42, 100, 500), churn_ops(42, 100, 500));
        assert_ne!(churn_ops(1, 100, 500), churn_ops(2, 100, 500));
    }

    #[test]
    fn churn_ops_stay_in_key_space() {
        for op in churn_ops(7, 10, 1000) {
            let (ChurnOp::Add(id) | ChurnOp::Remove(id)) = op;
            assert!(id.0 < 10, "id {id} out of key space");
        }
    }

    #[test]
    fn run_churn_counts_effective_ops() {
        let mut set = SparseSet::new(8, 4);
        let ops = [
            ChurnOp::Add(EntityId(1)),
            ChurnOp::Add(EntityId(1)),
            ChurnOp::Remove(EntityId(2)),
            ChurnOp::Remove(EntityId(1)),
        ];
        assert_eq!(run_churn(&mut set, &ops), 2);
        assert!(set.is_empty());
    }

    #[test]
    fn filled_set_is_full() {
        let set = filled_set(16, 64);
        assert_eq!(set.count(), 64);
        assert!((0..64).all(|id| set.has(EntityId(id))));
    }
}
