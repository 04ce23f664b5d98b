//! necs: sparse-set component storage for entity/component frameworks.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the necs sub-crates. For most users, adding `necs` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use necs::prelude::*;
//!
//! // Type-erased: 4-byte records for entity ids 0..4.
//! let mut set = SparseSet::new(4, 4);
//! for (id, value) in [(0u32, 10u32), (1, 20), (2, 30)] {
//!     value.write_bytes(set.add(EntityId(id)).unwrap());
//! }
//! set.remove(EntityId(1));
//! assert!(!set.has(EntityId(1)));
//! assert_eq!(set.get(EntityId(2)).map(u32::read_bytes), Some(30));
//!
//! // Typed: the record size comes from the value type.
//! let mut positions: ComponentSet<[f32; 2]> = ComponentSet::new(1024);
//! positions.insert(EntityId(7), [1.0, 2.0]).unwrap();
//! assert_eq!(positions.get(EntityId(7)), Some([1.0, 2.0]));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `necs-core` | `EntityId`, `Record`, error types |
//! | [`storage`] | `necs-storage` | `BlobVec`, `SparseSet`, `ComponentSet`, config |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core identifiers, record encoding and errors (`necs-core`).
pub use necs_core as types;

/// Growable record arrays and sparse sets (`necs-storage`).
///
/// [`storage::SparseSet`] is the type-erased core;
/// [`storage::ComponentSet`] is its typed counterpart.
pub use necs_storage as storage;

/// Common imports for typical necs usage.
///
/// ```rust
/// use necs::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use necs_core::{EntityId, Record};

    // Errors
    pub use necs_core::{ConfigError, StorageError};

    // Containers
    pub use necs_storage::{BlobVec, ComponentSet, SparseSet, SparseSetConfig};
}
