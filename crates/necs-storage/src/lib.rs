//! Growable record arrays and sparse sets for necs entity storage.
//!
//! Two containers, consumed bottom-up:
//!
//! ```text
//! SparseSet (entity id -> payload, O(1) add / get / remove)
//! ├── sparse: Box<[u32]>      entity id -> dense index (lazily invalidated)
//! ├── entities: BlobVec       dense index -> owning EntityId
//! └── dense: BlobVec          dense index -> payload record
//! ```
//!
//! [`BlobVec`] is a contiguous buffer of fixed-size byte records with
//! swap-remove. [`SparseSet`] drives two of them in lockstep. [`ComponentSet`]
//! layers a compile-time record type over the erased set.
//!
//! # Borrowed views
//!
//! Every view into dense storage (`append`, `add`, `get`, `component_at`,
//! iterators) borrows the container, so the borrow checker rejects any
//! attempt to hold one across a mutating call. The crate contains no
//! `unsafe` code.
//!
//! # Fixed key space
//!
//! A sparse set's key universe is fixed at construction. Ids at or above
//! `sparse_capacity` are reported absent and rejected by `add`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod blob_vec;
pub mod config;
pub mod sparse;
pub mod typed;

// Public re-exports for the primary API surface.
pub use blob_vec::BlobVec;
pub use config::SparseSetConfig;
pub use sparse::SparseSet;
pub use typed::ComponentSet;
