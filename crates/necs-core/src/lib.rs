//! Core types for the necs storage layer.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! entity identifier, the fixed-size [`Record`] encoding used by the
//! type-erased containers, and the error types shared across the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod record;

pub use error::{ConfigError, StorageError};
pub use id::EntityId;
pub use record::Record;
