//! Metadata source implementations.
//!
//! Live database drivers live outside this crate and implement
//! [`MetadataSource`](crate::core::MetadataSource) themselves. The
//! [`SnapshotSource`] here reads previously captured metadata from disk.

mod snapshot;

pub use snapshot::{IndexSnapshot, SchemaSnapshot, SnapshotSource, TableSnapshot};
