//! # geo-schema-dump
//!
//! Dump live table metadata as re-executable schema definitions.
//!
//! Given the columns and indexes of a table, this library writes a
//! `create_table` block with aligned column lines followed by `add_index`
//! statements, including spatial columns and indexes:
//!
//! - **Type classification** of raw SQL types, extensible via plugins
//! - **Spatial support** for geometry columns (SRID, Z/M flags) and indexes
//! - **Deterministic output** suitable for diffing schema snapshots
//! - **Per-table failure isolation**: a bad table becomes a comment, the
//!   rest of the dump goes on
//!
//! ## Example
//!
//! ```rust,no_run
//! use geo_schema_dump::{SchemaDumper, SnapshotSource};
//!
//! fn main() -> geo_schema_dump::Result<()> {
//!     let source = SnapshotSource::load("schema.yaml")?;
//!     let dumper = SchemaDumper::with_spatial();
//!     dumper.dump(&source, &mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod dumper;
pub mod error;
pub mod source;
pub mod spatial;
pub mod typemap;

// Re-exports for convenient access
pub use config::Config;
pub use core::{
    Column, ColumnDescriptor, ColumnType, ColumnTypeExtension, DefaultValue, Index,
    LiteralQuoter, MetadataSource, SpatialAttrs,
};
pub use dumper::SchemaDumper;
pub use error::{DumpError, Result};
pub use source::SnapshotSource;
pub use spatial::SpatialExtension;
pub use typemap::{TypeClassifier, TypeRegistry};
