//! Core abstractions for schema dumping.
//!
//! - [`schema`]: column, index and default-value metadata types
//! - [`types`]: semantic column type tags
//! - [`traits`]: metadata source, type extension and literal quoting seams
//!
//! # Architecture
//!
//! Nothing here knows about spatial types beyond the tag names and the
//! optional [`SpatialAttrs`] slot on [`Column`]. Recognising and rendering
//! geometries is the job of a [`ColumnTypeExtension`] registered with the
//! dumper (see [`crate::spatial`]).

pub mod schema;
pub mod traits;
pub mod types;

pub use schema::{Column, ColumnDescriptor, DefaultValue, Index, SpatialAttrs, UNSPECIFIED_SRID};
pub use traits::{ColumnTypeExtension, LiteralQuoter, MetadataSource};
pub use types::ColumnType;
