//! Core traits for the schema dumper.
//!
//! - [`MetadataSource`]: supplies table, column and index metadata
//! - [`ColumnTypeExtension`]: plugs extra types into classification and rendering
//! - [`LiteralQuoter`]: renders column defaults as source literals
//!
//! # Design Patterns
//!
//! - **Strategy**: `LiteralQuoter` and the extensions are interchangeable
//! - **Template Method**: the table dumper owns the rendering skeleton and
//!   calls extensions at fixed hook points (classification, column
//!   attributes, index qualifiers)

use crate::dumper::AttributeKey;
use crate::error::Result;
use crate::typemap::TypeRegistry;

use super::schema::{Column, ColumnDescriptor, DefaultValue, Index};
use super::types::ColumnType;

/// Read-only access to schema metadata.
///
/// Implementations wrap a database connection, a snapshot file, or test
/// fixtures. Every method is called at most once per table per dump.
pub trait MetadataSource {
    /// Names of all tables, in any order.
    fn tables(&self) -> Result<Vec<String>>;

    /// Column descriptors of a table, in ordinal order.
    fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>>;

    /// Indexes of a table, in the order the database reports them.
    fn indexes(&self, table: &str) -> Result<Vec<Index>>;

    /// Primary key column name, if the source can tell.
    fn primary_key(&self, _table: &str) -> Result<Option<String>> {
        Ok(None)
    }

    /// Schema version recorded by the migration engine, if any.
    fn schema_version(&self) -> Option<i64> {
        None
    }
}

/// Plugin that extends the base type system.
///
/// The dumper never knows about concrete extensions; it only calls these
/// hooks. Every hook has a no-op default so an extension implements only
/// what it adds.
pub trait ColumnTypeExtension: Send + Sync {
    /// Extension identifier, used in logs.
    fn name(&self) -> &str;

    /// Classify a raw SQL type the base rules did not recognise.
    fn classify(&self, _sql_type: &str) -> Option<ColumnType> {
        None
    }

    /// Add descriptors for the types this extension introduces.
    fn register_types(&self, _registry: &mut TypeRegistry) {}

    /// Extra `(key, value)` attributes for a column. Values are rendered
    /// literals without the key prefix.
    fn column_attributes(&self, _column: &Column) -> Vec<(AttributeKey, String)> {
        Vec::new()
    }

    /// Extra qualifiers appended to an `add_index` statement, after
    /// `:unique` and `:spatial`.
    fn index_qualifiers(&self, _index: &Index) -> Vec<String> {
        Vec::new()
    }
}

/// Renders a column default as a literal in the dump.
pub trait LiteralQuoter {
    fn quote(&self, value: &DefaultValue, column_type: ColumnType) -> String;
}

impl<F> LiteralQuoter for F
where
    F: Fn(&DefaultValue, ColumnType) -> String,
{
    fn quote(&self, value: &DefaultValue, column_type: ColumnType) -> String {
        self(value, column_type)
    }
}
