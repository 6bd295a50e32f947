//! Type classification and the type registry.
//!
//! [`TypeClassifier`] turns raw SQL type strings into [`ColumnType`] tags.
//! [`TypeRegistry`] records, per tag, the native name and the default limit
//! the builder compares column limits against.

mod classify;

pub use classify::{classify_base, TypeClassifier};

use std::collections::BTreeMap;

use crate::core::ColumnType;

/// What the registry knows about one column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Native type name (e.g. "character varying", "MULTIPOLYGON").
    pub name: String,
    /// Limit the database applies when none is given.
    pub limit: Option<i64>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Registered column types.
///
/// A column whose tag is missing here cannot be dumped.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<ColumnType, TypeDescriptor>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the base (non-spatial) types.
    ///
    /// No default limits are registered; use [`TypeRegistry::set_limit`] to
    /// declare the limits the target database applies implicitly.
    pub fn with_base_types() -> Self {
        let mut registry = Self::new();
        for (column_type, name) in [
            (ColumnType::Boolean, "boolean"),
            (ColumnType::Integer, "integer"),
            (ColumnType::Float, "float"),
            (ColumnType::Decimal, "decimal"),
            (ColumnType::Datetime, "timestamp"),
            (ColumnType::Date, "date"),
            (ColumnType::Timestamp, "timestamp"),
            (ColumnType::Time, "time"),
            (ColumnType::Text, "text"),
            (ColumnType::String, "character varying"),
            (ColumnType::Binary, "bytea"),
        ] {
            registry.register(column_type, TypeDescriptor::new(name));
        }
        registry
    }

    /// Add or replace a type.
    pub fn register(&mut self, column_type: ColumnType, descriptor: TypeDescriptor) {
        self.types.insert(column_type, descriptor);
    }

    /// Override the default limit of a registered type.
    ///
    /// Returns `false` when the type is not registered.
    pub fn set_limit(&mut self, column_type: ColumnType, limit: Option<i64>) -> bool {
        match self.types.get_mut(&column_type) {
            Some(descriptor) => {
                descriptor.limit = limit;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, column_type: ColumnType) -> Option<&TypeDescriptor> {
        self.types.get(&column_type)
    }

    pub fn contains(&self, column_type: ColumnType) -> bool {
        self.types.contains_key(&column_type)
    }

    /// Default limit for a type (`None` if unregistered or unlimited).
    pub fn default_limit(&self, column_type: ColumnType) -> Option<i64> {
        self.get(column_type).and_then(|d| d.limit)
    }
}
