//! Per-column attribute specs.
//!
//! A [`ColumnSpec`] holds one column's rendered attributes. Values other than
//! the name are stored already prefixed with their key (`:limit => 255`) so
//! the aligner can measure them directly.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::{Column, ColumnType, ColumnTypeExtension, LiteralQuoter};
use crate::error::{DumpError, Result};
use crate::typemap::TypeRegistry;

use super::literal::quote_str;

/// Attribute keys that may appear on a column line.
///
/// Declaration order is the column order in the aligned output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKey {
    Name,
    Limit,
    Precision,
    Scale,
    Default,
    Null,
    Srid,
    WithZ,
    WithM,
}

impl AttributeKey {
    /// Keys in output order.
    pub const ALIGNED: [AttributeKey; 9] = [
        AttributeKey::Name,
        AttributeKey::Limit,
        AttributeKey::Precision,
        AttributeKey::Scale,
        AttributeKey::Default,
        AttributeKey::Null,
        AttributeKey::Srid,
        AttributeKey::WithZ,
        AttributeKey::WithM,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKey::Name => "name",
            AttributeKey::Limit => "limit",
            AttributeKey::Precision => "precision",
            AttributeKey::Scale => "scale",
            AttributeKey::Default => "default",
            AttributeKey::Null => "null",
            AttributeKey::Srid => "srid",
            AttributeKey::WithZ => "with_z",
            AttributeKey::WithM => "with_m",
        }
    }

    /// Pair a rendered value with this key. The name is never prefixed.
    pub fn pair(&self, value: &str) -> String {
        match self {
            AttributeKey::Name => value.to_string(),
            _ => format!(":{} => {}", self.as_str(), value),
        }
    }
}

/// Rendered attributes of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    column_type: String,
    fields: BTreeMap<AttributeKey, String>,
}

impl ColumnSpec {
    /// Start a spec with the mandatory name and type.
    pub fn new(name: &str, column_type: ColumnType) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(AttributeKey::Name, quote_str(name));
        Self {
            column_type: column_type.as_str().to_string(),
            fields,
        }
    }

    /// Set an attribute from its bare rendered value.
    pub fn set(&mut self, key: AttributeKey, value: &str) {
        self.fields.insert(key, key.pair(value));
    }

    /// Type tag written after `t.`.
    pub fn column_type(&self) -> &str {
        &self.column_type
    }

    /// Key-paired value for an attribute, if present.
    pub fn get(&self, key: AttributeKey) -> Option<&str> {
        self.fields.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: AttributeKey) -> bool {
        self.fields.contains_key(&key)
    }
}

/// Builds a [`ColumnSpec`] from a classified column.
pub struct ColumnSpecBuilder<'a> {
    registry: &'a TypeRegistry,
    quoter: &'a dyn LiteralQuoter,
    extensions: &'a [Arc<dyn ColumnTypeExtension>],
}

impl<'a> ColumnSpecBuilder<'a> {
    pub fn new(
        registry: &'a TypeRegistry,
        quoter: &'a dyn LiteralQuoter,
        extensions: &'a [Arc<dyn ColumnTypeExtension>],
    ) -> Self {
        Self {
            registry,
            quoter,
            extensions,
        }
    }

    /// Build the `ColumnSpec` for `column`.
    ///
    /// Returns `Ok(None)` for the primary key column, which the table header
    /// declares instead. Fails for unknown or unregistered types, primary key
    /// included.
    pub fn build(&self, column: &Column, primary_key: &str) -> Result<Option<ColumnSpec>> {
        let Some(descriptor) = self
            .registry
            .get(column.column_type)
            .filter(|_| column.column_type != ColumnType::Unknown)
        else {
            return Err(DumpError::unrenderable(&column.name, &column.sql_type));
        };

        if column.name == primary_key {
            return Ok(None);
        }

        let mut spec = ColumnSpec::new(&column.name, column.column_type);

        if let Some(limit) = column.limit {
            if Some(limit) != descriptor.limit && column.column_type != ColumnType::Decimal {
                spec.set(AttributeKey::Limit, &limit.to_string());
            }
        }
        if let Some(precision) = column.precision {
            spec.set(AttributeKey::Precision, &precision.to_string());
        }
        if let Some(scale) = column.scale {
            spec.set(AttributeKey::Scale, &scale.to_string());
        }
        if !column.is_nullable {
            spec.set(AttributeKey::Null, "false");
        }
        if let Some(default) = &column.default {
            spec.set(
                AttributeKey::Default,
                &self.quoter.quote(default, column.column_type),
            );
        }

        for ext in self.extensions {
            for (key, value) in ext.column_attributes(column) {
                spec.set(key, &value);
            }
        }

        Ok(Some(spec))
    }
}
