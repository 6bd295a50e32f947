//! Raw SQL type → [`ColumnType`] classification.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{Column, ColumnDescriptor, ColumnType, ColumnTypeExtension};

/// Base rules, tried in order. Patterns are anchored at the start of the
/// type name so that `point` is not read as `int` nor `linestring` as
/// `string`. `datetime`/`timestamp` must precede `date`/`time`.
static BASE_RULES: Lazy<Vec<(Regex, ColumnType)>> = Lazy::new(|| {
    [
        (r"(?i)^\s*(bool|boolean)\b|^\s*tinyint\(1\)", ColumnType::Boolean),
        (
            r"(?i)^\s*((tiny|small|medium|big)?int(eger)?[248]?|(small|big)?serial[48]?)\b",
            ColumnType::Integer,
        ),
        (r"(?i)^\s*(float[48]?|double( precision)?|real)\b", ColumnType::Float),
        (r"(?i)^\s*(decimal|numeric|number|money)\b", ColumnType::Decimal),
        (r"(?i)^\s*datetime", ColumnType::Datetime),
        (r"(?i)^\s*timestamp", ColumnType::Timestamp),
        (r"(?i)^\s*time\b", ColumnType::Time),
        (r"(?i)^\s*date\b", ColumnType::Date),
        (r"(?i)^\s*((tiny|medium|long)?text|clob)\b", ColumnType::Text),
        (r"(?i)^\s*(n?(var)?char|character|string)", ColumnType::String),
        (
            r"(?i)^\s*((tiny|medium|long)?blob|(var)?binary|bytea|image)\b",
            ColumnType::Binary,
        ),
    ]
    .into_iter()
    .map(|(pattern, column_type)| {
        (
            Regex::new(pattern).expect("base type pattern is valid"),
            column_type,
        )
    })
    .collect()
});

/// Classify against the base rules only.
pub fn classify_base(sql_type: &str) -> Option<ColumnType> {
    BASE_RULES
        .iter()
        .find(|(re, _)| re.is_match(sql_type))
        .map(|(_, column_type)| *column_type)
}

/// Maps raw SQL types to column type tags.
///
/// Base rules run first, then each extension in registration order. The
/// first match wins; no match gives [`ColumnType::Unknown`].
#[derive(Clone, Default)]
pub struct TypeClassifier {
    extensions: Vec<Arc<dyn ColumnTypeExtension>>,
}

impl TypeClassifier {
    /// Classifier with base rules only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier consulting the given extensions after the base rules.
    pub fn with_extensions(extensions: Vec<Arc<dyn ColumnTypeExtension>>) -> Self {
        Self { extensions }
    }

    pub fn classify(&self, sql_type: &str) -> ColumnType {
        classify_base(sql_type)
            .or_else(|| self.extensions.iter().find_map(|ext| ext.classify(sql_type)))
            .unwrap_or(ColumnType::Unknown)
    }

    /// Classify a descriptor and build the column model.
    pub fn column(&self, desc: ColumnDescriptor) -> Column {
        let column_type = self.classify(&desc.sql_type);
        Column::from_descriptor(desc, column_type)
    }
}

impl std::fmt::Debug for TypeClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeClassifier")
            .field(
                "extensions",
                &self.extensions.iter().map(|e| e.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
