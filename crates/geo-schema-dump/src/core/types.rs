//! Semantic column type tags.
//!
//! A [`ColumnType`] is what a raw SQL type string classifies to. The tag name
//! is what appears after `t.` in a dumped column line (`t.multi_polygon`).

use serde::{Deserialize, Serialize};

/// Semantic type of a column, independent of the database's spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    // ===== Base Types =====
    Boolean,
    Integer,
    Float,
    Decimal,
    Datetime,
    Date,
    Timestamp,
    Time,
    Text,
    String,
    Binary,

    // ===== Geometric Types =====
    Point,
    LineString,
    Polygon,
    GeometryCollection,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    /// Generic geometry, also the bucket for unrecognised geometry spellings.
    Geometry,

    // ===== Fallback =====
    /// Classification failed. Never rendered; the builder rejects it.
    Unknown,
}

impl ColumnType {
    /// Base (non-spatial) types in registry order.
    pub const BASE: [ColumnType; 11] = [
        ColumnType::Boolean,
        ColumnType::Integer,
        ColumnType::Float,
        ColumnType::Decimal,
        ColumnType::Datetime,
        ColumnType::Date,
        ColumnType::Timestamp,
        ColumnType::Time,
        ColumnType::Text,
        ColumnType::String,
        ColumnType::Binary,
    ];

    /// Geometric types in registry order.
    pub const GEOMETRY: [ColumnType; 8] = [
        ColumnType::Point,
        ColumnType::LineString,
        ColumnType::Polygon,
        ColumnType::GeometryCollection,
        ColumnType::MultiPoint,
        ColumnType::MultiLineString,
        ColumnType::MultiPolygon,
        ColumnType::Geometry,
    ];

    /// Tag name as written in a dump (`t.<name>`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Boolean => "boolean",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Decimal => "decimal",
            ColumnType::Datetime => "datetime",
            ColumnType::Date => "date",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Time => "time",
            ColumnType::Text => "text",
            ColumnType::String => "string",
            ColumnType::Binary => "binary",
            ColumnType::Point => "point",
            ColumnType::LineString => "line_string",
            ColumnType::Polygon => "polygon",
            ColumnType::GeometryCollection => "geometry_collection",
            ColumnType::MultiPoint => "multi_point",
            ColumnType::MultiLineString => "multi_line_string",
            ColumnType::MultiPolygon => "multi_polygon",
            ColumnType::Geometry => "geometry",
            ColumnType::Unknown => "unknown",
        }
    }

    /// Parse a tag name (`"multi_point"`). Returns `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::BASE
            .iter()
            .chain(Self::GEOMETRY.iter())
            .chain(std::iter::once(&ColumnType::Unknown))
            .find(|t| t.as_str() == name)
            .copied()
    }

    /// Whether this is one of the geometric types.
    pub fn is_geometry(&self) -> bool {
        Self::GEOMETRY.contains(self)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
