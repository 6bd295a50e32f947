//! Spatial column support.
//!
//! [`SpatialExtension`] teaches the dumper about geometric columns:
//!
//! - classification of geometry type names into the eight geometry tags
//! - registry entries (`POINT`, `MULTIPOLYGON`, ...)
//! - `:srid`, `:with_z` and `:with_m` column attributes
//!
//! Geometry *values* are out of scope: defaults are passed through the
//! literal quoter like any other column's.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{Column, ColumnType, ColumnTypeExtension};
use crate::dumper::AttributeKey;
use crate::typemap::{TypeDescriptor, TypeRegistry};

/// Geometry rules in precedence order.
///
/// Compound names come first: `multipolygon` contains `polygon` and
/// `geometrycollection` contains `geometry`. Bare names must match the whole
/// type. Anything else mentioning a geometry name lands in the generic
/// bucket (e.g. PostGIS `geometry(Point,4326)`).
static GEOMETRY_RULES: Lazy<Vec<(Regex, ColumnType)>> = Lazy::new(|| {
    [
        (r"(?i)multipoint", ColumnType::MultiPoint),
        (r"(?i)multilinestring", ColumnType::MultiLineString),
        (r"(?i)multipolygon", ColumnType::MultiPolygon),
        (r"(?i)geometrycollection", ColumnType::GeometryCollection),
        (r"(?i)^point$", ColumnType::Point),
        (r"(?i)^linestring$", ColumnType::LineString),
        (r"(?i)^polygon$", ColumnType::Polygon),
        (r"(?i)^geometry$", ColumnType::Geometry),
        (
            r"(?i)geometry|point|linestring|polygon|multipoint|multilinestring|multipolygon|geometrycollection",
            ColumnType::Geometry,
        ),
    ]
    .into_iter()
    .map(|(pattern, column_type)| {
        (
            Regex::new(pattern).expect("geometry type pattern is valid"),
            column_type,
        )
    })
    .collect()
});

/// Classify a raw SQL type as a geometry, if it is one.
pub fn classify_geometry(sql_type: &str) -> Option<ColumnType> {
    let sql_type = sql_type.trim();
    GEOMETRY_RULES
        .iter()
        .find(|(re, _)| re.is_match(sql_type))
        .map(|(_, column_type)| *column_type)
}

/// Native name registered for a geometry tag.
pub fn geometry_type_name(column_type: ColumnType) -> Option<&'static str> {
    match column_type {
        ColumnType::Point => Some("POINT"),
        ColumnType::LineString => Some("LINESTRING"),
        ColumnType::Polygon => Some("POLYGON"),
        ColumnType::GeometryCollection => Some("GEOMETRYCOLLECTION"),
        ColumnType::MultiPoint => Some("MULTIPOINT"),
        ColumnType::MultiLineString => Some("MULTILINESTRING"),
        ColumnType::MultiPolygon => Some("MULTIPOLYGON"),
        ColumnType::Geometry => Some("GEOMETRY"),
        _ => None,
    }
}

/// The geometry type extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpatialExtension;

impl SpatialExtension {
    pub fn new() -> Self {
        Self
    }
}

impl ColumnTypeExtension for SpatialExtension {
    fn name(&self) -> &str {
        "spatial"
    }

    fn classify(&self, sql_type: &str) -> Option<ColumnType> {
        classify_geometry(sql_type)
    }

    fn register_types(&self, registry: &mut TypeRegistry) {
        for column_type in ColumnType::GEOMETRY {
            if let Some(name) = geometry_type_name(column_type) {
                registry.register(column_type, TypeDescriptor::new(name));
            }
        }
    }

    fn column_attributes(&self, column: &Column) -> Vec<(AttributeKey, String)> {
        let Some(spatial) = column.spatial else {
            return Vec::new();
        };

        let mut attrs = Vec::new();
        if let Some(srid) = spatial.srid {
            attrs.push((AttributeKey::Srid, srid.to_string()));
        }
        if spatial.with_z {
            attrs.push((AttributeKey::WithZ, "true".to_string()));
        }
        if spatial.with_m {
            attrs.push((AttributeKey::WithM, "true".to_string()));
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ColumnDescriptor;

    #[test]
    fn test_compound_names_win_over_bare_names() {
        for raw in ["multipolygon", "MULTIPOLYGON", "MultiPolygon", "st_multipolygon"] {
            assert_eq!(classify_geometry(raw), Some(ColumnType::MultiPolygon), "{}", raw);
        }
        assert_eq!(classify_geometry("MULTIPOINT"), Some(ColumnType::MultiPoint));
        assert_eq!(
            classify_geometry("multilinestring"),
            Some(ColumnType::MultiLineString)
        );
        assert_eq!(
            classify_geometry("GeometryCollection"),
            Some(ColumnType::GeometryCollection)
        );
    }

    #[test]
    fn test_exact_bare_names() {
        assert_eq!(classify_geometry("point"), Some(ColumnType::Point));
        assert_eq!(classify_geometry("LineString"), Some(ColumnType::LineString));
        assert_eq!(classify_geometry("POLYGON"), Some(ColumnType::Polygon));
        assert_eq!(classify_geometry("geometry"), Some(ColumnType::Geometry));
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(
            classify_geometry("geometry(Point,4326)"),
            Some(ColumnType::Geometry)
        );
        assert_eq!(classify_geometry("pointz"), Some(ColumnType::Geometry));
        assert_eq!(classify_geometry("enum_status"), None);
    }

    #[test]
    fn test_registers_all_geometry_names() {
        let mut registry = TypeRegistry::new();
        SpatialExtension.register_types(&mut registry);
        assert_eq!(
            registry.get(ColumnType::MultiLineString).map(|d| d.name.as_str()),
            Some("MULTILINESTRING")
        );
        for t in ColumnType::GEOMETRY {
            assert!(registry.contains(t));
        }
    }

    #[test]
    fn test_column_attributes() {
        let col = Column::from_descriptor(
            ColumnDescriptor::new("geom", "point")
                .with_srid(4326)
                .with_dimensions(true, false),
            ColumnType::Point,
        );
        assert_eq!(
            SpatialExtension.column_attributes(&col),
            vec![
                (AttributeKey::Srid, "4326".to_string()),
                (AttributeKey::WithZ, "true".to_string()),
            ]
        );

        let plain = Column::from_descriptor(ColumnDescriptor::new("geom", "point"), ColumnType::Point);
        assert!(SpatialExtension.column_attributes(&plain).is_empty());
    }
}
