//! Schema and metadata types for table columns and indexes.
//!
//! [`ColumnDescriptor`] is what a metadata source hands over: raw, unclassified.
//! [`Column`] is the classified model the dumper works with.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::types::ColumnType;

/// SRID value metadata sources use for "no reference system".
pub const UNSPECIFIED_SRID: i32 = -1;

/// A column default as reported by the database.
///
/// Deserializes from plain scalars (`true`, `42`, `1.5`, `"active"`) or from
/// a single-key map for the typed forms (`{date: 2008-01-01}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    /// Exact decimal, kept in its textual form.
    Decimal { decimal: String },
    Date { date: NaiveDate },
    DateTime { datetime: NaiveDateTime },
    Time { time: NaiveTime },
    String(String),
}

/// Column metadata as supplied by a metadata source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,

    /// Raw SQL type (e.g. "varchar(255)", "MULTIPOLYGON").
    pub sql_type: String,

    /// Whether the column allows NULL.
    #[serde(default = "default_true")]
    pub is_nullable: bool,

    /// Column default, if any.
    #[serde(default)]
    pub default: Option<DefaultValue>,

    /// Maximum length for string/binary types.
    #[serde(default)]
    pub limit: Option<i64>,

    /// Numeric precision.
    #[serde(default)]
    pub precision: Option<i64>,

    /// Numeric scale.
    #[serde(default)]
    pub scale: Option<i64>,

    /// Spatial reference id (-1 when unspecified). Ignored for non-geometry types.
    #[serde(default = "default_srid")]
    pub srid: i32,

    /// Geometry carries a Z ordinate.
    #[serde(default)]
    pub with_z: bool,

    /// Geometry carries an M ordinate.
    #[serde(default)]
    pub with_m: bool,
}

fn default_true() -> bool {
    true
}

fn default_srid() -> i32 {
    UNSPECIFIED_SRID
}

impl ColumnDescriptor {
    /// Create a nullable descriptor with no limits, default or spatial data.
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            is_nullable: true,
            default: None,
            limit: None,
            precision: None,
            scale: None,
            srid: UNSPECIFIED_SRID,
            with_z: false,
            with_m: false,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.is_nullable = false;
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_precision(mut self, precision: i64, scale: i64) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = srid;
        self
    }

    pub fn with_dimensions(mut self, with_z: bool, with_m: bool) -> Self {
        self.with_z = with_z;
        self.with_m = with_m;
        self
    }
}

/// Extra metadata carried by geometric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpatialAttrs {
    /// Spatial reference id; `None` when the source reported none.
    pub srid: Option<i32>,
    pub with_z: bool,
    pub with_m: bool,
}

impl SpatialAttrs {
    /// Build from the raw values a metadata source reports, mapping the
    /// `-1` sentinel to `None`.
    pub fn from_raw(srid: i32, with_z: bool, with_m: bool) -> Self {
        Self {
            srid: (srid != UNSPECIFIED_SRID).then_some(srid),
            with_z,
            with_m,
        }
    }
}

/// Classified column metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Raw SQL type the column was classified from.
    pub sql_type: String,

    /// Semantic type.
    pub column_type: ColumnType,

    /// Whether the column allows NULL.
    pub is_nullable: bool,

    /// Column default, if any.
    pub default: Option<DefaultValue>,

    pub limit: Option<i64>,
    pub precision: Option<i64>,
    pub scale: Option<i64>,

    /// Present iff `column_type` is geometric.
    pub spatial: Option<SpatialAttrs>,
}

impl Column {
    /// Build a column from its descriptor and the type it classified to.
    pub fn from_descriptor(desc: ColumnDescriptor, column_type: ColumnType) -> Self {
        let spatial = column_type
            .is_geometry()
            .then(|| SpatialAttrs::from_raw(desc.srid, desc.with_z, desc.with_m));

        Self {
            name: desc.name,
            sql_type: desc.sql_type,
            column_type,
            is_nullable: desc.is_nullable,
            default: desc.default,
            limit: desc.limit,
            precision: desc.precision,
            scale: desc.scale,
            spatial,
        }
    }

    /// Check if the column holds geometries.
    pub fn is_spatial(&self) -> bool {
        self.spatial.is_some()
    }
}

/// Index metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Table the index belongs to.
    pub table: String,

    /// Index name.
    pub name: String,

    /// Indexed column names, in key order.
    pub columns: Vec<String>,

    /// Whether the index is unique.
    pub is_unique: bool,

    /// Whether the index is a spatial (R-tree / GiST) index.
    ///
    /// Not checked against the indexed columns' types.
    pub is_spatial: bool,
}

impl Index {
    pub fn new(
        table: impl Into<String>,
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            is_unique: false,
            is_spatial: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn spatial(mut self) -> Self {
        self.is_spatial = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_attrs_only_for_geometry() {
        let geom = Column::from_descriptor(
            ColumnDescriptor::new("geom", "POINT").with_srid(4326),
            ColumnType::Point,
        );
        assert_eq!(
            geom.spatial,
            Some(SpatialAttrs {
                srid: Some(4326),
                with_z: false,
                with_m: false
            })
        );

        let name = Column::from_descriptor(
            ColumnDescriptor::new("name", "varchar(255)").with_srid(4326),
            ColumnType::String,
        );
        assert!(name.spatial.is_none());
        assert!(!name.is_spatial());
    }

    #[test]
    fn test_unspecified_srid_becomes_none() {
        let attrs = SpatialAttrs::from_raw(UNSPECIFIED_SRID, true, false);
        assert_eq!(attrs.srid, None);
        assert!(attrs.with_z);
    }

    #[test]
    fn test_descriptor_defaults_from_yaml() {
        let desc: ColumnDescriptor =
            serde_yaml::from_str("name: geom\nsql_type: geometry\n").unwrap();
        assert!(desc.is_nullable);
        assert_eq!(desc.srid, UNSPECIFIED_SRID);
        assert!(desc.default.is_none());
    }

    #[test]
    fn test_default_value_forms() {
        let values: Vec<DefaultValue> = serde_yaml::from_str(
            "- true\n- 42\n- 1.5\n- active\n- {decimal: '9.99'}\n- {date: 2008-01-01}\n",
        )
        .unwrap();
        assert_eq!(
            values,
            vec![
                DefaultValue::Boolean(true),
                DefaultValue::Integer(42),
                DefaultValue::Float(1.5),
                DefaultValue::String("active".to_string()),
                DefaultValue::Decimal {
                    decimal: "9.99".to_string()
                },
                DefaultValue::Date {
                    date: NaiveDate::from_ymd_opt(2008, 1, 1).unwrap()
                },
            ]
        );
    }

    #[test]
    fn test_index_builders() {
        let idx = Index::new("roads", "index_roads_on_path", ["path"]).spatial();
        assert!(idx.is_spatial);
        assert!(!idx.is_unique);
        assert_eq!(idx.columns, vec!["path".to_string()]);
    }
}
