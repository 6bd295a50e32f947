//! File-backed metadata source.
//!
//! A snapshot is a YAML or JSON document describing tables the way a live
//! connection would report them:
//!
//! ```yaml
//! version: 20080704120000
//! tables:
//!   - name: locations
//!     columns:
//!       - { name: id, sql_type: integer, is_nullable: false }
//!       - { name: geom, sql_type: POINT, srid: 4326 }
//!     indexes:
//!       - { name: index_locations_on_geom, columns: [geom], spatial: true }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ColumnDescriptor, Index, MetadataSource};
use crate::error::{DumpError, Result};

/// Whole-schema snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    /// Schema version recorded by the migration engine.
    #[serde(default)]
    pub version: Option<i64>,

    #[serde(default)]
    pub tables: Vec<TableSnapshot>,
}

/// One table of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub name: String,

    /// Primary key column, if known.
    #[serde(default)]
    pub primary_key: Option<String>,

    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,

    #[serde(default)]
    pub indexes: Vec<IndexSnapshot>,
}

impl TableSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: None,
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = Some(name.into());
        self
    }

    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    /// Add an index. The index's own table name is replaced by this table's.
    pub fn index(mut self, index: Index) -> Self {
        self.indexes.push(IndexSnapshot {
            name: index.name,
            columns: index.columns,
            unique: index.is_unique,
            spatial: index.is_spatial,
        });
        self
    }
}

/// Index entry of a table snapshot; the table is implied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub spatial: bool,
}

/// [`MetadataSource`] over an in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    snapshot: SchemaSnapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: SchemaSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot file. `.json` files are read as JSON, anything else
    /// as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let source = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };
        debug!(
            "Loaded snapshot {:?} with {} tables",
            path,
            source.snapshot.tables.len()
        );
        Ok(source)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(Self::new(serde_yaml::from_str(yaml)?))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn snapshot(&self) -> &SchemaSnapshot {
        &self.snapshot
    }

    fn table(&self, name: &str) -> Result<&TableSnapshot> {
        self.snapshot
            .tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| DumpError::metadata(name, "table not found in snapshot"))
    }
}

impl MetadataSource for SnapshotSource {
    fn tables(&self) -> Result<Vec<String>> {
        Ok(self.snapshot.tables.iter().map(|t| t.name.clone()).collect())
    }

    fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        Ok(self.table(table)?.columns.clone())
    }

    fn indexes(&self, table: &str) -> Result<Vec<Index>> {
        self.table(table)?
            .indexes
            .iter()
            .map(|idx| {
                if idx.columns.is_empty() {
                    return Err(DumpError::metadata(
                        table,
                        format!("index {} has no columns", idx.name),
                    ));
                }
                Ok(Index {
                    table: table.to_string(),
                    name: idx.name.clone(),
                    columns: idx.columns.clone(),
                    is_unique: idx.unique,
                    is_spatial: idx.spatial,
                })
            })
            .collect()
    }

    fn primary_key(&self, table: &str) -> Result<Option<String>> {
        Ok(self.table(table)?.primary_key.clone())
    }

    fn schema_version(&self) -> Option<i64> {
        self.snapshot.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const YAML: &str = "
version: 20080704120000
tables:
  - name: locations
    columns:
      - { name: id, sql_type: integer, is_nullable: false }
      - { name: geom, sql_type: POINT, srid: 4326, with_z: true }
    indexes:
      - { name: index_locations_on_geom, columns: [geom], spatial: true }
  - name: roads
    primary_key: gid
";

    #[test]
    fn test_from_yaml() {
        let source = SnapshotSource::from_yaml(YAML).unwrap();
        assert_eq!(source.schema_version(), Some(20080704120000));
        assert_eq!(source.tables().unwrap(), vec!["locations", "roads"]);

        let columns = source.columns("locations").unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[1].srid, 4326);
        assert!(columns[1].with_z);
        assert!(columns[1].is_nullable);

        let indexes = source.indexes("locations").unwrap();
        assert_eq!(
            indexes,
            vec![Index::new("locations", "index_locations_on_geom", ["geom"]).spatial()]
        );

        assert_eq!(source.primary_key("roads").unwrap().as_deref(), Some("gid"));
        assert_eq!(source.primary_key("locations").unwrap(), None);
    }

    #[test]
    fn test_unknown_table() {
        let source = SnapshotSource::from_yaml(YAML).unwrap();
        let err = source.columns("rivers").unwrap_err();
        assert_eq!(err.kind(), "MetadataSourceError");
        assert!(err.is_table_local());
    }

    #[test]
    fn test_index_without_columns() {
        let source = SnapshotSource::from_yaml(
            "tables:\n  - name: t\n    indexes:\n      - { name: empty, columns: [] }\n",
        )
        .unwrap();
        let err = source.indexes("t").unwrap_err();
        assert!(err.to_string().contains("index empty has no columns"));
    }

    #[test]
    fn test_load_json_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"tables": [{{"name": "zones", "columns": [{{"name": "area", "sql_type": "polygon"}}]}}]}}"#
        )
        .unwrap();

        let source = SnapshotSource::load(file.path()).unwrap();
        assert_eq!(source.tables().unwrap(), vec!["zones"]);
        assert_eq!(source.columns("zones").unwrap()[0].sql_type, "polygon");
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();
        let source = SnapshotSource::load(file.path()).unwrap();
        assert_eq!(source.snapshot().tables.len(), 2);
    }
}
