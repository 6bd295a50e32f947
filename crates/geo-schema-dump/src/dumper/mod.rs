//! Schema dumping.
//!
//! [`SchemaDumper`] turns a [`MetadataSource`] into a re-executable schema
//! definition:
//!
//! ```text
//!   create_table "locations", :force => true do |t|
//!     t.string "name", :limit => 255, :null => false
//!     t.point  "geom"
//!   end
//!
//!   add_index "locations", ["geom"], :name => "index_locations_on_geom", :spatial => true
//! ```
//!
//! Each table is rendered into a buffer first. If anything about the table
//! fails (unknown column type, metadata error) the buffer is discarded and a
//! two-line comment naming the error is written instead, so one bad table
//! never aborts a full dump.

mod format;
mod index;
mod literal;
mod spec;

pub use format::format_columns;
pub use index::render_indexes;
pub use literal::{quote_list, quote_str, SchemaLiteralQuoter};
pub use spec::{AttributeKey, ColumnSpec, ColumnSpecBuilder};

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{Config, TablePattern, DEFAULT_PRIMARY_KEY};
use crate::core::{Column, ColumnType, ColumnTypeExtension, LiteralQuoter, MetadataSource};
use crate::error::Result;
use crate::spatial::SpatialExtension;
use crate::typemap::{TypeClassifier, TypeRegistry};

/// Table the migration engine keeps its own bookkeeping in; never dumped.
pub const SCHEMA_MIGRATIONS_TABLE: &str = "schema_migrations";

const HEADER: &str = "\
# This file is auto-generated from the current state of the database. Instead
# of editing this file, change the migrations and regenerate this definition.
";

/// Renders table definitions from live metadata.
pub struct SchemaDumper {
    classifier: TypeClassifier,
    registry: TypeRegistry,
    extensions: Vec<Arc<dyn ColumnTypeExtension>>,
    quoter: Box<dyn LiteralQuoter + Send + Sync>,
    default_primary_key: String,
    header: bool,
    ignore_tables: Vec<TablePattern>,
}

impl Default for SchemaDumper {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaDumper {
    /// Dumper with the base types only, no extensions.
    pub fn new() -> Self {
        Self {
            classifier: TypeClassifier::new(),
            registry: TypeRegistry::with_base_types(),
            extensions: Vec::new(),
            quoter: Box::new(SchemaLiteralQuoter),
            default_primary_key: DEFAULT_PRIMARY_KEY.to_string(),
            header: true,
            ignore_tables: Vec::new(),
        }
    }

    /// Dumper with the spatial extension registered.
    pub fn with_spatial() -> Self {
        Self::new().with_extension(Arc::new(SpatialExtension::new()))
    }

    /// Build a dumper from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let mut dumper = if config.spatial {
            Self::with_spatial()
        } else {
            Self::new()
        };
        for (column_type, limit) in &config.type_limits {
            dumper = dumper.with_type_limit(*column_type, Some(*limit));
        }
        dumper.default_primary_key = config.default_primary_key.clone();
        dumper.header = config.header;
        dumper.ignore_tables = config.ignore_patterns()?;
        Ok(dumper)
    }

    /// Register an extension. Its types are added to the registry and its
    /// classification rules run after the base rules and earlier extensions.
    pub fn with_extension(mut self, extension: Arc<dyn ColumnTypeExtension>) -> Self {
        debug!("Registering column type extension '{}'", extension.name());
        extension.register_types(&mut self.registry);
        self.extensions.push(extension);
        self.classifier = TypeClassifier::with_extensions(self.extensions.clone());
        self
    }

    /// Replace the default-value quoter.
    pub fn with_quoter(mut self, quoter: impl LiteralQuoter + Send + Sync + 'static) -> Self {
        self.quoter = Box::new(quoter);
        self
    }

    /// Set the default limit of a registered type.
    pub fn with_type_limit(mut self, column_type: ColumnType, limit: Option<i64>) -> Self {
        if !self.registry.set_limit(column_type, limit) {
            warn!("Ignoring limit for unregistered type '{}'", column_type);
        }
        self
    }

    pub fn with_default_primary_key(mut self, name: impl Into<String>) -> Self {
        self.default_primary_key = name.into();
        self
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn ignore_table(mut self, pattern: TablePattern) -> Self {
        self.ignore_tables.push(pattern);
        self
    }

    pub fn classifier(&self) -> &TypeClassifier {
        &self.classifier
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Whether a table is skipped by [`SchemaDumper::dump`].
    pub fn is_ignored(&self, table: &str) -> bool {
        table == SCHEMA_MIGRATIONS_TABLE || self.ignore_tables.iter().any(|p| p.matches(table))
    }

    /// Dump every table of the source, sorted by name.
    ///
    /// Failing to list tables is fatal; per-table failures are not.
    pub fn dump<W: Write>(&self, source: &dyn MetadataSource, out: &mut W) -> Result<()> {
        let mut tables = source.tables()?;
        tables.sort();

        if self.header {
            out.write_all(HEADER.as_bytes())?;
            writeln!(out)?;
            match source.schema_version() {
                Some(version) => writeln!(out, "ActiveRecord::Schema.define(:version => {}) do", version)?,
                None => writeln!(out, "ActiveRecord::Schema.define() do")?,
            }
            writeln!(out)?;
        }

        let mut dumped = 0;
        for table in tables.iter().filter(|t| !self.is_ignored(t)) {
            self.dump_table(table, source, out)?;
            dumped += 1;
        }

        if self.header {
            writeln!(out, "end")?;
        }

        info!("Dumped {} of {} tables", dumped, tables.len());
        Ok(())
    }

    /// Dump one table, replacing its output with an error comment if it
    /// cannot be rendered. Only sink errors are returned.
    pub fn dump_table<W: Write>(
        &self,
        table: &str,
        source: &dyn MetadataSource,
        out: &mut W,
    ) -> Result<()> {
        match self.table_definition(table, source) {
            Ok(definition) => {
                debug!("Dumped table {}", table);
                out.write_all(definition.as_bytes())?;
            }
            Err(e) if e.is_table_local() => {
                warn!("Could not dump table {}: {}", table, e);
                writeln!(
                    out,
                    "  # Could not dump table {} because of following {}",
                    quote_str(table),
                    e.kind()
                )?;
                for line in e.to_string().lines() {
                    writeln!(out, "  #   {}", line)?;
                }
                writeln!(out)?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Render one table's `create_table` block and index statements.
    pub fn table_definition(&self, table: &str, source: &dyn MetadataSource) -> Result<String> {
        let columns: Vec<Column> = source
            .columns(table)?
            .into_iter()
            .map(|desc| self.classifier.column(desc))
            .collect();
        let pk = source
            .primary_key(table)?
            .unwrap_or_else(|| self.default_primary_key.clone());

        let mut tbl = format!("  create_table {}", quote_str(table));
        if columns.iter().any(|c| c.name == pk) {
            if pk != DEFAULT_PRIMARY_KEY {
                tbl.push_str(&format!(", :primary_key => {}", quote_str(&pk)));
            }
        } else {
            tbl.push_str(", :id => false");
        }
        tbl.push_str(", :force => true do |t|\n");

        let builder = ColumnSpecBuilder::new(&self.registry, self.quoter.as_ref(), &self.extensions);
        let specs = columns
            .iter()
            .filter_map(|column| builder.build(column, &pk).transpose())
            .collect::<Result<Vec<ColumnSpec>>>()?;

        for line in format_columns(&specs) {
            tbl.push_str(&line);
            tbl.push('\n');
        }
        tbl.push_str("  end\n\n");

        let indexes = source.indexes(table)?;
        for line in render_indexes(&indexes, &self.extensions) {
            tbl.push_str(&line);
            tbl.push('\n');
        }

        Ok(tbl)
    }
}

impl std::fmt::Debug for SchemaDumper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaDumper")
            .field("classifier", &self.classifier)
            .field("default_primary_key", &self.default_primary_key)
            .field("header", &self.header)
            .field("ignore_tables", &self.ignore_tables)
            .finish()
    }
}
