//! Configuration type definitions.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::ColumnType;
use crate::error::Result;

/// Primary key name assumed when the metadata source reports none.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Primary key column name when the source cannot tell (default: "id").
    #[serde(default = "default_primary_key")]
    pub default_primary_key: String,

    /// Register the spatial extension (default: true).
    #[serde(default = "default_true")]
    pub spatial: bool,

    /// Wrap the dump in the schema header and trailer (default: true).
    #[serde(default = "default_true")]
    pub header: bool,

    /// Tables to skip. Entries wrapped in slashes are regexes (`/^tmp_/`).
    #[serde(default)]
    pub ignore_tables: Vec<String>,

    /// Default limits the database applies per type. A column whose limit
    /// equals its type's default is dumped without `:limit`.
    #[serde(default)]
    pub type_limits: BTreeMap<ColumnType, i64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_primary_key: default_primary_key(),
            spatial: true,
            header: true,
            ignore_tables: Vec::new(),
            type_limits: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parsed `ignore_tables` entries.
    pub fn ignore_patterns(&self) -> Result<Vec<TablePattern>> {
        self.ignore_tables
            .iter()
            .map(|entry| TablePattern::parse(entry))
            .collect()
    }
}

fn default_primary_key() -> String {
    DEFAULT_PRIMARY_KEY.to_string()
}

fn default_true() -> bool {
    true
}

/// A table name or a `/regex/` over table names.
#[derive(Debug, Clone)]
pub enum TablePattern {
    Exact(String),
    Regex(Regex),
}

impl TablePattern {
    /// Parse an ignore entry. `/.../` is compiled as a regex.
    pub fn parse(entry: &str) -> Result<Self> {
        match entry
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
        {
            Some(pattern) => Ok(TablePattern::Regex(Regex::new(pattern)?)),
            None => Ok(TablePattern::Exact(entry.to_string())),
        }
    }

    pub fn matches(&self, table: &str) -> bool {
        match self {
            TablePattern::Exact(name) => name == table,
            TablePattern::Regex(re) => re.is_match(table),
        }
    }
}
