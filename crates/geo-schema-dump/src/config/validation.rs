//! Configuration validation.

use super::Config;
use crate::core::ColumnType;
use crate::error::{DumpError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    if config.default_primary_key.trim().is_empty() {
        return Err(DumpError::Config(
            "default_primary_key must not be empty".into(),
        ));
    }

    if config.ignore_tables.iter().any(|t| t.is_empty()) {
        return Err(DumpError::Config(
            "ignore_tables entries must not be empty".into(),
        ));
    }
    config.ignore_patterns()?;

    for (column_type, limit) in &config.type_limits {
        if *column_type == ColumnType::Unknown {
            return Err(DumpError::Config(
                "type_limits cannot set a limit for 'unknown'".into(),
            ));
        }
        if column_type.is_geometry() && !config.spatial {
            return Err(DumpError::Config(format!(
                "type_limits.{} requires spatial: true",
                column_type
            )));
        }
        if *limit <= 0 {
            return Err(DumpError::Config(format!(
                "type_limits.{} must be positive, got {}",
                column_type, limit
            )));
        }
    }

    Ok(())
}
