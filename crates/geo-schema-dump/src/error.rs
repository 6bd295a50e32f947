//! Error types for the schema dumper.

use thiserror::Error;

/// Exit code for configuration errors (bad YAML, failed validation).
pub const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for metadata source failures.
pub const EXIT_METADATA_ERROR: u8 = 3;
/// Exit code for columns whose type cannot be rendered.
pub const EXIT_UNRENDERABLE_TYPE: u8 = 4;
/// Exit code for file and stream errors.
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for dump operations.
#[derive(Error, Debug)]
pub enum DumpError {
    /// A column's raw SQL type did not classify to a registered type.
    #[error("Unknown type '{sql_type}' for column '{column}'")]
    UnrenderableType { column: String, sql_type: String },

    /// Fetching columns, indexes or table names failed.
    #[error("Metadata for table {table} unavailable: {message}")]
    MetadataSource { table: String, message: String },

    /// Configuration error (invalid YAML, failed validation, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid `/regex/` entry in an ignore list
    #[error("Invalid table pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// IO error (file operations, output sink)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DumpError {
    /// Create an UnrenderableType error.
    pub fn unrenderable(column: impl Into<String>, sql_type: impl Into<String>) -> Self {
        DumpError::UnrenderableType {
            column: column.into(),
            sql_type: sql_type.into(),
        }
    }

    /// Create a MetadataSource error for a table.
    pub fn metadata(table: impl Into<String>, message: impl Into<String>) -> Self {
        DumpError::MetadataSource {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Short error kind, as written into the per-table failure comment.
    pub fn kind(&self) -> &'static str {
        match self {
            DumpError::UnrenderableType { .. } => "UnrenderableTypeError",
            DumpError::MetadataSource { .. } => "MetadataSourceError",
            DumpError::Config(_) => "ConfigError",
            DumpError::Pattern(_) => "PatternError",
            DumpError::Io(_) => "IOError",
            DumpError::Yaml(_) => "YamlError",
            DumpError::Json(_) => "JsonError",
        }
    }

    /// Whether this error only invalidates the table being dumped.
    ///
    /// Sink failures are never isolated: once the output stream is broken
    /// there is nowhere left to write the failure comment.
    pub fn is_table_local(&self) -> bool {
        matches!(
            self,
            DumpError::UnrenderableType { .. } | DumpError::MetadataSource { .. }
        )
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            DumpError::Config(_)
            | DumpError::Pattern(_)
            | DumpError::Yaml(_)
            | DumpError::Json(_) => EXIT_CONFIG_ERROR,
            DumpError::MetadataSource { .. } => EXIT_METADATA_ERROR,
            DumpError::UnrenderableType { .. } => EXIT_UNRENDERABLE_TYPE,
            DumpError::Io(_) => EXIT_IO_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for dump operations.
pub type Result<T> = std::result::Result<T, DumpError>;
