//! Error types for DDL snapshot generation.

use thiserror::Error;

/// Main error type for snapshot operations.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Configuration error (invalid YAML, missing fields, empty requested set).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The database connection could not be established or pinged.
    #[error("Connection failure: {context}")]
    Connection { context: String },

    /// Connection pool error with context.
    #[error("Pool error: {message}\n  Context: {context}")]
    Pool { message: String, context: String },

    /// A catalog query failed for a specific object.
    #[error("Catalog query failed for {object}: {source}")]
    Query {
        object: String,
        source: tokio_postgres::Error,
    },

    /// A table's catalog query returned zero columns.
    #[error("Table {0} has no columns")]
    MissingColumns(String),

    /// The dialect cannot render a column's raw type.
    #[error("Unsupported type '{type_name}' for column {object}.{column}")]
    UnsupportedType {
        object: String,
        column: String,
        type_name: String,
    },

    /// IO error (file operations).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SnapshotError {
    /// Create a Connection error with context about the target.
    pub fn connection(context: impl Into<String>) -> Self {
        SnapshotError::Connection {
            context: context.into(),
        }
    }

    /// Create a Pool error with context about where it occurred.
    pub fn pool(message: impl ToString, context: impl Into<String>) -> Self {
        SnapshotError::Pool {
            message: message.to_string(),
            context: context.into(),
        }
    }

    /// Create a Query error identifying the failing schema-qualified object.
    pub fn query(object: impl Into<String>, source: tokio_postgres::Error) -> Self {
        SnapshotError::Query {
            object: object.into(),
            source,
        }
    }

    /// Exit code for CLI presentation.
    pub fn exit_code(&self) -> u8 {
        match self {
            SnapshotError::Config(_) | SnapshotError::Yaml(_) | SnapshotError::Json(_) => 1,
            SnapshotError::Connection { .. } | SnapshotError::Pool { .. } => 2,
            SnapshotError::Query { .. } => 3,
            SnapshotError::UnsupportedType { .. } => 4,
            SnapshotError::MissingColumns(_) => 5,
            SnapshotError::Io(_) => 7,
        }
    }

    /// Format error with full details including error chain.
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

/// Result type alias for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;
