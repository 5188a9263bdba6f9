//! Database driver implementations.
//!
//! Each driver module implements the [`CatalogParser`] capability for
//! one database product. [`ParserImpl`] dispatches over the concrete
//! implementations with an enum instead of `Box<dyn Trait>`, so adding
//! a dialect means adding a module, a variant, and a `from_config` arm.

pub mod common;
pub mod postgres;

pub use common::{SslMode, TlsBuilder};
pub use postgres::PostgresParser;

use async_trait::async_trait;

use crate::config::ConnectionConfig;
use crate::core::traits::{CatalogParser, ColumnDescriptor, ConstraintDescriptor};
use crate::error::{Result, SnapshotError};

/// Enum-based static dispatch over catalog parsers.
#[derive(Debug)]
pub enum ParserImpl {
    Postgres(PostgresParser),
}

impl ParserImpl {
    /// Connect the parser named by the configuration's database type.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the database type is not
    /// recognized, before any connection is attempted.
    pub async fn connect(config: &ConnectionConfig, max_conns: usize) -> Result<Self> {
        match config.r#type.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(ParserImpl::Postgres(
                PostgresParser::connect(config, max_conns).await?,
            )),
            other => Err(SnapshotError::Config(format!(
                "Unknown database type: '{}'. Supported types: postgres",
                other
            ))),
        }
    }
}

#[async_trait]
impl CatalogParser for ParserImpl {
    async fn ping(&self) -> Result<()> {
        match self {
            ParserImpl::Postgres(p) => p.ping().await,
        }
    }

    async fn fetch_columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        match self {
            ParserImpl::Postgres(p) => p.fetch_columns(schema, table).await,
        }
    }

    async fn fetch_constraints(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Vec<ConstraintDescriptor>> {
        match self {
            ParserImpl::Postgres(p) => p.fetch_constraints(schema, table).await,
        }
    }

    fn render_column_type(&self, col: &ColumnDescriptor) -> Result<String> {
        match self {
            ParserImpl::Postgres(p) => p.render_column_type(col),
        }
    }

    async fn fetch_procedure_definition(
        &self,
        schema: &str,
        name_pattern: &str,
    ) -> Result<Option<String>> {
        match self {
            ParserImpl::Postgres(p) => p.fetch_procedure_definition(schema, name_pattern).await,
        }
    }

    fn db_type(&self) -> &str {
        match self {
            ParserImpl::Postgres(p) => p.db_type(),
        }
    }

    async fn close(&self) {
        match self {
            ParserImpl::Postgres(p) => p.close().await,
        }
    }
}
