//! Snapshot generation pipeline.
//!
//! [`Generator`] wires the configuration to a connected catalog parser
//! and runs the whole pipeline: recover each requested table in request
//! order, recover procedures, filter and order the constraint pool, and
//! assemble the script text. Recovery is sequential so discovery order
//! (and therefore the emitted script) is reproducible.

use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::core::traits::CatalogParser;
use crate::drivers::ParserImpl;
use crate::error::{Result, SnapshotError};
use crate::{recover, script};

/// Connection pool size for catalog queries. The pipeline issues one
/// query at a time, so a handful of connections is plenty.
const CATALOG_POOL_SIZE: usize = 4;

/// Result of a connection health check.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// Whether the database answered a ping.
    pub connected: bool,
    /// Ping round-trip time in milliseconds.
    pub latency_ms: u64,
    /// Dialect identifier.
    pub db_type: String,
    /// Error message when not connected.
    pub error: Option<String>,
}

/// Generates a DDL script for a configured requested set.
pub struct Generator {
    config: Config,
    parser: ParserImpl,
}

impl Generator {
    /// Connect to the configured database and verify the connection.
    pub async fn connect(config: Config) -> Result<Self> {
        let parser = ParserImpl::connect(&config.connection, CATALOG_POOL_SIZE).await?;
        Ok(Self { config, parser })
    }

    /// Run the pipeline and return the assembled script text.
    ///
    /// Either the full script is produced or an error is returned; there
    /// is no partial-success mode.
    pub async fn run(&self) -> Result<String> {
        if self.config.tables.is_empty() {
            return Err(SnapshotError::Config(
                "at least one table entry is required".into(),
            ));
        }

        info!(
            "Generating DDL snapshot for {} tables, {} procedures",
            self.config.tables.len(),
            self.config.procedures.len()
        );

        let mut tables = Vec::with_capacity(self.config.tables.len());
        for entry in &self.config.tables {
            let table = recover::recover_table(&self.parser, &entry.schema, &entry.name).await?;
            tables.push(table);
        }

        let mut procedures = Vec::new();
        for entry in &self.config.procedures {
            if let Some(proc) =
                recover::recover_procedure(&self.parser, &entry.schema, &entry.name).await?
            {
                procedures.push(proc);
            }
        }

        let ordered = script::filter_and_order(&tables);
        info!(
            "Emitting {} tables, {} constraints, {} procedures",
            tables.len(),
            ordered.len(),
            procedures.len()
        );

        script::assemble(&tables, &ordered, &procedures)
    }

    /// Ping the database and report connectivity and latency.
    pub async fn health_check(&self) -> Result<HealthReport> {
        let start = Instant::now();
        let result = self.parser.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        Ok(HealthReport {
            connected: result.is_ok(),
            latency_ms,
            db_type: self.parser.db_type().to_string(),
            error: result.err().map(|e| e.to_string()),
        })
    }

    /// Close the underlying connection pool.
    pub async fn close(&self) {
        self.parser.close().await;
    }
}
