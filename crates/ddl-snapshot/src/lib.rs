//! # ddl-snapshot
//!
//! Generate reproducible DDL scripts from a live database catalog.
//!
//! Given a requested set of tables (and optionally stored procedures),
//! the library inspects the database's catalog metadata and synthesizes
//! a script of `CREATE TABLE` statements followed by dependency-ordered
//! `ALTER TABLE ... ADD CONSTRAINT` statements:
//!
//! - only constraints whose referenced table is itself in the requested
//!   set are emitted, so the script never dangles
//! - primary keys are created before the foreign keys that reference
//!   them; unique constraints come last
//! - two runs over the same catalog produce byte-identical output
//!
//! Catalog access goes through the [`CatalogParser`] capability;
//! PostgreSQL is the built-in dialect.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ddl_snapshot::{Config, Generator};
//!
//! #[tokio::main]
//! async fn main() -> ddl_snapshot::Result<()> {
//!     let config = Config::load("snapshot.yaml")?;
//!     let generator = Generator::connect(config).await?;
//!     let script = generator.run().await?;
//!     println!("{}", script);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod drivers;
pub mod error;
pub mod generator;
pub mod recover;
pub mod script;

// Re-exports for convenient access
pub use config::{Config, ConnectionConfig, ProcedureEntry, TableEntry};
pub use crate::core::schema::{Column, Constraint, ConstraintKind, Procedure, Table};
pub use crate::core::traits::{CatalogParser, ColumnDescriptor, ConstraintDescriptor};
pub use drivers::{ParserImpl, PostgresParser};
pub use error::{Result, SnapshotError};
pub use generator::{Generator, HealthReport};
