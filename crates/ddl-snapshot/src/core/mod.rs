//! Core abstractions for database-agnostic DDL synthesis.
//!
//! - [`schema`]: table, column, constraint, and procedure metadata types
//! - [`traits`]: the [`CatalogParser`](traits::CatalogParser) capability
//!   implemented by concrete dialects
//!
//! Driver modules (`drivers/postgres`, ...) implement the capability;
//! the recovery and script modules consume it. Core logic is tested
//! against mock implementations.

pub mod schema;
pub mod traits;

pub use schema::{Column, Constraint, ConstraintKind, Procedure, Table};
pub use traits::{CatalogParser, ColumnDescriptor, ConstraintDescriptor};
