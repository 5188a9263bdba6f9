//! The catalog-parser capability consumed by metadata recovery.
//!
//! [`CatalogParser`] is the single abstraction between the synthesis
//! engine and a concrete database product. Implementations issue
//! read-only queries against the product's system catalog and know how
//! to spell its column types; the engine itself never depends on a
//! specific dialect.
//!
//! The capability is passed by value into the recovery functions rather
//! than registered in process-global state, so several dialects can
//! coexist in one process and tests can substitute mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Raw column descriptor as reported by the catalog.
///
/// Ordering of the returned sequence matches the catalog's column
/// ordinal order and must be preserved into the rendered DDL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,

    /// Raw type name (e.g., "varchar", "numeric", "uuid").
    pub data_type: String,

    /// Maximum length for string/binary types (0 if not applicable).
    pub max_length: i32,

    /// Numeric precision (0 if not applicable).
    pub precision: i32,

    /// Numeric scale (0 if not applicable).
    pub scale: i32,

    /// Whether the column allows NULL.
    pub is_nullable: bool,

    /// Ordinal position (1-based).
    pub ordinal_pos: i32,
}

/// Raw constraint descriptor as reported by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintDescriptor {
    /// Constraint name.
    pub name: String,

    /// Raw constraint-type code (`p`, `f`, `u`, ...).
    pub kind_code: String,

    /// Referenced relation as the catalog spells it. May be
    /// schema-qualified (`sales.orders`) or bare (`orders`) depending on
    /// the server's search path; recovery normalizes it.
    pub referenced: String,

    /// Constraint definition body (e.g.,
    /// `FOREIGN KEY (customer_id) REFERENCES public.customers(id)`).
    pub definition: String,
}

/// Catalog access for one database dialect.
///
/// Implementations must only read from the database; generating a
/// snapshot never mutates schema.
#[async_trait]
pub trait CatalogParser: Send + Sync {
    /// Check that the connection is alive.
    async fn ping(&self) -> Result<()>;

    /// Fetch column descriptors for a table, in catalog ordinal order.
    async fn fetch_columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnDescriptor>>;

    /// Fetch all constraints touching a table, in a deterministic
    /// catalog order.
    async fn fetch_constraints(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Vec<ConstraintDescriptor>>;

    /// Render the type fragment of a column descriptor
    /// (`VARCHAR(200)`, `NUMERIC(10, 2)`).
    ///
    /// The error variant carries the column name; recovery fills in the
    /// owning table.
    fn render_column_type(&self, col: &ColumnDescriptor) -> Result<String>;

    /// Fetch the definition text of a stored procedure, or `None` when
    /// nothing matches the name pattern.
    async fn fetch_procedure_definition(
        &self,
        schema: &str,
        name_pattern: &str,
    ) -> Result<Option<String>>;

    /// Get the dialect identifier (e.g., "postgres").
    fn db_type(&self) -> &str;

    /// Close the underlying connection pool.
    async fn close(&self);
}
