//! Schema metadata types for tables, columns, constraints, and procedures.
//!
//! These types are a database-agnostic representation of the catalog
//! metadata recovered for a requested table set. They are populated once
//! during recovery and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SnapshotError};

/// Constraint kind, in emission order.
///
/// Primary keys must be created before the foreign keys that reference
/// them; unique constraints are independent and emitted last for
/// determinism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
    Unique,
}

impl ConstraintKind {
    /// Classify a raw catalog constraint-type code.
    ///
    /// PostgreSQL's `contype` uses `p` for primary keys and `f` for
    /// foreign keys; everything else (unique, check, exclusion) is
    /// treated as a standalone constraint emitted last.
    pub fn from_code(code: &str) -> Self {
        match code.chars().next() {
            Some('p') => ConstraintKind::PrimaryKey,
            Some('f') => ConstraintKind::ForeignKey,
            _ => ConstraintKind::Unique,
        }
    }

    /// Emission order of all kinds.
    pub const EMISSION_ORDER: [ConstraintKind; 3] = [
        ConstraintKind::PrimaryKey,
        ConstraintKind::ForeignKey,
        ConstraintKind::Unique,
    ];
}

/// Column metadata with its pre-rendered DDL fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Raw database type name (e.g., "varchar", "numeric").
    pub data_type: String,

    /// Maximum length for string/binary types (0 if not applicable).
    pub max_length: i32,

    /// Numeric precision (0 if not applicable).
    pub precision: i32,

    /// Numeric scale (0 if not applicable).
    pub scale: i32,

    /// Whether the column allows NULL.
    pub is_nullable: bool,

    /// Rendered DDL fragment (`name TYPE(p, s)(l) [NOT] NULL`).
    pub ddl: String,
}

/// Constraint metadata with its pre-rendered `ALTER TABLE` statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraint {
    /// Constraint name.
    pub name: String,

    /// Classified kind.
    pub kind: ConstraintKind,

    /// Owning schema.
    pub schema: String,

    /// Owning table.
    pub table: String,

    /// Referenced schema (owning schema if the constraint references
    /// nothing outside its table).
    pub ref_schema: String,

    /// Referenced table (owning table if self-contained).
    pub ref_table: String,

    /// Rendered `ALTER TABLE ... ADD CONSTRAINT ...;` statement.
    pub ddl: String,
}

impl Constraint {
    /// Get the schema-qualified referenced table name.
    pub fn referenced_name(&self) -> String {
        format!("{}.{}", self.ref_schema, self.ref_table)
    }
}

/// Table metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Schema name.
    pub schema: String,

    /// Table name.
    pub name: String,

    /// Column definitions, in catalog ordinal order.
    pub columns: Vec<Column>,

    /// Constraints touching this table, in catalog discovery order.
    pub constraints: Vec<Constraint>,
}

impl Table {
    /// Get the schema-qualified table name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }

    /// Render the `CREATE TABLE` statement for this table.
    ///
    /// Column fragments are emitted in catalog order, joined by `,\n`.
    /// A table with zero columns is a data error, never rendered as
    /// `CREATE TABLE s.t ( );`.
    pub fn create_ddl(&self) -> Result<String> {
        if self.columns.is_empty() {
            return Err(SnapshotError::MissingColumns(self.full_name()));
        }

        let fragments: Vec<&str> = self.columns.iter().map(|c| c.ddl.as_str()).collect();
        Ok(format!(
            "CREATE TABLE {}.{} (\n{}\n);",
            self.schema,
            self.name,
            fragments.join(",\n")
        ))
    }
}

/// Stored procedure metadata. The definition is opaque text recovered
/// from the catalog and emitted verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Procedure {
    /// Schema name.
    pub schema: String,

    /// Procedure name.
    pub name: String,

    /// Raw definition text.
    pub definition: String,
}

impl Procedure {
    /// Get the schema-qualified procedure name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}
