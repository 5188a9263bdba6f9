//! Table metadata recovery.
//!
//! Orchestrates the catalog parser for one table at a time: fetch the
//! raw column descriptors, render each into a DDL fragment, fetch the
//! constraints, classify and normalize them, and pre-render their
//! `ALTER TABLE` statements. Any query error aborts recovery for the
//! whole run; a partially recovered table is never treated as valid.

use tracing::{debug, warn};

use crate::core::schema::{Column, Constraint, ConstraintKind, Procedure, Table};
use crate::core::traits::CatalogParser;
use crate::error::{Result, SnapshotError};

/// Recover full metadata for one requested table.
///
/// A table whose catalog query reports zero columns fails with
/// [`SnapshotError::MissingColumns`]; an empty constraint list is valid.
pub async fn recover_table(
    parser: &dyn CatalogParser,
    schema: &str,
    name: &str,
) -> Result<Table> {
    let full_name = format!("{}.{}", schema, name);

    let descriptors = parser.fetch_columns(schema, name).await?;
    if descriptors.is_empty() {
        return Err(SnapshotError::MissingColumns(full_name));
    }

    let mut columns = Vec::with_capacity(descriptors.len());
    for desc in descriptors {
        let type_fragment = parser.render_column_type(&desc).map_err(|e| match e {
            SnapshotError::UnsupportedType {
                column, type_name, ..
            } => SnapshotError::UnsupportedType {
                object: full_name.clone(),
                column,
                type_name,
            },
            other => other,
        })?;

        let nullability = if desc.is_nullable { "NULL" } else { "NOT NULL" };
        columns.push(Column {
            ddl: format!("{} {} {}", desc.name, type_fragment, nullability),
            name: desc.name,
            data_type: desc.data_type,
            max_length: desc.max_length,
            precision: desc.precision,
            scale: desc.scale,
            is_nullable: desc.is_nullable,
        });
    }
    debug!("Recovered {} columns for {}", columns.len(), full_name);

    let raw_constraints = parser.fetch_constraints(schema, name).await?;
    let mut constraints = Vec::with_capacity(raw_constraints.len());
    for raw in raw_constraints {
        let (ref_schema, ref_table) = normalize_referenced(schema, &raw.referenced);
        constraints.push(Constraint {
            ddl: format!(
                "ALTER TABLE {}.{} ADD CONSTRAINT {} {};",
                schema, name, raw.name, raw.definition
            ),
            name: raw.name,
            kind: ConstraintKind::from_code(&raw.kind_code),
            schema: schema.to_string(),
            table: name.to_string(),
            ref_schema,
            ref_table,
        });
    }
    debug!(
        "Recovered {} constraints for {}",
        constraints.len(),
        full_name
    );

    Ok(Table {
        schema: schema.to_string(),
        name: name.to_string(),
        columns,
        constraints,
    })
}

/// Recover one requested stored procedure.
///
/// Returns `None` when the catalog has no matching definition; the
/// caller omits the procedure from the script.
pub async fn recover_procedure(
    parser: &dyn CatalogParser,
    schema: &str,
    name: &str,
) -> Result<Option<Procedure>> {
    match parser.fetch_procedure_definition(schema, name).await? {
        Some(definition) if !definition.trim().is_empty() => Ok(Some(Procedure {
            schema: schema.to_string(),
            name: name.to_string(),
            definition,
        })),
        _ => {
            warn!("No definition found for procedure {}.{}", schema, name);
            Ok(None)
        }
    }
}

/// Normalize a referenced-relation string into a (schema, table) pair.
///
/// The catalog may spell the relation schema-qualified or bare (when its
/// schema is on the server's search path); a bare name inherits the
/// owning table's schema so membership checks compare pairs uniformly.
fn normalize_referenced(owner_schema: &str, referenced: &str) -> (String, String) {
    match referenced.split_once('.') {
        Some((schema, table)) => (schema.to_string(), table.to_string()),
        None => (owner_schema.to_string(), referenced.to_string()),
    }
}
