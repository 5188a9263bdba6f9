//! Constraint filtering, ordering, and script assembly.
//!
//! The constraint pool gathered across every recovered table is filtered
//! down to relationships internal to the requested set, ordered so the
//! script is valid SQL top-to-bottom, and joined with the `CREATE TABLE`
//! and procedure sections into the final text.

use std::collections::HashSet;

use crate::core::schema::{Constraint, ConstraintKind, Procedure, Table};
use crate::error::Result;

/// Filter the global constraint pool and order it for emission.
///
/// A constraint survives only if its referenced table is itself a member
/// of the requested set; constraints pointing outside the set are
/// dropped, never emitted as dangling references. Survivors are
/// stable-partitioned into primary keys, then foreign keys, then the
/// rest, preserving discovery order within each bucket.
pub fn filter_and_order(tables: &[Table]) -> Vec<&Constraint> {
    let members: HashSet<(&str, &str)> = tables
        .iter()
        .map(|t| (t.schema.as_str(), t.name.as_str()))
        .collect();

    let pool: Vec<&Constraint> = tables
        .iter()
        .flat_map(|t| t.constraints.iter())
        .filter(|c| members.contains(&(c.ref_schema.as_str(), c.ref_table.as_str())))
        .collect();

    let mut ordered = Vec::with_capacity(pool.len());
    for kind in ConstraintKind::EMISSION_ORDER {
        ordered.extend(pool.iter().copied().filter(|c| c.kind == kind));
    }
    ordered
}

/// Assemble the final script text.
///
/// Sections, each joined by blank lines: `CREATE TABLE` statements in
/// request order, then the ordered constraint statements, then any
/// procedure definitions. Fails with `MissingColumns` rather than
/// emitting an invalid empty `CREATE TABLE`.
pub fn assemble(
    tables: &[Table],
    constraints: &[&Constraint],
    procedures: &[Procedure],
) -> Result<String> {
    let mut statements = Vec::with_capacity(tables.len() + constraints.len() + procedures.len());

    for table in tables {
        statements.push(table.create_ddl()?);
    }
    for constraint in constraints {
        statements.push(constraint.ddl.clone());
    }
    for procedure in procedures {
        statements.push(procedure.definition.clone());
    }

    Ok(statements.join("\n\n"))
}

/// Filter, order, and assemble in one pass.
pub fn render_script(tables: &[Table], procedures: &[Procedure]) -> Result<String> {
    let ordered = filter_and_order(tables);
    assemble(tables, &ordered, procedures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::Column;

    fn column(name: &str, ddl: &str) -> Column {
        Column {
            name: name.to_string(),
            data_type: "int4".to_string(),
            max_length: 0,
            precision: 0,
            scale: 0,
            is_nullable: false,
            ddl: ddl.to_string(),
        }
    }

    fn constraint(
        name: &str,
        kind: ConstraintKind,
        owner: (&str, &str),
        referenced: (&str, &str),
    ) -> Constraint {
        Constraint {
            name: name.to_string(),
            kind,
            schema: owner.0.to_string(),
            table: owner.1.to_string(),
            ref_schema: referenced.0.to_string(),
            ref_table: referenced.1.to_string(),
            ddl: format!(
                "ALTER TABLE {}.{} ADD CONSTRAINT {} ...;",
                owner.0, owner.1, name
            ),
        }
    }

    fn table(schema: &str, name: &str, constraints: Vec<Constraint>) -> Table {
        Table {
            schema: schema.to_string(),
            name: name.to_string(),
            columns: vec![column("id", "id INT4 NOT NULL")],
            constraints,
        }
    }

    /// Requested set {customers, orders}; orders also references an
    /// unrequested audit_log table.
    fn requested_set() -> Vec<Table> {
        vec![
            table(
                "public",
                "customers",
                vec![constraint(
                    "customers_pk",
                    ConstraintKind::PrimaryKey,
                    ("public", "customers"),
                    ("public", "customers"),
                )],
            ),
            table(
                "public",
                "orders",
                vec![
                    constraint(
                        "orders_customer_fk",
                        ConstraintKind::ForeignKey,
                        ("public", "orders"),
                        ("public", "customers"),
                    ),
                    constraint(
                        "orders_audit_fk",
                        ConstraintKind::ForeignKey,
                        ("public", "orders"),
                        ("public", "audit_log"),
                    ),
                ],
            ),
        ]
    }

    #[test]
    fn test_filtering_drops_external_references() {
        let tables = requested_set();
        let ordered = filter_and_order(&tables);

        let names: Vec<&str> = ordered.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["customers_pk", "orders_customer_fk"]);
    }

    #[test]
    fn test_ordering_pk_before_fk_before_unique() {
        let tables = vec![
            table(
                "public",
                "a",
                vec![
                    constraint(
                        "a_key",
                        ConstraintKind::Unique,
                        ("public", "a"),
                        ("public", "a"),
                    ),
                    constraint(
                        "a_b_fk",
                        ConstraintKind::ForeignKey,
                        ("public", "a"),
                        ("public", "b"),
                    ),
                    constraint(
                        "a_pk",
                        ConstraintKind::PrimaryKey,
                        ("public", "a"),
                        ("public", "a"),
                    ),
                ],
            ),
            table(
                "public",
                "b",
                vec![constraint(
                    "b_pk",
                    ConstraintKind::PrimaryKey,
                    ("public", "b"),
                    ("public", "b"),
                )],
            ),
        ];

        let kinds: Vec<ConstraintKind> = filter_and_order(&tables).iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ConstraintKind::PrimaryKey,
                ConstraintKind::PrimaryKey,
                ConstraintKind::ForeignKey,
                ConstraintKind::Unique,
            ]
        );
    }

    #[test]
    fn test_two_uniques_keep_discovery_order() {
        let tables = vec![table(
            "public",
            "t",
            vec![
                constraint(
                    "t_b_key",
                    ConstraintKind::Unique,
                    ("public", "t"),
                    ("public", "t"),
                ),
                constraint(
                    "t_a_key",
                    ConstraintKind::Unique,
                    ("public", "t"),
                    ("public", "t"),
                ),
            ],
        )];

        let names: Vec<&str> = filter_and_order(&tables)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        // discovery order, not alphabetical
        assert_eq!(names, vec!["t_b_key", "t_a_key"]);
    }

    #[test]
    fn test_assemble_section_order() {
        let tables = requested_set();
        let script = render_script(&tables, &[]).unwrap();

        let create_customers = script.find("CREATE TABLE public.customers").unwrap();
        let create_orders = script.find("CREATE TABLE public.orders").unwrap();
        let pk = script.find("customers_pk").unwrap();
        let fk = script.find("orders_customer_fk").unwrap();

        assert!(create_customers < create_orders);
        assert!(create_orders < pk);
        assert!(pk < fk);
        assert!(!script.contains("audit"));
    }

    #[test]
    fn test_assemble_appends_procedures() {
        let tables = requested_set();
        let procedures = vec![Procedure {
            schema: "public".to_string(),
            name: "fn_totals".to_string(),
            definition: "CREATE FUNCTION public.fn_totals() RETURNS void ...".to_string(),
        }];

        let script = render_script(&tables, &procedures).unwrap();
        assert!(script.ends_with("CREATE FUNCTION public.fn_totals() RETURNS void ..."));
    }

    #[test]
    fn test_assemble_fails_on_table_without_columns() {
        let mut tables = requested_set();
        tables[1].columns.clear();

        let err = render_script(&tables, &[]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::SnapshotError::MissingColumns(ref n) if n == "public.orders"
        ));
    }

    #[test]
    fn test_deterministic_output() {
        let tables = requested_set();
        let first = render_script(&tables, &[]).unwrap();
        let second = render_script(&tables, &[]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_statements_joined_by_blank_lines() {
        let tables = requested_set();
        let script = render_script(&tables, &[]).unwrap();
        assert_eq!(script.matches("\n\n").count(), 3);
        assert!(!script.ends_with('\n'));
    }
}
