//! PostgreSQL catalog parser.
//!
//! Implements [`CatalogParser`] over a deadpool-postgres pool. All
//! queries are read-only lookups against `information_schema` and
//! `pg_catalog`, parameterized and ordered so that two runs over the
//! same catalog observe identical metadata.

use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::Config as PgConfig;
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::core::traits::{CatalogParser, ColumnDescriptor, ConstraintDescriptor};
use crate::drivers::common::{SslMode, TlsBuilder};
use crate::error::{Result, SnapshotError};

/// PostgreSQL implementation of the catalog-parser capability.
#[derive(Debug)]
pub struct PostgresParser {
    pool: Pool,
    target: String,
}

impl PostgresParser {
    /// Connect to a PostgreSQL database and verify the connection.
    pub async fn connect(config: &ConnectionConfig, max_conns: usize) -> Result<Self> {
        let mut pg_config = PgConfig::new();
        pg_config.host(&config.host);
        pg_config.port(config.port);
        pg_config.dbname(&config.database);
        pg_config.user(&config.user);
        pg_config.password(&config.password);

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let ssl_mode = SslMode::parse(&config.ssl_mode)?;
        let pool = match TlsBuilder::new(ssl_mode).build()? {
            None => {
                let mgr = Manager::from_config(pg_config, tokio_postgres::NoTls, mgr_config);
                Pool::builder(mgr)
                    .max_size(max_conns)
                    .build()
                    .map_err(|e| SnapshotError::pool(e, "creating PostgreSQL pool"))?
            }
            Some(tls) => {
                let mgr = Manager::from_config(pg_config, tls, mgr_config);
                Pool::builder(mgr)
                    .max_size(max_conns)
                    .build()
                    .map_err(|e| SnapshotError::pool(e, "creating PostgreSQL pool"))?
            }
        };

        let target = format!("{}:{}/{}", config.host, config.port, config.database);
        let parser = Self { pool, target };

        parser.ping().await?;
        info!("Connected to PostgreSQL catalog: {}", parser.target);

        Ok(parser)
    }

    async fn client(&self, context: &str) -> Result<deadpool_postgres::Object> {
        self.pool
            .get()
            .await
            .map_err(|e| SnapshotError::pool(e, context.to_string()))
    }
}

#[async_trait]
impl CatalogParser for PostgresParser {
    async fn ping(&self) -> Result<()> {
        let client = self.client("getting connection for ping").await?;
        client
            .simple_query("SELECT 1")
            .await
            .map_err(|e| SnapshotError::connection(format!("{}: {}", self.target, e)))?;
        Ok(())
    }

    async fn fetch_columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let client = self.client("getting connection for fetch_columns").await?;
        let object = format!("{}.{}", schema, table);

        // Length only applies to character types and precision/scale to
        // arbitrary-precision numerics; fixed-width types report neither
        // so they render as the bare type name.
        let query = r#"
            SELECT
                column_name,
                udt_name,
                COALESCE(character_maximum_length, 0)::int4,
                CASE WHEN udt_name IN ('numeric', 'decimal')
                     THEN COALESCE(numeric_precision, 0) ELSE 0 END::int4,
                CASE WHEN udt_name IN ('numeric', 'decimal')
                     THEN COALESCE(numeric_scale, 0) ELSE 0 END::int4,
                CASE WHEN is_nullable = 'YES' THEN true ELSE false END,
                ordinal_position::int4
            FROM information_schema.columns
            WHERE table_schema = $1 AND table_name = $2
            ORDER BY ordinal_position
        "#;

        let rows = client
            .query(query, &[&schema, &table])
            .await
            .map_err(|e| SnapshotError::query(object.clone(), e))?;

        let columns: Vec<ColumnDescriptor> = rows
            .iter()
            .map(|row| ColumnDescriptor {
                name: row.get::<_, String>(0),
                data_type: row.get::<_, String>(1),
                max_length: row.get::<_, i32>(2),
                precision: row.get::<_, i32>(3),
                scale: row.get::<_, i32>(4),
                is_nullable: row.get::<_, bool>(5),
                ordinal_pos: row.get::<_, i32>(6),
            })
            .collect();

        debug!("Fetched {} columns for {}", columns.len(), object);
        Ok(columns)
    }

    async fn fetch_constraints(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Vec<ConstraintDescriptor>> {
        let client = self
            .client("getting connection for fetch_constraints")
            .await?;
        let object = format!("{}.{}", schema, table);

        // A constraint with no referenced relation (confrelid = 0)
        // reports its own relation, so downstream filtering sees a
        // self-reference. Name order keeps discovery order stable.
        let query = r#"
            SELECT
                r.conname,
                r.contype::text,
                CASE WHEN r.confrelid = 0
                     THEN r.conrelid::regclass::text
                     ELSE r.confrelid::regclass::text END,
                pg_catalog.pg_get_constraintdef(r.oid, true)
            FROM pg_catalog.pg_constraint r
            JOIN pg_catalog.pg_class t ON t.oid = r.conrelid
            JOIN pg_catalog.pg_namespace n ON n.oid = t.relnamespace
            WHERE n.nspname = $1 AND t.relname = $2
            ORDER BY r.conname
        "#;

        let rows = client
            .query(query, &[&schema, &table])
            .await
            .map_err(|e| SnapshotError::query(object.clone(), e))?;

        let constraints: Vec<ConstraintDescriptor> = rows
            .iter()
            .map(|row| ConstraintDescriptor {
                name: row.get::<_, String>(0),
                kind_code: row.get::<_, String>(1),
                referenced: row.get::<_, String>(2),
                definition: row.get::<_, String>(3),
            })
            .collect();

        debug!("Fetched {} constraints for {}", constraints.len(), object);
        Ok(constraints)
    }

    fn render_column_type(&self, col: &ColumnDescriptor) -> Result<String> {
        render_type_fragment(col)
    }

    async fn fetch_procedure_definition(
        &self,
        schema: &str,
        name_pattern: &str,
    ) -> Result<Option<String>> {
        let client = self
            .client("getting connection for fetch_procedure_definition")
            .await?;
        let object = format!("{}.{}", schema, name_pattern);

        let query = r#"
            SELECT pg_catalog.pg_get_functiondef(p.oid)
            FROM pg_catalog.pg_proc p
            JOIN pg_catalog.pg_namespace n ON n.oid = p.pronamespace
            WHERE n.nspname ~ $1 AND p.proname ~ $2
            ORDER BY p.oid
            LIMIT 1
        "#;

        let rows = client
            .query(query, &[&schema, &name_pattern])
            .await
            .map_err(|e| SnapshotError::query(object, e))?;

        Ok(rows.first().map(|row| row.get::<_, String>(0)))
    }

    fn db_type(&self) -> &str {
        "postgres"
    }

    async fn close(&self) {
        self.pool.close();
    }
}

/// Render a column descriptor into its type fragment.
///
/// `NUMERIC(10, 2)` for precision/scale types, `VARCHAR(200)` for length
/// types, the bare uppercased name otherwise.
fn render_type_fragment(col: &ColumnDescriptor) -> Result<String> {
    if col.data_type.trim().is_empty() {
        return Err(SnapshotError::UnsupportedType {
            object: String::new(),
            column: col.name.clone(),
            type_name: col.data_type.clone(),
        });
    }

    let mut ddl = col.data_type.to_uppercase();

    if col.precision > 0 {
        ddl.push('(');
        ddl.push_str(&col.precision.to_string());
        if col.scale > 0 {
            ddl.push_str(", ");
            ddl.push_str(&col.scale.to_string());
        }
        ddl.push(')');
    }

    if col.max_length > 0 {
        ddl.push_str(&format!("({})", col.max_length));
    }

    Ok(ddl)
}
