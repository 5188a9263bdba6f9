//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection configuration.
    pub connection: ConnectionConfig,

    /// Tables to script, in emission order.
    #[serde(default)]
    pub tables: Vec<TableEntry>,

    /// Stored procedures to script, in emission order.
    #[serde(default)]
    pub procedures: Vec<ProcedureEntry>,
}

/// Database connection configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Database type (default: "postgres").
    #[serde(default = "default_postgres")]
    pub r#type: String,

    /// Database host.
    pub host: String,

    /// Database port (default: 5432).
    #[serde(default = "default_pg_port")]
    pub port: u16,

    /// Database name.
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    #[serde(default)]
    pub password: String,

    /// SSL mode (default: "disable").
    #[serde(default = "default_disable")]
    pub ssl_mode: String,
}

// Passwords must not leak into logs.
impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("type", &self.r#type)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}

/// One requested table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableEntry {
    /// Schema name.
    pub schema: String,

    /// Table name.
    pub name: String,

    /// Optional row filter, reserved for data scripting. Not used when
    /// generating DDL.
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
}

impl TableEntry {
    /// Get the schema-qualified table name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

/// One requested stored procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureEntry {
    /// Schema name.
    pub schema: String,

    /// Procedure name (matched as a pattern by the dialect).
    pub name: String,
}

impl ProcedureEntry {
    /// Get the schema-qualified procedure name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

// Default value functions for serde
fn default_postgres() -> String {
    "postgres".to_string()
}

fn default_pg_port() -> u16 {
    5432
}

fn default_disable() -> String {
    "disable".to_string()
}
