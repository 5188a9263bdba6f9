//! Configuration validation.

use std::collections::HashSet;

use super::Config;
use crate::drivers::common::SslMode;
use crate::error::{Result, SnapshotError};

/// Validate the configuration.
///
/// Every problem detected here is reported before any query is issued.
pub fn validate(config: &Config) -> Result<()> {
    if config.connection.host.is_empty() {
        return Err(SnapshotError::Config("connection.host is required".into()));
    }
    if config.connection.database.is_empty() {
        return Err(SnapshotError::Config(
            "connection.database is required".into(),
        ));
    }
    if config.connection.user.is_empty() {
        return Err(SnapshotError::Config("connection.user is required".into()));
    }
    if config.connection.r#type.is_empty() {
        return Err(SnapshotError::Config("connection.type is required".into()));
    }
    SslMode::parse(&config.connection.ssl_mode)?;

    if config.tables.is_empty() {
        return Err(SnapshotError::Config(
            "at least one table entry is required".into(),
        ));
    }

    let mut seen = HashSet::new();
    for (i, table) in config.tables.iter().enumerate() {
        if table.schema.is_empty() || table.name.is_empty() {
            return Err(SnapshotError::Config(format!(
                "tables[{}]: schema and name are required",
                i
            )));
        }
        if !seen.insert((table.schema.clone(), table.name.clone())) {
            return Err(SnapshotError::Config(format!(
                "duplicate table entry: {}",
                table.full_name()
            )));
        }
    }

    for (i, proc) in config.procedures.iter().enumerate() {
        if proc.schema.is_empty() || proc.name.is_empty() {
            return Err(SnapshotError::Config(format!(
                "procedures[{}]: schema and name are required",
                i
            )));
        }
    }

    Ok(())
}
