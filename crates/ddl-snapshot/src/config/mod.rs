//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_YAML: &str = r#"
connection:
  host: localhost
  database: appdb
  user: postgres
tables:
  - schema: public
    name: customers
"#;

    #[test]
    fn test_from_yaml_applies_defaults() {
        let config = Config::from_yaml(MINIMAL_YAML).unwrap();
        assert_eq!(config.connection.r#type, "postgres");
        assert_eq!(config.connection.port, 5432);
        assert_eq!(config.connection.ssl_mode, "disable");
        assert!(config.procedures.is_empty());
    }

    #[test]
    fn test_from_yaml_reserved_where_clause() {
        let yaml = r#"
connection:
  host: localhost
  database: appdb
  user: postgres
tables:
  - schema: public
    name: orders
    where: "created_at > now() - interval '7 days'"
procedures:
  - schema: public
    name: fn_rebuild_totals
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(
            config.tables[0].where_clause.as_deref(),
            Some("created_at > now() - interval '7 days'")
        );
        assert_eq!(config.procedures[0].full_name(), "public.fn_rebuild_totals");
    }

    #[test]
    fn test_from_yaml_rejects_invalid_yaml() {
        assert!(Config::from_yaml("connection: [").is_err());
    }

    #[test]
    fn test_from_yaml_rejects_empty_tables() {
        let yaml = r#"
connection:
  host: localhost
  database: appdb
  user: postgres
tables: []
"#;
        assert!(Config::from_yaml(yaml).is_err());
    }
}
