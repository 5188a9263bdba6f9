//! ddl-snapshot CLI - generate DDL scripts from a live database catalog.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ddl_snapshot::{Config, Generator, SnapshotError, TableEntry};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "ddl-snapshot")]
#[command(about = "Generate a DDL script for a requested set of tables")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "snapshot.yaml")]
    config: PathBuf,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the DDL script and write it to stdout
    Generate {
        /// Write the script to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override configured tables: schema.table[,schema.table...]
        #[arg(long)]
        tables: Option<String>,
    },

    /// Test the database connection
    HealthCheck {
        /// Output the report as JSON
        #[arg(long)]
        output_json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), SnapshotError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    let mut config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    match cli.command {
        Commands::Generate { output, tables } => {
            if let Some(list) = tables {
                config.tables = parse_tables_flag(&list)?;
                config.validate()?;
            }

            let generator = Generator::connect(config).await?;
            let script = generator.run().await?;
            generator.close().await;

            match output {
                Some(path) => {
                    std::fs::write(&path, &script)?;
                    info!("Wrote script to {:?}", path);
                }
                None => println!("{}", script),
            }
        }

        Commands::HealthCheck { output_json } => {
            let generator = Generator::connect(config).await?;
            let report = generator.health_check().await?;
            generator.close().await;

            if output_json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Health Check Results:");
                println!(
                    "  Database ({}): {} ({}ms)",
                    report.db_type,
                    if report.connected { "OK" } else { "FAILED" },
                    report.latency_ms
                );
                if let Some(ref err) = report.error {
                    println!("    Error: {}", err);
                }
            }

            if !report.connected {
                return Err(SnapshotError::connection(
                    report.error.unwrap_or_else(|| "ping failed".to_string()),
                ));
            }
        }
    }

    Ok(())
}

/// Parse the flat `schema.table[,schema.table...]` override format.
fn parse_tables_flag(list: &str) -> Result<Vec<TableEntry>, SnapshotError> {
    let mut entries = Vec::new();
    for item in list.split(',') {
        let item = item.trim();
        match item.split_once('.') {
            Some((schema, name)) if !schema.is_empty() && !name.is_empty() => {
                entries.push(TableEntry {
                    schema: schema.to_string(),
                    name: name.to_string(),
                    where_clause: None,
                });
            }
            _ => {
                return Err(SnapshotError::Config(format!(
                    "invalid table '{}': expected schema.table",
                    item
                )));
            }
        }
    }
    Ok(entries)
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so the generated script on stdout stays clean.
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tables_flag() {
        let entries = parse_tables_flag("public.customers,public.orders").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].full_name(), "public.customers");
        assert_eq!(entries[1].full_name(), "public.orders");
    }

    #[test]
    fn test_parse_tables_flag_trims_whitespace() {
        let entries = parse_tables_flag("public.customers, sales.orders").unwrap();
        assert_eq!(entries[1].full_name(), "sales.orders");
    }

    #[test]
    fn test_parse_tables_flag_rejects_bare_name() {
        assert!(parse_tables_flag("customers").is_err());
        assert!(parse_tables_flag("public.").is_err());
        assert!(parse_tables_flag(".customers").is_err());
    }
}
