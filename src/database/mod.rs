//! Database connection and schema management
//!
//! One pooled SeaORM connection is shared by the repositories and the entity
//! store. SQLite, PostgreSQL and MySQL URLs are accepted.

use anyhow::{Context, Result};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaOrmDatabase, DatabaseBackend,
    DatabaseConnection,
};
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::DatabaseConfig;
use crate::config::defaults::DEFAULT_MAX_CONNECTIONS;

pub mod migrations;
pub mod repositories;

/// Shared database handle
#[derive(Clone)]
pub struct Database {
    connection: Arc<DatabaseConnection>,
    backend: DatabaseBackend,
}

impl Database {
    /// Open the pool described by `config`
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let backend = backend_for(&config.url)?;
        let url = match backend {
            DatabaseBackend::Sqlite => prepare_sqlite_url(&config.url)?,
            _ => config.url.clone(),
        };
        let in_memory = url.contains(":memory:");
        info!("Connecting to {} database", backend_name(backend));

        let mut options = ConnectOptions::new(&url);
        options
            // Every connection to an in-memory SQLite URL gets its own empty database
            .max_connections(if in_memory {
                1
            } else {
                config.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
            })
            .min_connections(1)
            .connect_timeout(Duration::from_secs(5))
            .acquire_timeout(Duration::from_secs(3))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);
        if !in_memory {
            options.max_lifetime(Duration::from_secs(1800));
        }

        let connection = SeaOrmDatabase::connect(options).await.map_err(|e| {
            error!("Database connection failed: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            anyhow::anyhow!("Failed to connect to database at '{}': {}", config.url, e)
        })?;
        debug!("Database pool ready");

        Ok(Self {
            connection: Arc::new(connection),
            backend,
        })
    }

    /// Bring the schema up to date
    pub async fn migrate(&self) -> Result<()> {
        use migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(&*self.connection, None)
            .await
            .context("Failed to run migrations")?;
        info!("Schema migrated on {}", backend_name(self.backend));
        Ok(())
    }

    /// Round-trip to the store; used by the health endpoint
    pub async fn ping(&self) -> Result<()> {
        self.connection
            .execute_unprepared("SELECT 1")
            .await
            .context("Database ping failed")?;
        Ok(())
    }

    pub fn connection(&self) -> Arc<DatabaseConnection> {
        self.connection.clone()
    }

    pub fn backend(&self) -> DatabaseBackend {
        self.backend
    }
}

fn backend_for(url: &str) -> Result<DatabaseBackend> {
    match url.split_once(':').map(|(scheme, _)| scheme) {
        Some("sqlite") => Ok(DatabaseBackend::Sqlite),
        Some("postgres") | Some("postgresql") => Ok(DatabaseBackend::Postgres),
        Some("mysql") => Ok(DatabaseBackend::MySql),
        _ => anyhow::bail!("Unsupported database URL: {}", url),
    }
}

fn backend_name(backend: DatabaseBackend) -> &'static str {
    match backend {
        DatabaseBackend::Sqlite => "SQLite",
        DatabaseBackend::Postgres => "PostgreSQL",
        DatabaseBackend::MySql => "MySQL",
    }
}

/// Ask SQLite to create a missing database file (and its directory)
fn prepare_sqlite_url(url: &str) -> Result<String> {
    if url.contains(":memory:") || url.contains("mode=") {
        return Ok(url.to_string());
    }

    let file = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .with_context(|| format!("Invalid SQLite URL: {url}"))?;
    let file = file.split('?').next().unwrap_or(file);
    let path = Path::new(file);
    if path.exists() {
        return Ok(url.to_string());
    }

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create database directory {}", dir.display()))?;
    }

    let separator = if url.contains('?') { '&' } else { '?' };
    let prepared = format!("{url}{separator}mode=rwc");
    info!("SQLite database {} will be created", path.display());
    Ok(prepared)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_for() {
        assert_eq!(backend_for("sqlite::memory:").unwrap(), DatabaseBackend::Sqlite);
        assert_eq!(
            backend_for("postgresql://localhost/fyc").unwrap(),
            DatabaseBackend::Postgres
        );
        assert_eq!(backend_for("postgres://localhost/fyc").unwrap(), DatabaseBackend::Postgres);
        assert_eq!(backend_for("mysql://localhost/fyc").unwrap(), DatabaseBackend::MySql);
        assert!(backend_for("redis://localhost").is_err());
    }

    #[test]
    fn test_sqlite_url_preparation() {
        assert_eq!(prepare_sqlite_url("sqlite::memory:").unwrap(), "sqlite::memory:");
        assert_eq!(
            prepare_sqlite_url("sqlite://./x.db?mode=ro").unwrap(),
            "sqlite://./x.db?mode=ro"
        );

        let dir = std::env::temp_dir().join(format!("fyc-registry-{}", std::process::id()));
        let url = format!("sqlite://{}/nested/registry.db", dir.display());
        assert_eq!(prepare_sqlite_url(&url).unwrap(), format!("{url}?mode=rwc"));
        assert!(dir.join("nested").is_dir());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_connect_migrate_and_ping_in_memory() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(4),
        };
        let database = Database::new(&config).await.unwrap();
        database.migrate().await.unwrap();
        database.ping().await.unwrap();
        assert_eq!(database.backend(), DatabaseBackend::Sqlite);
    }
}
