//! PostgreSQL client implementation
//!
//! Owns the connection pool. Connections are handed out as
//! [`deadpool_postgres::Object`]s that go back to the pool when dropped, so a
//! handler's connection is released on every exit path.

use crate::config::redacted;
use crate::config::schema::PostgreSQLConfig;
use crate::domain::{FichaError, Result};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::NoTls;

/// Schema migration applied by `init-db`
pub const INITIAL_SCHEMA: &str = include_str!("../../../migrations/001_initial_schema.sql");

/// Demo rows applied by `init-db --seed`
pub const SEED_DATA: &str = include_str!("../../../migrations/002_seed_data.sql");

/// PostgreSQL client for Ficha
pub struct PostgreSQLClient {
    /// Connection pool
    pool: Pool,

    /// Configuration
    config: PostgreSQLConfig,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// The statement timeout is sent as a startup option, so every pooled
    /// connection carries it without an extra round trip.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot be parsed or the pool
    /// cannot be built.
    pub async fn new(config: PostgreSQLConfig) -> Result<Self> {
        let mut pg_config: tokio_postgres::Config = config
            .connection_string
            .expose_secret()
            .parse()
            .map_err(|e| {
                FichaError::Configuration(format!("Invalid PostgreSQL connection string: {}", e))
            })?;

        pg_config.options(&format!(
            "-c statement_timeout={}",
            config.statement_timeout_seconds * 1000
        ));
        pg_config.connect_timeout(Duration::from_secs(config.connection_timeout_seconds));

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let timeout = Some(Duration::from_secs(config.connection_timeout_seconds));
        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .runtime(deadpool_postgres::Runtime::Tokio1)
            .wait_timeout(timeout)
            .create_timeout(timeout)
            .recycle_timeout(timeout)
            .build()
            .map_err(|e| {
                FichaError::Database(format!("Failed to create connection pool: {}", e))
            })?;

        Ok(Self { pool, config })
    }

    /// Test the connection to PostgreSQL
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| FichaError::Database(format!("Connection test failed: {}", e)))?;

        tracing::debug!("PostgreSQL connection test successful");
        Ok(())
    }

    /// Apply the schema migration, and the demo rows when `seed` is set
    ///
    /// Both scripts are idempotent.
    pub async fn apply_migrations(&self, seed: bool) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .batch_execute(INITIAL_SCHEMA)
            .await
            .map_err(|e| FichaError::Database(format!("Failed to execute migration: {}", e)))?;
        tracing::info!("PostgreSQL schema initialized successfully");

        if seed {
            client
                .batch_execute(SEED_DATA)
                .await
                .map_err(|e| FichaError::Database(format!("Failed to load seed data: {}", e)))?;
            tracing::info!("PostgreSQL seed data loaded");
        }

        Ok(())
    }

    /// Get a connection from the pool
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be obtained.
    pub async fn get_connection(&self) -> Result<deadpool_postgres::Object> {
        self.pool
            .get()
            .await
            .map_err(|e| FichaError::Database(format!("Failed to get connection from pool: {}", e)))
    }

    /// Get the connection string (without credentials)
    pub fn connection_string_safe(&self) -> String {
        redacted(&self.config.connection_string)
    }

    /// Get the pool statistics
    pub fn pool_status(&self) -> deadpool_postgres::Status {
        self.pool.status()
    }
}
