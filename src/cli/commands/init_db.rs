//! Init-db command implementation
//!
//! Applies the bundled schema migration, and optionally the demo rows, to the
//! configured PostgreSQL database.

use crate::adapters::postgresql::PostgreSQLClient;
use crate::cli::exit_codes;
use crate::config::load_config_or_env;
use crate::config::schema::DatabaseTarget;
use clap::Args;

/// Arguments for the init-db command
#[derive(Args, Debug)]
pub struct InitDbArgs {
    /// Also insert demo patients, students, collaborators and surgeries
    #[arg(long)]
    pub seed: bool,
}

impl InitDbArgs {
    /// Execute the init-db command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_env(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(exit_codes::CONFIG);
            }
        };

        let pg_config = match (config.database_target, config.postgresql) {
            (DatabaseTarget::PostgreSQL, Some(pg)) => pg,
            (DatabaseTarget::Memory, _) => {
                println!("❌ init-db needs database_target = \"postgresql\"");
                return Ok(exit_codes::CONFIG);
            }
            (DatabaseTarget::PostgreSQL, None) => {
                println!("❌ Missing [postgresql] section (or POSTGRES_URL)");
                return Ok(exit_codes::CONFIG);
            }
        };

        let client = match PostgreSQLClient::new(pg_config).await {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Invalid PostgreSQL configuration");
                println!("   Error: {e}");
                return Ok(exit_codes::CONFIG);
            }
        };

        println!("🗄️  Initializing {}", client.connection_string_safe());

        if let Err(e) = client.test_connection().await {
            println!("❌ Failed to connect to database");
            println!("   Error: {e}");
            return Ok(exit_codes::CONNECTION);
        }

        match client.apply_migrations(self.seed).await {
            Ok(()) => {
                println!("✅ Schema ready");
                if self.seed {
                    println!("✅ Demo data loaded");
                }
                Ok(exit_codes::OK)
            }
            Err(e) => {
                tracing::error!(error = %e, "Migration failed");
                println!("❌ Migration failed");
                println!("   Error: {e}");
                Ok(exit_codes::FATAL)
            }
        }
    }
}
