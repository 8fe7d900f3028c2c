//! Validate config command implementation

use crate::cli::exit_codes;
use crate::config::schema::{DatabaseTarget, FichaConfig};
use crate::config::{load_config, redacted};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after applying overrides
        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                println!("{}", summary(&config));
                Ok(exit_codes::OK)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(exit_codes::CONFIG)
            }
        }
    }
}

fn summary(config: &FichaConfig) -> String {
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Bind Address: {}", config.server.bind_address),
        format!("  CORS Origin: {}", config.server.cors_allow_origin),
    ];

    match config.database_target {
        DatabaseTarget::PostgreSQL => {
            lines.push("  Database Target: PostgreSQL".to_string());
            if let Some(pg) = &config.postgresql {
                lines.push(format!(
                    "  PostgreSQL Connection: {}",
                    redacted(&pg.connection_string)
                ));
                lines.push(format!("  Max Connections: {}", pg.max_connections));
            }
        }
        DatabaseTarget::Memory => lines.push("  Database Target: memory".to_string()),
    }

    lines.push(format!("  Backend URL: {}", config.client.backend_url));
    lines.join("\n")
}
