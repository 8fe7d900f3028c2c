//! Serve command implementation

use crate::adapters::database::create_patient_store;
use crate::api::{self, AppState};
use crate::cli::exit_codes;
use crate::config::load_config_or_env;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override `server.bind_address`
    #[arg(long)]
    pub bind: Option<String>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_config_or_env(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(exit_codes::CONFIG);
            }
        };

        if let Some(bind) = &self.bind {
            config.server.bind_address = bind.clone();
            if let Err(e) = config.validate() {
                println!("❌ Invalid --bind value");
                println!("   Error: {e}");
                return Ok(exit_codes::CONFIG);
            }
        }

        let store = match create_patient_store(&config).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to create patient store");
                println!("   Error: {e}");
                return Ok(exit_codes::CONFIG);
            }
        };

        if let Err(e) = store.test_connection().await {
            tracing::error!(backend = store.backend_name(), error = %e, "Store unreachable");
            println!("❌ Failed to connect to database");
            println!("   Error: {e}");
            return Ok(exit_codes::CONNECTION);
        }

        tracing::info!(
            backend = store.backend_name(),
            bind_address = %config.server.bind_address,
            "Starting Ficha API"
        );

        let state = AppState::from_config(store, &config);
        api::serve(&config.server, state, shutdown_signal).await?;
        Ok(exit_codes::OK)
    }
}
