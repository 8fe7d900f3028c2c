//! CLI command implementations
//!
//! Each command returns its exit code; `anyhow` errors are reserved for
//! failures the command cannot describe itself.

pub mod check_cui;
pub mod history;
pub mod init;
pub mod init_db;
pub mod register;
pub mod search;
pub mod serve;
pub mod student;
pub mod validate;

use crate::cli::exit_codes;
use crate::client::PatientApiClient;
use crate::config::load_config_or_env;
use crate::domain::ClientError;
use std::sync::Arc;

/// Exit code for a failed API call
pub fn exit_code_for(error: &ClientError) -> i32 {
    match error {
        ClientError::Transport(_) => exit_codes::CONNECTION,
        ClientError::Server { status: 503, .. } => exit_codes::CONNECTION,
        ClientError::Server { .. } | ClientError::ContractChanged(_) => exit_codes::FATAL,
        ClientError::BadRequest { .. } | ClientError::NotFound(_) | ClientError::Conflict(_) => {
            exit_codes::REJECTED
        }
    }
}

/// Build an API client from configuration and check that the server answers
///
/// On failure the problem has already been printed and the exit code is
/// returned as the error.
pub(crate) async fn connect(config_path: &str) -> Result<Arc<PatientApiClient>, i32> {
    let config = match load_config_or_env(config_path) {
        Ok(c) => c,
        Err(e) => {
            println!("❌ Failed to load configuration");
            println!("   Error: {e}");
            return Err(exit_codes::CONFIG);
        }
    };

    let client = match PatientApiClient::new(&config.client) {
        Ok(c) => c,
        Err(e) => {
            println!("❌ {}", e.user_message());
            println!("   Error: {e}");
            return Err(exit_codes::CONFIG);
        }
    };

    match client.health().await {
        Ok(report) => {
            tracing::debug!(
                backend_url = %client.base_url(),
                database = %report.database,
                "Patient API reachable"
            );
            Ok(Arc::new(client))
        }
        Err(e) => {
            println!("❌ {}", e.user_message());
            println!("   {} ({e})", client.base_url());
            Err(exit_code_for(&e))
        }
    }
}
