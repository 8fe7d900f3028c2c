//! Store factory
//!
//! Creates the configured [`PatientStore`] implementation.

use crate::adapters::database::traits::PatientStore;
use crate::adapters::memory::MemoryStore;
use crate::adapters::postgresql::{PostgreSQLClient, PostgreSQLStore};
use crate::config::schema::{DatabaseTarget, FichaConfig};
use crate::domain::{FichaError, Result};
use std::sync::Arc;

/// Create a patient store based on the configuration
///
/// # Errors
///
/// Returns an error if the PostgreSQL section is missing or the pool cannot be
/// built. Building the pool does not open a connection; call
/// [`PatientStore::test_connection`] to check reachability.
pub async fn create_patient_store(config: &FichaConfig) -> Result<Arc<dyn PatientStore>> {
    match config.database_target {
        DatabaseTarget::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                FichaError::Configuration(
                    "postgresql configuration is required when database_target = 'postgresql'"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating PostgreSQL patient store");
            let client = PostgreSQLClient::new(pg_config.clone()).await?;
            Ok(Arc::new(PostgreSQLStore::new(client)) as Arc<dyn PatientStore>)
        }
        DatabaseTarget::Memory => {
            tracing::warn!("Using in-memory patient store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()) as Arc<dyn PatientStore>)
        }
    }
}
