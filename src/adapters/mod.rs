//! Storage backends for Ficha.
//!
//! - [`database`] - the [`database::PatientStore`] trait, shared row mappers and
//!   the factory that picks a backend from configuration
//! - [`postgresql`] - PostgreSQL backend (`tokio-postgres` + `deadpool-postgres`)
//! - [`memory`] - in-process backend for development and tests
//!
//! # Example
//!
//! ```rust,no_run
//! use ficha::adapters::database::create_patient_store;
//! use ficha::config::FichaConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FichaConfig::default();
//! let store = create_patient_store(&config).await?;
//! store.test_connection().await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod memory;
pub mod postgresql;
