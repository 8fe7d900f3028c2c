//! PostgreSQL storage backend
//!
//! [`PostgreSQLClient`] owns the pool and the migrations; [`PostgreSQLStore`]
//! implements [`crate::adapters::database::PatientStore`] on top of it.

pub mod client;
pub mod models;
pub mod store;

pub use client::PostgreSQLClient;
pub use store::PostgreSQLStore;
