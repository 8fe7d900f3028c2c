//! Database abstraction layer
//!
//! [`PatientStore`] is the seam between the HTTP handlers and storage.
//! [`rows`] holds the storage-to-API mappers shared by every backend.

pub mod factory;
pub mod rows;
pub mod traits;

pub use factory::create_patient_store;
pub use traits::{PatientStore, SEARCH_LIMIT};
