//! Shared handler state

use crate::adapters::database::PatientStore;
use crate::config::FichaConfig;
use std::sync::Arc;

/// State cloned into every handler
///
/// Holds nothing mutable; the store's pool is the only resource shared across
/// requests.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn PatientStore>,
    cors_origin: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn PatientStore>, cors_origin: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            cors_origin: cors_origin.into(),
        }
    }

    pub fn from_config(store: Arc<dyn PatientStore>, config: &FichaConfig) -> Self {
        Self::new(store, config.server.cors_allow_origin.as_str())
    }

    pub fn store(&self) -> &dyn PatientStore {
        self.store.as_ref()
    }

    pub fn cors_origin(&self) -> &str {
        &self.cors_origin
    }
}
