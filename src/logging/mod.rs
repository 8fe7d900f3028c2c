//! Logging
//!
//! Console output for every command, plus rotated JSON files for the server
//! when `logging.local_enabled` is set. `RUST_LOG` overrides the configured
//! level.
//!
//! ```no_run
//! use ficha::logging::init_logging;
//! use ficha::config::LoggingConfig;
//!
//! let _guard = init_logging("info", &LoggingConfig::default()).unwrap();
//! tracing::info!(backend = "memory", "Server starting");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// One line per handled request; 5xx answers log at warn
///
/// ```no_run
/// use ficha::log_request_complete;
/// use std::time::Duration;
///
/// log_request_complete!("patient.create", 201u16, Duration::from_millis(12));
/// ```
#[macro_export]
macro_rules! log_request_complete {
    ($endpoint:expr, $status:expr, $duration:expr) => {{
        let status: u16 = $status;
        let elapsed_ms = $duration.as_millis() as u64;
        if status >= 500 {
            tracing::warn!(endpoint = $endpoint, status, elapsed_ms, "Request failed");
        } else {
            tracing::info!(endpoint = $endpoint, status, elapsed_ms, "Request handled");
        }
    }};
}

/// Log a server-side failure against the endpoint that hit it
///
/// ```no_run
/// use ficha::log_error_with_context;
/// use ficha::domain::FichaError;
///
/// let error = FichaError::Database("pool timed out".to_string());
/// log_error_with_context!(&error, "patient.search");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $endpoint:expr) => {
        tracing::error!(endpoint = $endpoint, error = %$error, "Unhandled error");
    };
}
