//! Configuration management for Ficha.
//!
//! Ficha reads an optional TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every optional setting
//! - Environment overrides (`POSTGRES_URL`, `BACKEND_URL`, `FICHA_*`)
//! - Validation after overrides are applied
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ficha::config::load_config_or_env;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_env("ficha.toml")?;
//! println!("Listening on {}", config.server.bind_address);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! database_target = "postgresql"
//!
//! [application]
//! log_level = "info"
//!
//! [server]
//! bind_address = "0.0.0.0:3000"
//! cors_allow_origin = "*"
//!
//! [postgresql]
//! connection_string = "${POSTGRES_URL}"
//! max_connections = 10
//!
//! [client]
//! backend_url = "http://localhost:3000"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_env, load_config_or_env};
pub use schema::{
    ApplicationConfig, ClientConfig, DatabaseTarget, FichaConfig, LoggingConfig,
    PostgreSQLConfig, ServerConfig,
};
pub use secret::{redacted, secret_string, SecretString, SecretValue};
