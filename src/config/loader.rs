//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{FichaConfig, PostgreSQLConfig};
use super::secret_string;
use crate::domain::errors::FichaError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Connection string variable shared with the provisioning scripts
pub const POSTGRES_URL_ENV: &str = "POSTGRES_URL";

/// API base URL variable shared with the client build
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into FichaConfig
/// 4. Applies environment variable overrides
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a referenced
/// variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use ficha::config::loader::load_config;
///
/// let config = load_config("ficha.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FichaConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FichaError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FichaError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: FichaConfig = toml::from_str(&contents)
        .map_err(|e| FichaError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

/// Builds configuration from defaults and the environment only
///
/// This is how the service runs when no configuration file is deployed:
/// `POSTGRES_URL` and `BACKEND_URL` (plus any `FICHA_*` override) are enough.
pub fn load_config_from_env() -> Result<FichaConfig> {
    let mut config = FichaConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Loads `path` when it exists, otherwise falls back to [`load_config_from_env`]
pub fn load_config_or_env(path: impl AsRef<Path>) -> Result<FichaConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(
            path = %path.display(),
            "Configuration file not found, using environment"
        );
        load_config_from_env()
    }
}

fn validate(config: &FichaConfig) -> Result<()> {
    config.validate().map_err(|e| {
        FichaError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| FichaError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(FichaError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides
///
/// `POSTGRES_URL` and `BACKEND_URL` keep their deployment names; everything
/// else follows FICHA_<SECTION>_<KEY>.
fn apply_env_overrides(config: &mut FichaConfig) -> Result<()> {
    if let Ok(val) = std::env::var("FICHA_DATABASE_TARGET") {
        config.database_target = val.parse().map_err(FichaError::Configuration)?;
    }

    // Application overrides
    if let Ok(val) = std::env::var("FICHA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Server overrides
    if let Ok(val) = std::env::var("FICHA_SERVER_BIND_ADDRESS") {
        config.server.bind_address = val;
    }
    if let Ok(val) = std::env::var("FICHA_SERVER_CORS_ALLOW_ORIGIN") {
        config.server.cors_allow_origin = val;
    }

    // PostgreSQL overrides
    if let Ok(val) = std::env::var(POSTGRES_URL_ENV) {
        match config.postgresql {
            Some(ref mut pg) => pg.connection_string = secret_string(val),
            None => {
                config.postgresql =
                    Some(PostgreSQLConfig::with_connection_string(secret_string(val)))
            }
        }
    }
    if let Some(ref mut pg) = config.postgresql {
        if let Ok(val) = std::env::var("FICHA_POSTGRESQL_MAX_CONNECTIONS") {
            if let Ok(max) = val.parse() {
                pg.max_connections = max;
            }
        }
        if let Ok(val) = std::env::var("FICHA_POSTGRESQL_STATEMENT_TIMEOUT_SECONDS") {
            if let Ok(timeout) = val.parse() {
                pg.statement_timeout_seconds = timeout;
            }
        }
    }

    // Client overrides
    if let Ok(val) = std::env::var(BACKEND_URL_ENV) {
        config.client.backend_url = val;
    }
    if let Ok(val) = std::env::var("FICHA_CLIENT_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.client.timeout_seconds = timeout;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("FICHA_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("FICHA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
