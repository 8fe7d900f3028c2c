//! CLI interface and argument parsing
//!
//! `serve`, `init-db` and `validate-config` operate the service; `check-cui`,
//! `search`, `register`, `history` and `student` drive the client views
//! against a running server.

pub mod commands;

use clap::{Parser, Subcommand};

/// Process exit codes
pub mod exit_codes {
    pub const OK: i32 = 0;
    /// The server or a local check rejected the request
    pub const REJECTED: i32 = 1;
    pub const CONFIG: i32 = 2;
    pub const CONNECTION: i32 = 4;
    pub const FATAL: i32 = 5;
}

/// Ficha - clinical patient records
#[derive(Parser, Debug)]
#[command(name = "ficha")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ficha.toml", env = "FICHA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FICHA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve(commands::serve::ServeArgs),

    /// Write a sample configuration file
    Init(commands::init::InitArgs),

    /// Create the PostgreSQL schema
    InitDb(commands::init_db::InitDbArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Check whether a CUI is registered
    CheckCui(commands::check_cui::CheckCuiArgs),

    /// Search patients
    Search(commands::search::SearchArgs),

    /// Register a patient
    Register(commands::register::RegisterArgs),

    /// Show or extend a patient's surgical history
    History(commands::history::HistoryArgs),

    /// Show a patient's student data
    Student(commands::student::StudentArgs),
}
