// Ficha - clinical patient records
// Copyright (c) 2025 Ficha Contributors
// Licensed under the MIT License

//! # Ficha - clinical patient records
//!
//! Ficha registers patients, searches them by name, student carnet or
//! collaborator code, and keeps their surgical history. Records live in
//! PostgreSQL and are served over a small JSON HTTP API.
//!
//! ## Architecture
//!
//! - [`api`] - HTTP handlers, response builder and server loop
//! - [`adapters`] - Patient stores (PostgreSQL and in-memory)
//! - [`client`] - Typed API client and the front-end views built on it
//! - [`domain`] - Core domain types, validation and error messages
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//! - [`cli`] - Command-line interface and argument parsing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ficha::adapters::memory::MemoryStore;
//! use ficha::api::{build_router, AppState};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = AppState::new(Arc::new(MemoryStore::new()), "*");
//!     let app = build_router(state);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Validation
//!
//! Drafts arrive with every field optional and are validated into domain
//! types before they reach a store. Error messages are the same on the server
//! and in the client views:
//!
//! ```rust
//! use ficha::domain::PatientDraft;
//!
//! let draft = PatientDraft {
//!     names: Some("Ana".into()),
//!     ..Default::default()
//! };
//! let err = draft.validate().unwrap_err();
//! assert!(err.to_string().contains("CUI"));
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::Result`], backed by [`domain::FichaError`].
//! The HTTP layer maps each variant to a status code and a `{"message"}`
//! body; the client maps status codes back into [`domain::ClientError`].

pub mod adapters;
pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod logging;
