//! HTTP API
//!
//! - [`response`] - the response builder and `{statusCode, headers, body}` envelope
//! - [`error`] - [`ApiError`] and its status mapping
//! - [`pipeline`] - timing, logging and rendering shared by every endpoint
//! - [`handlers`] - one module per resource
//! - [`router`] - the route table with preflight and 405 answers
//! - [`server`] - binding and graceful shutdown
//!
//! # Example
//!
//! ```rust,no_run
//! use ficha::adapters::memory::MemoryStore;
//! use ficha::api::{build_router, AppState};
//! use std::sync::Arc;
//!
//! let state = AppState::new(Arc::new(MemoryStore::new()), "*");
//! let router = build_router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod response;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use response::{ApiResponse, CorsHeaders, ResponseBuilder};
pub use router::build_router;
pub use server::serve;
pub use state::AppState;
