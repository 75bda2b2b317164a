//! Scanlink Server - Axum-based HTTP scan receiver
//!
//! This crate provides the HTTP surface the phone talks to and the
//! start/stop lifecycle around it.

pub mod http;
pub mod lifecycle;
pub mod state;

pub use http::{create_router, Ack, TOKEN_HEADER};
pub use lifecycle::{LocalServer, ServerStatus};
pub use state::AppState;
