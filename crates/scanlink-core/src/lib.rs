//! Scanlink Core - Shared types
//!
//! This crate provides the foundational types used across all scanlink
//! components: the session configuration, scan events, and the channel that
//! hands events from the serving context to the consumer.

pub mod config;
pub mod error;
pub mod event;

pub use config::{ConfigStore, SessionConfig, DEFAULT_PORT};
pub use error::{Error, Result};
pub use event::{EventChannel, EventSender, ScanEvent, ScanSource};
