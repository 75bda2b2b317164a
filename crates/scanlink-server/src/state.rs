//! Shared per-server state
//!
//! One `AppState` is built per server start from a [`SessionConfig`]
//! snapshot. The snapshot is immutable for the lifetime of that server;
//! operator edits only apply to the next start.

use scanlink_core::{EventSender, SessionConfig};
use scanlink_log::ScanLog;
use std::sync::Arc;

/// Shared application state for one running server instance
pub struct AppState {
    /// Session snapshot taken at start time
    pub config: SessionConfig,
    /// Hand-off queue to the consumer
    pub events: EventSender,
    /// Durable scan log
    pub log: Arc<ScanLog>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: SessionConfig, events: EventSender, log: Arc<ScanLog>) -> Self {
        Self {
            config,
            events,
            log,
        }
    }

    /// Validate a submitted token against the session snapshot
    pub fn validate_token(&self, provided: Option<&str>) -> bool {
        scanlink_auth::validate(provided, &self.config.token)
    }
}
