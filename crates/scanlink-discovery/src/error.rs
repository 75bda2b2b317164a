//! Discovery error types

use thiserror::Error;

/// Errors that can occur during local address discovery
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("No usable network interface found")]
    NoInterface,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
