//! Scanlink Discovery
//!
//! Best-effort discovery of the LAN address the phone should connect to. The
//! caller falls back to a placeholder host when no interface is found.

mod error;
mod lan;

pub use error::{DiscoveryError, DiscoveryResult};
pub use lan::local_ip;
