//! Local IP address discovery
//!
//! Binds a UDP socket and "connects" it to a public address to learn which
//! local interface the OS would route through. No packets are sent.

use std::net::{IpAddr, UdpSocket};
use tracing::debug;

use crate::error::{DiscoveryError, DiscoveryResult};

/// Routing probe target. Never actually contacted.
const PROBE_ADDR: &str = "8.8.8.8:80";

/// Best-effort LAN address of this machine
pub fn local_ip() -> DiscoveryResult<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket
        .connect(PROBE_ADDR)
        .map_err(|_| DiscoveryError::NoInterface)?;
    let addr = socket.local_addr()?;
    debug!("Discovered local address {}", addr.ip());
    Ok(addr.ip())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_ip_is_routable_when_available() {
        // Machines without a network route legitimately return NoInterface;
        // when an address comes back it must be a concrete one.
        if let Ok(ip) = local_ip() {
            assert!(!ip.is_unspecified());
            assert!(!ip.is_multicast());
        }
    }

}
