//! Networking defaults and helpers used by emitter and probe.
use std::net::{SocketAddr, ToSocketAddrs};

use crate::error::TickError;

/// Default destination host for the emitter.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default UDP port the ticks are sent to (and the probe listens on).
pub const DEFAULT_PORT: u16 = 9000;
/// Default emission rate in ticks per second.
pub const DEFAULT_RATE_HZ: f64 = 2000.0;
/// Wildcard IPv4 address used for local binds.
pub const ANY_ADDR: &str = "0.0.0.0";

/// Helper to format an address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Resolve `host:port` once into an IPv4 socket address.
///
/// Accepts literal addresses as well as host names; the first IPv4 result wins.
pub fn resolve_ipv4(host: &str, port: u16) -> Result<SocketAddr, TickError> {
    let candidates = (host, port)
        .to_socket_addrs()
        .map_err(|e| TickError::Config(format!("cannot resolve {}: {}", addr(host, port), e)))?;

    candidates
        .into_iter()
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| TickError::Config(format!("no IPv4 address for {}", addr(host, port))))
}
