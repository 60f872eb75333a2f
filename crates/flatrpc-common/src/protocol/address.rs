//! FlatRPC Network Addresses
//!
//! This module defines the endpoint address carried by every call message.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use super::error::FlatrpcError;

/// A transport endpoint: a host name (or IP literal) and a port.
///
/// The address is opaque to the codec and the dispatch layer; it is only used
/// to route replies back to the originator of a request.
///
/// # Example
///
/// ```
/// use flatrpc_common::protocol::NetworkAddress;
///
/// let addr: NetworkAddress = "127.0.0.1:9001".parse().unwrap();
/// assert_eq!(addr.host(), "127.0.0.1");
/// assert_eq!(addr.port(), 9001);
/// assert_eq!(addr.to_string(), "127.0.0.1:9001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetworkAddress {
    host: String,
    port: u16,
}

impl NetworkAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for NetworkAddress {
    type Err = FlatrpcError;

    /// Parses `host:port`. The split happens on the last colon so bracketed
    /// IPv6 literals such as `[::1]:80` keep their brackets in the host.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| FlatrpcError::InvalidAddress(format!("'{}' is missing a port", s)))?;

        if host.is_empty() {
            return Err(FlatrpcError::InvalidAddress(format!("'{}' is missing a host", s)));
        }

        let port = port
            .parse::<u16>()
            .map_err(|e| FlatrpcError::InvalidAddress(format!("'{}' has an invalid port: {}", s, e)))?;

        Ok(Self::new(host, port))
    }
}

impl From<SocketAddr> for NetworkAddress {
    fn from(addr: SocketAddr) -> Self {
        match addr {
            SocketAddr::V4(v4) => Self::new(v4.ip().to_string(), v4.port()),
            SocketAddr::V6(v6) => Self::new(format!("[{}]", v6.ip()), v6.port()),
        }
    }
}
