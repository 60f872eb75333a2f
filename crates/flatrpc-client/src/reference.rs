use flatrpc_common::protocol::{NetworkAddress, Result};
use std::fmt;

/// Where a remote interface lives.
///
/// A reference is only used to build stubs; it carries no state of its own
/// and never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteReference {
    interface: String,
    address: NetworkAddress,
}

impl RemoteReference {
    pub fn new(interface: impl Into<String>, address: NetworkAddress) -> Self {
        Self {
            interface: interface.into(),
            address,
        }
    }

    /// Builds a reference from a host and port pair.
    pub fn at(interface: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self::new(interface, NetworkAddress::new(host, port))
    }

    /// Builds a reference from a `host:port` string.
    pub fn parse(interface: impl Into<String>, address: &str) -> Result<Self> {
        Ok(Self::new(interface, address.parse()?))
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn address(&self) -> &NetworkAddress {
        &self.address
    }
}

impl fmt::Display for RemoteReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.interface, self.address)
    }
}
