//! FlatRPC Transport Layer
//!
//! This module defines the minimal transport contract stubs and skeletons rely
//! on, and two implementations of it.
//!
//! # Contract
//!
//! A [`Transport`] owns one endpoint address, allocated when it is created. It
//! can send a [`CallMessage`] to any address and block until a message
//! addressed to its own endpoint arrives. An [`Interrupter`] obtained from the
//! transport wakes a blocked [`Transport::receive`], which then returns
//! [`FlatrpcError::Interrupted`](crate::protocol::FlatrpcError::Interrupted).
//!
//! # Components
//!
//! - **[`TcpTransport`]**: one TCP connection per message, length-prefixed JSON frames
//! - **[`MemoryNetwork`]** / **[`MemoryTransport`]**: in-process endpoints over channels
//! - **[`JsonCodec`]**: encodes call messages for the TCP frames
//! - **[`TcpConfig`]**: bind host, timeouts and frame size limit
//!
//! # Example
//!
//! ```
//! use flatrpc_common::transport::{MemoryNetwork, Transport};
//! use flatrpc_common::protocol::CallMessage;
//!
//! let network = MemoryNetwork::new();
//! let client = network.endpoint().unwrap();
//! let server = network.endpoint().unwrap();
//!
//! let mut message = CallMessage::request(client.address().clone(), "ping");
//! message.set_parameter("n", "1");
//! client.send(&message, server.address()).unwrap();
//!
//! let received = server.receive().unwrap();
//! assert_eq!(received.operation(), "ping");
//! ```

pub mod codec;
pub mod config;
pub mod memory;
pub mod tcp;

use std::fmt;
use std::sync::Arc;

use crate::protocol::{CallMessage, NetworkAddress, Result};

pub use codec::JsonCodec;
pub use config::TcpConfig;
pub use memory::{MemoryNetwork, MemoryTransport};
pub use tcp::TcpTransport;


/// The send / blocking-receive primitive beneath stubs and skeletons.
pub trait Transport: Send {
    /// The endpoint this transport receives on.
    fn address(&self) -> &NetworkAddress;

    /// Delivers `message` to `destination`. May block.
    fn send(&self, message: &CallMessage, destination: &NetworkAddress) -> Result<()>;

    /// Blocks until one message addressed to this endpoint arrives.
    fn receive(&self) -> Result<CallMessage>;

    /// Returns a handle that wakes a blocked [`receive`](Transport::receive).
    fn interrupter(&self) -> Interrupter;
}

/// Wakes a transport's blocking receive from another thread.
#[derive(Clone)]
pub struct Interrupter {
    wake: Arc<dyn Fn() -> Result<()> + Send + Sync>,
}

impl Interrupter {
    pub fn new(wake: impl Fn() -> Result<()> + Send + Sync + 'static) -> Self {
        Self { wake: Arc::new(wake) }
    }

    pub fn interrupt(&self) -> Result<()> {
        (self.wake)()
    }
}

impl fmt::Debug for Interrupter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interrupter").finish_non_exhaustive()
    }
}
