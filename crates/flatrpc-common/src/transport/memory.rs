use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use super::{Interrupter, Transport};
use crate::protocol::error::{FlatrpcError, Result};
use crate::protocol::{CallMessage, NetworkAddress};

/// Host name used for every in-memory endpoint.
pub const MEMORY_HOST: &str = "memory";

enum Envelope {
    Message(CallMessage),
    Wake,
}

#[derive(Default)]
struct Registry {
    next_port: u16,
    endpoints: HashMap<NetworkAddress, Sender<Envelope>>,
}

/// In-process network of channel-backed endpoints.
///
/// Cloning the network shares it. Endpoints get addresses `memory:1`,
/// `memory:2`, ... and stay reachable until their [`MemoryTransport`] is
/// dropped.
#[derive(Clone, Default)]
pub struct MemoryNetwork {
    registry: Arc<Mutex<Registry>>,
    delivered: Arc<AtomicUsize>,
}

impl MemoryNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new endpoint on this network.
    pub fn endpoint(&self) -> Result<MemoryTransport> {
        let (sender, receiver) = mpsc::channel();
        let mut registry = self.lock()?;

        registry.next_port = registry
            .next_port
            .checked_add(1)
            .ok_or_else(|| FlatrpcError::Transport("memory network ran out of ports".to_string()))?;
        let address = NetworkAddress::new(MEMORY_HOST, registry.next_port);
        registry.endpoints.insert(address.clone(), sender.clone());

        Ok(MemoryTransport {
            address,
            network: self.clone(),
            sender,
            receiver,
        })
    }

    /// Number of messages delivered on this network so far.
    pub fn delivered(&self) -> usize {
        self.delivered.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Registry>> {
        self.registry
            .lock()
            .map_err(|_| FlatrpcError::Transport("memory network lock poisoned".to_string()))
    }

    fn deliver(&self, message: &CallMessage, destination: &NetworkAddress) -> Result<()> {
        let sender = self
            .lock()?
            .endpoints
            .get(destination)
            .cloned()
            .ok_or_else(|| FlatrpcError::Transport(format!("no endpoint at {}", destination)))?;

        sender
            .send(Envelope::Message(message.clone()))
            .map_err(|_| FlatrpcError::Transport(format!("endpoint {} is closed", destination)))?;

        self.delivered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// One endpoint of a [`MemoryNetwork`].
pub struct MemoryTransport {
    address: NetworkAddress,
    network: MemoryNetwork,
    sender: Sender<Envelope>,
    receiver: Receiver<Envelope>,
}

impl Transport for MemoryTransport {
    fn address(&self) -> &NetworkAddress {
        &self.address
    }

    fn send(&self, message: &CallMessage, destination: &NetworkAddress) -> Result<()> {
        self.network.deliver(message, destination)
    }

    fn receive(&self) -> Result<CallMessage> {
        match self.receiver.recv() {
            Ok(Envelope::Message(message)) => Ok(message),
            Ok(Envelope::Wake) => Err(FlatrpcError::Interrupted),
            Err(_) => Err(FlatrpcError::Transport(format!("endpoint {} is closed", self.address))),
        }
    }

    fn interrupter(&self) -> Interrupter {
        let sender = Mutex::new(self.sender.clone());
        Interrupter::new(move || {
            sender
                .lock()
                .map_err(|_| FlatrpcError::Transport("interrupter lock poisoned".to_string()))?
                .send(Envelope::Wake)
                .map_err(|_| FlatrpcError::Transport("endpoint is closed".to_string()))
        })
    }
}

impl Drop for MemoryTransport {
    fn drop(&mut self) {
        if let Ok(mut registry) = self.network.registry.lock() {
            registry.endpoints.remove(&self.address);
        }
    }
}
