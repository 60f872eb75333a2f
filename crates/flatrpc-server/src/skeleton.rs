use flatrpc_common::protocol::{CallMessage, FlatrpcError, NetworkAddress, Result};
use flatrpc_common::transport::{Interrupter, TcpConfig, TcpTransport, Transport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::operation::{Interface, MethodTable};

/// First pause after a failed turn of the serving loop.
pub const MIN_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Longest pause between failed turns; consecutive failures double the delay up to this.
pub const MAX_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Server-side dispatcher for one implementation object.
///
/// A skeleton owns its implementation, its method table and the transport it
/// listens on. Requests are handled one at a time, in arrival order, so the
/// implementation is never entered concurrently.
///
/// A request that cannot be served (unknown operation, undecodable arguments,
/// an error returned by the implementation) is answered with a failure reply
/// and the skeleton keeps going.
pub struct Skeleton<S, X: Transport = TcpTransport> {
    name: &'static str,
    implementation: S,
    table: MethodTable<S>,
    transport: X,
}

impl<S> Skeleton<S, TcpTransport> {
    /// Serves `implementation` as interface `I` on a TCP endpoint bound per `config`.
    pub fn bind<I: Interface<S>>(implementation: S, config: TcpConfig) -> Result<Self> {
        let transport = TcpTransport::bind(config)?;
        Self::for_interface::<I>(implementation, transport)
    }
}

impl<S, X: Transport> Skeleton<S, X> {
    pub fn new(implementation: S, table: MethodTable<S>, transport: X) -> Self {
        Self {
            name: "skeleton",
            implementation,
            table,
            transport,
        }
    }

    /// Serves `implementation` as interface `I` on `transport`.
    ///
    /// Fails with `DuplicateOperation` if the interface declares two
    /// operations with the same name.
    pub fn for_interface<I: Interface<S>>(implementation: S, transport: X) -> Result<Self> {
        let table = I::method_table()?;
        tracing::debug!("{} exposes {:?}", I::NAME, table);
        Ok(Self {
            name: I::NAME,
            ..Self::new(implementation, table, transport)
        })
    }

    /// Address requests should be sent to.
    pub fn address(&self) -> &NetworkAddress {
        self.transport.address()
    }

    pub fn implementation(&self) -> &S {
        &self.implementation
    }

    /// Dispatches one request and builds the reply.
    ///
    /// The reply carries the request's id and the flattened result rooted at
    /// `result`; an operation returning `()` answers `{"result": "Ok"}`.
    ///
    /// # Errors
    ///
    /// - `Dispatch` if no operation has the request's name
    /// - `Decoding` if an argument is missing or malformed
    /// - any error the implementation returns
    pub fn handle_request(&mut self, request: &CallMessage) -> Result<CallMessage> {
        tracing::debug!(
            "{}: handling '{}' (id {}) from {}",
            self.name,
            request.operation(),
            request.id(),
            request.originator()
        );

        let operation = self.table.get(request.operation()).ok_or_else(|| {
            FlatrpcError::Dispatch(format!("no operation named '{}'", request.operation()))
        })?;

        let result = (operation.handler)(&mut self.implementation, request.parameters())?;

        let mut reply = CallMessage::reply_to(request, self.transport.address().clone());
        reply.extend_parameters(result);
        Ok(reply)
    }

    /// Receives one request, dispatches it and sends the reply.
    ///
    /// Only receive and send failures are returned; dispatch failures are
    /// turned into failure replies. A message that is itself a reply is
    /// dropped unanswered, so two skeletons never answer each other.
    pub fn serve_one(&mut self) -> Result<()> {
        let request = self.transport.receive()?;

        if request.is_reply() {
            tracing::warn!(
                "{}: dropping unexpected '{}' (id {}) from {}",
                self.name,
                request.operation(),
                request.id(),
                request.originator()
            );
            return Ok(());
        }

        let reply = match self.handle_request(&request) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(
                    "{}: request '{}' (id {}) failed: {}",
                    self.name,
                    request.operation(),
                    request.id(),
                    e
                );
                CallMessage::failure(&request, self.transport.address().clone(), e.kind(), e.to_string())
            }
        };

        self.transport.send(&reply, request.originator())
    }

    /// Serves requests on a dedicated thread until the handle is stopped.
    ///
    /// The implementation is handed back by [`SkeletonHandle::join`].
    pub fn run(mut self) -> Result<SkeletonHandle<S>>
    where
        S: Send + 'static,
        X: 'static,
    {
        let address = self.address().clone();
        let interrupter = self.transport.interrupter();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        tracing::info!("{} serving on {}", self.name, address);

        let thread = thread::Builder::new()
            .name(format!("flatrpc-{}", address))
            .spawn(move || {
                let mut delay = Duration::ZERO;
                while !stop_flag.load(Ordering::SeqCst) {
                    match self.serve_one() {
                        Ok(()) => delay = Duration::ZERO,
                        Err(FlatrpcError::Interrupted) => continue,
                        Err(e) => {
                            delay = (delay * 2).clamp(MIN_RETRY_DELAY, MAX_RETRY_DELAY);
                            tracing::error!("{}: {} (retrying in {:?})", self.name, e, delay);
                            thread::sleep(delay);
                        }
                    }
                }
                tracing::info!("{} on {} stopped", self.name, self.transport.address());
                self.implementation
            })?;

        Ok(SkeletonHandle {
            address,
            stop,
            interrupter,
            thread: Some(thread),
        })
    }
}

/// Handle to a skeleton running on its own thread.
///
/// Dropping the handle stops the skeleton without waiting for it.
pub struct SkeletonHandle<S> {
    address: NetworkAddress,
    stop: Arc<AtomicBool>,
    interrupter: Interrupter,
    thread: Option<JoinHandle<S>>,
}

impl<S> SkeletonHandle<S> {
    pub fn address(&self) -> &NetworkAddress {
        &self.address
    }

    /// Asks the skeleton to stop once the current request is finished.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Err(e) = self.interrupter.interrupt() {
            // The serving thread may already be gone.
            tracing::debug!("Could not wake skeleton on {}: {}", self.address, e);
        }
    }

    /// Stops the skeleton and waits for its thread, returning the implementation.
    pub fn join(mut self) -> Result<S> {
        self.stop();
        let thread = self
            .thread
            .take()
            .ok_or_else(|| FlatrpcError::Transport("skeleton already joined".to_string()))?;
        thread
            .join()
            .map_err(|_| FlatrpcError::Transport(format!("skeleton on {} panicked", self.address)))
    }
}

impl<S> Drop for SkeletonHandle<S> {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.stop();
        }
    }
}
