use flatrpc_common::codec::{self, Decode, Encode};
use flatrpc_common::protocol::{
    CallMessage, FlatrpcError, NetworkAddress, Result, Signature, ERROR_KEY, ERROR_KIND_KEY, RESULT_KEY,
};
use flatrpc_common::transport::{TcpConfig, TcpTransport, Transport};
use std::sync::Mutex;

use crate::reference::RemoteReference;

/// Client-side proxy for one remote interface.
///
/// Every [`invoke`](Stub::invoke) performs one full request/reply round trip
/// and blocks the calling thread until the reply arrives. The stub owns its
/// own reply endpoint; the transport sits behind a mutex so a stub shared
/// between threads never has more than one request outstanding.
///
/// Replies are matched to requests by id. A message that carries another id
/// (for instance the late reply to a call that failed on the caller's side)
/// is logged and skipped.
///
/// Typed stubs generated by `remote_interface!` wrap a `Stub` and call
/// `invoke` with the signature of each method.
pub struct Stub<X: Transport = TcpTransport> {
    reference: RemoteReference,
    transport: Mutex<X>,
}

impl Stub<TcpTransport> {
    /// Creates a stub that receives replies on a fresh local TCP endpoint.
    pub fn connect(reference: RemoteReference) -> Result<Self> {
        Self::connect_with(reference, TcpConfig::default())
    }

    /// Creates a stub whose reply endpoint is bound according to `config`.
    pub fn connect_with(reference: RemoteReference, config: TcpConfig) -> Result<Self> {
        let transport = TcpTransport::bind(config)?;
        Ok(Self::with_transport(reference, transport))
    }
}

impl<X: Transport> Stub<X> {
    pub fn with_transport(reference: RemoteReference, transport: X) -> Self {
        tracing::debug!(
            "Stub for {} receives replies on {}",
            reference,
            transport.address()
        );
        Self {
            reference,
            transport: Mutex::new(transport),
        }
    }

    pub fn reference(&self) -> &RemoteReference {
        &self.reference
    }

    /// Address replies are sent to.
    pub fn reply_address(&self) -> Result<NetworkAddress> {
        Ok(self.lock()?.address().clone())
    }

    /// Calls `signature` on the remote implementation with `args`.
    ///
    /// # Errors
    ///
    /// - `Invocation` if `args` does not match the declared arity (nothing is sent)
    /// - `Encoding` if an argument cannot be flattened
    /// - transport errors from sending or receiving
    /// - `Remote` if the skeleton answered with a failure reply
    /// - `Decoding` if the reply cannot be rebuilt as `R`
    pub fn invoke<R: Decode>(&self, signature: &Signature, args: &[&dyn Encode]) -> Result<R> {
        let transport = self.lock()?;
        let request = encode_request(signature, args, transport.address())?;

        tracing::debug!(
            "Invoking '{}' on {} (id {}, expecting {})",
            signature.name,
            self.reference,
            request.id(),
            signature.returns
        );
        for (key, value) in request.parameters() {
            tracing::trace!("PARAM: {} = {}", key, value);
        }

        transport.send(&request, self.reference.address())?;

        let reply = loop {
            match transport.receive() {
                Ok(message) if message.is_reply() && message.id() == request.id() => break message,
                Ok(message) => {
                    tracing::warn!(
                        "Discarding '{}' (id {}) from {} while waiting for reply {}",
                        message.operation(),
                        message.id(),
                        message.originator(),
                        request.id()
                    );
                }
                Err(FlatrpcError::Interrupted) => continue,
                Err(e) => return Err(e),
            }
        };

        decode_reply(signature, &reply)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, X>> {
        self.transport
            .lock()
            .map_err(|_| FlatrpcError::Transport("stub transport lock poisoned".to_string()))
    }
}

/// Builds the request message for one invocation.
///
/// Each argument is flattened under its formal parameter name, so
/// `move(dx = 3, dy = -5)` yields `{"dx": "3", "dy": "-5"}`.
pub fn encode_request(
    signature: &Signature,
    args: &[&dyn Encode],
    originator: &NetworkAddress,
) -> Result<CallMessage> {
    if args.len() != signature.arity() {
        return Err(FlatrpcError::Invocation {
            operation: signature.name.to_string(),
            expected: signature.arity(),
            actual: args.len(),
        });
    }

    let mut request = CallMessage::request(originator.clone(), signature.name);
    let mut parameters = codec::Parameters::new();
    for (name, arg) in signature.params.iter().zip(args) {
        arg.encode_into(name, &mut parameters)?;
    }
    request.extend_parameters(parameters);

    Ok(request)
}

/// Turns a reply into the declared return value of `signature`.
///
/// A failure reply becomes `FlatrpcError::Remote`. For operations returning
/// `()`, receiving the reply is all that is checked.
pub fn decode_reply<R: Decode>(signature: &Signature, reply: &CallMessage) -> Result<R> {
    if reply.is_failure() {
        return Err(FlatrpcError::Remote {
            kind: reply.parameter(ERROR_KIND_KEY).unwrap_or("remote").to_string(),
            message: reply.parameter(ERROR_KEY).unwrap_or_default().to_string(),
        });
    }

    codec::decode_within::<R>(RESULT_KEY, reply.parameters()).map_err(|e| match e {
        FlatrpcError::Decoding(msg) => {
            FlatrpcError::Decoding(format!("reply to '{}': {}", signature.name, msg))
        }
        other => other,
    })
}
