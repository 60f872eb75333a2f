use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::time::Duration;

use super::codec::JsonCodec;
use super::config::TcpConfig;
use super::{Interrupter, Transport};
use crate::protocol::error::{FlatrpcError, Result};
use crate::protocol::{CallMessage, NetworkAddress};

/// TCP transport for FlatRPC (synchronous).
///
/// Binding allocates the endpoint: a listener on the configured host with an
/// OS-assigned port. Every message travels over its own short-lived
/// connection, so a reply is simply a message sent back to the originator's
/// listener.
///
/// # Wire Protocol
///
/// Each connection carries one frame, a 4-byte length prefix (big-endian u32)
/// followed by the JSON-encoded call message:
///
/// ```text
/// [4-byte length] [JSON data]
/// ```
///
/// A connection that closes before sending a length prefix carries no message;
/// the interrupter uses exactly that to wake a blocked receive.
///
/// # Example
///
/// ```no_run
/// use flatrpc_common::transport::{TcpConfig, TcpTransport, Transport};
/// use flatrpc_common::protocol::CallMessage;
///
/// let client = TcpTransport::bind(TcpConfig::default()).unwrap();
/// let server = TcpTransport::bind(TcpConfig::default()).unwrap();
///
/// let request = CallMessage::request(client.address().clone(), "ping");
/// client.send(&request, server.address()).unwrap();
/// let received = server.receive().unwrap();
/// ```
pub struct TcpTransport {
    listener: TcpListener,
    address: NetworkAddress,
    config: TcpConfig,
}

impl TcpTransport {
    /// Binds a new endpoint according to `config`.
    ///
    /// # Errors
    ///
    /// Returns `FlatrpcError::Connection` if the listener cannot be bound or
    /// its local address cannot be read.
    pub fn bind(config: TcpConfig) -> Result<Self> {
        let bind_addr = format!("{}:0", config.bind_host);
        let listener = TcpListener::bind(&bind_addr)
            .map_err(|e| FlatrpcError::Connection(format!("Failed to bind to {}: {}", bind_addr, e)))?;

        let local = listener
            .local_addr()
            .map_err(|e| FlatrpcError::Connection(format!("Failed to get local addr: {}", e)))?;

        let address = match config.advertise_host {
            Some(ref host) => NetworkAddress::new(host.clone(), local.port()),
            None => NetworkAddress::from(local),
        };

        tracing::debug!("TCP endpoint bound on {}", address);

        Ok(Self {
            listener,
            address,
            config,
        })
    }

    /// Binds an endpoint on `127.0.0.1` with default settings.
    pub fn bind_local() -> Result<Self> {
        Self::bind(TcpConfig::default())
    }

    /// Connects to a remote endpoint.
    ///
    /// This method resolves the address (which may resolve to multiple addresses)
    /// and attempts to connect to each until one succeeds.
    fn connect(addr: &NetworkAddress, config: &TcpConfig) -> Result<TcpStream> {
        let target = addr.to_string();
        let socket_addrs: Vec<SocketAddr> = target
            .to_socket_addrs()
            .map_err(|e| FlatrpcError::Connection(format!("Invalid address '{}': {}", target, e)))?
            .collect();

        let mut last_err = None;
        for socket_addr in socket_addrs {
            match TcpStream::connect_timeout(&socket_addr, config.connect_timeout) {
                Ok(stream) => {
                    stream
                        .set_write_timeout(Some(config.io_timeout))
                        .map_err(|e| FlatrpcError::Connection(format!("Failed to set write timeout: {}", e)))?;
                    return Ok(stream);
                }
                Err(e) => {
                    last_err = Some(e);
                }
            }
        }

        Err(FlatrpcError::Connection(format!(
            "Failed to connect to {}: {}",
            target,
            last_err.map(|e| e.to_string()).unwrap_or_else(|| "Unknown error".to_string())
        )))
    }

    /// Sends a message with length prefix.
    ///
    /// Wire format: `[4-byte length as u32 big-endian] + [data]`
    pub fn send_message(stream: &mut TcpStream, data: &[u8], timeout: Duration) -> Result<()> {
        let len = data.len() as u32;

        stream
            .write_all(&len.to_be_bytes())
            .map_err(|e| Self::map_io_error(e, "writing length prefix", timeout))?;

        stream
            .write_all(data)
            .map_err(|e| Self::map_io_error(e, "writing data", timeout))?;

        stream
            .flush()
            .map_err(|e| Self::map_io_error(e, "flushing stream", timeout))?;

        Ok(())
    }

    /// Receives a message with length prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The peer closed the connection before a length prefix (`Interrupted`)
    /// - Message exceeds `max_message_size`
    /// - Reading the data fails
    pub fn receive_message(stream: &mut TcpStream, max_message_size: usize, timeout: Duration) -> Result<Vec<u8>> {
        let mut len_buf = [0u8; 4];
        match stream.read_exact(&mut len_buf) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(FlatrpcError::Interrupted);
            }
            Err(e) => return Err(Self::map_io_error(e, "reading length prefix", timeout)),
        }

        let len = u32::from_be_bytes(len_buf) as usize;

        // Validate length to prevent allocation of excessively large buffers
        if len > max_message_size {
            return Err(FlatrpcError::Transport(format!(
                "Message too large: {} bytes (max {} bytes)",
                len, max_message_size
            )));
        }

        let mut buf = vec![0u8; len];
        stream
            .read_exact(&mut buf)
            .map_err(|e| Self::map_io_error(e, "reading data", timeout))?;

        Ok(buf)
    }

    /// Map IO errors to appropriate FlatrpcError variants
    ///
    /// - Timeouts/would block -> `Transport`
    /// - Connection errors -> `Connection`
    /// - Other IO errors -> `Io`
    fn map_io_error(err: std::io::Error, context: &str, timeout: Duration) -> FlatrpcError {
        match err.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => {
                FlatrpcError::Transport(format!("{}: timed out after {}ms", context, timeout.as_millis()))
            }
            std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::NotConnected
            | std::io::ErrorKind::UnexpectedEof => {
                FlatrpcError::Connection(format!("{}: Connection lost", context))
            }
            _ => FlatrpcError::Io(err),
        }
    }
}

impl Transport for TcpTransport {
    fn address(&self) -> &NetworkAddress {
        &self.address
    }

    fn send(&self, message: &CallMessage, destination: &NetworkAddress) -> Result<()> {
        let encoded = JsonCodec::encode(message)?;
        if encoded.len() > self.config.max_message_size {
            return Err(FlatrpcError::Transport(format!(
                "Message too large: {} bytes (max {} bytes)",
                encoded.len(),
                self.config.max_message_size
            )));
        }

        let mut stream = Self::connect(destination, &self.config)?;
        Self::send_message(&mut stream, &encoded, self.config.io_timeout)?;

        tracing::trace!(
            "sent '{}' ({} bytes) to {}",
            message.operation(),
            encoded.len(),
            destination
        );
        Ok(())
    }

    fn receive(&self) -> Result<CallMessage> {
        let (mut stream, peer_addr) = self
            .listener
            .accept()
            .map_err(|e| FlatrpcError::Connection(format!("Failed to accept connection: {}", e)))?;

        stream
            .set_read_timeout(Some(self.config.io_timeout))
            .map_err(|e| FlatrpcError::Connection(format!("Failed to set read timeout: {}", e)))?;

        let data = Self::receive_message(&mut stream, self.config.max_message_size, self.config.io_timeout)?;
        let message = JsonCodec::decode(&data)?;

        tracing::trace!(
            "received '{}' ({} bytes) from {}",
            message.operation(),
            data.len(),
            peer_addr
        );
        Ok(message)
    }

    fn interrupter(&self) -> Interrupter {
        let address = self.address.clone();
        let config = self.config.clone();
        Interrupter::new(move || {
            // An empty connection wakes the accept call
            Self::connect(&address, &config).map(drop)
        })
    }
}
