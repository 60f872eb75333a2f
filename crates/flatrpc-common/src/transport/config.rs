use std::time::Duration;

/// Default timeout for connecting and writing (5 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default maximum frame size (16 MB)
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// TCP transport configuration.
///
/// # Fields
///
/// - `bind_host`: host or IP the listener binds to (port is always allocated by the OS)
/// - `advertise_host`: host written into outgoing messages as the reply address;
///   defaults to `bind_host`, set it when binding to a wildcard address
/// - `connect_timeout`: maximum time to establish an outgoing connection
/// - `io_timeout`: read/write timeout on an established connection
/// - `max_message_size`: frames larger than this are rejected on both ends
///
/// # Default Configuration
///
/// - `bind_host`: `127.0.0.1`
/// - `advertise_host`: `None`
/// - `connect_timeout`: 5 seconds
/// - `io_timeout`: 5 seconds
/// - `max_message_size`: 16 MB
///
/// # Example
///
/// ```rust
/// use flatrpc_common::transport::TcpConfig;
/// use std::time::Duration;
///
/// let config = TcpConfig::default()
///     .with_bind_host("0.0.0.0")
///     .with_advertise_host("10.0.0.7")
///     .with_connect_timeout(Duration::from_secs(1));
/// assert_eq!(config.reply_host(), "10.0.0.7");
/// ```
#[derive(Debug, Clone)]
pub struct TcpConfig {
    pub bind_host: String,
    pub advertise_host: Option<String>,
    pub connect_timeout: Duration,
    pub io_timeout: Duration,
    pub max_message_size: usize,
}

impl TcpConfig {
    pub fn with_bind_host(mut self, host: impl Into<String>) -> Self {
        self.bind_host = host.into();
        self
    }

    pub fn with_advertise_host(mut self, host: impl Into<String>) -> Self {
        self.advertise_host = Some(host.into());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = timeout;
        self
    }

    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }

    /// Host other processes should use to reach this endpoint.
    pub fn reply_host(&self) -> &str {
        self.advertise_host.as_deref().unwrap_or(&self.bind_host)
    }
}

impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            bind_host: "127.0.0.1".to_string(),
            advertise_host: None,
            connect_timeout: DEFAULT_TIMEOUT,
            io_timeout: DEFAULT_TIMEOUT,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TcpConfig::default();
        assert_eq!(config.bind_host, "127.0.0.1");
        assert!(config.advertise_host.is_none());
        assert_eq!(config.connect_timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.io_timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.max_message_size, DEFAULT_MAX_MESSAGE_SIZE);
    }

    #[test]
    fn test_reply_host_falls_back_to_bind_host() {
        let config = TcpConfig::default().with_bind_host("192.168.1.4");
        assert_eq!(config.reply_host(), "192.168.1.4");

        let config = config.with_advertise_host("node-a");
        assert_eq!(config.reply_host(), "node-a");
    }

    #[test]
    fn test_builders() {
        let config = TcpConfig::default()
            .with_io_timeout(Duration::from_millis(250))
            .with_max_message_size(1024);
        assert_eq!(config.io_timeout, Duration::from_millis(250));
        assert_eq!(config.max_message_size, 1024);
    }
}
