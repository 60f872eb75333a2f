use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlatrpcError {
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Decoding error: {0}")]
    Decoding(String),

    #[error("Invocation error: '{operation}' expects {expected} argument(s), got {actual}")]
    Invocation {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Dispatch error: no operation named '{0}'")]
    Dispatch(String),

    #[error("Duplicate operation: '{0}' is declared more than once")]
    DuplicateOperation(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Receive interrupted")]
    Interrupted,

    #[error("Remote {kind} error: {message}")]
    Remote { kind: String, message: String },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl FlatrpcError {
    /// Short name of the error class, as carried by failure replies.
    pub fn kind(&self) -> &str {
        match self {
            FlatrpcError::Encoding(_) => "encoding",
            FlatrpcError::Decoding(_) => "decoding",
            FlatrpcError::Invocation { .. } => "invocation",
            FlatrpcError::Dispatch(_) | FlatrpcError::DuplicateOperation(_) => "dispatch",
            FlatrpcError::Remote { kind, .. } => kind,
            FlatrpcError::Transport(_)
            | FlatrpcError::Connection(_)
            | FlatrpcError::Interrupted
            | FlatrpcError::InvalidAddress(_)
            | FlatrpcError::Io(_)
            | FlatrpcError::JsonSerialization(_) => "transport",
        }
    }

    /// Convenience constructor for errors raised by service implementations.
    pub fn remote(message: impl Into<String>) -> Self {
        FlatrpcError::Remote {
            kind: "remote".to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlatrpcError>;
