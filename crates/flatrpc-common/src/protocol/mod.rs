pub mod address;
pub mod error;
pub mod message;
pub mod signature;


pub use address::NetworkAddress;
pub use error::{FlatrpcError, Result};
pub use message::{CallMessage, RequestId, ERROR_KEY, ERROR_KIND_KEY, ERROR_OPERATION, RESULT_KEY, VOID_RESULT};
pub use signature::Signature;
