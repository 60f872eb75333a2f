use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use super::address::NetworkAddress;
use crate::codec::Parameters;

pub type RequestId = u64;

/// Operation name (and base path) reserved for replies.
pub const RESULT_KEY: &str = "result";

/// Value carried by the reply of an operation that returns nothing.
pub const VOID_RESULT: &str = "Ok";

/// Operation name reserved for failure replies.
pub const ERROR_OPERATION: &str = "error";

/// Parameter holding the message of a failure reply.
pub const ERROR_KEY: &str = "error.message";

/// Parameter holding the error class of a failure reply.
pub const ERROR_KIND_KEY: &str = "error.kind";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The wire-level unit of both requests and replies.
///
/// A request names the operation to run and carries the flattened arguments;
/// a reply uses the reserved operation [`RESULT_KEY`] (or [`ERROR_OPERATION`]
/// on failure) and carries the flattened return value. Replies copy the `id`
/// of the request they answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallMessage {
    id: RequestId,
    originator: NetworkAddress,
    operation: String,
    parameters: Parameters,
}

impl CallMessage {
    /// Creates a new request with a fresh id and no parameters.
    pub fn request(originator: NetworkAddress, operation: impl Into<String>) -> Self {
        CallMessage {
            id: generate_request_id(),
            originator,
            operation: operation.into(),
            parameters: Parameters::new(),
        }
    }

    /// Creates an empty `result` reply to `request`, sent from `originator`.
    pub fn reply_to(request: &CallMessage, originator: NetworkAddress) -> Self {
        CallMessage {
            id: request.id,
            originator,
            operation: RESULT_KEY.to_string(),
            parameters: Parameters::new(),
        }
    }

    /// Creates a failure reply to `request` carrying an error class and message.
    pub fn failure(
        request: &CallMessage,
        originator: NetworkAddress,
        kind: &str,
        message: impl Into<String>,
    ) -> Self {
        let mut reply = CallMessage {
            id: request.id,
            originator,
            operation: ERROR_OPERATION.to_string(),
            parameters: Parameters::new(),
        };
        reply.set_parameter(ERROR_KIND_KEY, kind);
        reply.set_parameter(ERROR_KEY, message);
        reply
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn originator(&self) -> &NetworkAddress {
        &self.originator
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    pub fn set_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(key.into(), value.into());
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Moves every pair of `parameters` into the message.
    pub fn extend_parameters(&mut self, parameters: Parameters) {
        self.parameters.extend(parameters);
    }

    pub fn is_reply(&self) -> bool {
        self.operation == RESULT_KEY || self.operation == ERROR_OPERATION
    }

    pub fn is_failure(&self) -> bool {
        self.operation == ERROR_OPERATION
    }
}

fn generate_request_id() -> RequestId {
    let timestamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let counter = REQUEST_ID_COUNTER.fetch_add(1, Ordering::SeqCst);

    // Upper 32 bits from the clock, lower 32 bits from the counter
    (timestamp & 0xFFFFFFFF00000000) | (counter & 0xFFFFFFFF)
}
