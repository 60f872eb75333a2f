use crate::protocol::error::Result;
use crate::protocol::CallMessage;

/// JSON codec for call messages carried in TCP frames.
///
/// The flattened parameters stay human-readable on the wire: a request for
/// `move(3, -5)` is sent as
///
/// ```text
/// {"id":..,"originator":{"host":"127.0.0.1","port":40112},"operation":"move",
///  "parameters":{"dx":"3","dy":"-5"}}
/// ```
///
/// # Example
///
/// ```
/// use flatrpc_common::transport::JsonCodec;
/// use flatrpc_common::protocol::{CallMessage, NetworkAddress};
///
/// let mut message = CallMessage::request(NetworkAddress::new("127.0.0.1", 4000), "move");
/// message.set_parameter("dx", "3");
///
/// let encoded = JsonCodec::encode(&message).unwrap();
/// let decoded = JsonCodec::decode(&encoded).unwrap();
/// assert_eq!(decoded, message);
/// ```
pub struct JsonCodec;

impl JsonCodec {
    /// Encode a call message to bytes
    pub fn encode(message: &CallMessage) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(message)?)
    }

    /// Decode a call message from bytes
    pub fn decode(data: &[u8]) -> Result<CallMessage> {
        Ok(serde_json::from_slice(data)?)
    }
}
