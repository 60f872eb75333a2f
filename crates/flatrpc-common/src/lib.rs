//! FlatRPC Common Types, Codec and Transport
//!
//! This crate provides the wire message, the flat path codec and the transport
//! layer shared by FlatRPC stubs and skeletons.
//!
//! # Overview
//!
//! FlatRPC turns a local method call into a flat, string-keyed message, ships it
//! to a remote process and turns the reply back into a typed value. This crate
//! contains the pieces both sides need:
//!
//! - **Protocol Layer**: [`CallMessage`], [`NetworkAddress`], [`Signature`] and
//!   the [`FlatrpcError`] type
//! - **Codec Layer**: the simple-type classifier and the flatten/unflatten path
//!   codec that maps nested values to `dotted.path = value` pairs
//! - **Transport Layer**: the [`Transport`](transport::Transport) contract, a
//!   TCP transport and an in-memory transport
//!
//! # Wire Format
//!
//! - **Parameters**: `dotted.path -> string value`, e.g. `p.x = 1`
//! - **Replies**: operation `result`; a void reply carries exactly `result = Ok`
//! - **Framing (TCP)**: `[4-byte length prefix as u32 big-endian] + [JSON data]`
//!
//! # Example
//!
//! ```
//! use flatrpc_common::codec;
//! use flatrpc_common::structured;
//!
//! structured! {
//!     #[derive(Debug, Clone, Default, PartialEq)]
//!     pub struct Point {
//!         x: i32,
//!         y: i32,
//!     }
//! }
//!
//! let params = codec::encode("p", &Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(params.get("p.x").map(String::as_str), Some("1"));
//! assert_eq!(params.get("p.y").map(String::as_str), Some("2"));
//!
//! let point: Point = codec::decode_within("p", &params).unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//! ```

pub mod codec;
pub mod protocol;
pub mod transport;

pub use codec::{Decode, Encode, Kind, Parameters, Structured};
pub use protocol::*;
