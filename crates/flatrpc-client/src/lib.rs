//! FlatRPC Client
//!
//! This crate provides the client side of a FlatRPC call: a [`RemoteReference`]
//! naming where an interface lives, and the [`Stub`] that turns an invocation
//! into a request message, blocks for the reply and decodes the result.

pub mod reference;
pub mod stub;

pub use reference::RemoteReference;
pub use stub::{decode_reply, encode_request, Stub};
