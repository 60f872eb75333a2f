//! FlatRPC Server
//!
//! This crate provides the server side of a FlatRPC call: the [`MethodTable`]
//! describing which operations an implementation exposes, and the
//! [`Skeleton`] that receives call messages, dispatches them by operation name
//! and sends the flattened result back to the caller.

pub mod operation;
pub mod skeleton;

pub use operation::{Handler, Interface, MethodTable, Operation};
pub use skeleton::{Skeleton, SkeletonHandle};
