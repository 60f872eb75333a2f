//! FlatRPC
//!
//! Remote calls between processes where every argument and result travels as
//! a flat map of dotted paths to strings. An interface is declared once with
//! [`remote_interface!`]; the macro generates the Rust trait, a typed client
//! stub and the dispatch table a [`Skeleton`] serves.
//!
//! # Example
//!
//! ```
//! use flatrpc::transport::MemoryNetwork;
//! use flatrpc::{remote_interface, structured, RemoteReference, Skeleton};
//!
//! structured! {
//!     #[derive(Debug, Default, Clone, Copy, PartialEq)]
//!     pub struct Point {
//!         pub x: i32,
//!         pub y: i32,
//!     }
//! }
//!
//! remote_interface! {
//!     pub trait Mover {
//!         stub = MoverStub;
//!         dispatch = MoverDispatch;
//!
//!         fn move_by(dx: i32, dy: i32);
//!         fn position() -> Point;
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Piece(Point);
//!
//! impl Mover for Piece {
//!     fn move_by(&mut self, dx: i32, dy: i32) -> flatrpc::Result<()> {
//!         self.0.x += dx;
//!         self.0.y += dy;
//!         Ok(())
//!     }
//!
//!     fn position(&mut self) -> flatrpc::Result<Point> {
//!         Ok(self.0)
//!     }
//! }
//!
//! let network = MemoryNetwork::new();
//! let skeleton = Skeleton::for_interface::<MoverDispatch>(Piece::default(), network.endpoint()?)?;
//! let handle = skeleton.run()?;
//!
//! let reference = RemoteReference::new("Mover", handle.address().clone());
//! let stub = MoverStub::with_transport(reference, network.endpoint()?);
//! stub.move_by(3, -5)?;
//! assert_eq!(stub.position()?, Point { x: 3, y: -5 });
//!
//! handle.join()?;
//! # Ok::<(), flatrpc::FlatrpcError>(())
//! ```

mod interface;

pub use flatrpc_common::{codec, protocol, structured, transport};

pub use flatrpc_common::codec::{Decode, Encode, Parameters, Structured};
pub use flatrpc_common::protocol::{CallMessage, FlatrpcError, NetworkAddress, Result, Signature};
pub use flatrpc_common::transport::{MemoryNetwork, TcpConfig, TcpTransport, Transport};

pub use flatrpc_client as client;
pub use flatrpc_client::{RemoteReference, Stub};

pub use flatrpc_server as server;
pub use flatrpc_server::{Interface, MethodTable, Operation, Skeleton, SkeletonHandle};
