//! # Point Mover
//!
//! Runs a `Mover` skeleton on a local TCP port, then moves the point through
//! a stub and prints where it ended up.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p point-mover
//! FLATRPC_BIND_HOST=0.0.0.0 FLATRPC_ADVERTISE_HOST=10.0.0.7 cargo run -p point-mover
//! ```

use anyhow::{Context, Result};
use flatrpc::{remote_interface, structured, RemoteReference, Skeleton, TcpConfig};

structured! {
    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    pub struct Point {
        pub x: i32,
        pub y: i32,
    }
}

remote_interface! {
    pub trait Mover {
        stub = MoverStub;
        dispatch = MoverDispatch;

        fn move_by(dx: i32, dy: i32);
        fn position() -> Point;
        fn reset() -> Point;
    }
}

#[derive(Debug, Default)]
struct Piece {
    at: Point,
    moves: u32,
}

impl Mover for Piece {
    fn move_by(&mut self, dx: i32, dy: i32) -> flatrpc::Result<()> {
        self.at.x += dx;
        self.at.y += dy;
        self.moves += 1;
        tracing::info!("Moved by ({}, {}) to ({}, {})", dx, dy, self.at.x, self.at.y);
        Ok(())
    }

    fn position(&mut self) -> flatrpc::Result<Point> {
        Ok(self.at)
    }

    fn reset(&mut self) -> flatrpc::Result<Point> {
        Ok(std::mem::take(&mut self.at))
    }
}

fn config_from_env() -> TcpConfig {
    let mut config = TcpConfig::default();
    if let Ok(host) = std::env::var("FLATRPC_BIND_HOST") {
        config = config.with_bind_host(host);
    }
    if let Ok(host) = std::env::var("FLATRPC_ADVERTISE_HOST") {
        config = config.with_advertise_host(host);
    }
    config
}

fn main() -> Result<()> {
    // Default to INFO, RUST_LOG overrides
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = config_from_env();
    let skeleton = Skeleton::bind::<MoverDispatch>(Piece::default(), config.clone())
        .context("Failed to bind skeleton")?;
    let handle = skeleton.run().context("Failed to start skeleton")?;

    let reference = RemoteReference::new("Mover", handle.address().clone());
    let stub = MoverStub::from(
        flatrpc::Stub::connect_with(reference, config).context("Failed to create stub")?,
    );

    stub.move_by(3, -5)?;
    stub.move_by(-1, 2)?;
    let position = stub.position()?;
    tracing::info!("Point is at ({}, {})", position.x, position.y);

    let before = stub.reset()?;
    tracing::info!("Reset from ({}, {})", before.x, before.y);

    let piece = handle.join()?;
    println!("moves: {}, final position: ({}, {})", piece.moves, piece.at.x, piece.at.y);

    Ok(())
}
