// End-to-end tests over TCP
//
// These tests bind real listeners on 127.0.0.1, serve an implementation from
// a skeleton thread and call it through stubs created with `connect`.

use flatrpc::{
    remote_interface, structured, FlatrpcError, RemoteReference, Result, Skeleton, TcpConfig,
    TcpTransport,
};
use std::sync::Once;
use std::thread;
use std::time::Duration;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

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
        fn label(prefix: char, count: u8) -> String;
    }
}

#[derive(Debug, Default)]
struct Piece {
    at: Point,
}

impl Mover for Piece {
    fn move_by(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.at.x += dx;
        self.at.y += dy;
        Ok(())
    }

    fn position(&mut self) -> Result<Point> {
        Ok(self.at)
    }

    fn label(&mut self, prefix: char, count: u8) -> Result<String> {
        Ok(std::iter::repeat(prefix).take(usize::from(count)).collect())
    }
}

fn serve() -> flatrpc::SkeletonHandle<Piece> {
    init_tracing();
    Skeleton::bind::<MoverDispatch>(Piece::default(), TcpConfig::default())
        .unwrap()
        .run()
        .unwrap()
}

#[test]
fn test_tcp_move_and_position() {
    let handle = serve();
    let stub = MoverStub::connect(RemoteReference::new("Mover", handle.address().clone())).unwrap();

    stub.move_by(3, -5).unwrap();
    assert_eq!(stub.position().unwrap(), Point { x: 3, y: -5 });

    let piece = handle.join().unwrap();
    assert_eq!(piece.at, Point { x: 3, y: -5 });
}

#[test]
fn test_tcp_terminal_arguments() {
    let handle = serve();
    let stub = MoverStub::connect(RemoteReference::new("Mover", handle.address().clone())).unwrap();

    assert_eq!(stub.label('é', 3).unwrap(), "ééé");
    assert_eq!(stub.label('x', 0).unwrap(), "");

    handle.join().unwrap();
}

#[test]
fn test_tcp_concurrent_stubs_are_serialized() {
    let handle = serve();
    let address = handle.address().clone();

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let reference = RemoteReference::new("Mover", address.clone());
            thread::spawn(move || {
                let stub = MoverStub::connect(reference).unwrap();
                for _ in 0..25 {
                    stub.move_by(1, -1).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let piece = handle.join().unwrap();
    assert_eq!(piece.at, Point { x: 100, y: -100 });
}

#[test]
fn test_tcp_shared_stub_across_threads() {
    let handle = serve();
    let stub = std::sync::Arc::new(
        MoverStub::connect(RemoteReference::new("Mover", handle.address().clone())).unwrap(),
    );

    let workers: Vec<_> = (0..3)
        .map(|_| {
            let stub = std::sync::Arc::clone(&stub);
            thread::spawn(move || {
                for _ in 0..10 {
                    stub.move_by(2, 0).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(stub.position().unwrap(), Point { x: 60, y: 0 });
    handle.join().unwrap();
}

#[test]
fn test_tcp_unreachable_skeleton() {
    init_tracing();
    // Bind and drop a listener to get a port nobody is listening on.
    let port = {
        let transport = TcpTransport::bind_local().unwrap();
        flatrpc::Transport::address(&transport).port()
    };

    let config = TcpConfig::default().with_connect_timeout(Duration::from_millis(200));
    let stub = flatrpc::Stub::connect_with(RemoteReference::at("Mover", "127.0.0.1", port), config).unwrap();
    let stub = MoverStub::from(stub);

    let err = stub.move_by(1, 1).unwrap_err();
    assert!(
        matches!(err, FlatrpcError::Connection(_) | FlatrpcError::Io(_)),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_tcp_stop_is_prompt_while_idle() {
    let handle = serve();
    thread::sleep(Duration::from_millis(50));
    handle.stop();
    handle.join().unwrap();
}

#[test]
fn test_tcp_garbage_frame_does_not_stop_skeleton() {
    use std::io::Write;

    let handle = serve();
    let stub = MoverStub::connect(RemoteReference::new("Mover", handle.address().clone())).unwrap();

    let mut stream = std::net::TcpStream::connect(handle.address().to_string()).unwrap();
    let payload = b"{\"not\": \"a call message\"}";
    stream.write_all(&(payload.len() as u32).to_be_bytes()).unwrap();
    stream.write_all(payload).unwrap();
    drop(stream);

    stub.move_by(2, 3).unwrap();
    assert_eq!(stub.position().unwrap(), Point { x: 2, y: 3 });

    let piece = handle.join().unwrap();
    assert_eq!(piece.at, Point { x: 2, y: 3 });
}
