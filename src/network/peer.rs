//! Mock renderer peer
//!
//! Stands in for the rendering application: connects to the controller,
//! acknowledges every message with a fixed byte, and reports what it received.

use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};

use crate::error::Result;

/// How long the peer keeps retrying while the controller is not yet listening
const CONNECT_RETRY_WINDOW: Duration = Duration::from_secs(5);

const CONNECT_RETRY_INTERVAL: Duration = Duration::from_millis(20);

/// Largest message in the catalog is five bytes
const READ_BUF_SIZE: usize = 64;

/// A renderer stand-in running on its own thread
///
/// There is no framing on the wire, so each `read` is taken as one message.
/// That holds because the controller waits for the ack before sending again.
pub struct MockPeer {
    messages: Receiver<Vec<u8>>,
    handle: Option<JoinHandle<Result<usize>>>,
}

impl MockPeer {
    /// Connect to `addr` in the background and ack every message with `ack`
    pub fn spawn(addr: SocketAddr, ack: u8) -> Self {
        let (tx, rx) = channel::unbounded();
        let handle = thread::Builder::new()
            .name("vhand-mock-peer".to_string())
            .spawn(move || {
                let stream = connect_with_retry(addr)?;
                serve(stream, ack, &tx)
            })
            .ok();

        Self {
            messages: rx,
            handle,
        }
    }

    /// Messages received so far, in order; disconnects when the peer exits
    pub fn messages(&self) -> &Receiver<Vec<u8>> {
        &self.messages
    }

    /// Wait up to `timeout` for the next message
    pub fn next_message(&self, timeout: Duration) -> Option<Vec<u8>> {
        match self.messages.recv_timeout(timeout) {
            Ok(message) => Some(message),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Wait for the peer to finish, returning how many messages it acked
    pub fn join(mut self) -> Result<usize> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("mock peer thread panicked").into())),
            None => Err(std::io::Error::other("mock peer thread failed to start").into()),
        }
    }
}

fn connect_with_retry(addr: SocketAddr) -> Result<TcpStream> {
    let deadline = Instant::now() + CONNECT_RETRY_WINDOW;

    loop {
        match TcpStream::connect(addr) {
            Ok(stream) => {
                tracing::debug!("Mock peer connected to {}", addr);
                return Ok(stream);
            }
            Err(e) if e.kind() == ErrorKind::ConnectionRefused && Instant::now() < deadline => {
                thread::sleep(CONNECT_RETRY_INTERVAL);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Read-ack loop; ends cleanly when the controller hangs up
fn serve(mut stream: TcpStream, ack: u8, tx: &Sender<Vec<u8>>) -> Result<usize> {
    stream.set_nodelay(true)?;

    let mut buf = [0u8; READ_BUF_SIZE];
    let mut handled = 0;

    loop {
        let n = match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted
                ) =>
            {
                break
            }
            Err(e) => return Err(e.into()),
        };

        let message = buf[..n].to_vec();
        tracing::trace!("Mock peer received {:02x?}", message);

        // Receiver may be gone; keep acking regardless
        let _ = tx.send(message);

        match stream.write_all(&[ack]) {
            Ok(()) => handled += 1,
            Err(e) if e.kind() == ErrorKind::BrokenPipe => break,
            Err(e) => return Err(e.into()),
        }
    }

    tracing::debug!("Mock peer done after {} messages", handled);
    Ok(handled)
}
