//! Connection
//!
//! The controller side of the renderer link: one listener, one peer.

use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use socket2::{Domain, Protocol, Socket, Type};

use crate::config::Config;
use crate::error::{Result, VhandError};
use crate::launcher;

/// How often a pending accept re-checks its deadline and cancel flag
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Lifecycle of a [`Connection`]
///
/// ```text
/// Unopened ──listen()──► Listening ──accept()──► Connected
///     │                      │                       │
///     └──────────────────────┴───────close()─────────┴──► Closed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Unopened,
    Listening,
    Connected,
    Closed,
}

/// State shared with [`CancelHandle`]s
#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    peer: Mutex<Option<TcpStream>>,
}

/// Unblocks a pending accept, send or receive from another thread
///
/// Cancelling shuts the peer socket down, so the blocked call fails and the
/// connection should then be closed by its owner.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    state: Arc<CancelState>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::SeqCst);
        if let Some(peer) = self.state.peer.lock().take() {
            let _ = peer.shutdown(Shutdown::Both);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }
}

/// Listener plus the single accepted renderer peer
///
/// The listener stays open after the peer is accepted but is never accepted
/// from again; later clients sit in the backlog until teardown.
pub struct Connection {
    config: Config,
    state: ConnectionState,

    /// Listening socket (Listening and Connected)
    listener: Option<TcpListener>,

    /// The accepted renderer (Connected only)
    peer: Option<TcpStream>,

    /// Peer address for logging
    peer_addr: Option<SocketAddr>,

    cancel: Arc<CancelState>,
}

impl Connection {
    /// Create an unopened connection
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: ConnectionState::Unopened,
            listener: None,
            peer: None,
            peer_addr: None,
            cancel: Arc::new(CancelState::default()),
        }
    }

    /// Launch the renderer (if configured), listen, and wait for it to connect
    pub fn open(config: Config) -> Result<Self> {
        let mut connection = Self::new(config);
        connection.listen()?;
        connection.accept()?;
        Ok(connection)
    }

    /// Launch the configured application and bind the listener
    ///
    /// The application is started first so it can come up while we bind.
    /// The listen queue is sized to `config.backlog`; once it is full the
    /// kernel stops completing handshakes for further clients.
    pub fn listen(&mut self) -> Result<()> {
        match self.state {
            ConnectionState::Unopened => {}
            ConnectionState::Closed => return Err(VhandError::Closed),
            _ => return Ok(()),
        }

        self.config.validate()?;

        if let Some(path) = &self.config.app_path {
            launcher::launch(path);
        }

        let addr = self.config.socket_addr()?;
        let listener =
            bind_listener(addr, self.config.backlog).map_err(|source| VhandError::Bind {
                addr: addr.to_string(),
                source,
            })?;

        tracing::debug!(
            "Listening on {} (backlog {})",
            listener.local_addr().map(|a| a.to_string()).unwrap_or_else(|_| addr.to_string()),
            self.config.backlog
        );

        self.listener = Some(listener);
        self.state = ConnectionState::Listening;
        Ok(())
    }

    /// Block until the renderer connects
    ///
    /// Honors `accept_timeout_ms` and [`CancelHandle::cancel`]. Returns the
    /// peer address; calling it again once connected is a no-op.
    pub fn accept(&mut self) -> Result<SocketAddr> {
        match (self.state, self.peer_addr) {
            (ConnectionState::Connected, Some(addr)) => return Ok(addr),
            (ConnectionState::Closed, _) => return Err(VhandError::Closed),
            _ => {}
        }

        let listener = self
            .listener
            .as_ref()
            .ok_or(VhandError::NotConnected("accept called before listen"))?;

        let deadline = self.config.accept_timeout().map(|t| Instant::now() + t);
        listener.set_nonblocking(true)?;

        let (stream, addr) = loop {
            if self.cancel.cancelled.load(Ordering::SeqCst) {
                return Err(VhandError::Cancelled);
            }

            match listener.accept() {
                Ok(accepted) => break accepted,
                Err(e) if e.kind() == ErrorKind::WouldBlock => {
                    if deadline.is_some_and(|d| Instant::now() >= d) {
                        return Err(VhandError::Timeout(format!(
                            "no peer connected within {} ms",
                            self.config.accept_timeout_ms
                        )));
                    }
                    std::thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };

        // Accepted sockets inherit non-blocking mode on some platforms
        stream.set_nonblocking(false)?;
        // Commands are a handful of bytes each; don't let Nagle hold them
        stream.set_nodelay(true)?;
        stream.set_read_timeout(self.config.read_timeout())?;
        stream.set_write_timeout(self.config.write_timeout())?;

        *self.cancel.peer.lock() = Some(stream.try_clone()?);

        tracing::debug!("Renderer connected from {}", addr);

        self.peer = Some(stream);
        self.peer_addr = Some(addr);
        self.state = ConnectionState::Connected;
        Ok(addr)
    }

    /// Write a whole message to the peer, returning the bytes written
    pub fn send(&mut self, message: &[u8]) -> Result<usize> {
        let peer = self
            .peer
            .as_mut()
            .ok_or(VhandError::NotConnected("send without a peer"))?;

        if let Err(e) = peer.write_all(message) {
            return Err(self.io_error(e, "send"));
        }

        Ok(message.len())
    }

    /// Block until exactly `n` bytes arrive from the peer
    pub fn receive(&mut self, n: usize) -> Result<Vec<u8>> {
        let peer = self
            .peer
            .as_mut()
            .ok_or(VhandError::NotConnected("receive without a peer"))?;

        let mut buf = vec![0u8; n];
        if let Err(e) = peer.read_exact(&mut buf) {
            return Err(self.io_error(e, "receive"));
        }

        Ok(buf)
    }

    /// Close the peer, then the listener
    ///
    /// Never fails and may be called any number of times, in any state.
    pub fn close(&mut self) {
        if let Some(peer) = self.peer.take() {
            if let Err(e) = peer.shutdown(Shutdown::Both) {
                tracing::debug!("Ignoring peer shutdown error: {}", e);
            }
        }
        self.cancel.peer.lock().take();

        if self.listener.take().is_some() {
            tracing::debug!("Listener closed");
        }

        self.state = ConnectionState::Closed;
    }

    /// Handle for cancelling blocked operations from another thread
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            state: Arc::clone(&self.cancel),
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .as_ref()
            .ok_or(VhandError::NotConnected("not listening"))?
            .local_addr()
            .map_err(VhandError::from)
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer_addr
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Classify an I/O failure on the peer socket
    fn io_error(&self, e: std::io::Error, op: &str) -> VhandError {
        if self.cancel.cancelled.load(Ordering::SeqCst) {
            return VhandError::Cancelled;
        }

        match e.kind() {
            ErrorKind::UnexpectedEof => match self.peer_addr {
                Some(addr) => VhandError::PeerDisconnected(addr),
                None => VhandError::Io(e),
            },
            // Unix reports an expired socket timeout as WouldBlock, Windows as TimedOut
            ErrorKind::WouldBlock | ErrorKind::TimedOut => {
                VhandError::Timeout(format!("{} on {}", op, self.describe_peer()))
            }
            _ => {
                tracing::warn!("{} to {} failed: {}", op, self.describe_peer(), e);
                VhandError::Io(e)
            }
        }
    }

    fn describe_peer(&self) -> String {
        self.peer_addr
            .map(|a| a.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Bind `addr` and listen with an explicit backlog
fn bind_listener(addr: SocketAddr, backlog: u32) -> std::io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    // Same as std's TcpListener::bind: lets a restarted controller rebind
    // while the previous socket sits in TIME_WAIT
    #[cfg(not(windows))]
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(i32::try_from(backlog).unwrap_or(i32::MAX))?;
    Ok(socket.into())
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}
