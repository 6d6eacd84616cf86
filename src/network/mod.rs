//! Network Module
//!
//! Loopback TCP link to the rendering application.
//!
//! ## Architecture
//! - The controller listens; the renderer connects
//! - Exactly one peer is accepted per connection
//! - Blocking I/O, optionally bounded by timeouts or cancelled

mod connection;
mod peer;

pub use connection::{CancelHandle, Connection, ConnectionState};
pub use peer::MockPeer;
