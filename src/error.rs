//! Error types for vhand
//!
//! Provides a unified error type for all operations.

use std::net::SocketAddr;

use thiserror::Error;

/// Result type alias using VhandError
pub type Result<T> = std::result::Result<T, VhandError>;

/// Unified error type for vhand operations
#[derive(Debug, Error)]
pub enum VhandError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Not connected: {0}")]
    NotConnected(&'static str),

    #[error("Peer {0} disconnected")]
    PeerDisconnected(SocketAddr),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Connection closed")]
    Closed,

    #[error("Operation cancelled")]
    Cancelled,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Field '{field}' out of range: {value} (expected {min}..={max})")]
    FieldOutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl VhandError {
    /// Whether this error means the peer socket is no longer usable
    pub fn is_disconnect(&self) -> bool {
        match self {
            VhandError::PeerDisconnected(_) | VhandError::Cancelled => true,
            VhandError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }
}
