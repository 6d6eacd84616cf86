//! Configuration for vhand
//!
//! Centralized configuration with protocol defaults.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, VhandError};

/// Loopback address the rendering application connects to
pub const DEFAULT_ADDR: &str = "127.0.0.1";

/// Fixed protocol port
pub const DEFAULT_PORT: u16 = 23068;

/// Listen backlog of the controller socket
pub const DEFAULT_BACKLOG: u32 = 5;

/// Main configuration for a vhand control channel
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Process Configuration
    // -------------------------------------------------------------------------
    /// Path of the rendering application to launch before listening.
    /// `None` assumes the application is already running.
    pub app_path: Option<PathBuf>,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Listen backlog
    pub backlog: u32,

    /// How long to wait for the peer to connect (milliseconds, 0 = forever)
    pub accept_timeout_ms: u64,

    /// Peer read timeout (milliseconds, 0 = forever)
    pub read_timeout_ms: u64,

    /// Peer write timeout (milliseconds, 0 = forever)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_path: None,
            listen_addr: format!("{}:{}", DEFAULT_ADDR, DEFAULT_PORT),
            backlog: DEFAULT_BACKLOG,
            accept_timeout_ms: 0,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Resolve `listen_addr` to a single socket address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.listen_addr
            .to_socket_addrs()
            .map_err(|e| VhandError::InvalidAddress(format!("{}: {}", self.listen_addr, e)))?
            .next()
            .ok_or_else(|| VhandError::InvalidAddress(self.listen_addr.clone()))
    }

    pub fn accept_timeout(&self) -> Option<Duration> {
        millis(self.accept_timeout_ms)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        millis(self.write_timeout_ms)
    }

    /// Check the settings that cannot be caught at bind time
    pub fn validate(&self) -> Result<()> {
        if self.backlog == 0 {
            return Err(VhandError::Config("backlog must be at least 1".to_string()));
        }
        if let Some(path) = &self.app_path {
            if path.as_os_str().is_empty() {
                return Err(VhandError::Config("app path is empty".to_string()));
            }
        }
        self.socket_addr().map(|_| ())
    }
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the rendering application to launch on open
    pub fn app_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.app_path = Some(path.into());
        self
    }

    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the listen backlog
    pub fn backlog(mut self, backlog: u32) -> Self {
        self.config.backlog = backlog;
        self
    }

    /// Set the accept timeout (in milliseconds)
    pub fn accept_timeout_ms(mut self, ms: u64) -> Self {
        self.config.accept_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
