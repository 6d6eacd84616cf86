//! # vhand
//!
//! Control channel for a virtual-reality prosthetic limb renderer:
//! - Token-string command encoding, one byte per character
//! - Single-peer loopback TCP link with one-byte acknowledgments
//! - Typed limb-control catalog (init, camera, TAC, reset, joint movement)
//! - Optional launch of the renderer as a detached process
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Caller                                  │
//! │          (decides which movements to issue)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ init_arm / switch_camera / move_limb ...
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  CommandChannel                              │
//! │        (token strings, strict send/ack alternation)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Encoder   │          │ Connection  │
//!   │   (pure)    │          │ (1 peer)    │
//!   └─────────────┘          └──────┬──────┘
//!                                   │ 127.0.0.1:23068
//!                                   ▼
//!                           ┌─────────────┐
//!                           │  Renderer   │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod channel;
pub mod launcher;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{VhandError, Result};
pub use config::Config;
pub use channel::CommandChannel;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of vhand
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
