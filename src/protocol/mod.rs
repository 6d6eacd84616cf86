//! Protocol Module
//!
//! Defines the wire protocol between the controller and the renderer.
//!
//! ## Exchange
//! ```text
//! controller                         renderer
//!     │ ──── encoded token string ──►   │
//!     │ ◄──────── 1 byte ack ────────   │
//! ```
//!
//! ### Token strings
//! - `c111` / `c211`: initialize arm / leg
//! - `c511`, `c611`: switch side, switch position
//! - `c4<n>1`: switch to camera n (0-4)
//! - `c2111` / `c2011`: TAC on / off
//! - `r000` / `rt00`: reset primary / TAC limb
//! - `<limb><dof><dir><num><den>`: move a joint
//!
//! ### Acknowledgment
//! Exactly one byte per command. Its value carries no meaning here.

mod codec;
mod command;
mod fields;

pub use codec::{decode, encode, encode_command};
pub use command::{Command, CommandType};
pub use fields::{Camera, Digit, Direction, Dof, Limb, Movement};

/// Number of bytes the renderer replies with per command
pub const ACK_LEN: usize = 1;
