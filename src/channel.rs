//! Command Channel
//!
//! Request/acknowledgment exchange with the renderer, plus the typed
//! limb-control catalog on top of it.
//!
//! ## Exchange
//! Each command is one encoded write followed by a blocking one-byte read.
//! There is no correlation id, so sends and receives must strictly
//! alternate: the connection lock is held across the whole pair.
//!
//! ```text
//!            send_command(tokens)
//! Ready ──────────────────────────► AwaitingAck
//!   ▲                                    │
//!   └──────────── ack byte ──────────────┘
//! ```

use std::net::SocketAddr;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::Result;
use crate::network::{CancelHandle, Connection, ConnectionState};
use crate::protocol::{self, Camera, Command, Direction, Dof, Limb, Movement, ACK_LEN};

/// Owns the renderer connection and issues commands over it
pub struct CommandChannel {
    /// Held for the full send/receive pair of each command
    connection: Mutex<Connection>,

    cancel: CancelHandle,
}

impl CommandChannel {
    /// Launch the renderer if configured, then wait for it to connect
    pub fn open(config: Config) -> Result<Self> {
        let connection = Connection::open(config)?;
        Ok(Self::from_connection(connection))
    }

    /// Wrap a connection that has already accepted its peer
    pub fn from_connection(connection: Connection) -> Self {
        Self {
            cancel: connection.cancel_handle(),
            connection: Mutex::new(connection),
        }
    }

    // =========================================================================
    // Exchange
    // =========================================================================

    /// Encode `tokens`, send them, and return the renderer's ack byte
    ///
    /// Any token string is accepted here; the typed operations below are
    /// the way to stay within the catalog.
    pub fn send_command(&self, tokens: &str) -> Result<u8> {
        let message = protocol::encode(tokens);
        let mut connection = self.connection.lock();

        tracing::trace!("Sending {:?} as {:02x?}", tokens, message);
        connection.send(&message)?;

        // receive() only returns once exactly ACK_LEN bytes arrived
        let ack = connection.receive(ACK_LEN)?[0];

        tracing::trace!("Ack {:#04x} for {:?}", ack, tokens);
        Ok(ack)
    }

    /// Send a catalog command
    pub fn execute(&self, command: Command) -> Result<u8> {
        tracing::debug!("Command {:?} ({:?})", command, command.command_type());
        self.send_command(&command.tokens())
    }

    // =========================================================================
    // Command Catalog
    // =========================================================================

    /// Initialize an arm model (right arm)
    pub fn init_arm(&self) -> Result<u8> {
        self.execute(Command::InitArm)
    }

    /// Initialize a leg model (right leg)
    pub fn init_leg(&self) -> Result<u8> {
        self.execute(Command::InitLeg)
    }

    /// Switch between right and left limb
    pub fn switch_side(&self) -> Result<u8> {
        self.execute(Command::SwitchSide)
    }

    /// Switch between above and below elbow/knee
    pub fn switch_position(&self) -> Result<u8> {
        self.execute(Command::SwitchPosition)
    }

    /// Look through camera `camera` (0-4)
    pub fn switch_camera(&self, camera: u32) -> Result<u8> {
        self.execute(Command::SwitchCamera(Camera::new(camera)?))
    }

    pub fn activate_tac(&self) -> Result<u8> {
        self.execute(Command::ActivateTac)
    }

    pub fn deactivate_tac(&self) -> Result<u8> {
        self.execute(Command::DeactivateTac)
    }

    /// Reset the pose of the primary limb, or the TAC limb if `tac`
    pub fn reset_position(&self, tac: bool) -> Result<u8> {
        self.execute(Command::ResetPosition(Limb::from_tac(tac)))
    }

    /// Move `dof` by `numerator / denominator` in `direction`
    ///
    /// `dof` is the table index (1-11) and `direction` is 0 for flexion or
    /// 1 for extension. Every field must fit in one digit, which rules out
    /// DOF 10 and 11; out-of-range values fail before anything is sent.
    pub fn move_limb(
        &self,
        dof: u32,
        direction: u32,
        numerator: u32,
        denominator: u32,
        tac: bool,
    ) -> Result<u8> {
        let movement = Movement::new(
            Limb::from_tac(tac),
            Dof::from_index(dof)?,
            Direction::try_from(direction)?,
            numerator,
            denominator,
        )?;
        self.execute(Command::MoveLimb(movement))
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Close the connection; safe to call more than once
    ///
    /// Takes the connection lock, so it waits for any command still blocked
    /// on its ack. Call [`cancel_handle`](Self::cancel_handle)`.cancel()`
    /// first to stop without waiting.
    pub fn stop(&self) {
        self.connection.lock().close();
        tracing::debug!("Command channel stopped");
    }

    /// Handle for unblocking a pending command from another thread
    ///
    /// Does not need the connection lock, so it works while a command is
    /// waiting for its ack.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn state(&self) -> ConnectionState {
        self.connection.lock().state()
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.connection.lock().peer_addr()
    }
}
