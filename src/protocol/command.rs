//! Command definitions
//!
//! The limb-control catalog and the token strings each command renders to.

use super::fields::{Camera, Direction, Dof, Limb, Movement};

/// Command categories, keyed by the first token character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    /// Model / view configuration, prefix `c`
    Configure,

    /// Pose reset, prefix `r`
    Reset,

    /// Joint movement, prefix is the limb digit
    Move,
}

/// A limb-control command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Initialize an arm model (right arm)
    InitArm,

    /// Initialize a leg model (right leg)
    InitLeg,

    /// Switch between right and left limb
    SwitchSide,

    /// Switch between above and below elbow/knee
    SwitchPosition,

    /// Look through the given camera
    SwitchCamera(Camera),

    /// Switch the TAC test on
    ActivateTac,

    /// Switch the TAC test off
    DeactivateTac,

    /// Reset the pose of a limb
    ResetPosition(Limb),

    /// Move one degree of freedom
    MoveLimb(Movement),
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::ResetPosition(_) => CommandType::Reset,
            Command::MoveLimb(_) => CommandType::Move,
            _ => CommandType::Configure,
        }
    }

    /// Render the token string sent to the renderer
    pub fn tokens(&self) -> String {
        match self {
            Command::InitArm => "c111".to_string(),
            Command::InitLeg => "c211".to_string(),
            Command::SwitchSide => "c511".to_string(),
            Command::SwitchPosition => "c611".to_string(),
            Command::SwitchCamera(camera) => format!("c4{}1", camera.digit()),
            Command::ActivateTac => "c2111".to_string(),
            Command::DeactivateTac => "c2011".to_string(),
            Command::ResetPosition(Limb::Tac) => "rt00".to_string(),
            Command::ResetPosition(Limb::Primary) => "r000".to_string(),
            Command::MoveLimb(movement) => movement
                .token_digits()
                .iter()
                .map(|d| d.as_char())
                .collect(),
        }
    }

    /// Recognize a token string produced by [`Command::tokens`]
    ///
    /// Returns `None` for anything outside the catalog.
    pub fn parse(tokens: &str) -> Option<Command> {
        let command = match tokens {
            "c111" => Command::InitArm,
            "c211" => Command::InitLeg,
            "c511" => Command::SwitchSide,
            "c611" => Command::SwitchPosition,
            "c2111" => Command::ActivateTac,
            "c2011" => Command::DeactivateTac,
            "rt00" => Command::ResetPosition(Limb::Tac),
            "r000" => Command::ResetPosition(Limb::Primary),
            _ => return Self::parse_shaped(tokens),
        };
        Some(command)
    }

    fn parse_shaped(tokens: &str) -> Option<Command> {
        let chars: Vec<char> = tokens.chars().collect();

        match chars.as_slice() {
            ['c', '4', camera, '1'] => {
                let camera = Camera::new(camera.to_digit(10)?).ok()?;
                Some(Command::SwitchCamera(camera))
            }
            [limb, dof, direction, numerator, denominator] => {
                let limb = match *limb {
                    '1' => Limb::Primary,
                    '2' => Limb::Tac,
                    _ => return None,
                };
                let dof = Dof::from_index(dof.to_digit(10)?).ok()?;
                let direction = Direction::try_from(direction.to_digit(10)?).ok()?;
                let movement = Movement::new(
                    limb,
                    dof,
                    direction,
                    numerator.to_digit(10)?,
                    denominator.to_digit(10)?,
                )
                .ok()?;
                Some(Command::MoveLimb(movement))
            }
            _ => None,
        }
    }
}

impl From<Movement> for Command {
    fn from(movement: Movement) -> Self {
        Command::MoveLimb(movement)
    }
}

impl From<Camera> for Command {
    fn from(camera: Camera) -> Self {
        Command::SwitchCamera(camera)
    }
}
