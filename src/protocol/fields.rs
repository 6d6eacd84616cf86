//! Command fields
//!
//! Typed values for the positional fields of a token string. Every field
//! renders to exactly one token character, so anything that would need two
//! digits is rejected at construction instead of reaching the wire.

use std::fmt;

use crate::error::{Result, VhandError};

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<u32> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(VhandError::FieldOutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

// =============================================================================
// Digit
// =============================================================================

/// A single decimal digit (0-9), the unit of every numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Digit = Digit(0);
    pub const ONE: Digit = Digit(1);

    /// Create a digit, rejecting values above 9
    pub fn new(value: u32) -> Result<Self> {
        Self::named("digit", value)
    }

    /// Same as [`Digit::new`] but reports `field` in the error
    pub fn named(field: &'static str, value: u32) -> Result<Self> {
        check_range(field, value, 0, 9).map(|v| Digit(v as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Token character for this digit ('0'..='9')
    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<u32> for Digit {
    type Error = VhandError;

    fn try_from(value: u32) -> Result<Self> {
        Digit::new(value)
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// =============================================================================
// Camera
// =============================================================================

/// Viewing camera index (0-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Camera(Digit);

impl Camera {
    pub const MAX: u32 = 4;

    pub fn new(index: u32) -> Result<Self> {
        check_range("camera", index, 0, Self::MAX).map(|v| Camera(Digit(v as u8)))
    }

    pub fn digit(self) -> Digit {
        self.0
    }
}

impl TryFrom<u32> for Camera {
    type Error = VhandError;

    fn try_from(index: u32) -> Result<Self> {
        Camera::new(index)
    }
}

// =============================================================================
// Direction
// =============================================================================

/// Direction of a joint movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Flexion = 0,
    Extension = 1,
}

impl Direction {
    pub fn digit(self) -> Digit {
        Digit(self as u8)
    }
}

impl TryFrom<u32> for Direction {
    type Error = VhandError;

    fn try_from(value: u32) -> Result<Self> {
        match check_range("direction", value, 0, 1)? {
            0 => Ok(Direction::Flexion),
            _ => Ok(Direction::Extension),
        }
    }
}

// =============================================================================
// Limb
// =============================================================================

/// Which limb a movement or reset addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Limb {
    /// The limb driven by the user
    #[default]
    Primary = 1,

    /// The TAC test limb
    Tac = 2,
}

impl Limb {
    pub fn from_tac(tac: bool) -> Self {
        if tac {
            Limb::Tac
        } else {
            Limb::Primary
        }
    }

    pub fn is_tac(self) -> bool {
        self == Limb::Tac
    }

    /// Category digit that prefixes a movement token string
    pub fn digit(self) -> Digit {
        Digit(self as u8)
    }
}

// =============================================================================
// Degrees of Freedom
// =============================================================================

/// A degree of freedom of the simulated limb
///
/// The same index addresses a hand joint or a leg joint depending on which
/// limb model was initialized.
///
/// ```text
/// DoF  Hand                  Leg/Foot
/// 1    Pinky - Pitch         Little Toe Ext/Flex
/// 2    Ring - Pitch          Ring Toe Ext/Flex
/// 3    Middle - Pitch        Middle Toe Ext/Flex
/// 4    Index - Pitch         Index Toe Ext/Flex
/// 5    Thumb - Pitch         Big Toe Ext/Flex
/// 6    Thumb - Yaw           Ankle Plantarflexion/Dorsiflexion
/// 7    Palm - Pitch          Ankle Inversion/Eversion
/// 8    Palm - Roll           Knee Ext/Flex
/// 9    Open/Close Hand       Tibial Rotation In/Out
/// 10   Point                 Femoral Rotation In/Out
/// 11   Agree                 Toes Curl/Stretch
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Dof {
    Pinky = 1,
    Ring = 2,
    Middle = 3,
    Index = 4,
    ThumbPitch = 5,
    ThumbYaw = 6,
    PalmPitch = 7,
    PalmRoll = 8,
    OpenClose = 9,
    Point = 10,
    Agree = 11,
}

impl Dof {
    pub const ALL: [Dof; 11] = [
        Dof::Pinky,
        Dof::Ring,
        Dof::Middle,
        Dof::Index,
        Dof::ThumbPitch,
        Dof::ThumbYaw,
        Dof::PalmPitch,
        Dof::PalmRoll,
        Dof::OpenClose,
        Dof::Point,
        Dof::Agree,
    ];

    /// Look up a DOF by its table index (1-11)
    pub fn from_index(index: u32) -> Result<Self> {
        let index = check_range("dof", index, 1, Self::ALL.len() as u32)?;
        Ok(Self::ALL[index as usize - 1])
    }

    pub fn index(self) -> u32 {
        self as u32
    }

    /// Single-digit token for this DOF
    ///
    /// `Point` and `Agree` have two-digit indices, which the one-byte-per-
    /// character encoding cannot carry, so they are rejected.
    pub fn digit(self) -> Result<Digit> {
        Digit::named("dof", self.index())
    }

    pub fn hand_movement(self) -> &'static str {
        match self {
            Dof::Pinky => "Pinky - Pitch",
            Dof::Ring => "Ring Finger - Pitch",
            Dof::Middle => "Middle Finger - Pitch",
            Dof::Index => "Index Finger - Pitch",
            Dof::ThumbPitch => "Thumb - Pitch",
            Dof::ThumbYaw => "Thumb - Yaw",
            Dof::PalmPitch => "Palm - Pitch",
            Dof::PalmRoll => "Palm - Roll",
            Dof::OpenClose => "Open/Close Hand",
            Dof::Point => "Point",
            Dof::Agree => "Agree",
        }
    }

    pub fn leg_movement(self) -> &'static str {
        match self {
            Dof::Pinky => "Little Toe Ext/Flex",
            Dof::Ring => "Ring Toe Ext/Flex",
            Dof::Middle => "Middle Toe Ext/Flex",
            Dof::Index => "Index Toe Ext/Flex",
            Dof::ThumbPitch => "Big Toe Ext/Flex",
            Dof::ThumbYaw => "Ankle Plantarflexion/Dorsiflexion",
            Dof::PalmPitch => "Ankle Inversion/Eversion",
            Dof::PalmRoll => "Knee Ext/Flex",
            Dof::OpenClose => "Tibial Rotation In/Out",
            Dof::Point => "Femoral Rotation In/Out",
            Dof::Agree => "Toes Curl/Stretch",
        }
    }
}

impl TryFrom<u32> for Dof {
    type Error = VhandError;

    fn try_from(index: u32) -> Result<Self> {
        Dof::from_index(index)
    }
}

// =============================================================================
// Movement
// =============================================================================

/// A validated joint movement
///
/// Distance is the fraction `numerator / denominator` of the joint's range.
/// Both parts take any single digit, zero included; what a zero denominator
/// means is up to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Movement {
    limb: Limb,
    dof: Dof,
    dof_digit: Digit,
    direction: Direction,
    numerator: Digit,
    denominator: Digit,
}

impl Movement {
    pub fn new(
        limb: Limb,
        dof: Dof,
        direction: Direction,
        numerator: u32,
        denominator: u32,
    ) -> Result<Self> {
        let dof_digit = dof.digit()?;
        let numerator = Digit::named("distance_numerator", numerator)?;
        let denominator = Digit::named("distance_denominator", denominator)?;

        Ok(Self {
            limb,
            dof,
            dof_digit,
            direction,
            numerator,
            denominator,
        })
    }

    pub fn limb(&self) -> Limb {
        self.limb
    }

    pub fn dof(&self) -> Dof {
        self.dof
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn numerator(&self) -> Digit {
        self.numerator
    }

    pub fn denominator(&self) -> Digit {
        self.denominator
    }

    /// Token characters in wire order: limb, dof, direction, numerator, denominator
    pub fn token_digits(&self) -> [Digit; 5] {
        [
            self.limb.digit(),
            self.dof_digit,
            self.direction.digit(),
            self.numerator,
            self.denominator,
        ]
    }
}
