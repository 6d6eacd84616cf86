//! Command Tests
//!
//! Tests for the command catalog: token shapes, field validation, parsing.

use vhand::protocol::{Camera, Command, CommandType, Digit, Direction, Dof, Limb, Movement};
use vhand::VhandError;

// =============================================================================
// Helper Functions
// =============================================================================

fn movement(limb: Limb, dof: u32, direction: u32, n: u32, d: u32) -> Movement {
    Movement::new(
        limb,
        Dof::from_index(dof).unwrap(),
        Direction::try_from(direction).unwrap(),
        n,
        d,
    )
    .unwrap()
}

fn all_commands() -> Vec<Command> {
    let mut commands = vec![
        Command::InitArm,
        Command::InitLeg,
        Command::SwitchSide,
        Command::SwitchPosition,
        Command::ActivateTac,
        Command::DeactivateTac,
        Command::ResetPosition(Limb::Primary),
        Command::ResetPosition(Limb::Tac),
    ];
    for index in 0..=Camera::MAX {
        commands.push(Command::SwitchCamera(Camera::new(index).unwrap()));
    }
    commands.push(Command::MoveLimb(movement(Limb::Primary, 3, 1, 5, 1)));
    commands.push(Command::MoveLimb(movement(Limb::Tac, 9, 0, 1, 2)));
    commands
}

// =============================================================================
// Token Shape Tests
// =============================================================================

#[test]
fn test_fixed_tokens() {
    assert_eq!(Command::InitArm.tokens(), "c111");
    assert_eq!(Command::InitLeg.tokens(), "c211");
    assert_eq!(Command::SwitchSide.tokens(), "c511");
    assert_eq!(Command::SwitchPosition.tokens(), "c611");
    assert_eq!(Command::ActivateTac.tokens(), "c2111");
    assert_eq!(Command::DeactivateTac.tokens(), "c2011");
    assert_eq!(Command::ResetPosition(Limb::Primary).tokens(), "r000");
    assert_eq!(Command::ResetPosition(Limb::Tac).tokens(), "rt00");
}

#[test]
fn test_camera_tokens() {
    for index in 0..=4 {
        let command = Command::SwitchCamera(Camera::new(index).unwrap());
        assert_eq!(command.tokens(), format!("c4{}1", index));
    }
}

#[test]
fn test_move_tokens() {
    assert_eq!(
        Command::MoveLimb(movement(Limb::Primary, 3, 1, 5, 1)).tokens(),
        "13151"
    );
    assert_eq!(
        Command::MoveLimb(movement(Limb::Tac, 1, 0, 2, 3)).tokens(),
        "21023"
    );
}

#[test]
fn test_command_types() {
    assert_eq!(Command::InitArm.command_type(), CommandType::Configure);
    assert_eq!(Command::ResetPosition(Limb::Tac).command_type(), CommandType::Reset);
    assert_eq!(
        Command::MoveLimb(movement(Limb::Primary, 1, 0, 1, 1)).command_type(),
        CommandType::Move
    );
}

// =============================================================================
// Field Validation Tests
// =============================================================================

#[test]
fn test_camera_out_of_range() {
    let err = Camera::new(5).unwrap_err();
    assert!(matches!(
        err,
        VhandError::FieldOutOfRange { field: "camera", value: 5, min: 0, max: 4 }
    ));
}

#[test]
fn test_movement_rejects_two_digit_dof() {
    for dof in [Dof::Point, Dof::Agree] {
        let result = Movement::new(Limb::Primary, dof, Direction::Flexion, 1, 1);
        assert!(
            matches!(result, Err(VhandError::FieldOutOfRange { field: "dof", .. })),
            "{:?} should not encode",
            dof
        );
    }
}

#[test]
fn test_movement_rejects_two_digit_distance() {
    let result = Movement::new(Limb::Primary, Dof::Index, Direction::Flexion, 10, 1);
    assert!(matches!(
        result,
        Err(VhandError::FieldOutOfRange { field: "distance_numerator", value: 10, .. })
    ));

    let result = Movement::new(Limb::Primary, Dof::Index, Direction::Flexion, 1, 12);
    assert!(matches!(
        result,
        Err(VhandError::FieldOutOfRange { field: "distance_denominator", value: 12, .. })
    ));
}

#[test]
fn test_movement_accessors() {
    let m = movement(Limb::Tac, 6, 1, 4, 7);
    assert_eq!(m.limb(), Limb::Tac);
    assert_eq!(m.dof(), Dof::ThumbYaw);
    assert_eq!(m.direction(), Direction::Extension);
    assert_eq!(m.numerator(), Digit::new(4).unwrap());
    assert_eq!(m.denominator(), Digit::new(7).unwrap());
}

#[test]
fn test_limb_from_tac() {
    assert_eq!(Limb::from_tac(false), Limb::Primary);
    assert_eq!(Limb::from_tac(true), Limb::Tac);
    assert!(Limb::Tac.is_tac());
    assert_eq!(Limb::default(), Limb::Primary);
}

#[test]
fn test_dof_descriptions() {
    assert_eq!(Dof::Pinky.hand_movement(), "Pinky - Pitch");
    assert_eq!(Dof::Pinky.leg_movement(), "Little Toe Ext/Flex");
    assert_eq!(Dof::PalmRoll.leg_movement(), "Knee Ext/Flex");
    assert_eq!(Dof::Agree.hand_movement(), "Agree");
    assert_eq!(Dof::Agree.leg_movement(), "Toes Curl/Stretch");
}

// =============================================================================
// Parsing Tests
// =============================================================================

#[test]
fn test_parse_recognizes_catalog() {
    for command in all_commands() {
        assert_eq!(Command::parse(&command.tokens()), Some(command));
    }
}

#[test]
fn test_parse_zero_denominator() {
    let command = Command::parse("13150").unwrap();
    assert_eq!(command, Command::MoveLimb(movement(Limb::Primary, 3, 1, 5, 0)));
    assert_eq!(command.tokens(), "13150");
}

#[test]
fn test_parse_rejects_outside_catalog() {
    assert_eq!(Command::parse("c111x"), None);
    assert_eq!(Command::parse("rt01"), None);
    assert_eq!(Command::parse("33151"), None);
    assert_eq!(Command::parse("13250"), None);
    assert_eq!(Command::parse("10151"), None);
}
