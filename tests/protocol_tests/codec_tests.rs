//! Codec Tests
//!
//! Tests for token string encoding and wire message decoding.

use vhand::protocol::{
    Camera, Command, Direction, Dof, Limb, Movement,
    decode, encode, encode_command,
};

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_init_arm() {
    assert_eq!(encode("c111"), vec![b'c', 0x01, 0x01, 0x01]);
}

#[test]
fn test_encode_reset_primary() {
    assert_eq!(encode("r000"), vec![b'r', 0x00, 0x00, 0x00]);
}

#[test]
fn test_encode_reset_tac_mixes_literals() {
    assert_eq!(encode("rt00"), vec![b'r', b't', 0x00, 0x00]);
}

#[test]
fn test_encode_each_digit_to_its_value() {
    for value in 0u8..=9 {
        let token = char::from(b'0' + value).to_string();
        assert_eq!(encode(&token), vec![value], "digit {}", token);
    }
}

#[test]
fn test_encode_non_digits_pass_through() {
    let literals = "abcxyzABCXYZ !#-.:/\\~";
    for ch in literals.chars() {
        assert_eq!(encode(&ch.to_string()), vec![ch as u8], "char {:?}", ch);
    }
}

#[test]
fn test_encode_never_groups_digits() {
    // "10" is two fields, not ten
    assert_eq!(encode("10"), vec![0x01, 0x00]);
    assert_eq!(encode("c4101"), vec![b'c', 0x04, 0x01, 0x00, 0x01]);
}

#[test]
fn test_encode_length_matches_ascii_input() {
    let tokens = "c2111r000rt0013151";
    assert_eq!(encode(tokens).len(), tokens.chars().count());
}

#[test]
fn test_encode_is_total() {
    assert!(encode("").is_empty());

    // Non-ASCII characters pass through as their UTF-8 bytes
    assert_eq!(encode("é"), "é".as_bytes().to_vec());

    // Numeric characters that are not decimal digits stay literal
    assert_eq!(encode("²"), "²".as_bytes().to_vec());
    assert_eq!(encode("Ⅻ"), "Ⅻ".as_bytes().to_vec());

    let control = "\u{0}\u{7f}";
    assert_eq!(encode(control), vec![0x00, 0x7f]);
}

#[test]
fn test_encode_unicode_decimal_digits() {
    // Arabic-Indic, fullwidth, Devanagari
    assert_eq!(encode("٣"), vec![0x03]);
    assert_eq!(encode("３"), vec![0x03]);
    assert_eq!(encode("०९"), vec![0x00, 0x09]);

    // Mathematical bold nine and double-struck zero sit in adjacent runs
    assert_eq!(encode("\u{1D7D7}"), vec![0x09]);
    assert_eq!(encode("\u{1D7D8}"), vec![0x00]);

    assert_eq!(encode("c٤２１"), encode("c421"));
}

#[test]
fn test_encode_is_deterministic() {
    let tokens = "c421";
    assert_eq!(encode(tokens), encode(tokens));
}

#[test]
fn test_encode_command_matches_tokens() {
    let movement = Movement::new(Limb::Primary, Dof::Middle, Direction::Extension, 5, 1).unwrap();
    assert_eq!(
        encode_command(&Command::MoveLimb(movement)),
        vec![0x01, 0x03, 0x01, 0x05, 0x01]
    );

    let camera = Camera::new(2).unwrap();
    assert_eq!(
        encode_command(&Command::SwitchCamera(camera)),
        vec![b'c', 0x04, 0x02, 0x01]
    );
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_decode_control_bytes_to_digits() {
    assert_eq!(decode(&[b'c', 0x04, 0x02, 0x01]), "c421");
    assert_eq!(decode(&[0x02, 0x09, 0x00, 0x01, 0x01]), "29011");
}

#[test]
fn test_decode_catalog_messages() {
    for tokens in ["c111", "c211", "c511", "c611", "c2111", "c2011", "rt00", "r000", "c401"] {
        assert_eq!(decode(&encode(tokens)), tokens);
    }
}

#[test]
fn test_decode_high_bytes_as_latin1() {
    assert_eq!(decode(&[0xe9]), "é");
    assert_eq!(decode(&[]), "");
}
