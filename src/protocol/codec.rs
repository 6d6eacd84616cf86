//! Protocol codec
//!
//! Turns token strings into wire messages and back.
//!
//! ## Wire Format
//! One byte per token character, no header, no delimiters:
//! ```text
//! token:  'c'   '4'   '2'   '1'
//! wire:  0x63  0x04  0x02  0x01
//! ```
//! A decimal digit becomes the control byte of the same value. That covers
//! every Unicode decimal digit (general category Nd), so `'٣'` and `'３'` are
//! sent as 0x03 just like `'3'`. Any other character, including superscripts
//! and roman numerals, passes through as its UTF-8 encoding.

use unicode_general_category::{get_general_category, GeneralCategory};

use super::Command;

/// Encode a token string to a wire message
///
/// Never fails: a character that is not a digit is sent as-is.
pub fn encode(tokens: &str) -> Vec<u8> {
    let mut message = Vec::with_capacity(tokens.len());
    let mut buf = [0u8; 4];

    for ch in tokens.chars() {
        match digit_value(ch) {
            Some(value) => message.push(value),
            None => message.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes()),
        }
    }

    message
}

/// Value of a decimal digit in any script
fn digit_value(ch: char) -> Option<u8> {
    if let Some(value) = ch.to_digit(10) {
        return Some(value as u8);
    }
    if !is_decimal_digit(ch) {
        return None;
    }

    // Nd code points come in runs of ten ascending from zero, and adjacent
    // runs (the mathematical digits) stay aligned to ten
    let mut zero = ch as u32;
    while char::from_u32(zero - 1).is_some_and(is_decimal_digit) {
        zero -= 1;
    }
    Some(((ch as u32 - zero) % 10) as u8)
}

fn is_decimal_digit(ch: char) -> bool {
    get_general_category(ch) == GeneralCategory::DecimalNumber
}

/// Encode a catalog command to a wire message
pub fn encode_command(command: &Command) -> Vec<u8> {
    encode(&command.tokens())
}

/// Render a wire message back into token characters
///
/// Control bytes 0x00-0x09 become digits; every other byte is read as Latin-1.
/// Used for logging what went over the wire.
pub fn decode(message: &[u8]) -> String {
    message
        .iter()
        .map(|&b| {
            if b <= 9 {
                char::from(b'0' + b)
            } else {
                char::from(b)
            }
        })
        .collect()
}
