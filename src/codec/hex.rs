//! Strict fixed-width hexadecimal parsing
//!
//! `u32::from_str_radix` accepts a leading `+`, so fields are checked digit by digit
//! before being folded into a value.

use crate::io::error::{DungeonError, Result};

/// Parse up to eight hex digits into an unsigned value
///
/// # Errors
///
/// Returns [`DungeonError::InvalidHexData`] if the field is empty, longer than eight
/// digits, or contains anything other than `0-9A-Fa-f`.
pub fn parse_hex(field: &[u8]) -> Result<u32> {
    if field.is_empty() || field.len() > 8 {
        return Err(invalid_hex(field));
    }

    field.iter().try_fold(0_u32, |value, &digit| {
        let nibble = char::from(digit)
            .to_digit(16)
            .ok_or_else(|| invalid_hex(field))?;
        Ok((value << 4) | nibble)
    })
}

/// Parse exactly two hex digits into a byte
///
/// # Errors
///
/// Returns [`DungeonError::InvalidHexData`] unless the field is two hex digits.
pub fn parse_hex_byte(field: &[u8]) -> Result<u8> {
    if field.len() != 2 {
        return Err(invalid_hex(field));
    }
    parse_hex(field).map(|value| value as u8)
}

fn invalid_hex(field: &[u8]) -> DungeonError {
    DungeonError::InvalidHexData {
        data: String::from_utf8_lossy(field).into_owned(),
    }
}
