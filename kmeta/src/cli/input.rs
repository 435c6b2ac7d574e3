//! Parsing of user-supplied numbers and byte dumps

use crate::domain::InputError;

/// Decode a hex dump into bytes
///
/// Whitespace anywhere in the input is ignored and a leading `0x` is
/// accepted, so `xxd -p` output can be pasted as-is. Positions in errors
/// count characters of the original input.
///
/// # Errors
/// Returns `InputError` for empty input, non-hex characters, or an odd
/// number of digits.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, InputError> {
    let trimmed = input.trim_start();
    let (skip, body) = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(rest) => (input.len() - rest.len(), rest),
        None => (input.len() - trimmed.len(), trimmed),
    };

    let mut nibbles = Vec::with_capacity(body.len());
    for (offset, ch) in body.char_indices() {
        if ch.is_whitespace() {
            continue;
        }
        let digit = ch.to_digit(16).ok_or(InputError::InvalidHex {
            digit: ch,
            position: input[..skip + offset].chars().count(),
        })?;
        // to_digit(16) is at most 15
        nibbles.push(u8::try_from(digit).unwrap_or_default());
    }

    if nibbles.is_empty() {
        return Err(InputError::Empty);
    }
    if nibbles.len() % 2 != 0 {
        return Err(InputError::OddLength(nibbles.len()));
    }
    Ok(nibbles.chunks_exact(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}

/// Parse a decimal, negative decimal, or `0x` hex integer
///
/// # Errors
/// Returns `InputError::InvalidNumber` when the text is not an integer.
pub fn parse_number(input: &str) -> Result<i64, InputError> {
    let text = input.trim();
    let (negative, magnitude) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let parsed = match magnitude.strip_prefix("0x").or_else(|| magnitude.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok().and_then(|v| i64::try_from(v).ok()),
        None if magnitude.starts_with(['+', '-']) => None,
        None => magnitude.parse::<i64>().ok(),
    };

    match (parsed, negative) {
        (Some(value), false) => Ok(value),
        (Some(value), true) => Ok(-value),
        (None, _) => Err(InputError::InvalidNumber(input.to_string())),
    }
}
