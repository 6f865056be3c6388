//! Backslash escapes inside strings.
//!
//! - Single-character escapes: `\\` `\'` `\"` `\t` `\n` `\r`
//! - `\xHH`: two hex digits, one byte
//! - `\bBBBBBBBB`: eight binary digits, one byte
//!
//! A backslash followed by anything else is kept as literal text.

/// Decode a single-character escape (the byte after the backslash).
#[inline]
pub fn simple_escape(c: u8) -> Option<u8> {
    match c {
        b'\\' => Some(b'\\'),
        b'\'' => Some(b'\''),
        b'"' => Some(b'"'),
        b't' => Some(b'\t'),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        _ => None,
    }
}

/// Value of a hex digit.
#[inline]
pub(crate) fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Value of a binary digit.
#[inline]
pub(crate) fn bin_digit(c: u8) -> Option<u8> {
    match c {
        b'0' => Some(0),
        b'1' => Some(1),
        _ => None,
    }
}

/// Decode the two digits of a `\xHH` escape.
pub(crate) fn decode_hex_escape(digits: [u8; 2]) -> Option<u8> {
    Some((hex_digit(digits[0])? << 4) | hex_digit(digits[1])?)
}

/// Decode the eight digits of a `\bBBBBBBBB` escape, most significant first.
pub(crate) fn decode_bin_escape(digits: [u8; 8]) -> Option<u8> {
    digits
        .iter()
        .try_fold(0u8, |acc, &d| Some((acc << 1) | bin_digit(d)?))
}
