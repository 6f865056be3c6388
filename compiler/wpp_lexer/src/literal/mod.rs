//! Packing of `0x` and `0b` literals into bytes.
//!
//! Digits are consumed right to left (skipping `_` separators) so that an
//! odd number of hex digits, or a bit count that is not a multiple of
//! eight, leaves the short group at the front. The bytes are assembled
//! from the least significant end and reversed at the end.

use crate::escape::{bin_digit, hex_digit};

/// Pack hex digits (without the `0x` prefix) into bytes.
///
/// Two digits per byte. Non-digit bytes other than `_` count as zero.
pub fn pack_hex(digits: &[u8]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::with_capacity(digits.len() / 2 + 1);
    let mut counter = 0usize;

    for &c in digits.iter().rev().filter(|&&c| c != b'_') {
        let value = hex_digit(c).unwrap_or(0);
        match out.last_mut() {
            Some(last) if counter & 1 == 1 => *last |= value << 4,
            _ => out.push(value),
        }
        counter += 1;
    }

    out.reverse();
    out
}

/// Pack binary digits (without the `0b` prefix) into bytes.
///
/// Eight digits per byte.
pub fn pack_bin(digits: &[u8]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::with_capacity(digits.len() / 8 + 1);
    let mut counter = 0usize;

    for &c in digits.iter().rev().filter(|&&c| c != b'_') {
        let bit = bin_digit(c).unwrap_or(0);
        match out.last_mut() {
            Some(last) if counter & 7 != 0 => *last |= bit << (counter & 7),
            _ => out.push(bit),
        }
        counter += 1;
    }

    out.reverse();
    out
}
