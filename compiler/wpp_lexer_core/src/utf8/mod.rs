//! Table-driven UTF-8 validation and codepoint helpers.
//!
//! Validation runs a byte-at-a-time DFA (after Bjoern Hoehrmann's decoder,
//! <http://bjoern.hoehrmann.de/utf-8/decoder/dfa/>). It rejects overlong
//! encodings, surrogates and codepoints above U+10FFFF.

const ACCEPT: u8 = 0;
const REJECT: u8 = 1;

/// Byte classes (first 256 entries) followed by the state transition table.
#[rustfmt::skip]
static UTF8D: [u8; 400] = [
    // Byte classes.
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0, // 00..1f
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0, // 20..3f
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0, // 40..5f
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0, // 60..7f
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,9,9,9,9,9,9,9,9,9,9,9,9,9,9,9,9, // 80..9f
    7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7, // a0..bf
    8,8,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2, // c0..df
    0xa,0x3,0x3,0x3,0x3,0x3,0x3,0x3,0x3,0x3,0x3,0x3,0x3,0x4,0x3,0x3, // e0..ef
    0xb,0x6,0x6,0x6,0x5,0x8,0x8,0x8,0x8,0x8,0x8,0x8,0x8,0x8,0x8,0x8, // f0..ff
    // Transitions, indexed by state * 16 + class.
    0x0,0x1,0x2,0x3,0x5,0x8,0x7,0x1,0x1,0x1,0x4,0x6,0x1,0x1,0x1,0x1, // s0..s0
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,0,1,1,1,1,1,0,1,0,1,1,1,1,1,1, // s1..s2
    1,2,1,1,1,1,1,2,1,2,1,1,1,1,1,1,1,1,1,1,1,1,1,2,1,1,1,1,1,1,1,1, // s3..s4
    1,2,1,1,1,1,1,1,1,2,1,1,1,1,1,1,1,1,1,1,1,1,1,3,1,3,1,1,1,1,1,1, // s5..s6
    1,3,1,1,1,1,1,3,1,3,1,1,1,1,1,1,1,3,1,1,1,1,1,1,1,1,1,1,1,1,1,1, // s7..s8
];

#[inline]
fn step(state: u8, byte: u8) -> u8 {
    let class = UTF8D[byte as usize];
    UTF8D[256 + state as usize * 16 + class as usize]
}

/// Validate `bytes` as UTF-8.
///
/// On failure returns the offset of the first byte of the offending
/// sequence (equal to what [`std::str::Utf8Error::valid_up_to`] reports).
pub fn validate(bytes: &[u8]) -> Result<(), usize> {
    let mut state = ACCEPT;
    let mut sequence_start = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        if state == ACCEPT {
            sequence_start = i;
        }
        state = step(state, byte);
        if state == REJECT {
            return Err(sequence_start);
        }
    }

    if state == ACCEPT {
        Ok(())
    } else {
        Err(sequence_start)
    }
}

/// Returns the number of bytes in the UTF-8 character starting with `lead`.
///
/// - `0xC0..=0xDF`: 2 bytes
/// - `0xE0..=0xEF`: 3 bytes
/// - `0xF0..=0xF7`: 4 bytes
/// - Everything else (ASCII, continuation, invalid): 1 byte
#[inline]
pub fn char_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Byte offsets at which each character of `bytes` starts.
///
/// Decoding is lenient: a truncated trailing sequence still counts as one
/// character, so this works on evaluated strings that contain raw bytes
/// from `\x` escapes.
pub fn char_starts(bytes: &[u8]) -> Vec<usize> {
    let mut starts = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        starts.push(i);
        i += char_width(bytes[i]);
    }
    starts
}
