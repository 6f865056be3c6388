//! Pure string operations behind `length`, `find`, `escape`, `slice` and
//! postfix slicing.
//!
//! Values are byte strings. Character positions come from
//! [`char_starts`], which decodes leniently, so raw bytes produced by `\x`
//! escapes never make an operation fail.

use wpp_lexer_core::utf8::char_starts;

/// Why a `slice(s, start, end)` call was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("slice range must be numerical")]
    NotNumeric,
    #[error("end of slice cannot be before the start")]
    EndBeforeStart,
    #[error("slice extends outside of string bounds")]
    OutOfBounds,
    #[error("start cannot be negative where end is positive")]
    NegativeStart,
}

/// Byte length as decimal.
pub fn length(s: &[u8]) -> Vec<u8> {
    s.len().to_string().into_bytes()
}

/// Byte index of the first occurrence of `needle`, or empty when absent.
pub fn find(haystack: &[u8], needle: &[u8]) -> Vec<u8> {
    let position = if needle.is_empty() {
        Some(0)
    } else {
        haystack.windows(needle.len()).position(|w| w == needle)
    };
    position.map(|p| p.to_string().into_bytes()).unwrap_or_default()
}

/// Backslash-escape quotes and control whitespace.
pub fn escape(s: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for &b in s {
        match b {
            b'"' => out.extend_from_slice(b"\\\""),
            b'\'' => out.extend_from_slice(b"\\'"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\t' => out.extend_from_slice(b"\\t"),
            b'\r' => out.extend_from_slice(b"\\r"),
            _ => out.push(b),
        }
    }
    out
}

fn parse_bound(raw: &[u8]) -> Result<i128, RangeError> {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .map(i128::from)
        .ok_or(RangeError::NotNumeric)
}

/// Inclusive byte range `[start, end]`; negative bounds count from the end.
pub fn slice_range(s: &[u8], start: &[u8], end: &[u8]) -> Result<Vec<u8>, RangeError> {
    let start = parse_bound(start)?;
    let end = parse_bound(end)?;
    let len = i128::try_from(s.len()).map_err(|_| RangeError::OutOfBounds)?;

    let begin = if start < 0 { len + start } else { start };
    let last = if end < 0 { len + end } else { end };
    let count = last - begin + 1;

    if count <= 0 {
        return Err(RangeError::EndBeforeStart);
    }
    if begin < 0 || len < begin + count {
        return Err(RangeError::OutOfBounds);
    }
    if start < 0 && end >= 0 {
        return Err(RangeError::NegativeStart);
    }

    let begin = usize::try_from(begin).map_err(|_| RangeError::OutOfBounds)?;
    let count = usize::try_from(count).map_err(|_| RangeError::OutOfBounds)?;
    Ok(s[begin..begin + count].to_vec())
}

/// Resolve a possibly negative bound against the *byte* length of `s` and
/// clamp it to `0..=chars`.
fn clamp_bound(s: &[u8], bound: i64, chars: usize) -> usize {
    let len = i64::try_from(s.len()).unwrap_or(i64::MAX);
    let bound = if bound < 0 { len + bound } else { bound };
    usize::try_from(bound.max(0)).map_or(chars, |b| b.min(chars))
}

/// Keep the first `stop` characters.
pub fn take_chars(s: &[u8], stop: i64) -> Vec<u8> {
    let starts = char_starts(s);
    let n = clamp_bound(s, stop, starts.len());
    let end = starts.get(n).copied().unwrap_or(s.len());
    s[..end].to_vec()
}

/// Drop the first `start` characters.
pub fn skip_chars(s: &[u8], start: i64) -> Vec<u8> {
    let starts = char_starts(s);
    let n = clamp_bound(s, start, starts.len());
    let begin = starts.get(n).copied().unwrap_or(s.len());
    s[begin..].to_vec()
}

/// The character at `index`. A negative index counts back from the byte
/// length. Out of range yields the character count as the error.
pub fn char_at(s: &[u8], index: i64) -> Result<Vec<u8>, usize> {
    let starts = char_starts(s);
    let len = i64::try_from(s.len()).unwrap_or(i64::MAX);
    let index = if index < 0 { len + index } else { index };

    let i = usize::try_from(index).map_err(|_| starts.len())?;
    let &begin = starts.get(i).ok_or(starts.len())?;
    let end = starts.get(i + 1).copied().unwrap_or(s.len());
    Ok(s[begin..end].to_vec())
}
