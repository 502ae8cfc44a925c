//! Percent-escape normalization.
//!
//! Path segments and query tokens go through [`normalize_escapes`], which
//! decodes an escape only when the decoded byte is a printable, non-reserved
//! ASCII character. Everything else keeps (or gains) an escape with
//! lowercase hex digits, so `%28` becomes `(`, `%3B` becomes `;`, `%20` stays
//! `%20` and `%C5%82` becomes `%c5%82`.
//!
//! Hosts are decoded completely and re-encoded with a small escape set, see
//! [`unescape_repeatedly`] and [`escape_host`].

use percent_encoding::{percent_decode, percent_encode, AsciiSet, CONTROLS};

use crate::error::SurtError;

/// Bytes that stay escaped in a host after full decoding.
const HOST_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'@');

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Whether a decoded byte must remain percent-encoded.
fn stays_encoded(byte: u8) -> bool {
    !byte.is_ascii_graphic() || matches!(byte, b'/' | b'?' | b'&' | b'=' | b'%' | b'#')
}

/// Whether a literal (unescaped) byte must be percent-encoded.
fn needs_escape(byte: u8) -> bool {
    !byte.is_ascii_graphic() || byte == b'#'
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Decode the two hex digits starting at `index`, if both are present.
fn decode_at(input: &[u8], index: usize) -> Option<u8> {
    let high = hex_value(*input.get(index)?)?;
    let low = hex_value(*input.get(index + 1)?)?;
    Some((high << 4) | low)
}

fn push_escape(out: &mut Vec<u8>, byte: u8) {
    out.push(b'%');
    out.push(HEX_DIGITS[usize::from(byte >> 4)]);
    out.push(HEX_DIGITS[usize::from(byte & 0x0f)]);
}

fn normalize_pass(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut index = 0;

    while index < input.len() {
        let byte = input[index];

        if byte == b'%' {
            if let Some(decoded) = decode_at(input, index + 1) {
                if decoded == b'%' && decode_at(input, index + 3).is_some() {
                    // %25XX: unwrap one level so the next pass sees %XX
                    out.push(b'%');
                } else if stays_encoded(decoded) {
                    push_escape(&mut out, decoded);
                } else {
                    out.push(decoded);
                }
                index += 3;
                continue;
            }
            push_escape(&mut out, b'%');
        } else if needs_escape(byte) {
            push_escape(&mut out, byte);
        } else {
            out.push(byte);
        }

        index += 1;
    }

    out
}

/// Normalize the percent-escapes of a path segment, query key or query value.
///
/// Decoding repeats until the text stops changing, so multiply-encoded
/// escapes (`%2525`) collapse to a single escape (`%25`). The output is
/// always ASCII.
///
/// # Errors
///
/// Returns [`SurtError::CanonicalizerError`] if the text has not settled
/// after one pass per byte. Each pass shrinks the text or leaves it
/// unchanged, so this only guards the loop bound.
///
/// # Examples
///
/// ```
/// use surt::url::escape::normalize_escapes;
///
/// assert_eq!(normalize_escapes("%28windows%3B%20en-US%29").unwrap(), "(windows;%20en-US)");
/// assert_eq!(normalize_escapes("Wroc%C5%82aw").unwrap(), "Wroc%c5%82aw");
/// ```
pub fn normalize_escapes(input: &str) -> Result<String, SurtError> {
    let mut current = normalize_pass(input.as_bytes());
    // Every later pass either shrinks the text or only lowercases escapes
    // uncovered by the previous one.
    let max_passes = current.len() + 2;

    for _ in 0..max_passes {
        let next = normalize_pass(&current);
        if next == current {
            // Every byte above 0x7e was escaped, so this is plain ASCII.
            return Ok(String::from_utf8_lossy(&current).into_owned());
        }
        current = next;
    }

    Err(SurtError::CanonicalizerError(format!(
        "percent-escapes in `{input}` did not settle"
    )))
}

/// Decode every percent-escape until none remain.
pub fn unescape_repeatedly(input: &[u8]) -> Vec<u8> {
    let mut current = input.to_vec();
    loop {
        let decoded: Vec<u8> = percent_decode(&current).collect();
        if decoded == current {
            return current;
        }
        current = decoded;
    }
}

/// Escape the bytes of a decoded host, with lowercase hex digits.
pub fn escape_host(host: &[u8]) -> String {
    lowercase_escapes(&percent_encode(host, HOST_ESCAPES).to_string())
}

/// Lowercase the hex digits of every `%XX` escape, leaving other text alone.
pub fn lowercase_escapes(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut index = 0;

    while index < bytes.len() {
        match decode_at(bytes, index + 1) {
            Some(decoded) if bytes[index] == b'%' => {
                push_escape(&mut out, decoded);
                index += 3;
            }
            _ => {
                out.push(bytes[index]);
                index += 1;
            }
        }
    }

    // Only ASCII hex digits were rewritten, so the bytes are still UTF-8.
    String::from_utf8_lossy(&out).into_owned()
}
