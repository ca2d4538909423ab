//! Relaxed JSON ("JSON with comments") reader.
//!
//! tsconfig files routinely carry `//` and `/* */` comments and trailing
//! commas. [`normalize`] rewrites such a buffer into strict JSON that
//! `serde_json` accepts; it knows nothing about tsconfig fields. Comments are
//! replaced with spaces (newlines are kept) so that line/column positions in
//! later parse errors still point into the original file.

use log::trace;
use serde::de::DeserializeOwned;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses relaxed JSON into any deserializable type.
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    serde_json::from_slice(&normalize(bytes))
}

/// Strips comments, trailing commas and a leading byte-order mark.
///
/// Content that is broken beyond that (unterminated strings, unbalanced
/// brackets, an unterminated block comment) is passed through so the strict
/// parser reports it.
pub fn normalize(bytes: &[u8]) -> Vec<u8> {
    let bytes = bytes.strip_prefix(BOM).unwrap_or(bytes);
    remove_trailing_commas(&strip_comments(bytes))
}

fn strip_comments(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                let end = string_end(bytes, i);
                out.extend_from_slice(&bytes[i..end]);
                i = end;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    out.push(b' ');
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let Some(close) = find(&bytes[i + 2..], b"*/") else {
                    trace!("Unterminated block comment at byte {}", i);
                    out.extend_from_slice(&bytes[i..]);
                    break;
                };
                let end = i + 2 + close + 2;
                out.extend(bytes[i..end].iter().map(|&b| if b == b'\n' { b'\n' } else { b' ' }));
                i = end;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    out
}

/// Input is expected to be comment free.
fn remove_trailing_commas(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                let end = string_end(bytes, i);
                out.extend_from_slice(&bytes[i..end]);
                i = end;
            }
            b',' => {
                let next = bytes[i + 1..].iter().find(|b| !b.is_ascii_whitespace());
                if matches!(next, Some(b'}') | Some(b']')) {
                    out.push(b' ');
                } else {
                    out.push(b',');
                }
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    out
}

/// Index one past the closing quote of the string starting at `start`, or the
/// end of input for an unterminated string.
fn string_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
