//! Key handling.
//!
//! The tree navigates on a *tree path* rather than on the raw key bytes. A tree path is the
//! key with `0x00` and `0x01` escaped, followed by a single `0x00` terminator:
//!
//! | key byte | path bytes  |
//! |----------|-------------|
//! | `0x00`   | `01 01`     |
//! | `0x01`   | `01 02`     |
//! | other    | unchanged   |
//! | (end)    | `00`        |
//!
//! The terminator sorts below every escaped byte, so the encoding preserves lexicographic
//! order, and no path is a strict prefix of another. That lets a key like `"A"` live beside
//! `"AB"` without inner nodes having to carry values.

pub mod vector_key;

/// Final byte of every tree path.
pub const TERMINATOR: u8 = 0x00;
const ESCAPE: u8 = 0x01;

/// Appends the escaped form of `key` (no terminator) to `out`.
pub fn escape_into(key: &[u8], out: &mut Vec<u8>) {
    for &b in key {
        match b {
            0x00 => out.extend_from_slice(&[ESCAPE, 0x01]),
            0x01 => out.extend_from_slice(&[ESCAPE, 0x02]),
            b => out.push(b),
        }
    }
}

/// Escaped form of `key` without the terminator. Any path whose key starts with `key` starts
/// with these bytes.
pub fn escape(key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(key.len());
    escape_into(key, &mut out);
    out
}

/// The tree path for `key`.
pub fn encode_path(key: &[u8]) -> Box<[u8]> {
    let mut out = Vec::with_capacity(key.len() + 1);
    escape_into(key, &mut out);
    out.push(TERMINATOR);
    out.into_boxed_slice()
}

/// Recovers the key from a tree path. Returns `None` if `path` is not a valid encoding.
pub fn decode_path(path: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(path.len());
    let mut bytes = path.iter();
    while let Some(&b) = bytes.next() {
        match b {
            TERMINATOR => return bytes.next().is_none().then_some(out),
            ESCAPE => match bytes.next()? {
                0x01 => out.push(0x00),
                0x02 => out.push(0x01),
                _ => return None,
            },
            b => out.push(b),
        }
    }
    None
}
