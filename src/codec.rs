//! Text encoding for 64-bit integers.
//!
//! Numbers on the wire are read by peers whose only numeric type is a double,
//! which cannot hold every `i64`. Longs therefore travel as text produced by
//! an [`Integer64Codec`] and wrapped in single quotes by the stream writer.
//!
//! [`Base64LongCodec`] is the default: the 64-bit two's-complement value
//! written big-endian in base 64 (`A-Z`, `a-z`, `0-9`, `$`, `_`), without
//! leading zero digits. The most significant digit carries the top four bits,
//! so at most eleven digits are produced.
//!
//! ## Examples
//!
//! ```rust
//! use serde_rpcjson::{Base64LongCodec, Integer64Codec};
//!
//! let codec = Base64LongCodec;
//! assert_eq!(codec.encode(0), "A");
//! assert_eq!(codec.encode(64), "BA");
//! assert_eq!(codec.encode(-1), "P__________");
//! assert_eq!(codec.decode("BA").unwrap(), 64);
//! ```

use crate::{Error, Result};

/// Converts 64-bit integers to and from their wire text.
pub trait Integer64Codec {
    /// Encodes `value`. The result must not contain `'` or `,`.
    fn encode(&self, value: i64) -> String;

    /// Decodes text produced by [`Integer64Codec::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLong`] if `text` is not a valid encoding.
    fn decode(&self, text: &str) -> Result<i64>;
}

/// Base-64 codec for longs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Base64LongCodec;

const DIGITS: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789$_";

/// Maximum number of digits in an encoded long.
const MAX_DIGITS: usize = 11;

fn digit_value(byte: u8) -> Option<u64> {
    let value = match byte {
        b'A'..=b'Z' => byte - b'A',
        b'a'..=b'z' => byte - b'a' + 26,
        b'0'..=b'9' => byte - b'0' + 52,
        b'$' => 62,
        b'_' => 63,
        _ => return None,
    };
    Some(u64::from(value))
}

impl Integer64Codec for Base64LongCodec {
    fn encode(&self, value: i64) -> String {
        let bits = value as u64;
        let mut out = String::with_capacity(MAX_DIGITS);
        // 4 + 10 * 6 bits; the lowest digit is always written.
        for shift in (0..MAX_DIGITS as u32).rev().map(|i| i * 6) {
            let digit = ((bits >> shift) & 0x3F) as usize;
            if digit != 0 || !out.is_empty() || shift == 0 {
                out.push(char::from(DIGITS[digit]));
            }
        }
        out
    }

    fn decode(&self, text: &str) -> Result<i64> {
        if text.is_empty() || text.len() > MAX_DIGITS {
            return Err(Error::invalid_long(text));
        }
        let mut bits: u64 = 0;
        for (i, byte) in text.bytes().enumerate() {
            let digit = digit_value(byte).ok_or_else(|| Error::invalid_long(text))?;
            if i == 0 && text.len() == MAX_DIGITS && digit > 0x0F {
                return Err(Error::invalid_long(text));
            }
            bits = (bits << 6) | digit;
        }
        Ok(bits as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let codec = Base64LongCodec;
        assert_eq!(codec.encode(0), "A");
        assert_eq!(codec.encode(1), "B");
        assert_eq!(codec.encode(63), "_");
        assert_eq!(codec.encode(i64::MAX), "H__________");
        assert_eq!(codec.encode(i64::MIN), "IAAAAAAAAAA");
        assert_eq!(codec.encode(-1), "P__________");
    }

    #[test]
    fn test_decode_inverts_encode() {
        let codec = Base64LongCodec;
        for value in [0, -1, 1, 4096, -4096, i64::MIN, i64::MAX, 1_700_000_000_000] {
            assert_eq!(codec.decode(&codec.encode(value)).unwrap(), value);
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let codec = Base64LongCodec;
        assert!(matches!(codec.decode(""), Err(Error::InvalidLong(_))));
        assert!(matches!(codec.decode("A-B"), Err(Error::InvalidLong(_))));
        assert!(matches!(codec.decode("AAAAAAAAAAAA"), Err(Error::InvalidLong(_))));
        // Top digit only has four bits of room.
        assert!(matches!(codec.decode("QAAAAAAAAAA"), Err(Error::InvalidLong(_))));
    }

    #[test]
    fn test_leading_zero_digits_accepted() {
        assert_eq!(Base64LongCodec.decode("AAB").unwrap(), 1);
    }
}
