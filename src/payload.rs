//! Sigfox delivers the device's uplink as a hex string. This module turns
//! that string back into the raw bytes the tracker sent.

use core::fmt;

/// Bytes kept from an uplink. A Sigfox frame carries no more than this and
/// no record layout reads past it.
pub const MAX_PAYLOAD_LEN: usize = 12;

/// The leading bytes of a single uplink.
pub type Payload = heapless::Vec<u8, MAX_PAYLOAD_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HexError {
    /// `c` is not a hex digit. `index` counts characters from the first
    /// digit, after trimming and removal of the `0x` prefix.
    InvalidDigit { c: char, index: usize },
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDigit { c, index } => {
                write!(f, "invalid hex digit {c:?} at position {index}")
            }
        }
    }
}

impl core::error::Error for HexError {}

/// Decode a hex string such as `"0x10a2b3..."` into bytes.
///
/// Surrounding whitespace and a leading `0x` are ignored. Octets are read
/// in pairs from the left; a trailing unpaired digit is dropped. An empty
/// string yields an empty payload. Every digit is validated, but only the
/// first [`MAX_PAYLOAD_LEN`] bytes are kept.
pub fn hex_to_bytes(s: &str) -> Result<Payload, HexError> {
    const CHUNK: usize = 2 * MAX_PAYLOAD_LEN;

    let s = s.trim();
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let pairs = &digits.as_bytes()[..digits.len() / 2 * 2];
    let (head, tail) = pairs.split_at(pairs.len().min(CHUNK));

    let mut bytes = [0; MAX_PAYLOAD_LEN];
    let bytes = &mut bytes[..head.len() / 2];
    hex::decode_to_slice(head, &mut *bytes).map_err(|err| invalid_digit(digits, 0, err))?;

    let mut scratch = [0; MAX_PAYLOAD_LEN];
    for (n, chunk) in tail.chunks(CHUNK).enumerate() {
        hex::decode_to_slice(chunk, &mut scratch[..chunk.len() / 2])
            .map_err(|err| invalid_digit(digits, head.len() + n * CHUNK, err))?;
    }

    Ok(bytes.iter().copied().collect())
}

/// Map an error for the chunk starting at byte `offset` of `digits` back
/// to the character the caller wrote.
fn invalid_digit(digits: &str, offset: usize, err: hex::FromHexError) -> HexError {
    let at = match err {
        hex::FromHexError::InvalidHexCharacter { index, .. } => offset + index,
        // chunks are even and sized to their output
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => offset,
    };

    // A multi-byte char fails on its leading byte, so `at` is a boundary.
    let rest = digits.get(at..).unwrap_or_default();
    HexError::InvalidDigit {
        c: rest.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
        index: digits.get(..at).map_or(at, |done| done.chars().count()),
    }
}

#[cfg(test)]
mod tests {
    use super::{hex_to_bytes, HexError, MAX_PAYLOAD_LEN};

    #[test]
    fn empty_input() {
        assert!(hex_to_bytes("").unwrap().is_empty());
        assert!(hex_to_bytes("   ").unwrap().is_empty());
        assert!(hex_to_bytes("0x").unwrap().is_empty());
    }

    #[test]
    fn prefix_is_stripped() {
        assert_eq!(hex_to_bytes("0x0A0B").unwrap(), [0x0a, 0x0b]);
        assert_eq!(hex_to_bytes("0A0B").unwrap(), [0x0a, 0x0b]);
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(hex_to_bytes("  0x02ff\n").unwrap(), [0x02, 0xff]);
    }

    #[test]
    fn mixed_case_digits() {
        assert_eq!(hex_to_bytes("aBcD").unwrap(), [0xab, 0xcd]);
    }

    #[test]
    fn trailing_nibble_is_dropped() {
        assert_eq!(hex_to_bytes("0a0").unwrap(), [0x0a]);
        assert!(hex_to_bytes("f").unwrap().is_empty());
    }

    #[test]
    fn invalid_digit() {
        assert_eq!(
            hex_to_bytes("0x00zz"),
            Err(HexError::InvalidDigit { c: 'z', index: 2 })
        );
        // only a lower-case prefix is recognised
        assert_eq!(
            hex_to_bytes("0X00"),
            Err(HexError::InvalidDigit { c: 'X', index: 1 })
        );
    }

    #[test]
    fn non_ascii_digit() {
        assert_eq!(
            hex_to_bytes("0x\u{e9}0"),
            Err(HexError::InvalidDigit { c: '\u{e9}', index: 0 })
        );
        assert_eq!(
            hex_to_bytes("0x0\u{e9}"),
            Err(HexError::InvalidDigit { c: '\u{e9}', index: 1 })
        );
        assert_eq!(
            hex_to_bytes("\u{b0}\u{b0}0g"),
            Err(HexError::InvalidDigit { c: '\u{b0}', index: 0 })
        );
        assert_eq!(
            hex_to_bytes("00\u{e9}0"),
            Err(HexError::InvalidDigit { c: '\u{e9}', index: 2 })
        );
    }

    #[test]
    fn bytes_past_the_uplink_limit_are_dropped() {
        let max = "0x000102030405060708090a0b";
        assert_eq!(hex_to_bytes(max).unwrap().len(), MAX_PAYLOAD_LEN);

        let over = "0x000102030405060708090a0b0c0d0e0f101112131415161718191a1b";
        assert_eq!(
            hex_to_bytes(over).unwrap(),
            [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]
        );
    }

    #[test]
    fn digits_past_the_uplink_limit_are_checked() {
        // 13th byte
        assert_eq!(
            hex_to_bytes("0x000102030405060708090a0b0g"),
            Err(HexError::InvalidDigit { c: 'g', index: 25 })
        );
        // 26th byte, second chunk past the limit
        assert_eq!(
            hex_to_bytes("000102030405060708090a0b0c0d0e0f101112131415161718x9"),
            Err(HexError::InvalidDigit { c: 'x', index: 50 })
        );
    }
}
