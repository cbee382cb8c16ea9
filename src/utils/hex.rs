//! Utility functions for hex sequences
//!
//! This module provides functionality for encoding bytes to hexadecimal strings
//! and decoding hexadecimal strings back to bytes.

use thiserror::Error;

/// Represents errors that can occur during hexadecimal decoding.
#[derive(Debug, Error)]
pub enum DecodeHexError {
    /// The input string has an odd number of characters, which is invalid for
    /// hex representation.
    #[error("hex string has an odd number of digits")]
    OddLength,
    /// The byte at the given offset is not a hex digit.
    #[error("invalid hex digit at offset {0}")]
    InvalidDigit(usize),
}

/// Decodes a hexadecimal string into a vector of bytes.
///
/// Upper and lower case digits are both accepted.
///
/// # Errors
/// - Returns a `DecodeHexError::OddLength` if the input string has an odd number
///   of characters.
/// - Returns a `DecodeHexError::InvalidDigit` if any character is not a hex
///   digit. Signs and whitespace are rejected.
///
/// # Examples
/// ```
/// # use mini_sha1::utils::hex;
/// let decoded = hex::decode("a9993e36").unwrap();
/// assert_eq!(decoded, vec![0xa9, 0x99, 0x3e, 0x36]);
/// ```
pub fn decode(s: &str) -> Result<Vec<u8>, DecodeHexError> {
    if s.len() & 1 != 0 {
        return Err(DecodeHexError::OddLength);
    }
    s.as_bytes()
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| match (nibble(pair[0]), nibble(pair[1])) {
            (Some(high), Some(low)) => Ok(high << 4 | low),
            (None, _) => Err(DecodeHexError::InvalidDigit(2 * i)),
            (_, None) => Err(DecodeHexError::InvalidDigit(2 * i + 1)),
        })
        .collect()
}

fn nibble(c: u8) -> Option<u8> {
    char::from(c)
        .to_digit(16)
        .and_then(|d| u8::try_from(d).ok())
}

/// Encodes a slice of bytes into a lowercase hexadecimal string.
///
/// # Examples
/// ```
/// # use mini_sha1::utils::hex;
/// assert_eq!(hex::encode(&[0xda, 0x39, 0xa3, 0xee]), "da39a3ee");
/// ```
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut s, &byte| {
            s.push(char::from(DIGITS[usize::from(byte >> 4)]));
            s.push(char::from(DIGITS[usize::from(byte & 0x0F)]));
            s
        })
}
