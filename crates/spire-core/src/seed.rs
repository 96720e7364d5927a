//! Seed codec
//!
//! Player-facing seeds are base-35 strings over digits and the letters A-Z
//! without `O` (which reads as zero). Persisted seeds are plain decimal
//! numerals and decode literally.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SeedError;

/// Base-35 alphabet, `O` omitted.
pub const ALPHABET: &[u8; 35] = b"0123456789ABCDEFGHIJKLMNPQRSTUVWXYZ";

const BASE: u64 = ALPHABET.len() as u64;

/// A run seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seed(pub i64);

impl Seed {
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self.0))
    }
}

impl FromStr for Seed {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s).map(Seed)
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Seed(value)
    }
}

/// Canonical form: trimmed, uppercase, `O` replaced by `0`.
pub fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c.to_ascii_uppercase() {
            'O' => '0',
            other => other,
        })
        .collect()
}

/// Encode the unsigned two's complement value in base 35.
pub fn encode(seed: i64) -> String {
    let mut left = seed as u64;
    if left == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while left != 0 {
        digits.push(ALPHABET[(left % BASE) as usize]);
        left /= BASE;
    }
    digits.reverse();
    // Alphabet is ASCII.
    digits.into_iter().map(char::from).collect()
}

/// Decode a seed string.
///
/// A decimal numeral (optionally negative) is taken as the literal integer
/// and must fit in an `i64`; anything else is normalized and read as base 35
/// with wrapping arithmetic.
pub fn decode(s: &str) -> Result<i64, SeedError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(SeedError::Empty);
    }
    if is_decimal_numeral(trimmed) {
        return trimmed
            .parse::<i64>()
            .map_err(|_| SeedError::DecimalOutOfRange(trimmed.to_string()));
    }

    let mut total: i64 = 0;
    for (position, ch) in normalize(trimmed).chars().enumerate() {
        let digit = ALPHABET
            .iter()
            .position(|&a| a as char == ch)
            .ok_or(SeedError::InvalidCharacter { ch, position })?;
        total = total.wrapping_mul(BASE as i64).wrapping_add(digit as i64);
    }
    Ok(total)
}

fn is_decimal_numeral(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_is_literal() {
        assert_eq!(decode("123").unwrap(), 123);
        assert_eq!(decode("-42").unwrap(), -42);
        assert_eq!(decode("  7 ").unwrap(), 7);
        assert_eq!(decode("0").unwrap(), 0);
    }

    #[test]
    fn test_base35_decoding() {
        assert_eq!(decode("A").unwrap(), 10);
        assert_eq!(decode("Z").unwrap(), 34);
        assert_eq!(decode("10A").unwrap(), 35 * 35 + 10);
        assert_eq!(decode("abc").unwrap(), decode("ABC").unwrap());
    }

    #[test]
    fn test_letter_o_reads_as_zero() {
        assert_eq!(decode("1O1A").unwrap(), decode("101A").unwrap());
        assert_eq!(normalize(" foo "), "F00");
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            decode("AB-C"),
            Err(SeedError::InvalidCharacter { ch: '-', position: 2 })
        );
        assert_eq!(decode("   "), Err(SeedError::Empty));
    }

    #[test]
    fn test_oversized_decimal_is_rejected() {
        assert_eq!(decode("9223372036854775807").unwrap(), i64::MAX);
        assert_eq!(decode("-9223372036854775808").unwrap(), i64::MIN);
        assert_eq!(
            decode("99999999999999999999"),
            Err(SeedError::DecimalOutOfRange("99999999999999999999".to_string()))
        );
        assert!(matches!(
            decode("-9223372036854775809"),
            Err(SeedError::DecimalOutOfRange(_))
        ));
        // One letter makes it a base-35 seed again.
        assert!(decode("9999999999999999999A").is_ok());
    }

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode(0), "0");
        assert_eq!(encode(10), "A");
        assert_eq!(encode(35), "10");
        assert_eq!(encode(decode("ABC123").unwrap()), "ABC123");
    }

    #[test]
    fn test_negative_seeds_encode_unsigned() {
        let s = encode(-1);
        assert_eq!(decode(&s).unwrap(), -1);
        assert_eq!(s, encode(u64::MAX as i64));
    }

    #[test]
    fn test_seed_display_and_parse() {
        let seed: Seed = "abc123".parse().unwrap();
        assert_eq!(seed.to_string(), "ABC123");
        assert_eq!(Seed::from(-5).value(), -5);
    }
}
