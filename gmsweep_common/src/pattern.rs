//! Query pattern handling.
//!
//! A pattern is the row-major bit string of a square adjacency matrix
//! describing a small query graph. The bits themselves are opaque to the
//! harness; only the matrix side length is ever derived from them.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

lazy_static! {
    static ref BIT_STRING_RE: Regex = Regex::new(r"^[01]+$").unwrap();
}

/// A query pattern: an opaque adjacency bit string forwarded verbatim to the
/// matching engines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern {
    bits: String,
}

/// Errors produced when constructing a [`Pattern`].
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern string was empty.
    #[error("pattern is empty")]
    Empty,
    /// The pattern string contained a character other than '0' or '1'.
    #[error("pattern contains non-binary characters: {0:?}")]
    NonBinary(String),
}

impl Pattern {
    pub fn new(bits: &str) -> Result<Self, PatternError> {
        if bits.is_empty() {
            return Err(PatternError::Empty);
        }
        if !BIT_STRING_RE.is_match(bits) {
            return Err(PatternError::NonBinary(bits.to_string()));
        }
        Ok(Pattern {
            bits: bits.to_string(),
        })
    }

    /// The literal bit string, exactly as passed to the engines.
    pub fn bits(&self) -> &str {
        &self.bits
    }

    /// Number of bits in the pattern. Never zero.
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Matrix side length: the truncating integer square root of the bit
    /// count. This is the value the CPU baseline receives as its order
    /// argument, whether or not the bit count is a perfect square.
    pub fn order(&self) -> usize {
        self.bits.len().isqrt()
    }

    /// Whether the bit count is a perfect square, i.e. the bits actually
    /// tile an `order x order` matrix.
    pub fn is_square(&self) -> bool {
        let n = self.order();
        n * n == self.bits.len()
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits)
    }
}

impl TryFrom<&str> for Pattern {
    type Error = PatternError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Pattern::new(value)
    }
}

impl TryFrom<String> for Pattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Pattern::new(&value)
    }
}

impl From<Pattern> for String {
    fn from(value: Pattern) -> Self {
        value.bits
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_truncates() {
        // 7 bits is not a perfect square; order floors to 2.
        let p = Pattern::new("0110110").unwrap();
        assert_eq!(p.order(), 2);
        assert!(!p.is_square());
    }

    #[test]
    fn order_of_perfect_square() {
        let p = Pattern::new("011101101").unwrap();
        assert_eq!(p.bit_len(), 9);
        assert_eq!(p.order(), 3);
        assert!(p.is_square());
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Pattern::new(""), Err(PatternError::Empty));
    }

    #[test]
    fn rejects_non_binary() {
        assert!(matches!(
            Pattern::new("0121"),
            Err(PatternError::NonBinary(_))
        ));
    }

    #[test]
    fn json_round_trip() {
        let p = Pattern::new("0110").unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"0110\"");
        let back: Pattern = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn json_rejects_invalid_bits() {
        assert!(serde_json::from_str::<Pattern>("\"01x0\"").is_err());
    }
}
