//! Digit sequences and card number input parsing.
//!
//! A `DigitSequence` is the canonical form every core operation works on:
//! non-empty, every element in `0..=9`, immutable once built.
//!
//! Card numbers arrive either as text or as an integer. `CardNumberInput`
//! models both and resolves them into a `DigitSequence` at the boundary:
//!
//! ```
//! use rust_pan::core::{CardNumberInput, DigitSequence};
//!
//! let from_text = CardNumberInput::from("5555 5555 5555 4444").into_digits().unwrap();
//! let from_int = CardNumberInput::from(5555555555554444u64).into_digits().unwrap();
//!
//! assert_eq!(from_text, from_int);
//! assert_eq!(from_text.len(), 16);
//! assert_eq!(from_text.to_string(), "5555555555554444");
//! ```

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, MapAccess, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::ops::Range;
use std::str::FromStr;

use crate::error::{FormatError, MAX_PAN_LENGTH};

/// Inline storage sized for the longest ISO/IEC 7812 card number.
type DigitVec = SmallVec<[u8; MAX_PAN_LENGTH]>;

/// Non-empty ordered sequence of decimal digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DigitSequence(DigitVec);

impl DigitSequence {
    /// Build from digit values, rejecting empty input and values above 9.
    pub fn from_digits(digits: &[u8]) -> Result<Self, FormatError> {
        if digits.is_empty() {
            return Err(FormatError::Empty);
        }
        if let Some(position) = digits.iter().position(|&d| d > 9) {
            return Err(FormatError::DigitOutOfRange {
                position,
                value: digits[position],
            });
        }
        Ok(Self(DigitVec::from_slice(digits)))
    }

    /// Parse text consisting only of `0-9`.
    ///
    /// Use `CardNumberInput` to also strip spaces.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        if text.is_empty() {
            return Err(FormatError::Empty);
        }

        let mut digits = DigitVec::with_capacity(text.len());
        for (position, character) in text.chars().enumerate() {
            match character.to_digit(10) {
                Some(d) => digits.push(d as u8),
                None => return Err(FormatError::InvalidCharacter { position, character }),
            }
        }
        Ok(Self(digits))
    }

    /// Digits of a non-negative integer, most significant first.
    #[must_use]
    pub fn from_u64(mut value: u64) -> Self {
        let mut digits = DigitVec::new();
        loop {
            digits.push((value % 10) as u8);
            value /= 10;
            if value == 0 {
                break;
            }
        }
        digits.reverse();
        Self(digits)
    }

    /// Append a digit. Used while assembling generated numbers.
    pub(crate) fn push(&mut self, digit: u8) {
        debug_assert!(digit <= 9);
        self.0.push(digit);
    }

    /// Number of digits. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All digits.
    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.0
    }

    /// Leading digit (the Major Industry Identifier of a card number).
    #[must_use]
    pub fn first(&self) -> u8 {
        self.0[0]
    }

    /// Trailing digit (the check digit of a card number).
    #[must_use]
    pub fn last(&self) -> u8 {
        self.0[self.0.len() - 1]
    }

    /// Every digit except the last.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.0[..self.0.len() - 1]
    }

    /// Decimal text of the first `min(n, len)` digits.
    #[must_use]
    pub fn prefix(&self, n: usize) -> String {
        digits_to_string(&self.0[..n.min(self.0.len())])
    }

    /// Numeric value of a window of digits, clamped to the sequence.
    ///
    /// An empty window is worth 0. Callers keep windows within 19 digits.
    #[must_use]
    pub fn value_of(&self, range: Range<usize>) -> u64 {
        let end = range.end.min(self.0.len());
        let start = range.start.min(end);
        self.0[start..end]
            .iter()
            .fold(0u64, |acc, &d| acc.wrapping_mul(10).wrapping_add(u64::from(d)))
    }

    /// Numeric value of the whole sequence, if it fits in a `u64`.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        self.0.iter().try_fold(0u64, |acc, &d| {
            acc.checked_mul(10)?.checked_add(u64::from(d))
        })
    }
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}

impl std::fmt::Display for DigitSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&digits_to_string(&self.0))
    }
}

impl FromStr for DigitSequence {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DigitSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DigitSequence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// A card number as it arrives from outside: text or integer.
///
/// Integers wider than `u64` are kept as their decimal text, so they still
/// reach the classifier instead of failing as malformed input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CardNumberInput {
    /// Decimal text, optionally with embedded spaces.
    Text(String),
    /// Non-negative integer.
    Integer(u64),
}

impl CardNumberInput {
    /// Zero or empty text: what loosely typed callers send for "no card
    /// number". Boundaries report this as a missing value, not as a card.
    ///
    /// Text made only of spaces is not absent; it fails to parse instead.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            CardNumberInput::Text(text) => text.is_empty(),
            CardNumberInput::Integer(value) => *value == 0,
        }
    }

    /// Input from the decimal text of a non-negative integer of any width.
    ///
    /// Returns `None` unless `text` is a non-empty run of ASCII digits.
    #[must_use]
    pub fn from_wide_integer(text: &str) -> Option<Self> {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(match text.parse::<u64>() {
            Ok(value) => CardNumberInput::Integer(value),
            Err(_) => CardNumberInput::Text(text.to_string()),
        })
    }

    /// Resolve to a digit sequence.
    ///
    /// Spaces are stripped from text before parsing; nothing else is.
    pub fn into_digits(self) -> Result<DigitSequence, FormatError> {
        match self {
            CardNumberInput::Text(text) => {
                let stripped: String = text.chars().filter(|&c| c != ' ').collect();
                DigitSequence::parse(&stripped)
            }
            CardNumberInput::Integer(value) => Ok(DigitSequence::from_u64(value)),
        }
    }
}

impl From<&str> for CardNumberInput {
    fn from(text: &str) -> Self {
        CardNumberInput::Text(text.to_string())
    }
}

impl From<String> for CardNumberInput {
    fn from(text: String) -> Self {
        CardNumberInput::Text(text)
    }
}

impl From<u64> for CardNumberInput {
    fn from(value: u64) -> Self {
        CardNumberInput::Integer(value)
    }
}

impl<'de> Deserialize<'de> for CardNumberInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(InputVisitor)
    }
}

struct InputVisitor;

impl<'de> Visitor<'de> for InputVisitor {
    type Value = CardNumberInput;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a card number as a string or a non-negative integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(CardNumberInput::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(CardNumberInput::Text(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(CardNumberInput::Integer(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(CardNumberInput::Integer)
            .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        self.visit_wide(&v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Err(E::invalid_type(Unexpected::Float(v), &self))
    }

    // serde_json hands numbers wider than 64 bits over as a one-entry map
    // holding their exact decimal text.
    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        let number = serde_json::Number::deserialize(MapAccessDeserializer::new(map))?;
        self.visit_wide(&number.to_string())
    }
}

impl InputVisitor {
    fn visit_wide<E: de::Error>(&self, text: &str) -> Result<CardNumberInput, E> {
        CardNumberInput::from_wide_integer(text)
            .ok_or_else(|| E::invalid_value(Unexpected::Str(text), self))
    }
}
