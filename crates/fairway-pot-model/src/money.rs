// SPDX-License-Identifier: Apache-2.0

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Ceiling a single player's owed balance can reach.
pub const POT_CAP: Money = Money(50_00);

/// Amount added to a player's balance for each completed round.
pub const ROUND_CONTRIBUTION: Money = Money(1_00);

/// Non-negative monetary amount in whole cents.
///
/// All ledger arithmetic is exact integer arithmetic; the textual form is
/// always `dollars.cents` with two fractional digits.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(into = "String", try_from = "String")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Result<Self, ParseError> {
        if cents < 0 {
            return Err(ParseError::OutOfRange("amount must not be negative"));
        }
        Ok(Self(cents))
    }

    /// Parses `"12"`, `"12.3"`, or `"12.34"`. Rejects signs, whitespace,
    /// and more than two fractional digits.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("amount"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("amount"));
        }
        let (dollars_part, cents_part) = match input.split_once('.') {
            Some((d, c)) => (d, Some(c)),
            None => (input, None),
        };
        if dollars_part.is_empty() || !dollars_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(
                "amount must be a non-negative decimal like 12.34",
            ));
        }
        let dollars: i64 = dollars_part
            .parse()
            .map_err(|_| ParseError::OutOfRange("amount too large"))?;
        let cents: i64 = match cents_part {
            None => 0,
            Some(c) => {
                if c.is_empty() || c.len() > 2 || !c.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ParseError::InvalidFormat(
                        "amount must have at most two fractional digits",
                    ));
                }
                let raw: i64 = c
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat("amount fraction must be numeric"))?;
                if c.len() == 1 {
                    raw * 10
                } else {
                    raw
                }
            }
        };
        dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .map(Self)
            .ok_or(ParseError::OutOfRange("amount too large"))
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Subtraction that never goes below zero.
    #[must_use]
    pub fn saturating_sub(self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }

    #[must_use]
    pub fn min(self, other: Money) -> Money {
        Money(self.0.min(other.0))
    }

    /// `min(self + add, cap)`; the clamp used by round accrual and bulk
    /// balance import.
    #[must_use]
    pub fn add_clamped(self, add: Money, cap: Money) -> Money {
        self.saturating_add(add).min(cap)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl From<Money> for String {
    fn from(value: Money) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Money {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Money::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_plain_and_fractional_forms() {
        assert_eq!(Money::parse("12").expect("whole").cents(), 1200);
        assert_eq!(Money::parse("12.3").expect("one digit").cents(), 1230);
        assert_eq!(Money::parse("12.34").expect("two digits").cents(), 1234);
        assert_eq!(Money::parse("0.05").expect("cents only").cents(), 5);
    }

    #[test]
    fn parse_rejects_malformed_amounts() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("-1").is_err());
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("1.").is_err());
        assert!(Money::parse(".5").is_err());
        assert!(Money::parse(" 1").is_err());
        assert!(Money::parse("1,50").is_err());
    }

    #[test]
    fn display_always_carries_two_fractional_digits() {
        assert_eq!(Money::from_cents(5).expect("cents").to_string(), "0.05");
        assert_eq!(Money::from_cents(5000).expect("cap").to_string(), "50.00");
        assert_eq!(Money::from_cents(1230).expect("m").to_string(), "12.30");
    }

    #[test]
    fn add_clamped_never_exceeds_cap() {
        let near = Money::from_cents(4950).expect("near cap");
        assert_eq!(near.add_clamped(ROUND_CONTRIBUTION, POT_CAP), POT_CAP);
        assert_eq!(POT_CAP.add_clamped(ROUND_CONTRIBUTION, POT_CAP), POT_CAP);
    }
}
