// SPDX-License-Identifier: Apache-2.0

use crate::{Money, ParseError, PlayerName};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Hole index on a nine- or eighteen-hole course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HoleNumber(u8);

impl HoleNumber {
    pub fn new(value: u8) -> Result<Self, ParseError> {
        if !(1..=18).contains(&value) {
            return Err(ParseError::OutOfRange("hole_number must be 1..=18"));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<HoleNumber> for u8 {
    fn from(value: HoleNumber) -> Self {
        value.0
    }
}

impl TryFrom<u8> for HoleNumber {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        HoleNumber::new(value)
    }
}

/// Calendar date in canonical `YYYY-MM-DD` form.
///
/// Validation is structural (field ranges), not calendrical; the league
/// records whatever date the admin types, same as the system it replaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventDate(String);

impl EventDate {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("event_date"));
        }
        let bytes = input.as_bytes();
        let shape_ok = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shape_ok {
            return Err(ParseError::InvalidFormat("event_date must be YYYY-MM-DD"));
        }
        let month: u32 = input[5..7].parse().unwrap_or(0);
        let day: u32 = input[8..10].parse().unwrap_or(0);
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(ParseError::OutOfRange("event_date month/day out of range"));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EventDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EventDate> for String {
    fn from(value: EventDate) -> Self {
        value.0
    }
}

impl TryFrom<String> for EventDate {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EventDate::parse(&value)
    }
}

/// Append-only record of a confirmed hole-in-one and the pot it paid out.
///
/// `pot_amount` is the league-wide total owed at the moment of the win,
/// not the winner's individual balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleInOneEvent {
    pub player: PlayerName,
    pub course: String,
    pub hole: HoleNumber,
    pub event_date: EventDate,
    pub pot_amount: Money,
    pub description: String,
    /// Unix seconds when the event was recorded.
    pub recorded_at: i64,
}
