// SPDX-License-Identifier: Apache-2.0

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const PLAYER_NAME_MAX_LEN: usize = 64;

/// A player's display name, the natural key of a pot account.
///
/// The ledger does not enforce referential integrity against any roster;
/// an account exists for whatever name the score-entry flow hands it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("player_name"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("player_name"));
        }
        if input.len() > PLAYER_NAME_MAX_LEN {
            return Err(ParseError::TooLong("player_name", PLAYER_NAME_MAX_LEN));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PlayerName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PlayerName> for String {
    fn from(value: PlayerName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PlayerName {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PlayerName::parse(&value)
    }
}
