// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Domain types for the hole-in-one pot ledger: validated names, exact
//! monetary amounts, and the two persisted record shapes.

mod account;
mod event;
mod money;
mod player;

pub use account::PotAccount;
pub use event::{EventDate, HoleInOneEvent, HoleNumber};
pub use money::{Money, POT_CAP, ROUND_CONTRIBUTION};
pub use player::{PlayerName, PLAYER_NAME_MAX_LEN};

use std::fmt::{Display, Formatter};

pub const CRATE_NAME: &str = "fairway-pot-model";

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Trimmed(&'static str),
    TooLong(&'static str, usize),
    OutOfRange(&'static str),
    InvalidFormat(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Trimmed(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::OutOfRange(msg) => f.write_str(msg),
            Self::InvalidFormat(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ParseError {}
