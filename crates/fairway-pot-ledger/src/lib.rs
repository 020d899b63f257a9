// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! SQLite-backed ledger for the league's hole-in-one pot.
//!
//! Every mutating operation runs inside one scoped transaction: it either
//! commits in full or leaves the store untouched. The expected caller is a
//! single-writer request loop, so no locking beyond SQLite's own is used.

mod ledger;
mod schema;
mod upload;

pub use ledger::{JackpotWin, PaymentReceipt, PotLedger};
pub use schema::LEDGER_SCHEMA_VERSION;
pub use upload::{parse_balance_lines, BalanceLine, UploadSummary};

use std::fmt::{Display, Formatter};

pub const CRATE_NAME: &str = "fairway-pot-ledger";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LedgerErrorCode {
    NotFound,
    InvalidInput,
    Storage,
}

impl LedgerErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::Storage => "storage",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerError {
    pub code: LedgerErrorCode,
    pub message: String,
}

impl LedgerError {
    #[must_use]
    pub fn new(code: LedgerErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(player: &str) -> Self {
        Self::new(
            LedgerErrorCode::NotFound,
            format!("no pot account for player: {player}"),
        )
    }

    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(LedgerErrorCode::InvalidInput, message)
    }
}

impl Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for LedgerError {}

impl From<rusqlite::Error> for LedgerError {
    fn from(value: rusqlite::Error) -> Self {
        Self::new(LedgerErrorCode::Storage, value.to_string())
    }
}

impl From<fairway_pot_model::ParseError> for LedgerError {
    fn from(value: fairway_pot_model::ParseError) -> Self {
        Self::invalid_input(value.to_string())
    }
}
