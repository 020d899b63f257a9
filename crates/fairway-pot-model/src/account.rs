// SPDX-License-Identifier: Apache-2.0

use crate::{Money, PlayerName};
use serde::{Deserialize, Serialize};

/// One player's position in the shared pot.
///
/// `original_balance` is a single-slot snapshot of `amount_owed`, written
/// when the account is marked paid, so the mark can be undone once. While
/// the player keeps accruing it is held in sync with `amount_owed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAccount {
    pub player: PlayerName,
    pub amount_owed: Money,
    pub total_contributed: Money,
    pub original_balance: Money,
    pub paid: bool,
    /// Unix seconds of the last mutation. Informational only.
    pub last_updated: i64,
}

impl PotAccount {
    /// The shape of a brand-new account after its first accrued round.
    #[must_use]
    pub fn opened(player: PlayerName, first_contribution: Money, now: i64) -> Self {
        Self {
            player,
            amount_owed: first_contribution,
            total_contributed: Money::ZERO,
            original_balance: first_contribution,
            paid: false,
            last_updated: now,
        }
    }
}
