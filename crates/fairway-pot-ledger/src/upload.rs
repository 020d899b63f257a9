// SPDX-License-Identifier: Apache-2.0

use fairway_pot_model::{Money, PlayerName};
use serde::Serialize;
use tracing::warn;

/// One well-formed `Player,Amount` line of a bulk balance import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceLine {
    pub player: PlayerName,
    pub amount: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub updated: usize,
    pub errors: usize,
}

/// Best-effort parse of CSV-like balance text.
///
/// Blank lines and `#` comments are skipped silently. A malformed line is
/// dropped and counted; parsing always continues with the remaining lines.
/// Fields beyond the first two are ignored.
#[must_use]
pub fn parse_balance_lines(text: &str) -> (Vec<BalanceLine>, usize) {
    let mut lines = Vec::new();
    let mut errors = 0;
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(line) {
            Ok(parsed) => lines.push(parsed),
            Err(reason) => {
                warn!(line, reason, "skipping malformed balance line");
                errors += 1;
            }
        }
    }
    (lines, errors)
}

fn parse_line(line: &str) -> Result<BalanceLine, &'static str> {
    let mut parts = line.split(',');
    let name_part = parts.next().unwrap_or("").trim();
    let amount_part = parts.next().ok_or("missing amount field")?.trim();
    let player = PlayerName::parse(name_part).map_err(|_| "invalid player name")?;
    let amount = Money::parse(amount_part).map_err(|_| "invalid amount")?;
    Ok(BalanceLine { player, amount })
}
