// SPDX-License-Identifier: Apache-2.0

use crate::schema::init_schema;
use crate::upload::{parse_balance_lines, UploadSummary};
use crate::{LedgerError, LedgerErrorCode};
use fairway_pot_model::{
    EventDate, HoleInOneEvent, HoleNumber, Money, PlayerName, PotAccount, POT_CAP,
    ROUND_CONTRIBUTION,
};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Result of applying a payment, for display by the caller.
///
/// `applied` is the amount actually credited; overpayment past the owed
/// balance is discarded, never carried as credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReceipt {
    pub player: PlayerName,
    pub applied: Money,
    pub amount_owed: Money,
    pub total_contributed: Money,
}

/// Validated input for recording a confirmed hole-in-one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackpotWin {
    pub player: PlayerName,
    pub course: String,
    pub hole: HoleNumber,
    pub event_date: EventDate,
    pub description: String,
}

/// The pot ledger over one SQLite database.
///
/// Expected to be driven by a single writer; each operation is one scoped
/// transaction that commits in full or rolls back entirely.
pub struct PotLedger {
    conn: Connection,
}

impl PotLedger {
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, LedgerError> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Credits one completed round to `player`: creates the account at
    /// $1.00 if absent, otherwise adds $1.00 clamped to the cap and mirrors
    /// the new balance into the undo snapshot. At the cap this is a no-op
    /// and the row is left untouched.
    pub fn accrue_round(&mut self, player: &PlayerName) -> Result<PotAccount, LedgerError> {
        let now = unix_seconds();
        let tx = self.conn.transaction()?;
        let existing = fetch_account(&tx, player)?;
        let account = match existing {
            None => {
                let account = PotAccount::opened(player.clone(), ROUND_CONTRIBUTION, now);
                tx.execute(
                    "INSERT INTO pot_accounts (
                       player_name, amount_owed_cents, total_contributed_cents,
                       original_balance_cents, paid, last_updated
                     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        account.player.as_str(),
                        account.amount_owed.cents(),
                        account.total_contributed.cents(),
                        account.original_balance.cents(),
                        account.paid as i64,
                        account.last_updated,
                    ],
                )?;
                debug!(player = %player, "opened pot account with first round");
                account
            }
            Some(mut account) => {
                if account.amount_owed >= POT_CAP {
                    tx.commit()?;
                    debug!(player = %player, "balance at cap, round accrues nothing");
                    return Ok(account);
                }
                if account.paid {
                    // The undo snapshot is re-synced even while marked paid,
                    // so un-toggling restores the accrued balance.
                    warn!(player = %player, "round accrued while account is marked paid");
                }
                account.amount_owed = account
                    .amount_owed
                    .add_clamped(ROUND_CONTRIBUTION, POT_CAP);
                account.original_balance = account.amount_owed;
                account.last_updated = now;
                tx.execute(
                    "UPDATE pot_accounts
                     SET amount_owed_cents = ?2,
                         original_balance_cents = ?3,
                         last_updated = ?4
                     WHERE player_name = ?1",
                    params![
                        account.player.as_str(),
                        account.amount_owed.cents(),
                        account.original_balance.cents(),
                        account.last_updated,
                    ],
                )?;
                if account.amount_owed == POT_CAP {
                    info!(player = %player, "player reached the pot cap");
                }
                account
            }
        };
        tx.commit()?;
        Ok(account)
    }

    /// Flips the paid flag. Marking paid snapshots the owed balance and
    /// zeroes it; marking unpaid restores the snapshot. With no intervening
    /// accrual or payment the toggle is reversible any number of times.
    pub fn toggle_paid_status(&mut self, player: &PlayerName) -> Result<PotAccount, LedgerError> {
        let now = unix_seconds();
        let tx = self.conn.transaction()?;
        let mut account =
            fetch_account(&tx, player)?.ok_or_else(|| LedgerError::not_found(player.as_str()))?;
        if account.paid {
            account.amount_owed = account.original_balance;
            account.paid = false;
            info!(player = %player, restored = %account.amount_owed, "marked unpaid, balance restored");
        } else {
            account.original_balance = account.amount_owed;
            account.amount_owed = Money::ZERO;
            account.paid = true;
            info!(player = %player, cleared = %account.original_balance, "marked paid, balance cleared");
        }
        account.last_updated = now;
        tx.execute(
            "UPDATE pot_accounts
             SET amount_owed_cents = ?2,
                 original_balance_cents = ?3,
                 paid = ?4,
                 last_updated = ?5
             WHERE player_name = ?1",
            params![
                account.player.as_str(),
                account.amount_owed.cents(),
                account.original_balance.cents(),
                account.paid as i64,
                account.last_updated,
            ],
        )?;
        tx.commit()?;
        Ok(account)
    }

    /// Credits a payment against the owed balance. The applied amount is
    /// capped at what is owed; `total_contributed` grows by exactly the
    /// applied amount.
    pub fn apply_payment(
        &mut self,
        player: &PlayerName,
        amount: Money,
    ) -> Result<PaymentReceipt, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::invalid_input("payment amount must be positive"));
        }
        let now = unix_seconds();
        let tx = self.conn.transaction()?;
        let mut account =
            fetch_account(&tx, player)?.ok_or_else(|| LedgerError::not_found(player.as_str()))?;
        let applied = amount.min(account.amount_owed);
        account.amount_owed = account.amount_owed.saturating_sub(applied);
        account.total_contributed = account.total_contributed.saturating_add(applied);
        account.last_updated = now;
        tx.execute(
            "UPDATE pot_accounts
             SET amount_owed_cents = ?2,
                 total_contributed_cents = ?3,
                 last_updated = ?4
             WHERE player_name = ?1",
            params![
                account.player.as_str(),
                account.amount_owed.cents(),
                account.total_contributed.cents(),
                account.last_updated,
            ],
        )?;
        tx.commit()?;
        info!(
            player = %player,
            applied = %applied,
            owed = %account.amount_owed,
            "payment applied"
        );
        Ok(PaymentReceipt {
            player: account.player,
            applied,
            amount_owed: account.amount_owed,
            total_contributed: account.total_contributed,
        })
    }

    /// Records a hole-in-one and pays out the pot: one transaction that
    /// appends the event carrying the league-wide total owed at this
    /// moment, then resets every account to zero owed, zero snapshot,
    /// paid. All-or-nothing.
    pub fn record_jackpot_win(&mut self, win: JackpotWin) -> Result<HoleInOneEvent, LedgerError> {
        let course = win.course.trim();
        if course.is_empty() {
            return Err(LedgerError::invalid_input("course must not be empty"));
        }
        let now = unix_seconds();
        let tx = self.conn.transaction()?;
        let pot_amount = total_pot_in(&tx)?;
        let event = HoleInOneEvent {
            player: win.player,
            course: course.to_string(),
            hole: win.hole,
            event_date: win.event_date,
            pot_amount,
            description: win.description,
            recorded_at: now,
        };
        tx.execute(
            "INSERT INTO hole_in_one_events (
               player_name, course, hole_number, event_date,
               pot_amount_cents, description, recorded_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                event.player.as_str(),
                event.course,
                i64::from(event.hole.get()),
                event.event_date.as_str(),
                event.pot_amount.cents(),
                event.description,
                event.recorded_at,
            ],
        )?;
        tx.execute(
            "UPDATE pot_accounts
             SET amount_owed_cents = 0,
                 original_balance_cents = 0,
                 paid = 1,
                 last_updated = ?1",
            params![now],
        )?;
        tx.commit()?;
        info!(
            player = %event.player,
            pot = %event.pot_amount,
            course = %event.course,
            "hole-in-one recorded, pot reset"
        );
        Ok(event)
    }

    /// Destructive bulk import of `Player,Amount` lines: each good line
    /// becomes a fresh account with the amount clamped to the cap and
    /// lifetime contributions reset to zero. Bad lines are skipped and
    /// counted; the good lines commit as one batch.
    pub fn upload_balances(&mut self, text: &str) -> Result<UploadSummary, LedgerError> {
        let (lines, errors) = parse_balance_lines(text);
        let now = unix_seconds();
        let tx = self.conn.transaction()?;
        let mut updated = 0;
        for line in lines {
            let amount = line.amount.min(POT_CAP);
            tx.execute(
                "INSERT OR REPLACE INTO pot_accounts (
                   player_name, amount_owed_cents, total_contributed_cents,
                   original_balance_cents, paid, last_updated
                 ) VALUES (?1, ?2, 0, ?3, 0, ?4)",
                params![line.player.as_str(), amount.cents(), amount.cents(), now],
            )?;
            updated += 1;
        }
        tx.commit()?;
        info!(updated, errors, "bulk balance upload finished");
        Ok(UploadSummary { updated, errors })
    }

    /// League-wide total owed; the value a jackpot would pay out right now.
    pub fn total_pot(&self) -> Result<Money, LedgerError> {
        total_pot_in(&self.conn)
    }

    pub fn account_count(&self) -> Result<usize, LedgerError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pot_accounts", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// All accounts, highest balance first (name ascending as tiebreak).
    pub fn list_balances(&self) -> Result<Vec<PotAccount>, LedgerError> {
        let mut stmt = self.conn.prepare(
            "SELECT player_name, amount_owed_cents, total_contributed_cents,
                    original_balance_cents, paid, last_updated
             FROM pot_accounts
             ORDER BY amount_owed_cents DESC, player_name ASC",
        )?;
        let mut rows = stmt.query([])?;
        let mut accounts = Vec::new();
        while let Some(row) = rows.next()? {
            accounts.push(account_from_row(row)?);
        }
        Ok(accounts)
    }

    /// Hole-in-one history, newest first.
    pub fn list_events(&self) -> Result<Vec<HoleInOneEvent>, LedgerError> {
        let mut stmt = self.conn.prepare(
            "SELECT player_name, course, hole_number, event_date,
                    pot_amount_cents, description, recorded_at
             FROM hole_in_one_events
             ORDER BY recorded_at DESC, id DESC",
        )?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(event_from_row(row)?);
        }
        Ok(events)
    }

    /// Direct lookup, mostly for tests and the readiness probe.
    pub fn find_account(&self, player: &PlayerName) -> Result<Option<PotAccount>, LedgerError> {
        fetch_account(&self.conn, player)
    }
}

fn fetch_account(
    conn: &Connection,
    player: &PlayerName,
) -> Result<Option<PotAccount>, LedgerError> {
    let mut stmt = conn.prepare(
        "SELECT player_name, amount_owed_cents, total_contributed_cents,
                original_balance_cents, paid, last_updated
         FROM pot_accounts WHERE player_name = ?1",
    )?;
    let raw = stmt
        .query_row(params![player.as_str()], read_account_columns)
        .optional()?;
    raw.map(build_account).transpose()
}

fn total_pot_in(conn: &Connection) -> Result<Money, LedgerError> {
    let cents: i64 = conn.query_row(
        "SELECT COALESCE(SUM(amount_owed_cents), 0) FROM pot_accounts",
        [],
        |row| row.get(0),
    )?;
    Money::from_cents(cents).map_err(|e| corrupt_row("pot total", &e.to_string()))
}

type AccountColumns = (String, i64, i64, i64, i64, i64);

fn read_account_columns(row: &rusqlite::Row<'_>) -> rusqlite::Result<AccountColumns> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn account_from_row(row: &rusqlite::Row<'_>) -> Result<PotAccount, LedgerError> {
    build_account(read_account_columns(row)?)
}

fn build_account(columns: AccountColumns) -> Result<PotAccount, LedgerError> {
    let (name, owed, contributed, original, paid, last_updated) = columns;
    Ok(PotAccount {
        player: PlayerName::parse(&name).map_err(|e| corrupt_row(&name, &e.to_string()))?,
        amount_owed: Money::from_cents(owed).map_err(|e| corrupt_row(&name, &e.to_string()))?,
        total_contributed: Money::from_cents(contributed)
            .map_err(|e| corrupt_row(&name, &e.to_string()))?,
        original_balance: Money::from_cents(original)
            .map_err(|e| corrupt_row(&name, &e.to_string()))?,
        paid: paid != 0,
        last_updated,
    })
}

fn event_from_row(row: &rusqlite::Row<'_>) -> Result<HoleInOneEvent, LedgerError> {
    let name: String = row.get(0)?;
    let course: String = row.get(1)?;
    let hole: i64 = row.get(2)?;
    let event_date: String = row.get(3)?;
    let pot_cents: i64 = row.get(4)?;
    let description: String = row.get(5)?;
    let recorded_at: i64 = row.get(6)?;
    Ok(HoleInOneEvent {
        player: PlayerName::parse(&name).map_err(|e| corrupt_row(&name, &e.to_string()))?,
        course,
        hole: u8::try_from(hole)
            .ok()
            .and_then(|h| HoleNumber::new(h).ok())
            .ok_or_else(|| corrupt_row(&name, "hole_number out of range"))?,
        event_date: EventDate::parse(&event_date)
            .map_err(|e| corrupt_row(&name, &e.to_string()))?,
        pot_amount: Money::from_cents(pot_cents)
            .map_err(|e| corrupt_row(&name, &e.to_string()))?,
        description,
        recorded_at,
    })
}

fn corrupt_row(context: &str, detail: &str) -> LedgerError {
    LedgerError::new(
        LedgerErrorCode::Storage,
        format!("corrupt ledger row ({context}): {detail}"),
    )
}

fn unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
