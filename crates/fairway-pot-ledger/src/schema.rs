// SPDX-License-Identifier: Apache-2.0

use crate::LedgerError;
use rusqlite::Connection;

pub const LEDGER_SCHEMA_VERSION: i64 = 1;

pub(crate) fn init_schema(conn: &Connection) -> Result<(), LedgerError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;
        PRAGMA temp_store=MEMORY;
        PRAGMA cache_size=-8000;
        CREATE TABLE IF NOT EXISTS pot_accounts (
          player_name TEXT PRIMARY KEY,
          amount_owed_cents INTEGER NOT NULL CHECK (amount_owed_cents >= 0),
          total_contributed_cents INTEGER NOT NULL DEFAULT 0
              CHECK (total_contributed_cents >= 0),
          original_balance_cents INTEGER NOT NULL DEFAULT 0
              CHECK (original_balance_cents >= 0),
          paid INTEGER NOT NULL DEFAULT 0 CHECK (paid IN (0, 1)),
          last_updated INTEGER NOT NULL
        ) WITHOUT ROWID;
        CREATE TABLE IF NOT EXISTS hole_in_one_events (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          player_name TEXT NOT NULL,
          course TEXT NOT NULL,
          hole_number INTEGER NOT NULL,
          event_date TEXT NOT NULL,
          pot_amount_cents INTEGER NOT NULL,
          description TEXT NOT NULL DEFAULT '',
          recorded_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_events_recorded_at
          ON hole_in_one_events (recorded_at DESC, id DESC);
        ",
    )?;
    conn.execute_batch(&format!("PRAGMA user_version={LEDGER_SCHEMA_VERSION};"))?;
    Ok(())
}
