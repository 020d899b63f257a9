// SPDX-License-Identifier: Apache-2.0

use fairway_pot_ledger::{LedgerErrorCode, PotLedger};
use fairway_pot_model::{Money, PlayerName, POT_CAP};
use tempfile::tempdir;

fn player(name: &str) -> PlayerName {
    PlayerName::parse(name).expect("test player name")
}

fn money(text: &str) -> Money {
    Money::parse(text).expect("test amount")
}

#[test]
fn first_round_opens_account_at_one_dollar() {
    let mut ledger = PotLedger::open_in_memory().expect("ledger");
    let account = ledger.accrue_round(&player("Alice")).expect("accrue");
    assert_eq!(account.amount_owed, money("1.00"));
    assert_eq!(account.total_contributed, Money::ZERO);
    assert_eq!(account.original_balance, money("1.00"));
    assert!(!account.paid);
}

#[test]
fn sixty_rounds_cap_at_fifty() {
    let mut ledger = PotLedger::open_in_memory().expect("ledger");
    let alice = player("Alice");
    let mut last = None;
    for _ in 0..60 {
        last = Some(ledger.accrue_round(&alice).expect("accrue"));
    }
    let account = last.expect("at least one round");
    assert_eq!(account.amount_owed, POT_CAP);
    assert_eq!(account.original_balance, POT_CAP);
}

#[test]
fn accrual_at_cap_is_a_no_op_leaving_row_untouched() {
    let mut ledger = PotLedger::open_in_memory().expect("ledger");
    let alice = player("Alice");
    for _ in 0..50 {
        ledger.accrue_round(&alice).expect("accrue");
    }
    let before = ledger
        .find_account(&alice)
        .expect("lookup")
        .expect("account");
    assert_eq!(before.amount_owed, POT_CAP);

    let after = ledger.accrue_round(&alice).expect("accrue at cap");
    assert_eq!(after, before, "capped accrual must not touch the row");
    assert_eq!(after.last_updated, before.last_updated);
}

#[test]
fn toggle_snapshots_and_restores_balance() {
    let mut ledger = PotLedger::open_in_memory().expect("ledger");
    let bob = player("Bob");
    for _ in 0..30 {
        ledger.accrue_round(&bob).expect("accrue");
    }

    let paid = ledger.toggle_paid_status(&bob).expect("mark paid");
    assert_eq!(paid.amount_owed, Money::ZERO);
    assert_eq!(paid.original_balance, money("30.00"));
    assert!(paid.paid);

    let unpaid = ledger.toggle_paid_status(&bob).expect("mark unpaid");
    assert_eq!(unpaid.amount_owed, money("30.00"));
    assert!(!unpaid.paid);
}

#[test]
fn double_toggle_is_reversible_repeatedly() {
    let mut ledger = PotLedger::open_in_memory().expect("ledger");
    let bob = player("Bob");
    for _ in 0..7 {
        ledger.accrue_round(&bob).expect("accrue");
    }
    let start = ledger.find_account(&bob).expect("lookup").expect("account");
    for _ in 0..3 {
        ledger.toggle_paid_status(&bob).expect("to paid");
        ledger.toggle_paid_status(&bob).expect("back to unpaid");
    }
    let end = ledger.find_account(&bob).expect("lookup").expect("account");
    assert_eq!(end.amount_owed, start.amount_owed);
    assert_eq!(end.paid, start.paid);
}

#[test]
fn toggle_unknown_player_is_not_found() {
    let mut ledger = PotLedger::open_in_memory().expect("ledger");
    let err = ledger
        .toggle_paid_status(&player("Nobody"))
        .expect_err("must fail");
    assert_eq!(err.code, LedgerErrorCode::NotFound);
}

#[test]
fn overpayment_is_capped_at_owed_balance() {
    let mut ledger = PotLedger::open_in_memory().expect("ledger");
    let carol = player("Carol");
    for _ in 0..20 {
        ledger.accrue_round(&carol).expect("accrue");
    }

    let receipt = ledger
        .apply_payment(&carol, money("35.00"))
        .expect("payment");
    assert_eq!(receipt.applied, money("20.00"));
    assert_eq!(receipt.amount_owed, Money::ZERO);
    assert_eq!(receipt.total_contributed, money("20.00"));
}

#[test]
fn partial_payment_reduces_owed_and_grows_contributed() {
    let mut ledger = PotLedger::open_in_memory().expect("ledger");
    let carol = player("Carol");
    for _ in 0..10 {
        ledger.accrue_round(&carol).expect("accrue");
    }

    let receipt = ledger.apply_payment(&carol, money("4.00")).expect("payment");
    assert_eq!(receipt.applied, money("4.00"));
    assert_eq!(receipt.amount_owed, money("6.00"));
    assert_eq!(receipt.total_contributed, money("4.00"));

    let second = ledger.apply_payment(&carol, money("6.00")).expect("payment");
    assert_eq!(second.amount_owed, Money::ZERO);
    assert_eq!(second.total_contributed, money("10.00"));
}

#[test]
fn payment_for_unknown_player_is_not_found() {
    let mut ledger = PotLedger::open_in_memory().expect("ledger");
    let err = ledger
        .apply_payment(&player("Nobody"), money("5.00"))
        .expect_err("must fail");
    assert_eq!(err.code, LedgerErrorCode::NotFound);
}

#[test]
fn zero_payment_is_rejected() {
    let mut ledger = PotLedger::open_in_memory().expect("ledger");
    let carol = player("Carol");
    ledger.accrue_round(&carol).expect("accrue");
    let err = ledger
        .apply_payment(&carol, Money::ZERO)
        .expect_err("must fail");
    assert_eq!(err.code, LedgerErrorCode::InvalidInput);
}

#[test]
fn total_pot_sums_all_balances_and_zero_when_empty() {
    let mut ledger = PotLedger::open_in_memory().expect("ledger");
    assert_eq!(ledger.total_pot().expect("empty total"), Money::ZERO);

    for _ in 0..3 {
        ledger.accrue_round(&player("Alice")).expect("accrue");
    }
    for _ in 0..5 {
        ledger.accrue_round(&player("Bob")).expect("accrue");
    }
    assert_eq!(ledger.total_pot().expect("total"), money("8.00"));
}

#[test]
fn balances_are_listed_owed_descending() {
    let mut ledger = PotLedger::open_in_memory().expect("ledger");
    for _ in 0..2 {
        ledger.accrue_round(&player("Alice")).expect("accrue");
    }
    for _ in 0..5 {
        ledger.accrue_round(&player("Bob")).expect("accrue");
    }
    for _ in 0..3 {
        ledger.accrue_round(&player("Carol")).expect("accrue");
    }

    let balances = ledger.list_balances().expect("list");
    let names: Vec<&str> = balances.iter().map(|a| a.player.as_str()).collect();
    assert_eq!(names, vec!["Bob", "Carol", "Alice"]);
}

#[test]
fn ledger_persists_across_reopen() {
    let dir = tempdir().expect("tmp");
    let db = dir.path().join("pot.db");
    {
        let mut ledger = PotLedger::open(&db).expect("open");
        for _ in 0..4 {
            ledger.accrue_round(&player("Alice")).expect("accrue");
        }
    }
    let ledger = PotLedger::open(&db).expect("reopen");
    let account = ledger
        .find_account(&player("Alice"))
        .expect("lookup")
        .expect("account");
    assert_eq!(account.amount_owed, money("4.00"));
}

#[test]
fn accrual_while_paid_resyncs_the_snapshot() {
    // Accruing while marked paid moves both the balance and the undo
    // snapshot, so un-toggling restores the updated value rather than the
    // value at the moment of marking paid.
    let mut ledger = PotLedger::open_in_memory().expect("ledger");
    let dan = player("Dan");
    for _ in 0..5 {
        ledger.accrue_round(&dan).expect("accrue");
    }
    ledger.toggle_paid_status(&dan).expect("mark paid");
    ledger.accrue_round(&dan).expect("accrue while paid");

    let restored = ledger.toggle_paid_status(&dan).expect("mark unpaid");
    assert_eq!(restored.amount_owed, money("1.00"));
}
