// SPDX-License-Identifier: Apache-2.0

use fairway_pot_ledger::PotLedger;
use fairway_pot_model::{Money, PlayerName, POT_CAP};
use proptest::prelude::*;
use proptest::test_runner::Config;

#[derive(Debug, Clone)]
enum Action {
    Accrue,
    Toggle,
    Pay(i64),
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => Just(Action::Accrue),
        1 => Just(Action::Toggle),
        2 => (1_i64..6_000).prop_map(Action::Pay),
    ]
}

proptest! {
    #![proptest_config(Config::with_cases(64))]

    /// Under any interleaving of accruals, toggles, and payments the owed
    /// balance stays within [0, CAP] and lifetime contributions never
    /// shrink.
    #[test]
    fn owed_balance_stays_within_bounds(actions in prop::collection::vec(action_strategy(), 1..120)) {
        let mut ledger = PotLedger::open_in_memory().expect("ledger");
        let alice = PlayerName::parse("Alice").expect("name");
        ledger.accrue_round(&alice).expect("seed account");

        let mut prev_contributed = Money::ZERO;
        for action in actions {
            match action {
                Action::Accrue => {
                    ledger.accrue_round(&alice).expect("accrue");
                }
                Action::Toggle => {
                    ledger.toggle_paid_status(&alice).expect("toggle");
                }
                Action::Pay(cents) => {
                    let amount = Money::from_cents(cents).expect("positive");
                    ledger.apply_payment(&alice, amount).expect("payment");
                }
            }
            let account = ledger
                .find_account(&alice)
                .expect("lookup")
                .expect("account");
            prop_assert!(account.amount_owed <= POT_CAP);
            prop_assert!(account.amount_owed >= Money::ZERO);
            prop_assert!(account.original_balance <= POT_CAP);
            prop_assert!(account.total_contributed >= prev_contributed);
            prev_contributed = account.total_contributed;
        }
    }
}
