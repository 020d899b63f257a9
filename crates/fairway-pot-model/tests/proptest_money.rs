// SPDX-License-Identifier: Apache-2.0

use fairway_pot_model::{Money, POT_CAP, ROUND_CONTRIBUTION};
use proptest::prelude::*;
use proptest::test_runner::Config;

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn money_display_parse_roundtrip(cents in 0_i64..1_000_000_i64) {
        let m = Money::from_cents(cents).expect("non-negative");
        let parsed = Money::parse(&m.to_string()).expect("round trip");
        prop_assert_eq!(parsed, m);
    }

    #[test]
    fn repeated_accrual_never_exceeds_cap(rounds in 0_usize..200_usize) {
        let mut owed = Money::ZERO;
        for _ in 0..rounds {
            owed = owed.add_clamped(ROUND_CONTRIBUTION, POT_CAP);
            prop_assert!(owed <= POT_CAP);
        }
        if rounds >= 50 {
            prop_assert_eq!(owed, POT_CAP);
        }
    }

    #[test]
    fn saturating_sub_never_goes_negative(a in 0_i64..100_000, b in 0_i64..100_000) {
        let a = Money::from_cents(a).expect("a");
        let b = Money::from_cents(b).expect("b");
        prop_assert!(a.saturating_sub(b).cents() >= 0);
    }
}
