// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use goalwise::models::SavingsActivity;
use goalwise::planner::momentum::{compute, fill_window};
use proptest::prelude::*;

fn month(contributed: bool, missed: bool) -> SavingsActivity {
    SavingsActivity {
        month_key: String::new(),
        contributed,
        total_sip_amount: if contributed { 500.0 } else { 0.0 },
        missed,
    }
}

#[test]
fn six_month_example() {
    let window: Vec<_> = [true, true, true, false, true, true]
        .into_iter()
        .map(|c| month(c, false))
        .collect();
    let r = compute(&window, 6);
    assert_eq!(r.streak_months, 3);
    assert!((r.consistency_pct - 83.33).abs() < 0.01);
    assert_eq!(r.missed_months, 0);
    assert_eq!(r.score, 72);
}

#[test]
fn streak_bonus_caps_at_forty() {
    let window: Vec<_> = (0..12).map(|_| month(true, false)).collect();
    let r = compute(&window, 12);
    assert_eq!(r.streak_months, 12);
    assert_eq!(r.consistency_pct, 100.0);
    assert_eq!(r.score, 90);
}

#[test]
fn misses_floor_the_score_at_zero() {
    let window: Vec<_> = (0..6).map(|_| month(false, true)).collect();
    let r = compute(&window, 6);
    assert_eq!(r.missed_months, 6);
    assert_eq!(r.score, 0);
}

#[test]
fn broken_streak_with_a_miss() {
    // newest month missed: no streak, 4/6 contributed, one miss
    let window = vec![
        month(false, true),
        month(true, false),
        month(true, false),
        month(true, false),
        month(true, false),
        month(false, false),
    ];
    let r = compute(&window, 6);
    assert_eq!(r.streak_months, 0);
    assert_eq!(r.missed_months, 1);
    // round(66.67 * 0.5) = 33, minus 10
    assert_eq!(r.score, 23);
}

#[test]
fn fill_window_inserts_defaults_for_gaps() {
    let stored = vec![
        SavingsActivity {
            month_key: "2026-03".into(),
            contributed: true,
            total_sip_amount: 1_000.0,
            missed: false,
        },
        SavingsActivity {
            month_key: "2026-01".into(),
            contributed: false,
            total_sip_amount: 0.0,
            missed: true,
        },
    ];
    let today = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
    let window = fill_window(&stored, today, 4);
    let keys: Vec<_> = window.iter().map(|a| a.month_key.as_str()).collect();
    assert_eq!(keys, ["2026-03", "2026-02", "2026-01", "2025-12"]);
    assert!(window[0].contributed);
    assert_eq!(window[1], SavingsActivity::empty("2026-02"));
    assert!(window[2].missed);
    assert_eq!(window[3], SavingsActivity::empty("2025-12"));

    let r = compute(&window, 4);
    assert_eq!(r.streak_months, 1);
    assert_eq!(r.missed_months, 1);
    assert_eq!(r.consistency_pct, 25.0);
}

fn arb_month() -> impl Strategy<Value = SavingsActivity> {
    prop_oneof![
        Just(month(true, false)),
        Just(month(false, true)),
        Just(month(false, false)),
    ]
}

proptest! {
    #[test]
    fn momentum_stays_in_bounds(window in proptest::collection::vec(arb_month(), 1..36)) {
        let n = window.len();
        let r = compute(&window, n);
        prop_assert!(r.score <= 100);
        prop_assert!((0.0..=100.0).contains(&r.consistency_pct));
        prop_assert!(r.streak_months as usize <= n);
        prop_assert!(r.missed_months as usize <= n);
    }
}
