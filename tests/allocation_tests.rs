// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use goalwise::models::{Goal, GoalStatus, GoalType};
use goalwise::planner::allocation::allocate;
use proptest::prelude::*;

fn goal(id: i64, r#type: GoalType, priority: i64) -> Goal {
    let mut g = Goal::new(&format!("goal-{}", id), r#type, 10_000.0, priority);
    g.id = Some(id);
    g
}

#[test]
fn emergency_first_then_single_high_goal() {
    let goals = vec![
        goal(1, GoalType::EmergencyFund, 3),
        goal(2, GoalType::ShortTerm, 1),
    ];
    let r = allocate(10_000.0, &goals);
    assert_eq!(r.allocations[&1], 7_000.0);
    assert_eq!(r.allocations[&2], 3_000.0);
    assert_eq!(r.total_allocated, 10_000.0);
    assert_eq!(r.unallocated, 0.0);
}

#[test]
fn waterfall_weights_without_emergency() {
    let goals = vec![
        goal(1, GoalType::ShortTerm, 1),
        goal(2, GoalType::LongTerm, 2),
        goal(3, GoalType::Custom, 3),
    ];
    let r = allocate(1_000.0, &goals);
    assert_eq!(r.allocations[&1], 500.0);
    assert_eq!(r.allocations[&2], 300.0);
    assert_eq!(r.allocations[&3], 200.0);
    assert_eq!(r.unallocated, 0.0);
}

#[test]
fn empty_buckets_are_renormalized() {
    // Only medium and low: 30/50 and 20/50 of the surplus.
    let goals = vec![goal(1, GoalType::LongTerm, 2), goal(2, GoalType::Custom, 5)];
    let r = allocate(1_000.0, &goals);
    assert_eq!(r.allocations[&1], 600.0);
    assert_eq!(r.allocations[&2], 400.0);
}

#[test]
fn rounding_drift_is_clamped_on_later_goals() {
    // 12.5, 7.5 and 5 all round up to 10; the low goal only gets what is left.
    let goals = vec![
        goal(1, GoalType::ShortTerm, 1),
        goal(2, GoalType::ShortTerm, 2),
        goal(3, GoalType::ShortTerm, 3),
    ];
    let r = allocate(25.0, &goals);
    assert_eq!(r.allocations[&1], 10.0);
    assert_eq!(r.allocations[&2], 10.0);
    assert_eq!(r.allocations[&3], 5.0);
    assert_eq!(r.total_allocated, 25.0);
    assert_eq!(r.unallocated, 0.0);
}

#[test]
fn rounding_down_leaves_unallocated() {
    // 1000 / 3 = 333.33 -> 330 each.
    let goals = vec![
        goal(1, GoalType::ShortTerm, 1),
        goal(2, GoalType::LongTerm, 1),
        goal(3, GoalType::Retirement, 1),
    ];
    let r = allocate(1_000.0, &goals);
    for id in 1..=3 {
        assert_eq!(r.allocations[&id], 330.0);
    }
    assert_eq!(r.total_allocated, 990.0);
    assert_eq!(r.unallocated, 10.0);
}

#[test]
fn complete_emergency_keeps_its_contribution() {
    let mut ef = goal(1, GoalType::EmergencyFund, 1);
    ef.target_amount = 1_000.0;
    ef.saved_amount = 900.0;
    ef.monthly_contribution = 200.0;
    let goals = vec![ef, goal(2, GoalType::LongTerm, 2)];
    let r = allocate(1_000.0, &goals);
    assert_eq!(r.allocations[&1], 200.0);
    assert_eq!(r.allocations[&2], 800.0);
}

#[test]
fn emergency_threshold_is_eighty_percent() {
    let mut ef = goal(1, GoalType::EmergencyFund, 1);
    ef.target_amount = 1_000.0;
    ef.saved_amount = 799.0;
    let r = allocate(1_000.0, &[ef.clone(), goal(2, GoalType::ShortTerm, 1)]);
    assert_eq!(r.allocations[&1], 700.0);

    ef.saved_amount = 800.0;
    let r = allocate(1_000.0, &[ef, goal(2, GoalType::ShortTerm, 1)]);
    assert_eq!(r.allocations[&1], 0.0);
    assert_eq!(r.allocations[&2], 1_000.0);
}

#[test]
fn larger_existing_emergency_contribution_wins_but_is_capped() {
    let mut ef = goal(1, GoalType::EmergencyFund, 1);
    ef.monthly_contribution = 900.0;
    let r = allocate(1_000.0, &[ef.clone(), goal(2, GoalType::ShortTerm, 1)]);
    assert_eq!(r.allocations[&1], 900.0);
    assert_eq!(r.allocations[&2], 100.0);

    ef.monthly_contribution = 5_000.0;
    let r = allocate(1_000.0, &[ef, goal(2, GoalType::ShortTerm, 1)]);
    assert_eq!(r.allocations[&1], 1_000.0);
    assert_eq!(r.allocations[&2], 0.0);
    assert_eq!(r.unallocated, 0.0);
}

#[test]
fn lone_emergency_goal_takes_everything() {
    let r = allocate(1_000.0, &[goal(1, GoalType::EmergencyFund, 1)]);
    assert_eq!(r.allocations[&1], 1_000.0);
    assert_eq!(r.total_allocated, 1_000.0);
    assert_eq!(r.unallocated, 0.0);
}

#[test]
fn first_emergency_fund_wins() {
    let goals = vec![
        goal(7, GoalType::EmergencyFund, 1),
        goal(3, GoalType::EmergencyFund, 1),
    ];
    let r = allocate(1_000.0, &goals);
    assert_eq!(r.allocations[&7], 700.0);
    // The second one is just another high priority goal.
    assert_eq!(r.allocations[&3], 300.0);
}

#[test]
fn non_positive_surplus_allocates_nothing() {
    let goals = vec![goal(1, GoalType::ShortTerm, 1)];
    for surplus in [0.0, -250.0, f64::NAN] {
        let r = allocate(surplus, &goals);
        assert!(r.allocations.is_empty());
        assert_eq!(r.total_allocated, 0.0);
        assert_eq!(r.unallocated, 0.0);
    }
}

#[test]
fn inactive_or_unsaved_goals_are_ignored() {
    let mut archived = goal(1, GoalType::ShortTerm, 1);
    archived.status = GoalStatus::Archived;
    let mut unsaved = goal(2, GoalType::ShortTerm, 1);
    unsaved.id = None;
    let r = allocate(500.0, &[archived, unsaved]);
    assert!(r.allocations.is_empty());
    assert_eq!(r.unallocated, 500.0);
}

fn arb_goal() -> impl Strategy<Value = (usize, i64, f64, f64, f64)> {
    (0usize..5, 0i64..5, 0.0..50_000.0f64, 0.0..60_000.0f64, 0.0..20_000.0f64)
}

proptest! {
    #[test]
    fn allocation_conserves_surplus(
        surplus in 0.0..100_000.0f64,
        specs in proptest::collection::vec(arb_goal(), 0..8),
    ) {
        let types = [
            GoalType::EmergencyFund,
            GoalType::ShortTerm,
            GoalType::LongTerm,
            GoalType::Retirement,
            GoalType::Custom,
        ];
        let goals: Vec<Goal> = specs
            .iter()
            .enumerate()
            .map(|(i, (t, p, target, saved, monthly))| {
                let mut g = goal(i as i64 + 1, types[*t], *p);
                g.target_amount = *target;
                g.saved_amount = *saved;
                g.monthly_contribution = *monthly;
                g
            })
            .collect();

        let r = allocate(surplus, &goals);
        let eps = 1e-6 * surplus.max(1.0);
        prop_assert!(r.total_allocated >= 0.0);
        prop_assert!(r.total_allocated <= surplus + eps);
        prop_assert!(r.unallocated >= 0.0);
        prop_assert!((r.total_allocated + r.unallocated - surplus).abs() <= eps);
        prop_assert!(r.allocations.values().all(|v| *v >= 0.0));

        if surplus > 0.0 {
            if let Some(ef) = goals.iter().find(|g| g.r#type == GoalType::EmergencyFund) {
                let incomplete = ef.target_amount <= 0.0 || ef.saved_amount < 0.8 * ef.target_amount;
                if incomplete {
                    let got = r.allocations[&ef.id.unwrap()];
                    prop_assert!(got + eps >= 0.7 * surplus);
                }
            }
        }
    }
}
