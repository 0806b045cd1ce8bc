// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AllocationResult, Goal, GoalStatus, GoalType};

const EMERGENCY_SHARE: f64 = 0.70;
const EMERGENCY_COMPLETE_RATIO: f64 = 0.80;
const ROUND_TO: f64 = 10.0;

/// Nominal waterfall weights for priority 1, 2 and everything else.
const BUCKET_WEIGHTS: [f64; 3] = [0.50, 0.30, 0.20];

/// Split `monthly_surplus` across the active goals.
///
/// An incomplete emergency fund takes at least 70% of the surplus first. The
/// rest flows through priority buckets (high, medium, low) whose weights are
/// renormalized over the buckets that have goals. Per-goal amounts are rounded
/// to the nearest 10 and clamped so the running total never exceeds the
/// surplus; goals applied later absorb any rounding drift.
pub fn allocate(monthly_surplus: f64, goals: &[Goal]) -> AllocationResult {
    if !(monthly_surplus > 0.0) || !monthly_surplus.is_finite() {
        return AllocationResult::default();
    }

    let active: Vec<(i64, &Goal)> = goals
        .iter()
        .filter(|g| g.status == GoalStatus::Active)
        .filter_map(|g| g.id.map(|id| (id, g)))
        .collect();
    if active.is_empty() {
        return AllocationResult {
            unallocated: monthly_surplus,
            ..Default::default()
        };
    }

    let mut out = AllocationResult::default();
    let mut remaining = monthly_surplus;

    // First one encountered wins when several exist.
    let emergency = active
        .iter()
        .find(|(_, g)| g.r#type == GoalType::EmergencyFund)
        .copied();

    if let Some((id, goal)) = emergency {
        let current = goal.monthly_contribution.max(0.0);
        let amount = if emergency_incomplete(goal) {
            (monthly_surplus * EMERGENCY_SHARE).max(current)
        } else {
            current
        }
        .min(monthly_surplus);
        out.allocations.insert(id, amount);
        out.total_allocated += amount;
        remaining = (remaining - amount).max(0.0);
    }

    let mut buckets: [Vec<i64>; 3] = Default::default();
    for (id, goal) in &active {
        if Some(*id) == emergency.map(|(eid, _)| eid) {
            continue;
        }
        buckets[bucket_index(goal.priority)].push(*id);
    }

    let weight_sum: f64 = buckets
        .iter()
        .zip(BUCKET_WEIGHTS)
        .filter(|(b, _)| !b.is_empty())
        .map(|(_, w)| w)
        .sum();

    if weight_sum == 0.0 {
        if let Some((id, _)) = emergency {
            *out.allocations.entry(id).or_insert(0.0) += remaining;
            out.total_allocated += remaining;
        }
    } else {
        for (members, weight) in buckets.iter().zip(BUCKET_WEIGHTS) {
            if members.is_empty() {
                continue;
            }
            let bucket_share = remaining * weight / weight_sum;
            let per_goal = round_to_ten(bucket_share / members.len() as f64);
            for id in members {
                let room = (monthly_surplus - out.total_allocated).max(0.0);
                let amount = per_goal.min(room).max(0.0);
                out.allocations.insert(*id, amount);
                out.total_allocated += amount;
            }
        }
    }

    out.unallocated = (monthly_surplus - out.total_allocated).max(0.0);
    out
}

fn emergency_incomplete(goal: &Goal) -> bool {
    goal.target_amount <= 0.0 || goal.saved_amount < EMERGENCY_COMPLETE_RATIO * goal.target_amount
}

fn bucket_index(priority: i64) -> usize {
    match priority {
        1 => 0,
        2 => 1,
        _ => 2,
    }
}

fn round_to_ten(v: f64) -> f64 {
    (v / ROUND_TO).round() * ROUND_TO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to_ten(1234.0), 1230.0);
        assert_eq!(round_to_ten(1235.0), 1240.0);
        assert_eq!(round_to_ten(4.9), 0.0);
    }

    #[test]
    fn priority_buckets() {
        assert_eq!(bucket_index(1), 0);
        assert_eq!(bucket_index(2), 1);
        assert_eq!(bucket_index(3), 2);
        assert_eq!(bucket_index(0), 2);
        assert_eq!(bucket_index(-4), 2);
    }
}
