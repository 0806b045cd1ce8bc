// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::NEVER_MONTHS;
use crate::models::{GoalType, TimelineResult};

/// Hard stop for the month-by-month projection (100 years).
pub const MAX_PROJECTION_MONTHS: i64 = 1200;

/// Project how many months it takes to reach `target_amount` with a fixed
/// monthly contribution compounding at `annual_return / 12` per month, and
/// compare against an optional deadline month as seen from `today`.
pub fn simulate(
    target_amount: f64,
    saved_amount: f64,
    monthly_contribution: f64,
    deadline: Option<NaiveDate>,
    annual_return: f64,
    today: NaiveDate,
) -> TimelineResult {
    let months_to_target = if saved_amount >= target_amount {
        0
    } else if !(monthly_contribution > 0.0) {
        NEVER_MONTHS
    } else {
        let monthly_rate = 1.0 + annual_return / 12.0;
        let mut balance = saved_amount;
        let mut months = 0;
        while balance < target_amount && months < MAX_PROJECTION_MONTHS {
            balance = balance * monthly_rate + monthly_contribution;
            months += 1;
        }
        months
    };

    let months_to_deadline = deadline.map(|d| months_between(today, d));
    let delta_months = months_to_deadline.map(|m| {
        if months_to_target == NEVER_MONTHS {
            NEVER_MONTHS
        } else {
            months_to_target - m
        }
    });

    TimelineResult {
        months_to_target,
        months_to_deadline,
        delta_months,
    }
}

/// Whole calendar months from `from` to `to`, floored at zero.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let months = (to.year() as i64 - from.year() as i64) * 12 + to.month() as i64
        - from.month() as i64;
    months.max(0)
}

/// Annual return assumption for a goal. Custom goals fall back to a rule on
/// the horizon; no deadline counts as the longest horizon.
pub fn expected_return_for_goal(goal_type: GoalType, months_to_deadline: Option<i64>) -> f64 {
    match goal_type {
        GoalType::EmergencyFund => 0.06,
        GoalType::ShortTerm => 0.08,
        GoalType::LongTerm => 0.12,
        GoalType::Retirement => 0.13,
        GoalType::Custom => match months_to_deadline {
            Some(m) if m <= 36 => 0.08,
            Some(m) if m <= 84 => 0.11,
            _ => 0.12,
        },
    }
}

/// Suggested split, in percent, behind each return assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssetMix {
    pub equity: u8,
    pub debt: u8,
    pub liquid: u8,
}

pub fn asset_mix_for_goal(goal_type: GoalType, months_to_deadline: Option<i64>) -> AssetMix {
    let mix = |equity, debt, liquid| AssetMix {
        equity,
        debt,
        liquid,
    };
    match goal_type {
        GoalType::EmergencyFund => mix(0, 30, 70),
        GoalType::ShortTerm => mix(20, 70, 10),
        GoalType::LongTerm => mix(70, 30, 0),
        GoalType::Retirement => mix(80, 20, 0),
        GoalType::Custom => match months_to_deadline {
            Some(m) if m <= 36 => mix(20, 70, 10),
            Some(m) if m <= 84 => mix(60, 40, 0),
            _ => mix(70, 30, 0),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn months_between_crosses_years_and_floors() {
        assert_eq!(months_between(ym(2025, 11), ym(2026, 2)), 3);
        assert_eq!(months_between(ym(2026, 2), ym(2025, 11)), 0);
        assert_eq!(
            months_between(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(), ym(2025, 3)),
            0
        );
    }

    #[test]
    fn asset_mix_sums_to_hundred() {
        for t in [
            GoalType::EmergencyFund,
            GoalType::ShortTerm,
            GoalType::LongTerm,
            GoalType::Retirement,
            GoalType::Custom,
        ] {
            for h in [None, Some(12), Some(60), Some(120)] {
                let m = asset_mix_for_goal(t, h);
                assert_eq!(m.equity as u32 + m.debt as u32 + m.liquid as u32, 100);
            }
        }
    }
}
