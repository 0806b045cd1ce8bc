// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Months, NaiveDate};

use crate::models::{MomentumResult, SavingsActivity};

const STREAK_POINTS: u32 = 10;
const STREAK_CAP: i64 = 40;
const MISS_PENALTY: i64 = 10;

/// Score a newest-first window of monthly activity.
///
/// Only the first `window_months` records are read; callers are expected to
/// pass a window already filled with defaults (see [`fill_window`]).
pub fn compute(window: &[SavingsActivity], window_months: usize) -> MomentumResult {
    if window_months == 0 {
        return MomentumResult {
            streak_months: 0,
            consistency_pct: 0.0,
            missed_months: 0,
            score: 0,
        };
    }
    let window = &window[..window.len().min(window_months)];

    let streak = window.iter().take_while(|a| a.contributed).count() as u32;
    let contributed = window.iter().filter(|a| a.contributed).count();
    let missed = window.iter().filter(|a| a.missed).count() as u32;
    let consistency_pct = contributed as f64 / window_months as f64 * 100.0;

    let raw = (streak as i64 * STREAK_POINTS as i64).min(STREAK_CAP)
        + (consistency_pct * 0.5).round() as i64
        - missed as i64 * MISS_PENALTY;

    MomentumResult {
        streak_months: streak,
        consistency_pct,
        missed_months: missed,
        score: raw.clamp(0, 100) as u32,
    }
}

/// Build a newest-first window of `window_months` months ending at `newest`,
/// taking stored records where they exist and empty defaults elsewhere.
pub fn fill_window(
    records: &[SavingsActivity],
    newest: NaiveDate,
    window_months: usize,
) -> Vec<SavingsActivity> {
    let start = NaiveDate::from_ymd_opt(newest.year(), newest.month(), 1).unwrap_or(newest);
    (0..window_months)
        .map(|i| {
            let key = start
                .checked_sub_months(Months::new(i as u32))
                .map(month_key)
                .unwrap_or_default();
            records
                .iter()
                .find(|r| r.month_key == key)
                .cloned()
                .unwrap_or_else(|| SavingsActivity::empty(&key))
        })
        .collect()
}

pub fn month_key(d: NaiveDate) -> String {
    d.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_key_is_zero_padded() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 17).unwrap();
        assert_eq!(month_key(d), "2026-03");
    }

    #[test]
    fn zero_window_is_all_zero() {
        let r = compute(&[SavingsActivity::empty("2026-01")], 0);
        assert_eq!(r.score, 0);
        assert_eq!(r.streak_months, 0);
    }
}
