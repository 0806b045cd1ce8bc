// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

use super::features::{DriverGroup, Feature};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityBand {
    High,
    Medium,
    Low,
}

impl ProbabilityBand {
    pub fn of(probability: f64) -> Self {
        if probability > 0.8 {
            ProbabilityBand::High
        } else if probability > 0.5 {
            ProbabilityBand::Medium
        } else {
            ProbabilityBand::Low
        }
    }
}

struct NoteRule {
    band: ProbabilityBand,
    /// `None` matches any driver.
    group: Option<DriverGroup>,
    note: &'static str,
}

const fn rule(band: ProbabilityBand, group: Option<DriverGroup>, note: &'static str) -> NoteRule {
    NoteRule { band, group, note }
}

use DriverGroup::*;
use ProbabilityBand::*;

// First match wins; each band ends with a catch-all.
const NOTE_RULES: &[NoteRule] = &[
    rule(High, Some(Habit), "Your steady saving streak makes this goal very likely."),
    rule(High, Some(Cashflow), "Your surplus comfortably covers what this goal needs each month."),
    rule(High, Some(Volatility), "Stable spending keeps this goal well within reach."),
    rule(High, Some(Time), "Plenty of time remains to reach this goal."),
    rule(High, Some(Drift), "Disciplined discretionary spending keeps this goal on track."),
    rule(High, None, "This goal looks very likely to be met on its current path."),
    rule(Medium, Some(Habit), "Likely, mainly thanks to consistent contributions; keep the streak going."),
    rule(Medium, Some(Cashflow), "Likely, but it relies on your surplus holding up."),
    rule(Medium, Some(Volatility), "Likely, as long as spending stays as steady as it has been."),
    rule(Medium, Some(Time), "Likely, with enough time left if contributions continue."),
    rule(Medium, Some(Drift), "Likely, provided discretionary spending does not creep up."),
    rule(Medium, None, "Reasonably likely; a small increase in contribution would help."),
    rule(Low, Some(Habit), "At risk: missed or irregular contributions are holding this goal back."),
    rule(Low, Some(Cashflow), "At risk: the required monthly amount is large relative to your surplus."),
    rule(Low, Some(Volatility), "At risk: volatile expenses make steady saving difficult."),
    rule(Low, Some(Time), "At risk: too little time left for the amount remaining."),
    rule(Low, Some(Drift), "At risk: rising discretionary spending is eating into savings."),
    rule(Low, None, "At risk: consider raising the contribution or extending the deadline."),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub band: ProbabilityBand,
    pub top_positive: Option<Feature>,
    pub top_negative: Option<Feature>,
    pub note: &'static str,
}

/// Pick the strongest drivers and the matching note.
///
/// Above 0.5 the note describes the most positive contributor, otherwise the
/// most negative one. Ties keep the earlier feature.
pub fn explain(probability: f64, contributions: &[(Feature, f64)]) -> Explanation {
    let mut top_positive: Option<(Feature, f64)> = None;
    let mut top_negative: Option<(Feature, f64)> = None;
    for &(feature, c) in contributions {
        if top_positive.is_none_or(|(_, best)| c > best) {
            top_positive = Some((feature, c));
        }
        if top_negative.is_none_or(|(_, worst)| c < worst) {
            top_negative = Some((feature, c));
        }
    }

    let band = ProbabilityBand::of(probability);
    let driver = if probability > 0.5 {
        top_positive
    } else {
        top_negative
    };
    let group = driver.and_then(|(f, _)| f.group());

    let note = NOTE_RULES
        .iter()
        .find(|r| r.band == band && (r.group.is_none() || r.group == group))
        .map(|r| r.note)
        .unwrap_or_default();

    Explanation {
        band,
        top_positive: top_positive.map(|(f, _)| f),
        top_negative: top_negative.map(|(f, _)| f),
        note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_band_has_a_fallback() {
        for band in [High, Medium, Low] {
            assert!(NOTE_RULES.iter().any(|r| r.band == band && r.group.is_none()));
        }
    }

    #[test]
    fn band_edges_are_exclusive() {
        assert_eq!(ProbabilityBand::of(0.8), Medium);
        assert_eq!(ProbabilityBand::of(0.80001), High);
        assert_eq!(ProbabilityBand::of(0.5), Low);
    }
}
