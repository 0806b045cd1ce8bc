// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Goal;

/// Months assumed when a goal has no deadline.
pub const DEFAULT_MONTHS_LEFT: f64 = 12.0;
/// Ten days, so the monthly requirement never divides by ~0.
pub const MIN_MONTHS_LEFT: f64 = 10.0 / 30.0;
pub const SURPLUS_FROM_INCOME: f64 = 0.20;
pub const VOLATILITY_FROM_SURPLUS: f64 = 0.10;
pub const SAFE_SURPLUS_SHARE: f64 = 0.85;
pub const BEHAVIORAL_CONSISTENCY: f64 = 0.7;

/// Every input the model may reference, by its artifact name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    LogTargetAmount,
    LogRemainingAmount,
    MonthsLeft,
    MonthlyRequired,
    ProgressRatio,
    MonthlyIncome,
    AvgMonthlySurplus,
    ExpenseVolatility,
    SafeSurplus,
    RequiredToSafeSurplus,
    RequiredToIncome,
    SurplusToIncome,
    VolatilityToSurplus,
    ContributionStreak,
    MissedSavingMonths,
    BehavioralConsistency,
    DiscretionaryDrift,
}

/// What kind of pressure a feature represents, used to pick explanations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverGroup {
    Habit,
    Cashflow,
    Volatility,
    Time,
    Drift,
}

impl Feature {
    pub const ALL: [Feature; 17] = [
        Feature::LogTargetAmount,
        Feature::LogRemainingAmount,
        Feature::MonthsLeft,
        Feature::MonthlyRequired,
        Feature::ProgressRatio,
        Feature::MonthlyIncome,
        Feature::AvgMonthlySurplus,
        Feature::ExpenseVolatility,
        Feature::SafeSurplus,
        Feature::RequiredToSafeSurplus,
        Feature::RequiredToIncome,
        Feature::SurplusToIncome,
        Feature::VolatilityToSurplus,
        Feature::ContributionStreak,
        Feature::MissedSavingMonths,
        Feature::BehavioralConsistency,
        Feature::DiscretionaryDrift,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Feature::LogTargetAmount => "log_target_amount",
            Feature::LogRemainingAmount => "log_remaining_amount",
            Feature::MonthsLeft => "months_left",
            Feature::MonthlyRequired => "monthly_required",
            Feature::ProgressRatio => "progress_ratio",
            Feature::MonthlyIncome => "monthly_income",
            Feature::AvgMonthlySurplus => "avg_monthly_surplus",
            Feature::ExpenseVolatility => "expense_volatility",
            Feature::SafeSurplus => "safe_surplus",
            Feature::RequiredToSafeSurplus => "required_to_safe_surplus",
            Feature::RequiredToIncome => "required_to_income",
            Feature::SurplusToIncome => "surplus_to_income",
            Feature::VolatilityToSurplus => "volatility_to_surplus",
            Feature::ContributionStreak => "contribution_streak",
            Feature::MissedSavingMonths => "missed_saving_months",
            Feature::BehavioralConsistency => "behavioral_consistency",
            Feature::DiscretionaryDrift => "discretionary_drift",
        }
    }

    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Ratios that mention both volatility and surplus count as cashflow.
    pub fn group(&self) -> Option<DriverGroup> {
        match self {
            Feature::ContributionStreak | Feature::BehavioralConsistency => {
                Some(DriverGroup::Habit)
            }
            Feature::MonthlyIncome
            | Feature::AvgMonthlySurplus
            | Feature::SafeSurplus
            | Feature::RequiredToSafeSurplus
            | Feature::RequiredToIncome
            | Feature::SurplusToIncome
            | Feature::VolatilityToSurplus => Some(DriverGroup::Cashflow),
            Feature::ExpenseVolatility => Some(DriverGroup::Volatility),
            Feature::MonthsLeft => Some(DriverGroup::Time),
            Feature::DiscretionaryDrift => Some(DriverGroup::Drift),
            Feature::LogTargetAmount
            | Feature::LogRemainingAmount
            | Feature::MonthlyRequired
            | Feature::ProgressRatio
            | Feature::MissedSavingMonths => None,
        }
    }
}

/// Raw signals gathered for one goal before feature engineering.
#[derive(Debug, Clone)]
pub struct FeatureInputs<'a> {
    pub goal: &'a Goal,
    pub today: NaiveDate,
    pub monthly_income: f64,
    pub avg_monthly_surplus: Option<f64>,
    pub expense_volatility: Option<f64>,
    pub discretionary_drift: Option<f64>,
    pub contribution_streak: u32,
    pub missed_saving_months: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    pub log_target_amount: f64,
    pub log_remaining_amount: f64,
    pub months_left: f64,
    pub monthly_required: f64,
    pub progress_ratio: f64,
    pub monthly_income: f64,
    pub avg_monthly_surplus: f64,
    pub expense_volatility: f64,
    pub safe_surplus: f64,
    pub required_to_safe_surplus: f64,
    pub required_to_income: f64,
    pub surplus_to_income: f64,
    pub volatility_to_surplus: f64,
    pub contribution_streak: f64,
    pub missed_saving_months: f64,
    pub behavioral_consistency: f64,
    pub discretionary_drift: f64,
}

impl FeatureVector {
    pub fn build(inputs: &FeatureInputs<'_>) -> FeatureVector {
        let goal = inputs.goal;
        let target = goal.target_amount.max(0.0);
        let remaining = goal.remaining();
        let months_left = months_left(goal.deadline, inputs.today);
        let monthly_required = remaining / months_left;
        let progress_ratio = if target <= 0.0 {
            1.0
        } else {
            (goal.saved_amount / target).clamp(0.0, 1.0)
        };

        let income = inputs.monthly_income.max(0.0);
        let avg_surplus = inputs
            .avg_monthly_surplus
            .filter(|s| *s > 0.0)
            .unwrap_or(income * SURPLUS_FROM_INCOME);
        let volatility = inputs
            .expense_volatility
            .unwrap_or(avg_surplus * VOLATILITY_FROM_SURPLUS);
        let safe_surplus = avg_surplus * SAFE_SURPLUS_SHARE;

        FeatureVector {
            log_target_amount: target.ln_1p(),
            log_remaining_amount: remaining.ln_1p(),
            months_left,
            monthly_required,
            progress_ratio,
            monthly_income: income,
            avg_monthly_surplus: avg_surplus,
            expense_volatility: volatility,
            safe_surplus,
            required_to_safe_surplus: monthly_required / safe_surplus.max(1.0),
            required_to_income: monthly_required / income.max(1.0),
            surplus_to_income: avg_surplus / income.max(1.0),
            volatility_to_surplus: volatility / avg_surplus.max(1.0),
            contribution_streak: inputs.contribution_streak as f64,
            missed_saving_months: inputs.missed_saving_months as f64,
            behavioral_consistency: BEHAVIORAL_CONSISTENCY,
            discretionary_drift: inputs.discretionary_drift.unwrap_or(0.0),
        }
    }

    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::LogTargetAmount => self.log_target_amount,
            Feature::LogRemainingAmount => self.log_remaining_amount,
            Feature::MonthsLeft => self.months_left,
            Feature::MonthlyRequired => self.monthly_required,
            Feature::ProgressRatio => self.progress_ratio,
            Feature::MonthlyIncome => self.monthly_income,
            Feature::AvgMonthlySurplus => self.avg_monthly_surplus,
            Feature::ExpenseVolatility => self.expense_volatility,
            Feature::SafeSurplus => self.safe_surplus,
            Feature::RequiredToSafeSurplus => self.required_to_safe_surplus,
            Feature::RequiredToIncome => self.required_to_income,
            Feature::SurplusToIncome => self.surplus_to_income,
            Feature::VolatilityToSurplus => self.volatility_to_surplus,
            Feature::ContributionStreak => self.contribution_streak,
            Feature::MissedSavingMonths => self.missed_saving_months,
            Feature::BehavioralConsistency => self.behavioral_consistency,
            Feature::DiscretionaryDrift => self.discretionary_drift,
        }
    }
}

/// Months until the end of the deadline month, in 30-day months.
pub fn months_left(deadline: Option<NaiveDate>, today: NaiveDate) -> f64 {
    let Some(deadline) = deadline else {
        return DEFAULT_MONTHS_LEFT;
    };
    let end = crate::utils::month_end_of(deadline).unwrap_or(deadline);
    let days = (end - today).num_days() as f64;
    (days / 30.0).max(MIN_MONTHS_LEFT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_lookup() {
        for f in Feature::ALL {
            assert_eq!(Feature::from_name(f.name()), Some(f));
        }
        assert_eq!(Feature::from_name("months left"), None);
    }

    #[test]
    fn months_left_defaults_and_floor() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        assert_eq!(months_left(None, today), DEFAULT_MONTHS_LEFT);
        // Already past the deadline.
        let past = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(months_left(Some(past), today), MIN_MONTHS_LEFT);
        // 2026-03-31 is 70 days away.
        let march = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert!((months_left(Some(march), today) - 70.0 / 30.0).abs() < 1e-12);
    }
}
