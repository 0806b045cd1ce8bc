// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    EmergencyFund,
    ShortTerm,
    LongTerm,
    Retirement,
    Custom,
}

impl GoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::EmergencyFund => "emergency_fund",
            GoalType::ShortTerm => "short_term",
            GoalType::LongTerm => "long_term",
            GoalType::Retirement => "retirement",
            GoalType::Custom => "custom",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "emergency_fund" => Ok(GoalType::EmergencyFund),
            "short_term" => Ok(GoalType::ShortTerm),
            "long_term" => Ok(GoalType::LongTerm),
            "retirement" => Ok(GoalType::Retirement),
            "custom" => Ok(GoalType::Custom),
            other => Err(anyhow::anyhow!(
                "Invalid goal type '{}', expected one of emergency_fund, short_term, long_term, retirement, custom",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Active,
    Archived,
    Completed,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Archived => "archived",
            GoalStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(GoalStatus::Active),
            "archived" => Ok(GoalStatus::Archived),
            "completed" => Ok(GoalStatus::Completed),
            other => Err(anyhow::anyhow!(
                "Invalid goal status '{}', expected active, archived or completed",
                other
            )),
        }
    }
}

/// One savings objective.
///
/// `id` is `None` until the goal has been stored. `deadline` holds the first
/// day of the deadline month. A `monthly_contribution` of zero means "not set".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Option<i64>,
    pub user_id: String,
    pub name: String,
    pub r#type: GoalType,
    pub target_amount: f64,
    pub saved_amount: f64,
    pub monthly_contribution: f64,
    pub deadline: Option<NaiveDate>,
    pub priority: i64,
    pub status: GoalStatus,
    pub feasibility_score: Option<f64>,
    pub feasibility_note: Option<String>,
}

impl Goal {
    pub fn new(name: &str, r#type: GoalType, target_amount: f64, priority: i64) -> Self {
        Goal {
            id: None,
            user_id: crate::DEFAULT_USER.to_string(),
            name: name.to_string(),
            r#type,
            target_amount,
            saved_amount: 0.0,
            monthly_contribution: 0.0,
            deadline: None,
            priority,
            status: GoalStatus::Active,
            feasibility_score: None,
            feasibility_note: None,
        }
    }

    /// Progress in percent, clamped to 0..=100 for display.
    pub fn progress_pct(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 100.0;
        }
        (self.saved_amount / self.target_amount * 100.0).clamp(0.0, 100.0)
    }

    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.saved_amount).max(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    pub allocations: BTreeMap<i64, f64>,
    pub total_allocated: f64,
    pub unallocated: f64,
}

/// One user-month of saving activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsActivity {
    pub month_key: String, // YYYY-MM
    pub contributed: bool,
    pub total_sip_amount: f64,
    pub missed: bool,
}

impl SavingsActivity {
    /// Stand-in for a month with no stored record.
    pub fn empty(month_key: &str) -> Self {
        SavingsActivity {
            month_key: month_key.to_string(),
            contributed: false,
            total_sip_amount: 0.0,
            missed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumResult {
    pub streak_months: u32,
    pub consistency_pct: f64,
    pub missed_months: u32,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResult {
    pub months_to_target: i64,
    pub months_to_deadline: Option<i64>,
    pub delta_months: Option<i64>,
}

/// Behavioral aggregates persisted per user; `None` fields use fallbacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialBehavior {
    pub expense_volatility: Option<f64>,
    pub discretionary_drift: Option<f64>,
}
