// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Logistic feasibility scoring for individual goals.

pub mod explain;
pub mod features;
pub mod model;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use self::explain::{ProbabilityBand, explain};
use self::features::{Feature, FeatureInputs, FeatureVector};
use self::model::ModelContext;
use crate::models::{FinancialBehavior, Goal};
use crate::planner::momentum;
use crate::{settings, store};

/// Months of activity history feeding the behavioral features.
pub const BEHAVIOR_WINDOW_MONTHS: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeasibilityReport {
    pub goal_id: Option<i64>,
    pub probability: f64,
    pub logit: f64,
    pub band: ProbabilityBand,
    pub top_positive: Option<Feature>,
    pub top_negative: Option<Feature>,
    pub note: String,
}

pub struct FeasibilityPredictor {
    ctx: Arc<ModelContext>,
}

impl FeasibilityPredictor {
    pub fn new(ctx: Arc<ModelContext>) -> Self {
        FeasibilityPredictor { ctx }
    }

    pub fn is_enabled(&self) -> bool {
        self.ctx.model().is_some()
    }

    /// Score a prepared feature vector. `None` when no model is available.
    pub fn predict(&self, features: &FeatureVector) -> Option<FeasibilityReport> {
        let model = self.ctx.model()?;
        let scored = model.score(features);
        let why = explain(scored.probability, &scored.contributions);
        Some(FeasibilityReport {
            goal_id: None,
            probability: scored.probability,
            logit: scored.logit,
            band: why.band,
            top_positive: why.top_positive,
            top_negative: why.top_negative,
            note: why.note.to_string(),
        })
    }

    /// Skip goals that already carry a score; compute the rest.
    pub fn ensure_computed(
        &self,
        conn: &Connection,
        goal: &Goal,
        today: NaiveDate,
    ) -> Option<FeasibilityReport> {
        if goal.feasibility_score.is_some() {
            return None;
        }
        self.compute_and_save(conn, goal, today)
    }

    /// Recompute the score for `goal` and write it back to the goal row.
    ///
    /// Storage failures are logged and the goal is skipped.
    pub fn compute_and_save(
        &self,
        conn: &Connection,
        goal: &Goal,
        today: NaiveDate,
    ) -> Option<FeasibilityReport> {
        if !self.is_enabled() {
            return None;
        }
        let Some(id) = goal.id else {
            debug!(name = %goal.name, "goal has no id, skipping feasibility");
            return None;
        };
        let features = gather_features(conn, goal, today);
        let mut report = self.predict(&features)?;
        report.goal_id = Some(id);

        match store::save_feasibility(conn, id, report.probability, &report.note)
            .with_context(|| format!("Save feasibility for goal {}", id))
        {
            Ok(()) => Some(report),
            Err(err) => {
                warn!(goal_id = id, error = %format!("{:#}", err), "skipping goal");
                None
            }
        }
    }
}

/// Collect everything the model needs for `goal`, falling back to
/// heuristics wherever stored data is missing or unreadable.
pub fn gather_features(conn: &Connection, goal: &Goal, today: NaiveDate) -> FeatureVector {
    let income = or_fallback(
        settings::get_f64(conn, settings::MONTHLY_INCOME),
        "monthly income",
    )
    .unwrap_or(0.0);
    let avg_surplus = or_fallback(
        settings::get_f64(conn, settings::AVG_MONTHLY_SURPLUS),
        "average surplus",
    );
    let behavior: FinancialBehavior =
        or_fallback(store::get_behavior(conn, &goal.user_id), "financial behavior");
    let records = or_fallback(
        store::recent_activity(conn, &goal.user_id, today, BEHAVIOR_WINDOW_MONTHS),
        "savings activity",
    );
    let window = momentum::fill_window(&records, today, BEHAVIOR_WINDOW_MONTHS);
    let momentum = momentum::compute(&window, BEHAVIOR_WINDOW_MONTHS);

    FeatureVector::build(&FeatureInputs {
        goal,
        today,
        monthly_income: income,
        avg_monthly_surplus: avg_surplus,
        expense_volatility: behavior.expense_volatility,
        discretionary_drift: behavior.discretionary_drift,
        contribution_streak: momentum.streak_months,
        missed_saving_months: momentum.missed_months,
    })
}

fn or_fallback<T: Default>(r: Result<T>, what: &str) -> T {
    r.unwrap_or_else(|err| {
        debug!(error = %err, "no stored {}, using fallback", what);
        T::default()
    })
}
