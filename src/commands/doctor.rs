// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Session;
use crate::models::GoalType;
use crate::planner::feasibility::model::FeasibilityModel;
use crate::utils::pretty_table;
use crate::{settings, store};
use anyhow::Result;
use rusqlite::Connection;

/// Findings as (issue, detail) pairs; empty means healthy.
pub fn diagnose(conn: &Connection, s: &Session) -> Result<Vec<(String, String)>> {
    let mut rows = Vec::new();
    let goals = store::active_goals(conn, &s.user)?;

    // 1) Only the first emergency fund gets priority
    let emergencies: Vec<_> = goals
        .iter()
        .filter(|g| g.r#type == GoalType::EmergencyFund)
        .collect();
    if emergencies.len() > 1 {
        let ids: Vec<String> = emergencies
            .iter()
            .filter_map(|g| g.id.map(|i| i.to_string()))
            .collect();
        rows.push(("multiple_emergency_funds".into(), ids.join(", ")));
    }

    // 2) Goals that cannot be projected
    for g in &goals {
        if g.monthly_contribution <= 0.0 && g.saved_amount < g.target_amount {
            rows.push((
                "no_monthly_contribution".into(),
                format!("{} {}", g.id.unwrap_or_default(), g.name),
            ));
        }
    }

    // 3) Surplus to allocate
    if settings::avg_monthly_surplus(conn)? <= 0.0 {
        rows.push((
            "no_surplus".into(),
            format!("set {}", settings::AVG_MONTHLY_SURPLUS),
        ));
    }

    // 4) Model artifact
    let path = settings::model_path(conn)?;
    if let Err(err) = FeasibilityModel::from_file(&path) {
        rows.push(("model_unavailable".into(), err.to_string()));
    }

    Ok(rows)
}

pub fn handle(conn: &Connection, s: &Session) -> Result<()> {
    let rows = diagnose(conn, s)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = rows.into_iter().map(|(a, b)| vec![a, b]).collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
