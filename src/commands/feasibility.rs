// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Session;
use crate::models::GoalStatus;
use crate::planner::feasibility::model::ModelContext;
use crate::planner::feasibility::{FeasibilityPredictor, FeasibilityReport};
use crate::utils::{maybe_print_json, pretty_table};
use crate::{settings, store};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;

pub fn handle(conn: &Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("compute", sub)) = m.subcommand() {
        compute(conn, s, sub)?;
    }
    Ok(())
}

/// Score the user's active goals (or just `only`), skipping goals that
/// already carry a score unless `force` is set.
pub fn score_goals(
    conn: &Connection,
    s: &Session,
    predictor: &FeasibilityPredictor,
    only: Option<i64>,
    force: bool,
) -> Result<Vec<FeasibilityReport>> {
    let goals = match only {
        Some(id) => {
            let goal = store::get_goal(conn, id)?;
            if goal.user_id != s.user {
                return Err(anyhow!("Goal {} does not belong to user '{}'", id, s.user));
            }
            if goal.status != GoalStatus::Active {
                return Err(anyhow!(
                    "Goal {} is {}, only active goals are scored",
                    id,
                    goal.status
                ));
            }
            vec![goal]
        }
        None => store::active_goals(conn, &s.user)?,
    };
    let mut out = Vec::new();
    for goal in &goals {
        let report = if force {
            predictor.compute_and_save(conn, goal, s.today)
        } else {
            predictor.ensure_computed(conn, goal, s.today)
        };
        out.extend(report);
    }
    Ok(out)
}

fn compute(conn: &Connection, s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let path = match sub.get_one::<String>("model") {
        Some(p) => PathBuf::from(p.trim()),
        None => settings::model_path(conn)?,
    };
    let predictor = FeasibilityPredictor::new(Arc::new(ModelContext::from_path(&path)));
    if !predictor.is_enabled() {
        println!("Feasibility model not available at {}", path.display());
        return Ok(());
    }

    let only = sub.get_one::<i64>("id").copied();
    let reports = score_goals(conn, s, &predictor, only, sub.get_flag("force"))?;
    if maybe_print_json(sub.get_flag("json"), &reports)? {
        return Ok(());
    }
    if reports.is_empty() {
        println!("Nothing to score; use --force to recompute existing scores");
        return Ok(());
    }
    let rows = reports
        .into_iter()
        .map(|r| {
            vec![
                r.goal_id.map(|i| i.to_string()).unwrap_or_default(),
                format!("{:.1}%", r.probability * 100.0),
                r.top_positive.map(|f| f.name().to_string()).unwrap_or_default(),
                r.top_negative.map(|f| f.name().to_string()).unwrap_or_default(),
                r.note,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Probability", "Helps most", "Hurts most", "Note"], rows)
    );
    Ok(())
}
