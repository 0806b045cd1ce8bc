// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Session;
use crate::models::{AllocationResult, TimelineResult};
use crate::planner::{NEVER_MONTHS, allocation, timeline};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};
use crate::{settings, store};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &mut Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("allocate", sub)) => allocate(conn, s, sub)?,
        Some(("timeline", sub)) => timeline_cmd(conn, s, sub)?,
        _ => {}
    }
    Ok(())
}

/// Run the allocation for the user's active goals and optionally store it.
pub fn run_allocation(
    conn: &mut Connection,
    user: &str,
    surplus: Option<f64>,
    apply: bool,
) -> Result<AllocationResult> {
    let surplus = match surplus {
        Some(v) => v,
        None => settings::avg_monthly_surplus(conn)?,
    };
    let goals = store::active_goals(conn, user)?;
    let result = allocation::allocate(surplus, &goals);
    if apply {
        store::apply_allocation(conn, &result)?;
    }
    Ok(result)
}

fn allocate(conn: &mut Connection, s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let surplus = match sub.get_one::<String>("surplus") {
        Some(v) => Some(parse_amount(v)?),
        None => None,
    };
    let apply = sub.get_flag("apply");
    let result = run_allocation(conn, &s.user, surplus, apply)?;
    if maybe_print_json(sub.get_flag("json"), &result)? {
        return Ok(());
    }

    let goals = store::active_goals(conn, &s.user)?;
    let mut rows = Vec::new();
    for (id, amount) in &result.allocations {
        let name = goals
            .iter()
            .find(|g| g.id == Some(*id))
            .map(|g| g.name.clone())
            .unwrap_or_default();
        rows.push(vec![id.to_string(), name, fmt_money(*amount)]);
    }
    rows.push(vec![
        String::new(),
        "Total allocated".into(),
        fmt_money(result.total_allocated),
    ]);
    rows.push(vec![
        String::new(),
        "Unallocated".into(),
        fmt_money(result.unallocated),
    ]);
    println!("{}", pretty_table(&["ID", "Goal", "Monthly"], rows));
    if apply {
        println!("Monthly contributions updated");
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct GoalTimeline {
    pub goal_id: Option<i64>,
    pub name: String,
    pub annual_return: f64,
    pub asset_mix: timeline::AssetMix,
    #[serde(flatten)]
    pub result: TimelineResult,
}

pub fn project_goals(conn: &Connection, s: &Session) -> Result<Vec<GoalTimeline>> {
    let goals = store::active_goals(conn, &s.user)?;
    Ok(goals
        .into_iter()
        .map(|g| {
            let horizon = g.deadline.map(|d| timeline::months_between(s.today, d));
            let annual_return = timeline::expected_return_for_goal(g.r#type, horizon);
            let result = timeline::simulate(
                g.target_amount,
                g.saved_amount,
                g.monthly_contribution,
                g.deadline,
                annual_return,
                s.today,
            );
            GoalTimeline {
                goal_id: g.id,
                name: g.name,
                annual_return,
                asset_mix: timeline::asset_mix_for_goal(g.r#type, horizon),
                result,
            }
        })
        .collect())
}

/// Human-readable schedule position for one projection.
pub fn schedule_label(result: &TimelineResult) -> String {
    if result.months_to_target == NEVER_MONTHS {
        return "set a contribution".to_string();
    }
    match result.delta_months {
        None => "no deadline".to_string(),
        Some(d) if d > 0 => format!("{} months late", d),
        Some(0) => "on time".to_string(),
        Some(d) => format!("{} months early", -d),
    }
}

fn timeline_cmd(conn: &Connection, s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let projections = project_goals(conn, s)?;
    if maybe_print_json(sub.get_flag("json"), &projections)? {
        return Ok(());
    }
    let months = |m: i64| {
        if m == NEVER_MONTHS {
            "never".to_string()
        } else {
            m.to_string()
        }
    };
    let rows = projections
        .into_iter()
        .map(|p| {
            let status = schedule_label(&p.result);
            vec![
                p.goal_id.map(|i| i.to_string()).unwrap_or_default(),
                p.name,
                format!("{:.0}%", p.annual_return * 100.0),
                format!(
                    "{}/{}/{}",
                    p.asset_mix.equity, p.asset_mix.debt, p.asset_mix.liquid
                ),
                months(p.result.months_to_target),
                p.result
                    .months_to_deadline
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "-".into()),
                status,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "ID",
                "Goal",
                "Return",
                "Equity/Debt/Liquid",
                "Months to target",
                "Months to deadline",
                "Status"
            ],
            rows
        )
    );
    Ok(())
}
