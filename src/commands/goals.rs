// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Session;
use crate::models::{Goal, GoalStatus, GoalType};
use crate::store;
use crate::utils::{fmt_money, fmt_month, maybe_print_json, parse_amount, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, s, sub)?,
        Some(("list", sub)) => list(conn, s, sub)?,
        Some(("status", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let to: GoalStatus = sub.get_one::<String>("to").unwrap().parse()?;
            store::set_goal_status(conn, id, to)?;
            println!("Goal {} is now {}", id, to);
        }
        Some(("deposit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
            let saved = store::deposit(conn, id, amount)?;
            println!("Goal {} saved amount is now {}", id, fmt_money(saved));
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let r#type: GoalType = sub.get_one::<String>("type").unwrap().parse()?;
    let target = parse_amount(sub.get_one::<String>("target").unwrap())?;
    let priority = *sub.get_one::<i64>("priority").unwrap();

    let mut goal = Goal::new(&name, r#type, target, priority);
    goal.user_id = s.user.clone();
    if let Some(v) = sub.get_one::<String>("saved") {
        goal.saved_amount = parse_amount(v)?;
    }
    if let Some(v) = sub.get_one::<String>("monthly") {
        goal.monthly_contribution = parse_amount(v)?;
    }
    if let Some(v) = sub.get_one::<String>("deadline") {
        goal.deadline = Some(parse_month(v)?);
    }

    if r#type == GoalType::EmergencyFund
        && store::active_goals(conn, &s.user)?
            .iter()
            .any(|g| g.r#type == GoalType::EmergencyFund)
    {
        eprintln!("warning: an active emergency fund already exists; only the first is prioritised");
    }

    let id = store::insert_goal(conn, &goal)?;
    println!("Added goal {} '{}' ({}, priority {})", id, name, r#type, priority);
    Ok(())
}

fn list(conn: &Connection, s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let status = match sub.get_one::<String>("status") {
        Some(v) => Some(v.parse::<GoalStatus>()?),
        None => None,
    };
    let goals = store::list_goals(conn, &s.user, status)?;
    if maybe_print_json(sub.get_flag("json"), &goals)? {
        return Ok(());
    }
    let rows = goals
        .iter()
        .map(|g| {
            vec![
                g.id.map(|i| i.to_string()).unwrap_or_default(),
                g.name.clone(),
                g.r#type.to_string(),
                g.priority.to_string(),
                g.status.to_string(),
                fmt_money(g.target_amount),
                fmt_money(g.saved_amount),
                format!("{:.0}%", g.progress_pct()),
                fmt_money(g.monthly_contribution),
                g.deadline.map(fmt_month).unwrap_or_else(|| "-".into()),
                g.feasibility_score
                    .map(|p| format!("{:.0}%", p * 100.0))
                    .unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "ID", "Name", "Type", "Prio", "Status", "Target", "Saved", "Progress", "Monthly",
                "Deadline", "Feasible",
            ],
            rows
        )
    );
    Ok(())
}
