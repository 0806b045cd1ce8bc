// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Months, NaiveDate};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::info;

use crate::models::{AllocationResult, FinancialBehavior, Goal, GoalStatus, GoalType, SavingsActivity};
use crate::utils::{amount_or_zero, amount_to_text, fmt_month, parse_month};

const GOAL_COLUMNS: &str = "id, user_id, name, type, target_amount, saved_amount, \
     monthly_contribution, deadline, priority, status, feasibility_score, feasibility_note";

/// Amount column that tolerates TEXT, numeric or NULL storage.
fn amount_col(r: &Row<'_>, idx: usize) -> rusqlite::Result<f64> {
    Ok(match r.get_ref(idx)? {
        ValueRef::Text(t) => amount_or_zero(&String::from_utf8_lossy(t)),
        ValueRef::Integer(i) => i as f64,
        ValueRef::Real(f) if f.is_finite() => f,
        _ => 0.0,
    })
}

fn opt_amount_col(r: &Row<'_>, idx: usize) -> rusqlite::Result<Option<f64>> {
    match r.get_ref(idx)? {
        ValueRef::Null => Ok(None),
        _ => amount_col(r, idx).map(Some),
    }
}

fn goal_from_row(r: &Row<'_>) -> rusqlite::Result<Goal> {
    let type_s: String = r.get(3)?;
    let status_s: String = r.get(9)?;
    let deadline: Option<String> = r.get(7)?;
    Ok(Goal {
        id: Some(r.get(0)?),
        user_id: r.get(1)?,
        name: r.get(2)?,
        r#type: type_s.parse().unwrap_or(GoalType::Custom),
        target_amount: amount_col(r, 4)?,
        saved_amount: amount_col(r, 5)?,
        monthly_contribution: amount_col(r, 6)?,
        deadline: deadline.and_then(|d| parse_month(&d).ok()),
        priority: r.get(8)?,
        status: status_s.parse().unwrap_or(GoalStatus::Archived),
        feasibility_score: r.get(10)?,
        feasibility_note: r.get(11)?,
    })
}

pub fn insert_goal(conn: &Connection, goal: &Goal) -> Result<i64> {
    conn.execute(
        "INSERT INTO goals(user_id, name, type, target_amount, saved_amount,
                           monthly_contribution, deadline, priority, status)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
        params![
            goal.user_id,
            goal.name,
            goal.r#type.as_str(),
            amount_to_text(goal.target_amount),
            amount_to_text(goal.saved_amount),
            amount_to_text(goal.monthly_contribution),
            goal.deadline.map(fmt_month),
            goal.priority,
            goal.status.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_goal(conn: &Connection, id: i64) -> Result<Goal> {
    let sql = format!("SELECT {} FROM goals WHERE id=?1", GOAL_COLUMNS);
    conn.query_row(&sql, params![id], goal_from_row)
        .optional()?
        .with_context(|| format!("Goal {} not found", id))
}

/// Goals for `user_id` in creation order, optionally filtered by status.
pub fn list_goals(
    conn: &Connection,
    user_id: &str,
    status: Option<GoalStatus>,
) -> Result<Vec<Goal>> {
    let sql = format!(
        "SELECT {} FROM goals WHERE user_id=?1 AND (?2 IS NULL OR status=?2) ORDER BY id",
        GOAL_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id, status.map(|s| s.as_str())], goal_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn active_goals(conn: &Connection, user_id: &str) -> Result<Vec<Goal>> {
    list_goals(conn, user_id, Some(GoalStatus::Active))
}

pub fn set_goal_status(conn: &Connection, id: i64, status: GoalStatus) -> Result<()> {
    let n = conn.execute(
        "UPDATE goals SET status=?1 WHERE id=?2",
        params![status.as_str(), id],
    )?;
    if n == 0 {
        return Err(anyhow::anyhow!("Goal {} not found", id));
    }
    Ok(())
}

/// Add `amount` to the saved balance. Clears any stale feasibility score.
pub fn deposit(conn: &Connection, id: i64, amount: f64) -> Result<f64> {
    let goal = get_goal(conn, id)?;
    let saved = goal.saved_amount + amount;
    conn.execute(
        "UPDATE goals SET saved_amount=?1, feasibility_score=NULL, feasibility_note=NULL
         WHERE id=?2",
        params![amount_to_text(saved), id],
    )?;
    Ok(saved)
}

/// Write every allocated amount as the goal's monthly contribution.
pub fn apply_allocation(conn: &mut Connection, result: &AllocationResult) -> Result<usize> {
    let tx = conn.transaction()?;
    let mut updated = 0;
    {
        let mut stmt = tx.prepare("UPDATE goals SET monthly_contribution=?1 WHERE id=?2")?;
        for (id, amount) in &result.allocations {
            updated += stmt.execute(params![amount_to_text(*amount), id])?;
        }
    }
    tx.commit()?;
    info!(goals = updated, total = result.total_allocated, "allocation applied");
    Ok(updated)
}

pub fn save_feasibility(conn: &Connection, id: i64, probability: f64, note: &str) -> Result<()> {
    let n = conn.execute(
        "UPDATE goals SET feasibility_score=?1, feasibility_note=?2 WHERE id=?3",
        params![probability, note, id],
    )?;
    if n == 0 {
        return Err(anyhow::anyhow!("Goal {} not found", id));
    }
    Ok(())
}

/// Mark `month_key` as contributed, adding `amount` to that month's SIP total.
pub fn record_contribution(
    conn: &Connection,
    user_id: &str,
    month_key: &str,
    amount: f64,
) -> Result<()> {
    let existing: Option<f64> = conn
        .query_row(
            "SELECT total_sip_amount FROM savings_activity WHERE user_id=?1 AND month_key=?2",
            params![user_id, month_key],
            |r| amount_col(r, 0),
        )
        .optional()?;
    let total = existing.unwrap_or(0.0) + amount;
    conn.execute(
        "INSERT INTO savings_activity(user_id, month_key, contributed, total_sip_amount, missed)
         VALUES (?1,?2,1,?3,0)
         ON CONFLICT(user_id, month_key) DO UPDATE SET
             contributed=1, missed=0, total_sip_amount=excluded.total_sip_amount",
        params![user_id, month_key, amount_to_text(total)],
    )?;
    Ok(())
}

/// Mark `month_key` as missed. A month that already has a contribution is
/// left alone; returns whether the record was written.
pub fn record_missed(conn: &Connection, user_id: &str, month_key: &str) -> Result<bool> {
    let n = conn.execute(
        "INSERT INTO savings_activity(user_id, month_key, contributed, total_sip_amount, missed)
         VALUES (?1,?2,0,'0',1)
         ON CONFLICT(user_id, month_key) DO UPDATE SET missed=1 WHERE contributed=0",
        params![user_id, month_key],
    )?;
    Ok(n > 0)
}

/// Stored months in the `months`-long window ending at the month of
/// `newest`, newest first. Gaps are not filled here.
pub fn recent_activity(
    conn: &Connection,
    user_id: &str,
    newest: NaiveDate,
    months: usize,
) -> Result<Vec<SavingsActivity>> {
    if months == 0 {
        return Ok(Vec::new());
    }
    let newest_key = fmt_month(newest);
    let oldest_key = newest
        .checked_sub_months(Months::new(months as u32 - 1))
        .map(fmt_month)
        .with_context(|| format!("Window of {} months before {} out of range", months, newest_key))?;
    let mut stmt = conn.prepare(
        "SELECT month_key, contributed, total_sip_amount, missed FROM savings_activity
         WHERE user_id=?1 AND month_key BETWEEN ?2 AND ?3 ORDER BY month_key DESC",
    )?;
    let rows = stmt.query_map(params![user_id, oldest_key, newest_key], |r| {
        Ok(SavingsActivity {
            month_key: r.get(0)?,
            contributed: r.get(1)?,
            total_sip_amount: amount_col(r, 2)?,
            missed: r.get(3)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn get_behavior(conn: &Connection, user_id: &str) -> Result<FinancialBehavior> {
    let row: Option<FinancialBehavior> = conn
        .query_row(
            "SELECT expense_volatility, discretionary_drift FROM financial_behavior WHERE user_id=?1",
            params![user_id],
            |r| {
                Ok(FinancialBehavior {
                    expense_volatility: opt_amount_col(r, 0)?,
                    discretionary_drift: opt_amount_col(r, 1)?,
                })
            },
        )
        .optional()?;
    Ok(row.unwrap_or_default())
}

pub fn set_behavior(conn: &Connection, user_id: &str, behavior: &FinancialBehavior) -> Result<()> {
    conn.execute(
        "INSERT INTO financial_behavior(user_id, expense_volatility, discretionary_drift, updated_at)
         VALUES (?1,?2,?3,datetime('now'))
         ON CONFLICT(user_id) DO UPDATE SET
             expense_volatility=excluded.expense_volatility,
             discretionary_drift=excluded.discretionary_drift,
             updated_at=excluded.updated_at",
        params![
            user_id,
            behavior.expense_volatility.map(amount_to_text),
            behavior.discretionary_drift.map(amount_to_text)
        ],
    )?;
    Ok(())
}
