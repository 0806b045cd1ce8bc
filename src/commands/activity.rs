// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Session;
use crate::models::MomentumResult;
use crate::planner::momentum;
use crate::store;
use crate::utils::{fmt_money, fmt_month, maybe_print_json, parse_amount, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("contribute", sub)) => {
            let month = month_arg(s, sub)?;
            let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
            store::record_contribution(conn, &s.user, &month, amount)?;
            println!("Recorded contribution of {} for {}", fmt_money(amount), month);
        }
        Some(("miss", sub)) => {
            let month = month_arg(s, sub)?;
            if store::record_missed(conn, &s.user, &month)? {
                println!("Marked {} as missed", month);
            } else {
                println!("{} already has a contribution, left unchanged", month);
            }
        }
        Some(("momentum", sub)) => show_momentum(conn, s, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_arg(s: &Session, sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("month") {
        Some(v) => Ok(fmt_month(parse_month(v)?)),
        None => Ok(fmt_month(s.today)),
    }
}

/// Momentum over the last `window_months` months ending this month.
pub fn current_momentum(
    conn: &Connection,
    s: &Session,
    window_months: usize,
) -> Result<MomentumResult> {
    let records = store::recent_activity(conn, &s.user, s.today, window_months)?;
    let window = momentum::fill_window(&records, s.today, window_months);
    Ok(momentum::compute(&window, window_months))
}

fn show_momentum(conn: &Connection, s: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let months = *sub.get_one::<usize>("months").unwrap();
    let result = current_momentum(conn, s, months)?;
    if maybe_print_json(sub.get_flag("json"), &result)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Streak", "Consistency", "Missed", "Score"],
            vec![vec![
                format!("{} months", result.streak_months),
                format!("{:.2}%", result.consistency_pct),
                result.missed_months.to_string(),
                format!("{}/100", result.score),
            ]]
        )
    );
    Ok(())
}
