// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Session;
use crate::models::FinancialBehavior;
use crate::settings::{self, KNOWN_KEYS, MODEL_PATH};
use crate::store;
use crate::utils::{parse_amount, parse_signed, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, s: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().as_str();
            let raw = sub.get_one::<String>("value").unwrap().trim();
            let value = if key == MODEL_PATH {
                raw.to_string()
            } else {
                parse_amount(raw)?.to_string()
            };
            settings::set(conn, key, &value)?;
            println!("{} = {}", key, value);
        }
        Some(("get", sub)) => {
            let keys: Vec<&str> = match sub.get_one::<String>("key") {
                Some(k) => vec![k.as_str()],
                None => KNOWN_KEYS.to_vec(),
            };
            let mut rows = Vec::new();
            for k in keys {
                let v = settings::get(conn, k)?.unwrap_or_else(|| "-".into());
                rows.push(vec![k.to_string(), v]);
            }
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        Some(("behavior", sub)) => {
            let mut behavior = store::get_behavior(conn, &s.user)?;
            if let Some(v) = sub.get_one::<String>("volatility") {
                behavior.expense_volatility = Some(parse_amount(v)?);
            }
            if let Some(v) = sub.get_one::<String>("drift") {
                behavior.discretionary_drift = Some(parse_signed(v)?);
            }
            store::set_behavior(conn, &s.user, &behavior)?;
            print_behavior(&behavior);
        }
        _ => {}
    }
    Ok(())
}

fn print_behavior(b: &FinancialBehavior) {
    let show = |v: Option<f64>| v.map(|x| format!("{:.2}", x)).unwrap_or_else(|| "-".into());
    println!(
        "{}",
        pretty_table(
            &["Expense volatility", "Discretionary drift"],
            vec![vec![show(b.expense_volatility), show(b.discretionary_drift)]]
        )
    );
}
