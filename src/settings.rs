// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::PathBuf;

pub const AVG_MONTHLY_SURPLUS: &str = "avg_monthly_surplus";
pub const MONTHLY_INCOME: &str = "monthly_income";
pub const MODEL_PATH: &str = "model_path";

pub const KNOWN_KEYS: [&str; 3] = [AVG_MONTHLY_SURPLUS, MONTHLY_INCOME, MODEL_PATH];

pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Numeric setting; a stored value that does not parse reads as 0.
pub fn get_f64(conn: &Connection, key: &str) -> Result<Option<f64>> {
    Ok(get(conn, key)?.map(|s| crate::utils::amount_or_zero(&s)))
}

pub fn avg_monthly_surplus(conn: &Connection) -> Result<f64> {
    Ok(get_f64(conn, AVG_MONTHLY_SURPLUS)?.unwrap_or(0.0))
}

pub fn set_avg_monthly_surplus(conn: &Connection, amount: f64) -> Result<()> {
    set(conn, AVG_MONTHLY_SURPLUS, &amount.to_string())
}

/// Configured model artifact, or the default next to the database.
pub fn model_path(conn: &Connection) -> Result<PathBuf> {
    match get(conn, MODEL_PATH)? {
        Some(p) if !p.trim().is_empty() => Ok(PathBuf::from(p.trim())),
        _ => Ok(crate::db::data_dir()?.join("feasibility_model.json")),
    }
}
