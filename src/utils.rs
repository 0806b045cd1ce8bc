// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// Parse `YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))
}

pub fn parse_amount(s: &str) -> Result<f64> {
    let d = s
        .trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}'", s))?;
    if d.is_sign_negative() {
        return Err(anyhow::anyhow!("Amount '{}' must not be negative", s));
    }
    d.to_f64()
        .with_context(|| format!("Amount '{}' out of range", s))
}

/// Like [`parse_amount`] but allows negative values.
pub fn parse_signed(s: &str) -> Result<f64> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid number '{}'", s))?
        .to_f64()
        .with_context(|| format!("Number '{}' out of range", s))
}

/// Lenient read of a stored amount: anything unparsable is zero.
pub fn amount_or_zero(s: &str) -> f64 {
    s.trim()
        .parse::<Decimal>()
        .ok()
        .and_then(|d| d.to_f64())
        .unwrap_or(0.0)
}

/// Stored form of an amount, to two decimal places.
pub fn amount_to_text(v: f64) -> String {
    Decimal::from_f64(v)
        .map(|d| d.round_dp(2).normalize().to_string())
        .unwrap_or_else(|| "0".to_string())
}

pub fn fmt_money(v: f64) -> String {
    format!("{:.2}", v)
}

pub fn fmt_month(d: NaiveDate) -> String {
    d.format("%Y-%m").to_string()
}

/// Last day of the month containing `d`.
pub fn month_end_of(d: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if d.month() == 12 {
        (d.year() + 1, 1)
    } else {
        (d.year(), d.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(json_flag: bool, v: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_end_handles_december_and_leap_years() {
        let dec = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(month_end_of(dec), NaiveDate::from_ymd_opt(2025, 12, 31));
        let feb = NaiveDate::from_ymd_opt(2028, 2, 1).unwrap();
        assert_eq!(month_end_of(feb), NaiveDate::from_ymd_opt(2028, 2, 29));
    }

    #[test]
    fn stored_amounts_are_lenient() {
        assert_eq!(amount_or_zero("12.50"), 12.5);
        assert_eq!(amount_or_zero("twelve"), 0.0);
        assert_eq!(amount_or_zero(""), 0.0);
        assert_eq!(amount_to_text(1000.0), "1000");
        assert_eq!(amount_to_text(33.333), "33.33");
    }

    #[test]
    fn parse_amount_rejects_negatives() {
        assert!(parse_amount("-5").is_err());
        assert_eq!(parse_amount(" 250.5 ").unwrap(), 250.5);
    }
}
