// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod activity;
pub mod doctor;
pub mod feasibility;
pub mod goals;
pub mod plan;
pub mod settings;

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Who the command acts for and the date it is evaluated on.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: String,
    pub today: NaiveDate,
}

impl Session {
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let user = m
            .get_one::<String>("user")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| crate::DEFAULT_USER.to_string());
        let today = match m.get_one::<String>("today") {
            Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))?,
            None => chrono::Local::now().date_naive(),
        };
        Ok(Session { user, today })
    }
}
