// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use goalwise::commands::{Session, activity};
use goalwise::{cli, db, store};
use rusqlite::Connection;

fn session() -> Session {
    Session {
        user: "local".into(),
        today: NaiveDate::from_ymd_opt(2026, 6, 10).unwrap(),
    }
}

fn run(conn: &Connection, args: &[&str]) {
    let mut argv = vec!["goalwise", "activity"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("activity", m)) = matches.subcommand() {
        activity::handle(conn, &session(), m).unwrap();
    } else {
        panic!("activity command not parsed");
    }
}

#[test]
fn contributions_accumulate_within_a_month() {
    let conn = db::open_in_memory().unwrap();
    run(&conn, &["contribute", "--month", "2026-05", "--amount", "300"]);
    run(&conn, &["contribute", "--month", " 2026-05 ", "--amount", "200.25"]);
    let recent = store::recent_activity(&conn, "local", session().today, 6).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].month_key, "2026-05");
    assert!(recent[0].contributed);
    assert!(!recent[0].missed);
    assert_eq!(recent[0].total_sip_amount, 500.25);
}

#[test]
fn missed_never_overrides_a_contribution() {
    let conn = db::open_in_memory().unwrap();
    run(&conn, &["contribute", "--amount", "100"]);
    assert!(!store::record_missed(&conn, "local", "2026-06").unwrap());
    assert!(store::record_missed(&conn, "local", "2026-04").unwrap());

    let recent = store::recent_activity(&conn, "local", session().today, 6).unwrap();
    assert_eq!(recent[0].month_key, "2026-06");
    assert!(recent[0].contributed && !recent[0].missed);
    assert_eq!(recent[1].month_key, "2026-04");
    assert!(recent[1].missed && !recent[1].contributed);

    // A later contribution clears the miss.
    store::record_contribution(&conn, "local", "2026-04", 50.0).unwrap();
    let recent = store::recent_activity(&conn, "local", session().today, 6).unwrap();
    assert!(recent[1].contributed && !recent[1].missed);
}

#[test]
fn momentum_fills_gaps_before_scoring() {
    let conn = db::open_in_memory().unwrap();
    for m in ["2026-06", "2026-05", "2026-04", "2026-02", "2026-01"] {
        store::record_contribution(&conn, "local", m, 100.0).unwrap();
    }
    // 2026-03 has no record at all.
    let r = activity::current_momentum(&conn, &session(), 6).unwrap();
    assert_eq!(r.streak_months, 3);
    assert!((r.consistency_pct - 83.33).abs() < 0.01);
    assert_eq!(r.missed_months, 0);
    assert_eq!(r.score, 72);
}

#[test]
fn months_after_today_stay_out_of_the_window() {
    let conn = db::open_in_memory().unwrap();
    for m in ["2026-01", "2026-02", "2026-03", "2026-04", "2026-05", "2026-06", "2026-09"] {
        store::record_contribution(&conn, "local", m, 100.0).unwrap();
    }
    let recent = store::recent_activity(&conn, "local", session().today, 6).unwrap();
    let keys: Vec<_> = recent.iter().map(|a| a.month_key.as_str()).collect();
    assert_eq!(keys, ["2026-06", "2026-05", "2026-04", "2026-03", "2026-02", "2026-01"]);

    let r = activity::current_momentum(&conn, &session(), 6).unwrap();
    assert_eq!(r.streak_months, 6);
    assert_eq!(r.consistency_pct, 100.0);
    assert_eq!(r.score, 90);
}

#[test]
fn zero_month_window_reads_nothing() {
    let conn = db::open_in_memory().unwrap();
    store::record_contribution(&conn, "local", "2026-06", 100.0).unwrap();
    assert!(store::recent_activity(&conn, "local", session().today, 0).unwrap().is_empty());
}
