// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use goalwise::commands::Session;
use goalwise::{cli, commands, db};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();
    let session = Session::from_matches(&matches)?;

    let mut conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("goal", sub)) => commands::goals::handle(&conn, &session, sub)?,
        Some(("plan", sub)) => commands::plan::handle(&mut conn, &session, sub)?,
        Some(("activity", sub)) => commands::activity::handle(&conn, &session, sub)?,
        Some(("feasibility", sub)) => commands::feasibility::handle(&conn, &session, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, &session, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn, &session)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
