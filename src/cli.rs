// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

fn goal_id(required: bool) -> Arg {
    Arg::new("id")
        .long("id")
        .required(required)
        .value_parser(|s: &str| s.trim().parse::<i64>())
        .help("Goal id")
}

pub fn build_cli() -> Command {
    Command::new("goalwise")
        .about("Plan several savings goals against one monthly surplus")
        .version(clap::crate_version!())
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .default_value(crate::DEFAULT_USER)
                .help("Owner of the goals and activity"),
        )
        .arg(
            Arg::new("today")
                .long("today")
                .global(true)
                .help("Evaluate as of this date (YYYY-MM-DD), defaults to today"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("goal")
                .about("Manage savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_parser([
                                    "emergency_fund",
                                    "short_term",
                                    "long_term",
                                    "retirement",
                                    "custom",
                                ]),
                        )
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("saved").long("saved"))
                        .arg(Arg::new("monthly").long("monthly"))
                        .arg(Arg::new("deadline").long("deadline").help("YYYY-MM"))
                        .arg(
                            Arg::new("priority")
                                .long("priority")
                                .default_value("2")
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .value_parser(["active", "archived", "completed"]),
                        )
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("status")
                        .about("Change a goal's status")
                        .arg(goal_id(true))
                        .arg(
                            Arg::new("to")
                                .long("to")
                                .required(true)
                                .value_parser(["active", "archived", "completed"]),
                        ),
                )
                .subcommand(
                    Command::new("deposit")
                        .about("Add to a goal's saved amount")
                        .arg(goal_id(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("Allocate surplus and project timelines")
                .subcommand(
                    Command::new("allocate")
                        .arg(
                            Arg::new("surplus")
                                .long("surplus")
                                .help("Monthly surplus; defaults to the stored average"),
                        )
                        .arg(
                            Arg::new("apply")
                                .long("apply")
                                .action(ArgAction::SetTrue)
                                .help("Store the result as each goal's monthly contribution"),
                        )
                        .arg(json_flag()),
                )
                .subcommand(Command::new("timeline").arg(json_flag())),
        )
        .subcommand(
            Command::new("activity")
                .about("Monthly saving activity and momentum")
                .subcommand(
                    Command::new("contribute")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to this month"))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("miss")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to this month")),
                )
                .subcommand(
                    Command::new("momentum")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .default_value("6")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(json_flag()),
                ),
        )
        .subcommand(
            Command::new("feasibility")
                .about("Score goals with the pretrained feasibility model")
                .subcommand(
                    Command::new("compute")
                        .arg(goal_id(false))
                        .arg(
                            Arg::new("force")
                                .long("force")
                                .action(ArgAction::SetTrue)
                                .help("Recompute goals that already have a score"),
                        )
                        .arg(Arg::new("model").long("model").help("Model artifact path"))
                        .arg(json_flag()),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Financial settings")
                .subcommand(
                    Command::new("set")
                        .arg(
                            Arg::new("key")
                                .long("key")
                                .required(true)
                                .value_parser(crate::settings::KNOWN_KEYS),
                        )
                        .arg(Arg::new("value").long("value").required(true)),
                )
                .subcommand(Command::new("get").arg(Arg::new("key").long("key")))
                .subcommand(
                    Command::new("behavior")
                        .about("Store expense volatility and discretionary drift")
                        .arg(Arg::new("volatility").long("volatility"))
                        .arg(Arg::new("drift").long("drift")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check goals and model for problems"))
}
