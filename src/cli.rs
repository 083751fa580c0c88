// Copyright (c) 2025 Cha-Ching Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

pub fn build_cli() -> Command {
    Command::new("chaching")
        .about("Cha-Ching: transactions, monthly budgets with spend alerts, and savings goals")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the local data store"))
        .subcommand(tx_cli())
        .subcommand(budget_cli())
        .subcommand(goal_cli())
        .subcommand(currency_cli())
}

fn tx_cli() -> Command {
    Command::new("tx")
        .about("Record and categorize transactions (amounts in USD)")
        .subcommand(
            Command::new("add")
                .about("Add a transaction")
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                .arg(Arg::new("description").long("description").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .default_value("expense")
                        .value_parser(["expense", "income"]),
                )
                .arg(Arg::new("category").long("category")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(
                    Arg::new("period")
                        .long("period")
                        .default_value("all")
                        .value_parser(["all", "7days", "1month"]),
                )
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("update")
                .about("Change fields of an existing transaction")
                .arg(id_arg())
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("amount").long("amount"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["expense", "income"]),
                )
                .arg(Arg::new("category").long("category")),
        )
        .subcommand(
            Command::new("categorize")
                .about("Assign a category to a transaction")
                .arg(id_arg())
                .arg(Arg::new("category").long("category").required(true)),
        )
        .subcommand(json_flags(
            Command::new("uncategorized").about("Transactions still waiting for a category"),
        ))
}

fn budget_cli() -> Command {
    Command::new("budget")
        .about("Monthly budgets per category")
        .subcommand(
            Command::new("add")
                .about("Create a budget; the amount is in the display currency")
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to this month")),
        )
        .subcommand(Command::new("rm").about("Delete a budget").arg(id_arg()))
        .subcommand(json_flags(
            Command::new("list")
                .about("Budgets with spend and progress")
                .arg(Arg::new("month").long("month")),
        ))
        .subcommand(json_flags(
            Command::new("alerts")
                .about("Budgets near or over their limit")
                .arg(Arg::new("month").long("month")),
        ))
}

fn goal_cli() -> Command {
    Command::new("goal")
        .about("Savings goals (amounts in USD)")
        .subcommand(
            Command::new("add")
                .about("Add a goal")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("target").long("target").required(true))
                .arg(Arg::new("current").long("current"))
                .arg(Arg::new("deadline").long("deadline").help("YYYY-MM-DD"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(
            Command::new("contribute")
                .about("Add money towards a goal")
                .arg(id_arg())
                .arg(Arg::new("amount").long("amount").required(true)),
        )
        .subcommand(Command::new("rm").about("Delete a goal").arg(id_arg()))
        .subcommand(json_flags(Command::new("list").about("List goals")))
}

fn currency_cli() -> Command {
    Command::new("currency")
        .about("Display currency")
        .subcommand(
            Command::new("set")
                .about("Choose the display currency")
                .arg(Arg::new("code").long("code").required(true)),
        )
        .subcommand(Command::new("list").about("Known currencies and rates"))
        .subcommand(Command::new("show").about("Current display currency"))
}
