// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
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

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and list transactions")
        .subcommand(
            Command::new("add")
                .about("Add a transaction")
                .arg(Arg::new("description").long("description").short('d').required(true))
                .arg(Arg::new("amount").long("amount").short('a').required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .short('t')
                        .default_value("expense")
                        .help("income|expense"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .short('c')
                        .help("food|grocery|housing|transport|entertainment|health (ignored for income)"),
                )
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today")),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List transactions, latest date first")
                .arg(Arg::new("limit").long("limit").value_parser(value_parser!(usize))),
        ))
        .subcommand(json_args(
            Command::new("recent").about("Show the most recent transactions").arg(
                Arg::new("limit")
                    .long("limit")
                    .value_parser(value_parser!(usize))
                    .default_value("5"),
            ),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").required(true)),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Derived figures and charts")
        .subcommand(json_args(
            Command::new("breakdown").about("Expense share per category"),
        ))
        .subcommand(json_args(
            Command::new("trend").about("Daily spending for the current month"),
        ))
        .subcommand(json_args(
            Command::new("insights").about("Monthly totals, averages and rates"),
        ))
        .subcommand(
            Command::new("chart")
                .about("Write the daily spending chart as SVG")
                .arg(Arg::new("out").long("out").default_value("spending-chart.svg"))
                .arg(
                    Arg::new("width")
                        .long("width")
                        .value_parser(value_parser!(f64))
                        .default_value("920"),
                )
                .arg(
                    Arg::new("height")
                        .long("height")
                        .value_parser(value_parser!(f64))
                        .default_value("280"),
                ),
        )
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Monthly category budgets")
        .subcommand(
            Command::new("set")
                .about("Set a category budget")
                .arg(Arg::new("category").long("category").short('c').required(true))
                .arg(Arg::new("amount").long("amount").short('a').required(true)),
        )
        .subcommand(json_args(Command::new("list").about("List budgets")))
        .subcommand(json_args(
            Command::new("report").about("Spending against budgets this month"),
        ))
}

fn task_cmd() -> Command {
    Command::new("task")
        .about("Task manager")
        .subcommand(
            Command::new("add")
                .about("Add a task")
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("description").long("description").default_value(""))
                .arg(Arg::new("status").long("status").default_value("pending"))
                .arg(Arg::new("priority").long("priority").default_value("medium"))
                .arg(Arg::new("due").long("due").help("YYYY-MM-DD")),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List tasks")
                .arg(Arg::new("status").long("status").help("pending|running|completed"))
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .default_value("newest")
                        .help("newest|oldest|priority|due|status"),
                ),
        ))
        .subcommand(
            Command::new("update")
                .about("Change task fields")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("title").long("title"))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("status").long("status"))
                .arg(Arg::new("priority").long("priority"))
                .arg(Arg::new("due").long("due").conflicts_with("clear-due"))
                .arg(Arg::new("clear-due").long("clear-due").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a task and its subtasks")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(json_args(Command::new("stats").about("Counts per status")))
        .subcommand(
            Command::new("sub")
                .about("Subtasks")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("task").required(true))
                        .arg(Arg::new("title").long("title").required(true)),
                )
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("task").required(true))
                        .arg(Arg::new("subtask").required(true))
                        .arg(Arg::new("title").long("title"))
                        .arg(Arg::new("status").long("status")),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("task").required(true))
                        .arg(Arg::new("subtask").required(true)),
                ),
        )
}

pub fn build_cli() -> Command {
    Command::new("vantage")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Household finance tracker and task manager")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the SQLite data file"),
        )
        .arg(
            Arg::new("as-of")
                .long("as-of")
                .global(true)
                .help("Reference date YYYY-MM-DD for monthly figures (default: today)"),
        )
        .subcommand(tx_cmd())
        .subcommand(json_args(
            Command::new("summary").about("Total balance and this month's net income"),
        ))
        .subcommand(report_cmd())
        .subcommand(budget_cmd())
        .subcommand(task_cmd())
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .arg(Arg::new("format").long("format").default_value("json"))
                    .arg(Arg::new("out").long("out").help("Output file"))
                    .arg(
                        Arg::new("dir")
                            .long("dir")
                            .conflicts_with("out")
                            .help("Directory for household-data-YYYY-MM-DD.json"),
                    ),
            ),
        )
        .subcommand(
            Command::new("import").about("Import data").subcommand(
                Command::new("transactions")
                    .arg(Arg::new("path").long("path").required(true))
                    .arg(
                        Arg::new("mode")
                            .long("mode")
                            .value_parser(["replace", "merge"])
                            .default_value("merge"),
                    ),
            ),
        )
        .subcommand(
            Command::new("reset")
                .about("Delete stored transactions (and with --all, tasks and budgets)")
                .arg(Arg::new("all").long("all").action(ArgAction::SetTrue))
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Skip the confirmation prompt"),
                ),
        )
}
