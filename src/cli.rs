// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

use crate::config::DB_ENV;

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn month_arg(required: bool) -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .required(required)
        .help("Calendar month")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Transaction id")
}

/// The fields shared by `tx add` and `tx edit`.
fn transaction_fields(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("date")
            .long("date")
            .required(true)
            .value_name("YYYY-MM-DD"),
    )
    .arg(Arg::new("amount").long("amount").required(true))
    .arg(
        Arg::new("kind")
            .long("kind")
            .default_value("expense")
            .value_parser(["income", "expense"]),
    )
    .arg(Arg::new("category").long("category").required(true))
    .arg(
        Arg::new("method")
            .long("method")
            .required(true)
            .help("Payment method"),
    )
    .arg(Arg::new("description").long("description"))
    .arg(
        Arg::new("paid")
            .long("paid")
            .action(ArgAction::SetTrue)
            .help("Expense is already paid"),
    )
}

fn label_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .subcommand(Command::new("add").arg(Arg::new("name").required(true)))
        .subcommand(json_args(Command::new("list")))
}

pub fn build_cli() -> Command {
    Command::new("kakeibo")
        .about("Kakeibo: monthly income/expense ledger")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env(DB_ENV)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Path to the SQLite database"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(transaction_fields(Command::new("add")))
                .subcommand(transaction_fields(Command::new("edit").arg(id_arg())))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(Command::new("pay").arg(id_arg()))
                .subcommand(json_args(Command::new("show").arg(id_arg())))
                .subcommand(json_args(
                    Command::new("list")
                        .arg(month_arg(false).conflicts_with("page"))
                        .arg(
                            Arg::new("page")
                                .long("page")
                                .value_parser(value_parser!(usize))
                                .help("Page number, 10 rows per page"),
                        )
                        .arg(
                            Arg::new("today")
                                .long("today")
                                .value_name("YYYY-MM-DD")
                                .help("Reference date for status (defaults to today)"),
                        ),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly reports")
                .subcommand(json_args(Command::new("summary").arg(month_arg(true))))
                .subcommand(json_args(
                    Command::new("by-category").arg(month_arg(true)),
                ))
                .subcommand(json_args(
                    Command::new("calendar").arg(month_arg(true)).arg(
                        Arg::new("today")
                            .long("today")
                            .value_name("YYYY-MM-DD"),
                    ),
                )),
        )
        .subcommand(label_command("category", "Manage categories"))
        .subcommand(label_command("method", "Manage payment methods"))
        .subcommand(
            Command::new("password")
                .about("Shared access password")
                .subcommand(Command::new("set"))
                .subcommand(Command::new("check")),
        )
}
