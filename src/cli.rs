// Copyright (c) 2026 Monedero contributors.
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
            .help("Print as JSON lines"),
    )
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .help("Range start, YYYY-MM-DD (default 1970-01-01)"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .help("Range end, YYYY-MM-DD inclusive (default today)"),
    )
}

pub fn build_cli() -> Command {
    Command::new("monedero")
        .about("Personal income/expense tracking with live-updating queries")
        .subcommand(Command::new("init").about("Create the database file"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .allow_negative_numbers(true)
                                .help("Initial balance, signed (default 0)"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List accounts by name")))
                .subcommand(
                    Command::new("rm")
                        .about("Delete an account and its movements")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("color").long("color").help("Hex color, e.g. #AABBCC")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List active categories by name"),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Deactivate a category (movements keep their reference)")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("mov")
                .about("Record and inspect movements")
                .subcommand(
                    Command::new("add")
                        .about("Record a movement; positive amount is income, negative expense")
                        .arg(Arg::new("title").required(true))
                        .arg(
                            Arg::new("amount")
                                .required(true)
                                .allow_negative_numbers(true)
                                .help("Signed decimal"),
                        )
                        .arg(Arg::new("category").long("category").default_value(""))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .default_value("")
                                .help("YYYY-MM-DD; anything else means now"),
                        )
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Rewrite metadata; amount and type are preserved")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                        .arg(Arg::new("title").long("title"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(range_args(
                    Command::new("list").about("List movements in a date range, newest first"),
                ))),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregations")
                .subcommand(json_flags(range_args(
                    Command::new("totals").about("Signed totals per category in a date range"),
                )))
                .subcommand(
                    Command::new("net")
                        .about("Net signed total for one account")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(Command::new("balance").about("Running balance over all movements"))
        .subcommand(
            Command::new("settings")
                .about("User preferences")
                .subcommand(json_flags(Command::new("get").about("Show the current settings")))
                .subcommand(
                    Command::new("set")
                        .about("Write one setting")
                        .arg(Arg::new("key").required(true).value_parser([
                            "currency_symbol",
                            "default_category",
                            "default_payment_method",
                            "show_tips",
                        ]))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Tail the live movement stream, reprinting on each change")
                .arg(
                    Arg::new("take")
                        .long("take")
                        .value_parser(value_parser!(usize))
                        .help("Exit after this many emissions"),
                ),
        )
}
