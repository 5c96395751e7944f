// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Print as pretty JSON")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print as JSON lines")
            .action(ArgAction::SetTrue),
    )
}

pub fn build_cli() -> Command {
    Command::new("cardbook")
        .version(crate_version!())
        .about("Personal finance, credit-card statement cycles, and multi-currency CLI")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("checking")
                                .help("Account type (checking, savings, cash, ...)"),
                        )
                        .arg(Arg::new("currency").long("currency").default_value("USD")),
                )
                .subcommand(Command::new("list").about("List accounts"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove an account")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("list").about("List categories"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("card")
                .about("Manage credit cards")
                .subcommand(
                    Command::new("add")
                        .about("Add a credit card")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("closing-day")
                                .long("closing-day")
                                .required(true)
                                .help("Day of month the statement closes (1-31)"),
                        )
                        .arg(
                            Arg::new("due-day")
                                .long("due-day")
                                .help("Day of month payment is due (1-31)"),
                        )
                        .arg(Arg::new("limit").long("limit").help("Credit limit"))
                        .arg(Arg::new("currency").long("currency").default_value("USD")),
                )
                .subcommand(Command::new("list").about("List credit cards"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a credit card")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction on an account or a card")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("payee").long("payee").required(true))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("card").long("card"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("installments")
                                .long("installments")
                                .help("Split a card purchase into N monthly rows"),
                        )
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("month").long("month").help("Filter YYYY-MM"))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("card").long("card"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("invoice").about("Credit-card statements").subcommand(json_flags(
                Command::new("show")
                    .about("Show current and next statement for a card")
                    .arg(Arg::new("card").long("card").required(true))
                    .arg(
                        Arg::new("date")
                            .long("date")
                            .help("Reference date YYYY-MM-DD (default: today)"),
                    ),
            )),
        )
        .subcommand(
            Command::new("report")
                .about("Reports")
                .subcommand(json_flags(
                    Command::new("balances")
                        .about("Per-account balances")
                        .arg(
                            Arg::new("base")
                                .long("base")
                                .help("Also show in base currency")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .help("Convert to this currency"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("spend-by-category")
                        .about("Spending per category for a month")
                        .arg(Arg::new("month").long("month").required(true)),
                )),
        )
        .subcommand(
            Command::new("fx")
                .about("Exchange rates")
                .subcommand(
                    Command::new("set-base")
                        .about("Set the base currency")
                        .arg(Arg::new("currency").required(true)),
                )
                .subcommand(
                    Command::new("add")
                        .about("Record a rate manually (1 base = rate quote)")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("quote").long("quote").required(true))
                        .arg(Arg::new("rate").long("rate").required(true)),
                )
                .subcommand(
                    Command::new("fetch")
                        .about("Fetch recent daily rates for currencies in use")
                        .arg(
                            Arg::new("days")
                                .long("days")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                )
                .subcommand(Command::new("list").about("List stored rates"))
                .subcommand(
                    Command::new("convert")
                        .about("Convert an amount between currencies")
                        .arg(Arg::new("amount").required(true))
                        .arg(Arg::new("from").required(true))
                        .arg(Arg::new("to").required(true))
                        .arg(Arg::new("date").long("date")),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import transactions from CSV")
                .arg(Arg::new("file").required(true))
                .arg(Arg::new("account").long("account"))
                .arg(Arg::new("card").long("card")),
        )
        .subcommand(
            Command::new("export")
                .about("Export transactions to CSV")
                .arg(Arg::new("file").required(true))
                .arg(Arg::new("month").long("month")),
        )
        .subcommand(Command::new("doctor").about("Check database integrity"))
}
