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

fn id_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .required(true)
        .value_parser(value_parser!(i64))
        .help(help)
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
        .help("income or expense")
}

pub fn build_cli() -> Command {
    Command::new("uangkita")
        .about("Personal finance ledger: wallets, transactions and period reports")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the database if needed"))
        .subcommand(
            Command::new("wallet")
                .about("Manage wallets")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .default_value("0")
                                .help("Opening balance"),
                        )
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .help("Defaults to the configured currency"),
                        )
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(Command::new("list").arg(json_flag()))
                .subcommand(
                    Command::new("rename")
                        .arg(id_arg("id", "Wallet id"))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a wallet and all of its transactions")
                        .arg(id_arg("id", "Wallet id")),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(type_arg().required(true))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("icon").long("icon")),
                )
                .subcommand(Command::new("list").arg(json_flag()))
                .subcommand(Command::new("rm").arg(id_arg("id", "Category id"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and edit transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(type_arg().required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("Category name"),
                        )
                        .arg(id_arg("wallet", "Wallet id"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD [HH:MM]; defaults to now"),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Change any field of an existing transaction")
                        .arg(id_arg("id", "Transaction id"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(type_arg())
                        .arg(Arg::new("category").long("category").help("Category name"))
                        .arg(
                            Arg::new("wallet")
                                .long("wallet")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(Command::new("rm").arg(id_arg("id", "Transaction id")))
                .subcommand(
                    Command::new("list")
                        .arg(
                            Arg::new("wallet")
                                .long("wallet")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("scan")
                        .about("Record an expense from a receipt image")
                        .arg(Arg::new("image_url").long("image-url").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("Expense category name"),
                        )
                        .arg(id_arg("wallet", "Wallet id")),
                ),
        )
        .subcommand(
            Command::new("transfer")
                .about("Move money between two wallets")
                .subcommand(
                    Command::new("add")
                        .arg(id_arg("from", "Source wallet id"))
                        .arg(id_arg("to", "Destination wallet id"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(Command::new("list").arg(json_flag())),
        )
        .subcommand(
            Command::new("report")
                .about("Income, expense and category breakdown for a period")
                .arg(
                    Arg::new("period")
                        .long("period")
                        .default_value("monthly")
                        .value_parser(["daily", "weekly", "monthly", "yearly", "custom"]),
                )
                .arg(Arg::new("start").long("start").help("YYYY-MM-DD, custom only"))
                .arg(Arg::new("end").long("end").help("YYYY-MM-DD, custom only"))
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("import").subcommand(
                Command::new("transactions")
                    .about("CSV: date,description,amount,type,category,wallet")
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("rates")
                .about("Latest exchange rate into the configured currency")
                .arg(Arg::new("symbol").long("symbol").help("Foreign currency, default USD"))
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("config")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-currency")
                        .arg(Arg::new("currency").long("currency").required(true)),
                )
                .subcommand(
                    Command::new("overdraft")
                        .about("Allow transfers to take a wallet below zero")
                        .arg(
                            Arg::new("allow")
                                .long("allow")
                                .required(true)
                                .value_parser(["on", "off"]),
                        ),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored balances against history"))
}
