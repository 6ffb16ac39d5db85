// Copyright (c) Bankpipe Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("bankpipe")
        .about("Bank-statement import, categorization, and reporting for small teams")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("import")
                .about("Import bank CSV exports into the ledger")
                .arg(
                    Arg::new("files")
                        .num_args(1..)
                        .required(true)
                        .help("CSV files to import"),
                )
                .arg(
                    Arg::new("period")
                        .long("period")
                        .required(true)
                        .help("Period label, e.g. 'Aug 2026'"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Preview the batch without persisting"),
                )
                .arg(
                    Arg::new("offline")
                        .long("offline")
                        .action(ArgAction::SetTrue)
                        .help("Skip the rate fetch and use fallback rates"),
                )
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("tx")
                .about("Inspect and edit ledger transactions")
                .subcommand(
                    Command::new("list")
                        .arg(Arg::new("period").long("period"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("bank").long("bank"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                        .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("set-category")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("period").long("period"))
                        .arg(Arg::new("bank").long("bank"))
                        .arg(Arg::new("all").long("all").action(ArgAction::SetTrue)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true))),
        )
        .subcommand(
            Command::new("rule")
                .about("Manage keyword categorization rules")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("keyword").long("keyword").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("match-type").long("match-type"))
                        .arg(
                            Arg::new("priority")
                                .long("priority")
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true)))
                .subcommand(
                    Command::new("apply")
                        .about("Re-categorize the whole ledger against current rules"),
                ),
        )
        .subcommand(
            Command::new("team")
                .about("Manage team members and compensation")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("role").long("role").required(true))
                        .arg(Arg::new("salary").long("salary").required(true))
                        .arg(Arg::new("beneficiary").long("beneficiary")),
                )
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("set-account")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("beneficiary").long("beneficiary").required(true)),
                )
                .subcommand(
                    Command::new("comp")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("period").long("period").required(true))
                        .arg(Arg::new("variable").long("variable").required(true))
                        .arg(Arg::new("note").long("note")),
                ),
        )
        .subcommand(
            Command::new("fx")
                .about("Exchange rates and reporting currency")
                .subcommand(
                    Command::new("show")
                        .arg(
                            Arg::new("refresh")
                                .long("refresh")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(
                            Arg::new("offline")
                                .long("offline")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("set-base")
                        .arg(Arg::new("currency").long("currency").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Profit, expense, and payroll views")
                .subcommand(
                    Command::new("profit").arg(Arg::new("period").long("period")),
                )
                .subcommand(
                    Command::new("categories").arg(Arg::new("period").long("period")),
                )
                .subcommand(
                    Command::new("payroll")
                        .arg(Arg::new("period").long("period").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export the ledger")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
}
