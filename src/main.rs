// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use uangkita::config::{self, Config};
use uangkita::notify::TracingNotifier;
use uangkita::{Ledger, cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing(config::DEFAULT_LOG_FILTER);
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg = Config::load()?;
    let conn = db::open_or_init(&cfg.db_path)
        .with_context(|| format!("Open DB at {}", cfg.db_path.display()))?;
    let policy = config::get_policy(&conn)?;
    let mut ledger = Ledger::new(conn)
        .with_policy(policy)
        .with_notifier(TracingNotifier);
    let owner = cfg.owner.as_str();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", cfg.db_path.display());
        }
        Some(("wallet", sub)) => commands::wallets::handle(&mut ledger, owner, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut ledger, owner, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, &cfg, sub)?,
        Some(("transfer", sub)) => commands::transfers::handle(&mut ledger, owner, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ledger, owner, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut ledger, owner, sub)?,
        Some(("rates", sub)) => commands::rates::handle(&ledger, sub)?,
        Some(("config", sub)) => commands::settings::handle(ledger.connection(), &cfg, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&ledger, owner)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
