// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Config, get_currency, get_policy, parse_flag, set_allow_overdraft, set_currency};
use crate::utils::{pretty_table, required};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let policy = get_policy(conn)?;
            let rows = vec![
                vec!["database".to_string(), cfg.db_path.display().to_string()],
                vec!["owner".to_string(), cfg.owner.clone()],
                vec!["currency".to_string(), get_currency(conn)?],
                vec!["allow_overdraft".to_string(), policy.allow_overdraft.to_string()],
                vec![
                    "receipt_endpoint".to_string(),
                    cfg.receipt_endpoint.clone().unwrap_or_default(),
                ],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("set-currency", sub)) => {
            let ccy = required(sub, "currency")?;
            set_currency(conn, ccy)?;
            println!("Currency set to {}", ccy.trim().to_uppercase());
        }
        Some(("overdraft", sub)) => {
            let raw = required(sub, "allow")?;
            let allow = parse_flag(raw).with_context(|| format!("Invalid value '{}'", raw))?;
            set_allow_overdraft(conn, allow)?;
            println!(
                "Overdraft on transfers {}",
                if allow { "allowed" } else { "blocked" }
            );
        }
        _ => {}
    }
    Ok(())
}
