// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::NewTransfer;
use crate::utils::{date_or_now, maybe_print_json, parse_decimal, pretty_table, required, required_id};
use anyhow::Result;
use std::collections::HashMap;

pub fn handle(ledger: &mut Ledger, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let done = ledger.transfer_between_wallets(NewTransfer {
                owner: owner.to_string(),
                from_wallet_id: required_id(sub, "from")?,
                to_wallet_id: required_id(sub, "to")?,
                amount: parse_decimal(required(sub, "amount")?)?,
                description: sub.get_one::<String>("description").cloned(),
                date: date_or_now(sub.get_one::<String>("date"))?,
            })?;
            println!(
                "Moved {} from {} ({:.2}) to {} ({:.2})",
                done.transfer.amount, done.from.name, done.from.balance, done.to.name, done.to.balance
            );
        }
        Some(("list", sub)) => {
            let transfers = ledger.transfers(owner)?;
            if !maybe_print_json(sub.get_flag("json"), &transfers)? {
                let names: HashMap<i64, String> = ledger
                    .wallets(owner)?
                    .into_iter()
                    .map(|w| (w.id, w.name))
                    .collect();
                let name_of = |id: Option<i64>| {
                    id.and_then(|id| names.get(&id).cloned())
                        .unwrap_or_else(|| "(deleted)".to_string())
                };
                let rows = transfers
                    .iter()
                    .map(|t| {
                        vec![
                            t.date.format("%Y-%m-%d %H:%M").to_string(),
                            name_of(t.from_wallet_id),
                            name_of(t.to_wallet_id),
                            format!("{:.2}", t.amount),
                            t.description.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Date", "From", "To", "Amount", "Description"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}
