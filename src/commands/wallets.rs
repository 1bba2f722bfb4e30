// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::get_currency;
use crate::ledger::Ledger;
use crate::models::NewWallet;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table, required, required_id};
use anyhow::Result;

pub fn handle(ledger: &mut Ledger, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            let balance = parse_decimal(required(sub, "balance")?)?;
            let currency = match sub.get_one::<String>("currency") {
                Some(c) => c.clone(),
                None => get_currency(ledger.connection())?,
            };
            let wallet = ledger.create_wallet(NewWallet {
                owner: owner.to_string(),
                name: name.clone(),
                currency,
                initial_balance: balance,
                color: sub.get_one::<String>("color").cloned(),
                icon: sub.get_one::<String>("icon").cloned(),
            })?;
            println!(
                "Added wallet #{} '{}' ({})",
                wallet.id,
                wallet.name,
                fmt_money(&wallet.balance, &wallet.currency)
            );
        }
        Some(("list", sub)) => {
            let wallets = ledger.wallets(owner)?;
            if !maybe_print_json(sub.get_flag("json"), &wallets)? {
                let rows = wallets
                    .iter()
                    .map(|w| {
                        vec![
                            w.id.to_string(),
                            w.name.clone(),
                            w.currency.clone(),
                            format!("{:.2}", w.balance),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["ID", "Name", "CCY", "Balance"], rows));
            }
        }
        Some(("rename", sub)) => {
            let id = required_id(sub, "id")?;
            let wallet = ledger.rename_wallet(owner, id, required(sub, "name")?)?;
            println!("Wallet #{} renamed to '{}'", wallet.id, wallet.name);
        }
        Some(("rm", sub)) => {
            let id = required_id(sub, "id")?;
            let removed = ledger.delete_wallet(owner, id)?;
            println!(
                "Removed wallet '{}' and {} transactions",
                removed.wallet.name, removed.transactions_removed
            );
        }
        _ => {}
    }
    Ok(())
}
