// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{CategoryRemoval, Ledger};
use crate::models::{EntryType, NewCategory};
use crate::utils::{maybe_print_json, pretty_table, required, required_id};
use anyhow::Result;

pub fn handle(ledger: &mut Ledger, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let entry_type: EntryType = required(sub, "type")?.parse()?;
            let category = ledger.create_category(NewCategory {
                owner: owner.to_string(),
                name: required(sub, "name")?.clone(),
                entry_type,
                color: sub.get_one::<String>("color").cloned(),
                icon: sub.get_one::<String>("icon").cloned(),
            })?;
            println!(
                "Added {} category #{} '{}'",
                category.entry_type, category.id, category.name
            );
        }
        Some(("list", sub)) => {
            let categories = ledger.categories(owner)?;
            if !maybe_print_json(sub.get_flag("json"), &categories)? {
                let rows = categories
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.name.clone(),
                            c.entry_type.to_string(),
                            if c.is_shared() { "shared" } else { "own" }.to_string(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["ID", "Name", "Type", "Scope"], rows));
            }
        }
        Some(("rm", sub)) => {
            let id = required_id(sub, "id")?;
            match ledger.delete_category(owner, id)? {
                CategoryRemoval::Deleted(c) => println!("Removed category '{}'", c.name),
                CategoryRemoval::InUse {
                    category,
                    transactions,
                } => println!(
                    "Cannot delete '{}': used by {} transactions",
                    category.name, transactions
                ),
            }
        }
        _ => {}
    }
    Ok(())
}
