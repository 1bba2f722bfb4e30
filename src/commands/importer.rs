// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{EntryType, NewTransaction};
use crate::utils::{parse_datetime, parse_decimal, required};
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use std::collections::{HashMap, hash_map::Entry};
use std::io::Read;

pub fn handle(ledger: &mut Ledger, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(ledger, owner, sub),
        _ => Ok(()),
    }
}

fn import_transactions(ledger: &mut Ledger, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let path = required(sub, "path")?.trim();
    let file = std::fs::File::open(path).with_context(|| format!("Open CSV {}", path))?;
    let batch = read_transactions(ledger, owner, file)?;
    let posted = ledger.add_transactions(batch)?;
    println!("Imported {} transactions from {}", posted.len(), path);
    Ok(())
}

/// Parses `date,description,amount,type,category,wallet` rows into drafts.
/// Wallets and categories are matched by name, case-insensitively.
pub fn read_transactions<R: Read>(
    ledger: &Ledger,
    owner: &str,
    input: R,
) -> Result<Vec<NewTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let wallets: HashMap<String, i64> = ledger
        .wallets(owner)?
        .into_iter()
        .map(|w| (w.name.to_lowercase(), w.id))
        .collect();
    let mut category_cache: HashMap<(String, EntryType), i64> = HashMap::new();
    let mut out = Vec::new();

    for (line, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = line + 2;
        let field = |idx: usize, name: &str| {
            rec.get(idx)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| anyhow!("row {}: {} missing", row, name))
        };
        let date = parse_datetime(field(0, "date")?).with_context(|| format!("row {}", row))?;
        let description = field(1, "description")?.to_string();
        let amount = parse_decimal(field(2, "amount")?).with_context(|| format!("row {}", row))?;
        let entry_type: EntryType = field(3, "type")?
            .parse()
            .with_context(|| format!("row {}", row))?;
        let category = field(4, "category")?;
        let wallet = field(5, "wallet")?;

        let wallet_id = *wallets
            .get(&wallet.to_lowercase())
            .ok_or_else(|| anyhow!("row {}: wallet '{}' not found", row, wallet))?;
        let category_id = match category_cache.entry((category.to_lowercase(), entry_type)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let found = ledger
                    .category_named(owner, category, entry_type)
                    .with_context(|| format!("row {}", row))?;
                *entry.insert(found.id)
            }
        };

        out.push(NewTransaction {
            owner: owner.to_string(),
            description,
            amount,
            entry_type,
            date,
            category_id,
            wallet_id,
        });
    }
    Ok(out)
}
