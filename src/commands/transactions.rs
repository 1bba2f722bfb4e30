// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::ledger::Ledger;
use crate::models::{EntryType, NewTransaction, TransactionUpdate};
use crate::receipt::{HttpReceiptReader, ReceiptReader};
use crate::utils::{
    date_or_now, maybe_print_json, parse_datetime, parse_decimal, pretty_table, required,
    required_id,
};
use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::collections::HashMap;

pub fn handle(ledger: &mut Ledger, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    let owner = cfg.owner.as_str();
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, owner, sub)?,
        Some(("edit", sub)) => edit(ledger, owner, sub)?,
        Some(("rm", sub)) => {
            let id = required_id(sub, "id")?;
            let removed = ledger.delete_transaction(owner, id)?;
            if let Some(w) = removed.wallet {
                println!(
                    "Deleted '{}'; {} balance is now {:.2}",
                    removed.transaction.description, w.name, w.balance
                );
            } else {
                println!("Deleted '{}'", removed.transaction.description);
            }
        }
        Some(("list", sub)) => list(ledger, owner, sub)?,
        Some(("scan", sub)) => scan(ledger, cfg, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let entry_type: EntryType = required(sub, "type")?.parse()?;
    let category = ledger.category_named(owner, required(sub, "category")?, entry_type)?;
    let posted = ledger.add_transaction(NewTransaction {
        owner: owner.to_string(),
        description: required(sub, "description")?.clone(),
        amount: parse_decimal(required(sub, "amount")?)?,
        entry_type,
        date: date_or_now(sub.get_one::<String>("date"))?,
        category_id: category.id,
        wallet_id: required_id(sub, "wallet")?,
    })?;
    println!(
        "Recorded #{} {} {} '{}' in {}; balance {:.2}",
        posted.transaction.id,
        posted.transaction.entry_type,
        posted.transaction.amount,
        posted.transaction.description,
        posted.wallet.name,
        posted.wallet.balance
    );
    Ok(())
}

fn edit(ledger: &mut Ledger, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_id(sub, "id")?;
    let existing = ledger.transaction(owner, id)?;
    let mut update = TransactionUpdate::from_existing(&existing);
    if let Some(d) = sub.get_one::<String>("description") {
        update.description = d.clone();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        update.amount = parse_decimal(a)?;
    }
    if let Some(t) = sub.get_one::<String>("type") {
        update.entry_type = t.parse()?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        update.category_id = ledger.category_named(owner, c, update.entry_type)?.id;
    }
    if let Some(w) = sub.get_one::<i64>("wallet") {
        update.wallet_id = *w;
    }
    if let Some(d) = sub.get_one::<String>("date") {
        update.date = parse_datetime(d)?;
    }
    let revised = ledger.update_transaction(update)?;
    for w in &revised.wallets {
        println!("{} balance is now {:.2}", w.name, w.balance);
    }
    Ok(())
}

fn scan(ledger: &mut Ledger, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let owner = cfg.owner.as_str();
    let endpoint = cfg
        .receipt_endpoint
        .as_deref()
        .context("Set UANGKITA_RECEIPT_URL to scan receipts")?;
    let category = ledger.category_named(owner, required(sub, "category")?, EntryType::Expense)?;
    let scan = HttpReceiptReader::new(endpoint).read(required(sub, "image_url")?)?;
    let draft = scan.into_new_transaction(
        owner,
        required_id(sub, "wallet")?,
        category.id,
        Local::now().date_naive(),
    );
    let posted = ledger.add_transaction(draft)?;
    println!(
        "Recorded receipt '{}' for {} on {}",
        posted.transaction.description,
        posted.transaction.amount,
        posted.transaction.date.date()
    );
    Ok(())
}

fn list(ledger: &Ledger, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(ledger, owner, sub)?;
    if !maybe_print_json(sub.get_flag("json"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.wallet.clone(),
                    r.description.clone(),
                    r.entry_type.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Wallet", "Description", "Type", "Amount", "Category"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub wallet: String,
    pub description: String,
    pub entry_type: String,
    pub amount: String,
    pub category: String,
}

/// Newest first, optionally narrowed to one wallet and capped at `--limit`.
pub fn query_rows(
    ledger: &Ledger,
    owner: &str,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let wallet_filter = sub.get_one::<i64>("wallet").copied();
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    let wallets: HashMap<i64, String> = ledger
        .wallets(owner)?
        .into_iter()
        .map(|w| (w.id, w.name))
        .collect();
    let categories: HashMap<i64, String> = ledger
        .categories(owner)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let rows = ledger
        .transactions(owner)?
        .into_iter()
        .filter(|t| wallet_filter.is_none_or(|w| w == t.wallet_id))
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.format("%Y-%m-%d %H:%M").to_string(),
            wallet: wallets.get(&t.wallet_id).cloned().unwrap_or_default(),
            description: t.description,
            entry_type: t.entry_type.to_string(),
            amount: format!("{:.2}", t.amount),
            category: categories
                .get(&t.category_id)
                .cloned()
                .unwrap_or_else(|| crate::report::UNKNOWN_CATEGORY.to_string()),
        })
        .collect();
    Ok(rows)
}
