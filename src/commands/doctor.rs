// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(ledger: &Ledger, owner: &str) -> Result<()> {
    let drifts = ledger.reconcile(owner)?;
    if drifts.is_empty() {
        println!("doctor: every wallet balance matches its history");
        return Ok(());
    }
    let rows = drifts
        .iter()
        .map(|d| {
            vec![
                d.wallet_name.clone(),
                format!("{:.2}", d.stored),
                format!("{:.2}", d.expected),
                d.difference()
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_else(|| "out of range".to_string()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Wallet", "Stored", "Expected", "Drift"], rows)
    );
    Ok(())
}
