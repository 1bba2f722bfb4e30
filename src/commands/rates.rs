// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::get_currency;
use crate::ledger::Ledger;
use crate::market::{FrankfurterRates, PriceSource};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    let quote = get_currency(ledger.connection())?;
    let source = FrankfurterRates::new(&quote);
    let snap = source.latest(m.get_one::<String>("symbol").map(String::as_str))?;
    if !maybe_print_json(m.get_flag("json"), &snap)? {
        println!(
            "{}",
            pretty_table(
                &["Pair", "Rate", "As of"],
                vec![vec![
                    snap.symbol.clone(),
                    snap.price.to_string(),
                    snap.as_of.format("%Y-%m-%d").to_string(),
                ]],
            )
        );
    }
    Ok(())
}
