// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::report::{Period, Report};
use crate::utils::{maybe_print_json, parse_date, pretty_table, required};
use anyhow::Result;

pub fn handle(ledger: &Ledger, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    let period = period_from(m)?;
    let report = ledger.report(owner, &period)?;
    if !maybe_print_json(m.get_flag("json"), &report)? {
        print_report(&report);
    }
    Ok(())
}

pub fn period_from(m: &clap::ArgMatches) -> Result<Period> {
    let start = m.get_one::<String>("start").map(|s| parse_date(s)).transpose()?;
    let end = m.get_one::<String>("end").map(|s| parse_date(s)).transpose()?;
    Ok(Period::parse(required(m, "period")?, start, end)?)
}

fn print_report(report: &Report) {
    println!(
        "{} report, {} .. {}",
        report.period.tag(),
        report.window.start.format("%Y-%m-%d %H:%M"),
        report.window.end.format("%Y-%m-%d %H:%M")
    );
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                format!("{:.2}", report.total_income),
                format!("{:.2}", report.total_expense),
                format!("{:.2}", report.balance),
            ]],
        )
    );
    let rows = report
        .category_summary
        .iter()
        .map(|s| {
            vec![
                s.category_name.clone(),
                s.entry_type.to_string(),
                format!("{:.2}", s.amount),
                format!("{:.1}%", s.percentage),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Type", "Net", "Share"], rows)
    );
}
