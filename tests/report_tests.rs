// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uangkita::models::{Category, EntryType, NewTransaction, NewWallet, Transaction};
use uangkita::report::{UNKNOWN_CATEGORY, generate};
use uangkita::commands::reports::period_from;
use uangkita::{Ledger, Period, cli, db, get_report};

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn cat(id: i64, name: &str, entry_type: EntryType) -> Category {
    Category {
        id,
        owner: None,
        name: name.into(),
        entry_type,
        color: None,
        icon: None,
    }
}

fn tx(id: i64, amount: i64, entry_type: EntryType, category_id: i64, date: NaiveDateTime) -> Transaction {
    Transaction {
        id,
        owner: "ana".into(),
        description: format!("t{id}"),
        amount: Decimal::from(amount),
        entry_type,
        date,
        category_id,
        wallet_id: 1,
    }
}

fn categories() -> Vec<Category> {
    vec![
        cat(1, "Salary", EntryType::Income),
        cat(2, "Food", EntryType::Expense),
        cat(3, "Gifts", EntryType::Income),
    ]
}

#[test]
fn custom_day_report_totals_and_shares() {
    let t0 = at(2025, 5, 20, 9);
    let txs = vec![
        tx(1, 1000, EntryType::Income, 1, t0),
        tx(2, 400, EntryType::Expense, 2, t0),
    ];
    let period = Period::custom(t0.date(), t0.date()).unwrap();
    let report = generate(&period, &txs, &categories(), at(2030, 1, 1, 0)).unwrap();

    assert_eq!(report.total_income, Decimal::from(1000));
    assert_eq!(report.total_expense, Decimal::from(400));
    assert_eq!(report.balance, Decimal::from(600));
    assert_eq!(report.category_summary.len(), 2);

    let salary = &report.category_summary[0];
    assert_eq!(salary.category_name, "Salary");
    assert_eq!(salary.amount, Decimal::from(1000));
    assert_eq!(salary.percentage, Decimal::ONE_HUNDRED);

    let food = &report.category_summary[1];
    assert_eq!(food.category_name, "Food");
    assert_eq!(food.entry_type, EntryType::Expense);
    assert_eq!(food.amount, Decimal::from(-400));
    assert_eq!(food.percentage, Decimal::ONE_HUNDRED);
}

#[test]
fn empty_window_yields_zeroes() {
    let report = generate(&Period::Daily, &[], &categories(), at(2025, 5, 20, 9)).unwrap();
    assert_eq!(report.total_income, Decimal::ZERO);
    assert_eq!(report.total_expense, Decimal::ZERO);
    assert_eq!(report.balance, Decimal::ZERO);
    assert!(report.category_summary.is_empty());
}

#[test]
fn dangling_category_lands_in_unknown_bucket() {
    let now = at(2025, 5, 20, 9);
    let txs = vec![
        tx(1, 300, EntryType::Expense, 99, now),
        tx(2, 100, EntryType::Expense, 2, now),
    ];
    let report = generate(&Period::Daily, &txs, &categories(), now).unwrap();
    let unknown = &report.category_summary[0];
    assert_eq!(unknown.category_name, UNKNOWN_CATEGORY);
    assert_eq!(unknown.category_id, 99);
    assert_eq!(unknown.amount, Decimal::from(-300));
    assert_eq!(unknown.percentage, Decimal::from(75));
    assert_eq!(report.category_summary[1].percentage, Decimal::from(25));
}

#[test]
fn mixed_category_nets_against_itself() {
    let now = at(2025, 5, 20, 9);
    let txs = vec![
        tx(1, 500, EntryType::Income, 3, now),
        tx(2, 200, EntryType::Expense, 3, now),
        tx(3, 1500, EntryType::Income, 1, now),
    ];
    let report = generate(&Period::Daily, &txs, &categories(), now).unwrap();
    let gifts = report
        .category_summary
        .iter()
        .find(|s| s.category_id == 3)
        .unwrap();
    assert_eq!(gifts.amount, Decimal::from(300));
    assert_eq!(gifts.percentage, Decimal::new(15, 0));
    assert_eq!(report.total_income, Decimal::from(2000));
    assert_eq!(report.total_expense, Decimal::from(200));
}

#[test]
fn summary_sorted_by_magnitude_then_name() {
    let now = at(2025, 5, 20, 9);
    let txs = vec![
        tx(1, 50, EntryType::Income, 3, now),
        tx(2, 700, EntryType::Expense, 2, now),
        tx(3, 50, EntryType::Income, 1, now),
        tx(4, 900, EntryType::Income, 1, now),
    ];
    let report = generate(&Period::Daily, &txs, &categories(), now).unwrap();
    let names: Vec<&str> = report
        .category_summary
        .iter()
        .map(|s| s.category_name.as_str())
        .collect();
    assert_eq!(names, ["Salary", "Food", "Gifts"]);

    let tie = vec![
        tx(1, 10, EntryType::Income, 3, now),
        tx(2, 10, EntryType::Expense, 2, now),
    ];
    let report = generate(&Period::Daily, &tie, &categories(), now).unwrap();
    assert_eq!(report.category_summary[0].category_name, "Food");
    assert_eq!(report.category_summary[1].category_name, "Gifts");
}

#[test]
fn named_periods_exclude_older_and_future_entries() {
    let now = at(2025, 5, 20, 12);
    let txs = vec![
        tx(1, 10, EntryType::Income, 1, at(2025, 5, 20, 8)),
        tx(2, 20, EntryType::Income, 1, at(2025, 5, 15, 8)),
        tx(3, 40, EntryType::Income, 1, at(2025, 4, 25, 8)),
        tx(4, 80, EntryType::Income, 1, at(2024, 12, 1, 8)),
        tx(5, 160, EntryType::Income, 1, at(2023, 1, 1, 8)),
        tx(6, 320, EntryType::Income, 1, at(2025, 5, 20, 13)),
    ];
    let income = |p: Period| generate(&p, &txs, &categories(), now).unwrap().total_income;
    assert_eq!(income(Period::Daily), Decimal::from(10));
    assert_eq!(income(Period::Weekly), Decimal::from(30));
    assert_eq!(income(Period::Monthly), Decimal::from(70));
    assert_eq!(income(Period::Yearly), Decimal::from(150));
}

#[test]
fn custom_range_spans_whole_days() {
    let txs = vec![
        tx(1, 1, EntryType::Expense, 2, at(2025, 1, 1, 0)),
        tx(2, 2, EntryType::Expense, 2, at(2025, 1, 31, 23)),
        tx(3, 4, EntryType::Expense, 2, at(2025, 2, 1, 0)),
    ];
    let period = Period::parse("custom", Some(day(2025, 1, 1)), Some(day(2025, 1, 31))).unwrap();
    let report = generate(&period, &txs, &categories(), at(2025, 6, 1, 0)).unwrap();
    assert_eq!(report.total_expense, Decimal::from(3));
    assert_eq!(report.balance, Decimal::from(-3));
}

#[test]
fn ledger_report_reads_stored_transactions() {
    let mut ledger = Ledger::new(db::open_in_memory().unwrap());
    let wallet = ledger
        .create_wallet(NewWallet {
            owner: "ana".into(),
            name: "Cash".into(),
            currency: "IDR".into(),
            initial_balance: Decimal::ZERO,
            color: None,
            icon: None,
        })
        .unwrap();
    let salary = ledger.category_named("ana", "Salary", EntryType::Income).unwrap();
    let bills = ledger.category_named("ana", "Bills", EntryType::Expense).unwrap();
    for (amount, entry_type, category_id) in [
        (8_000, EntryType::Income, salary.id),
        (2_000, EntryType::Expense, bills.id),
    ] {
        ledger
            .add_transaction(NewTransaction {
                owner: "ana".into(),
                description: "entry".into(),
                amount: Decimal::from(amount),
                entry_type,
                date: at(2025, 5, 10, 9),
                category_id,
                wallet_id: wallet.id,
            })
            .unwrap();
    }

    let report = ledger
        .report_at("ana", &Period::Monthly, at(2025, 5, 20, 0))
        .unwrap();
    assert_eq!(report.balance, Decimal::from(6_000));
    assert_eq!(report.category_summary[0].category_name, "Salary");
    assert_eq!(report.category_summary[1].category_name, "Bills");

    let other = ledger
        .report_at("budi", &Period::Monthly, at(2025, 5, 20, 0))
        .unwrap();
    assert!(other.category_summary.is_empty());
}

#[test]
fn report_serializes_period_kind() {
    let period = Period::custom(day(2025, 1, 1), day(2025, 1, 2)).unwrap();
    let report = generate(&period, &[], &categories(), at(2025, 6, 1, 0)).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["period"]["kind"], "custom");
    assert_eq!(json["period"]["start"], "2025-01-01");
}

#[test]
fn get_report_uses_the_local_clock() {
    let recent = Local::now().naive_local() - Duration::hours(1);
    let stale = recent - Duration::days(800);
    let txs = vec![
        tx(1, 250, EntryType::Income, 1, recent),
        tx(2, 999, EntryType::Income, 1, stale),
    ];
    let report = get_report(&Period::Yearly, &txs, &categories()).unwrap();
    assert_eq!(report.total_income, Decimal::from(250));
    assert_eq!(report.category_summary[0].percentage, Decimal::ONE_HUNDRED);
}

fn report_args(args: &[&str]) -> anyhow::Result<Period> {
    let argv = ["uangkita", "report"].iter().chain(args).copied();
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("report", report_m)) = matches.subcommand() {
        period_from(report_m)
    } else {
        panic!("no report subcommand");
    }
}

#[test]
fn cli_period_defaults_to_monthly_and_validates_custom() {
    assert_eq!(report_args(&[]).unwrap(), Period::Monthly);
    assert_eq!(
        report_args(&["--period", "custom", "--start", "2025-01-01", "--end", "2025-01-31"]).unwrap(),
        Period::Custom {
            start: day(2025, 1, 1),
            end: day(2025, 1, 31)
        }
    );
    let missing = report_args(&["--period", "custom", "--start", "2025-01-01"]).unwrap_err();
    assert!(missing.to_string().contains("requires both a start and an end"));
    assert!(report_args(&["--period", "custom", "--start", "2025-02-01", "--end", "2025-01-01"]).is_err());
}

#[test]
fn oversized_totals_are_rejected() {
    let now = at(2025, 5, 20, 9);
    let mut huge = tx(1, 0, EntryType::Income, 1, now);
    huge.amount = Decimal::MAX;
    let mut again = huge.clone();
    again.id = 2;
    let err = generate(&Period::Daily, &[huge, again], &categories(), now).unwrap_err();
    assert!(matches!(err, uangkita::LedgerError::Validation(_)));
}
