// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uangkita::models::{EntryType, NewTransaction, NewWallet};
use uangkita::{Ledger, cli, commands::transactions, db};

const OWNER: &str = "ana";

fn setup() -> (Ledger, i64, i64) {
    let mut ledger = Ledger::new(db::open_in_memory().unwrap());
    let mut wallet = |name: &str| {
        ledger
            .create_wallet(NewWallet {
                owner: OWNER.into(),
                name: name.into(),
                currency: "IDR".into(),
                initial_balance: Decimal::from(100),
                color: None,
                icon: None,
            })
            .unwrap()
            .id
    };
    let w1 = wallet("W1");
    let w2 = wallet("W2");
    let food = ledger
        .category_named(OWNER, "food & drink", EntryType::Expense)
        .unwrap()
        .id;
    for (i, wallet_id) in [(1, w1), (2, w1), (3, w1), (4, w2)] {
        ledger
            .add_transaction(NewTransaction {
                owner: OWNER.into(),
                description: format!("P{i}"),
                amount: Decimal::from(10),
                entry_type: EntryType::Expense,
                date: NaiveDate::from_ymd_opt(2025, 1, i)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                category_id: food,
                wallet_id,
            })
            .unwrap();
    }
    (ledger, w1, w2)
}

fn list_rows(ledger: &Ledger, args: &[&str]) -> Vec<transactions::TransactionRow> {
    let cli = cli::build_cli();
    let argv = ["uangkita", "tx", "list"].iter().chain(args).copied();
    let matches = cli.get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            transactions::query_rows(ledger, OWNER, list_m).unwrap()
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_limit_respected() {
    let (ledger, _, _) = setup();
    let rows = list_rows(&ledger, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-04 00:00");
    assert_eq!(rows[0].category, "Food & Drink");
}

#[test]
fn list_filters_by_wallet() {
    let (ledger, w1, _) = setup();
    let w1_arg = w1.to_string();
    let rows = list_rows(&ledger, &["--wallet", &w1_arg]);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.wallet == "W1"));
    assert_eq!(rows[2].description, "P1");
}

#[test]
fn other_owners_see_nothing() {
    let (ledger, _, _) = setup();
    assert!(ledger.transactions("budi").unwrap().is_empty());
    assert!(ledger.wallets("budi").unwrap().is_empty());
    // shared categories are visible to everyone
    assert_eq!(ledger.categories("budi").unwrap().len(), 11);
}
