// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use tempfile::tempdir;
use uangkita::models::NewWallet;
use uangkita::{Ledger, config, db};

#[test]
fn currency_defaults_and_updates() {
    let conn = db::open_in_memory().unwrap();
    assert_eq!(config::get_currency(&conn).unwrap(), config::DEFAULT_CURRENCY);
    config::set_currency(&conn, " usd ").unwrap();
    assert_eq!(config::get_currency(&conn).unwrap(), "USD");
    assert!(config::set_currency(&conn, "dollars").is_err());
    assert_eq!(config::get_currency(&conn).unwrap(), "USD");
}

#[test]
fn overdraft_policy_round_trips() {
    let conn = db::open_in_memory().unwrap();
    assert!(!config::get_policy(&conn).unwrap().allow_overdraft);
    config::set_allow_overdraft(&conn, true).unwrap();
    assert!(config::get_policy(&conn).unwrap().allow_overdraft);
    assert_eq!(config::parse_flag(" OFF "), Some(false));
    assert_eq!(config::parse_flag("maybe"), None);
}

#[test]
fn balances_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    let id = {
        let mut ledger = Ledger::new(db::open_or_init(&path).unwrap());
        ledger
            .create_wallet(NewWallet {
                owner: "ana".into(),
                name: "Cash".into(),
                currency: "IDR".into(),
                initial_balance: Decimal::new(1_250_050, 2),
                color: Some("#00aa00".into()),
                icon: None,
            })
            .unwrap()
            .id
    };

    let ledger = Ledger::new(db::open_or_init(&path).unwrap());
    let wallet = ledger.wallet("ana", id).unwrap();
    assert_eq!(wallet.balance, Decimal::new(1_250_050, 2));
    assert_eq!(wallet.color.as_deref(), Some("#00aa00"));
    // seeding is idempotent
    assert_eq!(ledger.categories("ana").unwrap().len(), 11);
}
