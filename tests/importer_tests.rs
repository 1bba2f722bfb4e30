// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;
use uangkita::models::NewWallet;
use uangkita::{Ledger, cli, commands::importer, db};

const OWNER: &str = "ana";
const HEADER: &str = "date,description,amount,type,category,wallet";

fn setup() -> (Ledger, i64) {
    let mut ledger = Ledger::new(db::open_in_memory().unwrap());
    let id = ledger
        .create_wallet(NewWallet {
            owner: OWNER.into(),
            name: "Cash".into(),
            currency: "IDR".into(),
            initial_balance: Decimal::from(1_000),
            color: None,
            icon: None,
        })
        .unwrap()
        .id;
    (ledger, id)
}

fn csv_file(rows: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}\n{rows}").unwrap();
    file.flush().unwrap();
    file
}

fn run_import(ledger: &mut Ledger, path: &str) -> anyhow::Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["uangkita", "import", "transactions", "--path", path]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(ledger, OWNER, import_m)
    } else {
        panic!("no import subcommand");
    }
}

#[test]
fn importer_trims_cli_path_argument() {
    let (mut ledger, wallet) = setup();
    let file = csv_file("2025-02-03,Nasi goreng,25000,expense,Food & Drink,Cash");
    let padded = format!("  {}  ", file.path().to_str().unwrap());
    run_import(&mut ledger, &padded).unwrap();

    assert_eq!(ledger.transactions(OWNER).unwrap().len(), 1);
    assert_eq!(
        ledger.wallet(OWNER, wallet).unwrap().balance,
        Decimal::from(-24_000)
    );
}

#[test]
fn importer_trims_fields_and_matches_names_loosely() {
    let (mut ledger, wallet) = setup();
    let file = csv_file(
        "2025-02-03 08:15,  Payday  , 5_000 , INCOME , salary ,  cash \n\
         2025-02-04,Bus,2500,expense,transport,CASH",
    );
    run_import(&mut ledger, file.path().to_str().unwrap()).unwrap();

    let txs = ledger.transactions(OWNER).unwrap();
    assert_eq!(txs.len(), 2);
    let payday = txs.iter().find(|t| t.description == "Payday").unwrap();
    assert_eq!(payday.date.to_string(), "2025-02-03 08:15:00");
    assert_eq!(payday.amount, Decimal::from(5_000));
    assert_eq!(
        ledger.wallet(OWNER, wallet).unwrap().balance,
        Decimal::from(3_500)
    );
    assert!(ledger.reconcile(OWNER).unwrap().is_empty());
}

#[test]
fn importer_rejects_invalid_amount() {
    let (mut ledger, _) = setup();
    let file = csv_file("2025-02-03,Shop,abc,expense,Shopping,Cash");
    let err = run_import(&mut ledger, file.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid decimal 'abc'"));
    assert!(ledger.transactions(OWNER).unwrap().is_empty());
}

#[test]
fn importer_rejects_unknown_wallet() {
    let (mut ledger, _) = setup();
    let file = csv_file("2025-02-03,Shop,10,expense,Shopping,Savings");
    let err = run_import(&mut ledger, file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("row 2: wallet 'Savings' not found"));
}

#[test]
fn importer_rejects_category_of_wrong_type() {
    let (mut ledger, _) = setup();
    let file = csv_file("2025-02-03,Shop,10,income,Shopping,Cash");
    let err = run_import(&mut ledger, file.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{err:#}").contains("no income category named 'Shopping'"));
}

#[test]
fn importer_rolls_back_when_row_fails() {
    let (mut ledger, wallet) = setup();
    let file = csv_file(
        "2025-02-03,Shop,5,expense,Shopping,Cash\n\
         2025-02-04,Refund,0,income,Other Income,Cash",
    );
    let err = run_import(&mut ledger, file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("amount must be greater than zero"));

    assert!(ledger.transactions(OWNER).unwrap().is_empty());
    assert_eq!(
        ledger.wallet(OWNER, wallet).unwrap().balance,
        Decimal::from(1_000)
    );
}
