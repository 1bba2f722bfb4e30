// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Row-level access to the SQLite tables.
//!
//! Functions take `&Connection` so the ledger can run them inside an open
//! `rusqlite::Transaction`. Nothing here touches balances on its own.

use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::models::{
    Category, EntryType, NewCategory, NewTransaction, NewTransfer, NewWallet, Transaction,
    TransactionUpdate, TransferRecord, Wallet,
};

const WALLET_COLS: &str = "id, owner, name, currency, initial_balance, balance, color, icon";
const CATEGORY_COLS: &str = "id, owner, name, type, color, icon";
const TRANSACTION_COLS: &str =
    "id, owner, description, amount, type, date, category_id, wallet_id";
const TRANSFER_COLS: &str = "id, owner, from_wallet_id, to_wallet_id, amount, description, date";

fn decimal_at(r: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = r.get(idx)?;
    raw.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn wallet_from_row(r: &Row<'_>) -> rusqlite::Result<Wallet> {
    Ok(Wallet {
        id: r.get(0)?,
        owner: r.get(1)?,
        name: r.get(2)?,
        currency: r.get(3)?,
        initial_balance: decimal_at(r, 4)?,
        balance: decimal_at(r, 5)?,
        color: r.get(6)?,
        icon: r.get(7)?,
    })
}

fn category_from_row(r: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: r.get(0)?,
        owner: r.get(1)?,
        name: r.get(2)?,
        entry_type: r.get(3)?,
        color: r.get(4)?,
        icon: r.get(5)?,
    })
}

fn transaction_from_row(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        owner: r.get(1)?,
        description: r.get(2)?,
        amount: decimal_at(r, 3)?,
        entry_type: r.get(4)?,
        date: r.get(5)?,
        category_id: r.get(6)?,
        wallet_id: r.get(7)?,
    })
}

fn transfer_from_row(r: &Row<'_>) -> rusqlite::Result<TransferRecord> {
    Ok(TransferRecord {
        id: r.get(0)?,
        owner: r.get(1)?,
        from_wallet_id: r.get(2)?,
        to_wallet_id: r.get(3)?,
        amount: decimal_at(r, 4)?,
        description: r.get(5)?,
        date: r.get(6)?,
    })
}

// Wallets

pub fn load_wallets(conn: &Connection, owner: &str) -> rusqlite::Result<Vec<Wallet>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {WALLET_COLS} FROM wallets WHERE owner=?1 ORDER BY name, id"
    ))?;
    let rows = stmt.query_map(params![owner], wallet_from_row)?;
    rows.collect()
}

pub fn wallet(conn: &Connection, id: i64) -> rusqlite::Result<Option<Wallet>> {
    conn.query_row(
        &format!("SELECT {WALLET_COLS} FROM wallets WHERE id=?1"),
        params![id],
        wallet_from_row,
    )
    .optional()
}

pub fn insert_wallet(conn: &Connection, new: &NewWallet) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO wallets(owner, name, currency, initial_balance, balance, color, icon)
         VALUES (?1, ?2, ?3, ?4, ?4, ?5, ?6)",
        params![
            new.owner,
            new.name,
            new.currency,
            new.initial_balance.to_string(),
            new.color,
            new.icon
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn set_wallet_balance(conn: &Connection, id: i64, balance: Decimal) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE wallets SET balance=?1 WHERE id=?2",
        params![balance.to_string(), id],
    )
}

pub fn rename_wallet(conn: &Connection, id: i64, name: &str) -> rusqlite::Result<usize> {
    conn.execute("UPDATE wallets SET name=?1 WHERE id=?2", params![name, id])
}

pub fn delete_wallet(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM wallets WHERE id=?1", params![id])
}

// Categories

/// The owner's own categories followed by the shared defaults.
pub fn load_categories(conn: &Connection, owner: &str) -> rusqlite::Result<Vec<Category>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CATEGORY_COLS} FROM categories
         WHERE owner=?1 OR owner IS NULL
         ORDER BY owner IS NULL, type, name"
    ))?;
    let rows = stmt.query_map(params![owner], category_from_row)?;
    rows.collect()
}

pub fn category(conn: &Connection, id: i64) -> rusqlite::Result<Option<Category>> {
    conn.query_row(
        &format!("SELECT {CATEGORY_COLS} FROM categories WHERE id=?1"),
        params![id],
        category_from_row,
    )
    .optional()
}

pub fn category_by_name(
    conn: &Connection,
    owner: &str,
    name: &str,
    entry_type: EntryType,
) -> rusqlite::Result<Option<Category>> {
    conn.query_row(
        &format!(
            "SELECT {CATEGORY_COLS} FROM categories
             WHERE (owner=?1 OR owner IS NULL) AND name=?2 COLLATE NOCASE AND type=?3
             ORDER BY owner IS NULL LIMIT 1"
        ),
        params![owner, name, entry_type],
        category_from_row,
    )
    .optional()
}

pub fn insert_category(conn: &Connection, new: &NewCategory) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO categories(owner, name, type, color, icon) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![new.owner, new.name, new.entry_type, new.color, new.icon],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn count_transactions_in_category(conn: &Connection, id: i64) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE category_id=?1",
        params![id],
        |r| r.get(0),
    )
}

pub fn delete_category(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM categories WHERE id=?1", params![id])
}

// Transactions

/// Newest first, like the activity list.
pub fn load_transactions(conn: &Connection, owner: &str) -> rusqlite::Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TRANSACTION_COLS} FROM transactions WHERE owner=?1 ORDER BY date DESC, id DESC"
    ))?;
    let rows = stmt.query_map(params![owner], transaction_from_row)?;
    rows.collect()
}

pub fn wallet_transactions(conn: &Connection, wallet_id: i64) -> rusqlite::Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TRANSACTION_COLS} FROM transactions WHERE wallet_id=?1 ORDER BY date, id"
    ))?;
    let rows = stmt.query_map(params![wallet_id], transaction_from_row)?;
    rows.collect()
}

pub fn transaction(conn: &Connection, id: i64) -> rusqlite::Result<Option<Transaction>> {
    conn.query_row(
        &format!("SELECT {TRANSACTION_COLS} FROM transactions WHERE id=?1"),
        params![id],
        transaction_from_row,
    )
    .optional()
}

pub fn insert_transaction(conn: &Connection, new: &NewTransaction) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO transactions(owner, description, amount, type, date, category_id, wallet_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.owner,
            new.description,
            new.amount.to_string(),
            new.entry_type,
            new.date,
            new.category_id,
            new.wallet_id
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_transaction(conn: &Connection, upd: &TransactionUpdate) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE transactions
         SET description=?1, amount=?2, type=?3, date=?4, category_id=?5, wallet_id=?6
         WHERE id=?7",
        params![
            upd.description,
            upd.amount.to_string(),
            upd.entry_type,
            upd.date,
            upd.category_id,
            upd.wallet_id,
            upd.id
        ],
    )
}

pub fn delete_transaction(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM transactions WHERE id=?1", params![id])
}

pub fn delete_wallet_transactions(conn: &Connection, wallet_id: i64) -> rusqlite::Result<usize> {
    conn.execute(
        "DELETE FROM transactions WHERE wallet_id=?1",
        params![wallet_id],
    )
}

// Transfers

pub fn load_transfers(conn: &Connection, owner: &str) -> rusqlite::Result<Vec<TransferRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TRANSFER_COLS} FROM transfers WHERE owner=?1 ORDER BY date DESC, id DESC"
    ))?;
    let rows = stmt.query_map(params![owner], transfer_from_row)?;
    rows.collect()
}

pub fn insert_transfer(conn: &Connection, new: &NewTransfer) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO transfers(owner, from_wallet_id, to_wallet_id, amount, description, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            new.owner,
            new.from_wallet_id,
            new.to_wallet_id,
            new.amount.to_string(),
            new.description,
            new.date
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Signed transfer amounts touching a wallet: positive in, negative out.
pub fn transfer_flows(conn: &Connection, wallet_id: i64) -> rusqlite::Result<Vec<Decimal>> {
    let mut stmt = conn.prepare(
        "SELECT from_wallet_id, to_wallet_id, amount FROM transfers
         WHERE from_wallet_id=?1 OR to_wallet_id=?1",
    )?;
    let mut rows = stmt.query(params![wallet_id])?;
    let mut flows = Vec::new();
    while let Some(r) = rows.next()? {
        let from: Option<i64> = r.get(0)?;
        let to: Option<i64> = r.get(1)?;
        let amount = decimal_at(r, 2)?;
        if to == Some(wallet_id) {
            flows.push(amount);
        }
        if from == Some(wallet_id) {
            flows.push(-amount);
        }
    }
    Ok(flows)
}
