// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, params};
use std::path::Path;

use crate::models::EntryType;

/// Shared categories available to every owner.
const DEFAULT_CATEGORIES: &[(&str, EntryType)] = &[
    ("Salary", EntryType::Income),
    ("Bonus", EntryType::Income),
    ("Investment", EntryType::Income),
    ("Other Income", EntryType::Income),
    ("Food & Drink", EntryType::Expense),
    ("Transport", EntryType::Expense),
    ("Shopping", EntryType::Expense),
    ("Bills", EntryType::Expense),
    ("Entertainment", EntryType::Expense),
    ("Health", EntryType::Expense),
    ("Other Expense", EntryType::Expense),
];

pub fn open_or_init(path: &Path) -> rusqlite::Result<Connection> {
    let mut conn = Connection::open(path)?;
    init_schema(&mut conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn open_in_memory() -> rusqlite::Result<Connection> {
    let mut conn = Connection::open_in_memory()?;
    init_schema(&mut conn)?;
    Ok(conn)
}

fn init_schema(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS wallets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner TEXT NOT NULL,
        name TEXT NOT NULL,
        currency TEXT NOT NULL,
        initial_balance TEXT NOT NULL DEFAULT '0',
        balance TEXT NOT NULL DEFAULT '0',
        color TEXT,
        icon TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(owner, name)
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner TEXT,
        name TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        color TEXT,
        icon TEXT
    );
    CREATE UNIQUE INDEX IF NOT EXISTS idx_categories_owner_name
        ON categories(IFNULL(owner, ''), name, type);

    -- category_id has no FK: deletes are guarded in the ledger, and reports
    -- tolerate dangling references.
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner TEXT NOT NULL,
        description TEXT NOT NULL,
        amount TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        date TEXT NOT NULL,
        category_id INTEGER NOT NULL,
        wallet_id INTEGER NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(wallet_id) REFERENCES wallets(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_wallet ON transactions(wallet_id);

    CREATE TABLE IF NOT EXISTS transfers(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner TEXT NOT NULL,
        from_wallet_id INTEGER,
        to_wallet_id INTEGER,
        amount TEXT NOT NULL,
        description TEXT,
        date TEXT NOT NULL,
        FOREIGN KEY(from_wallet_id) REFERENCES wallets(id) ON DELETE SET NULL,
        FOREIGN KEY(to_wallet_id) REFERENCES wallets(id) ON DELETE SET NULL
    );
    "#,
    )?;
    seed_default_categories(conn)?;
    Ok(())
}

fn seed_default_categories(conn: &mut Connection) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO categories(owner, name, type)
             SELECT NULL, ?1, ?2
             WHERE NOT EXISTS (
                 SELECT 1 FROM categories WHERE owner IS NULL AND name=?1 AND type=?2
             )",
        )?;
        for (name, kind) in DEFAULT_CATEGORIES {
            stmt.execute(params![name, kind])?;
        }
    }
    tx.commit()
}
