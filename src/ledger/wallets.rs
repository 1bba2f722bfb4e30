// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;

use super::WalletRemoval;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{NewWallet, Wallet};
use crate::store;

/// A wallet owned by someone else is reported as missing.
pub(super) fn owned(conn: &Connection, owner: &str, id: i64) -> LedgerResult<Wallet> {
    store::wallet(conn, id)?
        .filter(|w| w.owner == owner)
        .ok_or_else(|| LedgerError::not_found("wallet", id))
}

fn normalize_name(conn: &Connection, owner: &str, name: &str, skip: Option<i64>) -> LedgerResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::validation("wallet name must not be empty"));
    }
    let taken = store::load_wallets(conn, owner)?
        .iter()
        .any(|w| Some(w.id) != skip && w.name.eq_ignore_ascii_case(name));
    if taken {
        return Err(LedgerError::validation(format!(
            "a wallet named '{name}' already exists"
        )));
    }
    Ok(name.to_string())
}

fn normalize_currency(raw: &str) -> LedgerResult<String> {
    let code = raw.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(LedgerError::validation(format!(
            "currency must be a three-letter code, got '{}'",
            raw.trim()
        )));
    }
    Ok(code)
}

pub(super) fn create(conn: &Connection, new: NewWallet) -> LedgerResult<Wallet> {
    let name = normalize_name(conn, &new.owner, &new.name, None)?;
    let currency = normalize_currency(&new.currency)?;
    let new = NewWallet {
        name,
        currency,
        ..new
    };
    let id = store::insert_wallet(conn, &new)?;
    Ok(Wallet {
        id,
        owner: new.owner,
        name: new.name,
        currency: new.currency,
        initial_balance: new.initial_balance,
        balance: new.initial_balance,
        color: new.color,
        icon: new.icon,
    })
}

pub(super) fn rename(conn: &Connection, owner: &str, id: i64, name: &str) -> LedgerResult<Wallet> {
    let mut wallet = owned(conn, owner, id)?;
    wallet.name = normalize_name(conn, owner, name, Some(id))?;
    store::rename_wallet(conn, id, &wallet.name)?;
    Ok(wallet)
}

pub(super) fn delete(conn: &Connection, owner: &str, id: i64) -> LedgerResult<WalletRemoval> {
    let wallet = owned(conn, owner, id)?;
    let transactions_removed = store::delete_wallet_transactions(conn, id)?;
    store::delete_wallet(conn, id)?;
    Ok(WalletRemoval {
        wallet,
        transactions_removed,
    })
}
