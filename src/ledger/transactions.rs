// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;

use super::{Posted, Removed, Revised, shift, validate_entry, wallets};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{EntryType, NewTransaction, Transaction, TransactionUpdate};
use crate::store;

pub(super) fn owned(conn: &Connection, owner: &str, id: i64) -> LedgerResult<Transaction> {
    store::transaction(conn, id)?
        .filter(|t| t.owner == owner)
        .ok_or_else(|| LedgerError::not_found("transaction", id))
}

/// The category must be visible to `owner` and carry the same type as the entry.
fn check_category(
    conn: &Connection,
    owner: &str,
    category_id: i64,
    entry_type: EntryType,
) -> LedgerResult<()> {
    let category = store::category(conn, category_id)?
        .filter(|c| c.visible_to(owner))
        .ok_or_else(|| LedgerError::not_found("category", category_id))?;
    if category.entry_type != entry_type {
        return Err(LedgerError::CategoryMismatch {
            category: category.name,
            expected: category.entry_type,
            actual: entry_type,
        });
    }
    Ok(())
}

pub(super) fn post(conn: &Connection, new: NewTransaction) -> LedgerResult<Posted> {
    let description = validate_entry(&new.description, new.amount)?;
    let new = NewTransaction { description, ..new };
    let mut wallet = wallets::owned(conn, &new.owner, new.wallet_id)?;
    check_category(conn, &new.owner, new.category_id, new.entry_type)?;
    wallet.balance = shift(wallet.balance, new.entry_type.signed(new.amount))?;

    let id = store::insert_transaction(conn, &new)?;
    store::set_wallet_balance(conn, wallet.id, wallet.balance)?;

    let transaction = Transaction {
        id,
        owner: new.owner,
        description: new.description,
        amount: new.amount,
        entry_type: new.entry_type,
        date: new.date,
        category_id: new.category_id,
        wallet_id: new.wallet_id,
    };
    Ok(Posted {
        transaction,
        wallet,
    })
}

/// Reverses the stored amount and applies the new one. Equivalent to deleting
/// the old record and adding the new one, whether or not the wallet changed.
pub(super) fn revise(conn: &Connection, update: TransactionUpdate) -> LedgerResult<Revised> {
    let description = validate_entry(&update.description, update.amount)?;
    let update = TransactionUpdate {
        description,
        ..update
    };
    let original = owned(conn, &update.owner, update.id)?;
    check_category(conn, &update.owner, update.category_id, update.entry_type)?;

    let old_delta = original.signed_amount();
    let new_delta = update.entry_type.signed(update.amount);

    let wallets = if original.wallet_id == update.wallet_id {
        let mut wallet = wallets::owned(conn, &update.owner, update.wallet_id)?;
        let delta = new_delta
            .checked_sub(old_delta)
            .ok_or_else(|| LedgerError::validation("balance out of range"))?;
        wallet.balance = shift(wallet.balance, delta)?;
        store::set_wallet_balance(conn, wallet.id, wallet.balance)?;
        vec![wallet]
    } else {
        let mut old_wallet = wallets::owned(conn, &update.owner, original.wallet_id)?;
        let mut new_wallet = wallets::owned(conn, &update.owner, update.wallet_id)?;
        old_wallet.balance = shift(old_wallet.balance, -old_delta)?;
        new_wallet.balance = shift(new_wallet.balance, new_delta)?;
        store::set_wallet_balance(conn, old_wallet.id, old_wallet.balance)?;
        store::set_wallet_balance(conn, new_wallet.id, new_wallet.balance)?;
        vec![old_wallet, new_wallet]
    };

    if store::update_transaction(conn, &update)? == 0 {
        return Err(LedgerError::not_found("transaction", update.id));
    }

    let transaction = Transaction {
        id: update.id,
        owner: update.owner,
        description: update.description,
        amount: update.amount,
        entry_type: update.entry_type,
        date: update.date,
        category_id: update.category_id,
        wallet_id: update.wallet_id,
    };
    Ok(Revised {
        transaction,
        wallets,
    })
}

pub(super) fn remove(conn: &Connection, owner: &str, id: i64) -> LedgerResult<Removed> {
    let transaction = owned(conn, owner, id)?;
    let wallet = match store::wallet(conn, transaction.wallet_id)? {
        Some(mut wallet) => {
            wallet.balance = shift(wallet.balance, -transaction.signed_amount())?;
            store::set_wallet_balance(conn, wallet.id, wallet.balance)?;
            Some(wallet)
        }
        None => None,
    };
    store::delete_transaction(conn, id)?;
    Ok(Removed {
        transaction,
        wallet,
    })
}
