// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;

use super::{LedgerPolicy, Transferred, shift, wallets};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{NewTransfer, TransferRecord};
use crate::store;

pub(super) fn transfer(
    conn: &Connection,
    policy: LedgerPolicy,
    new: NewTransfer,
) -> LedgerResult<Transferred> {
    if new.from_wallet_id == new.to_wallet_id {
        return Err(LedgerError::validation(
            "source and destination wallets must differ",
        ));
    }
    if new.amount <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "transfer amount must be greater than zero, got {}",
            new.amount
        )));
    }
    let description = new
        .description
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string);
    let new = NewTransfer { description, ..new };

    let mut from = wallets::owned(conn, &new.owner, new.from_wallet_id)?;
    let mut to = wallets::owned(conn, &new.owner, new.to_wallet_id)?;
    if !from.currency.eq_ignore_ascii_case(&to.currency) {
        return Err(LedgerError::CurrencyMismatch {
            from: from.id,
            from_currency: from.currency,
            to: to.id,
            to_currency: to.currency,
        });
    }
    if !policy.allow_overdraft && from.balance < new.amount {
        return Err(LedgerError::InsufficientFunds {
            wallet: from.id,
            balance: from.balance,
            requested: new.amount,
        });
    }

    from.balance = shift(from.balance, -new.amount)?;
    to.balance = shift(to.balance, new.amount)?;
    store::set_wallet_balance(conn, from.id, from.balance)?;
    store::set_wallet_balance(conn, to.id, to.balance)?;
    let id = store::insert_transfer(conn, &new)?;

    let transfer = TransferRecord {
        id,
        owner: new.owner,
        from_wallet_id: Some(from.id),
        to_wallet_id: Some(to.id),
        amount: new.amount,
        description: new.description,
        date: new.date,
    };
    Ok(Transferred { transfer, from, to })
}
