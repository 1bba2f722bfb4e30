// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use super::shift;
use crate::error::LedgerResult;
use crate::store;

/// A wallet whose stored balance no longer matches its history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceDrift {
    pub wallet_id: i64,
    pub wallet_name: String,
    pub stored: Decimal,
    pub expected: Decimal,
}

impl BalanceDrift {
    /// `None` when the gap itself is too large to represent.
    pub fn difference(&self) -> Option<Decimal> {
        self.stored.checked_sub(self.expected)
    }
}

pub(super) fn drifts(conn: &Connection, owner: &str) -> LedgerResult<Vec<BalanceDrift>> {
    let mut out = Vec::new();
    for wallet in store::load_wallets(conn, owner)? {
        let transactions = store::wallet_transactions(conn, wallet.id)?;
        let transfers = store::transfer_flows(conn, wallet.id)?;
        let expected = transactions
            .iter()
            .map(|t| t.signed_amount())
            .chain(transfers)
            .try_fold(wallet.initial_balance, shift)?;
        if expected != wallet.balance {
            out.push(BalanceDrift {
                wallet_id: wallet.id,
                wallet_name: wallet.name,
                stored: wallet.balance,
                expected,
            });
        }
    }
    Ok(out)
}
