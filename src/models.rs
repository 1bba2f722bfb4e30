// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Direction of a transaction. The amount itself is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "income",
            EntryType::Expense => "expense",
        }
    }

    /// Contribution of `amount` to a wallet balance.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            EntryType::Income => amount,
            EntryType::Expense => -amount,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown entry type '{0}', expected income or expense")]
pub struct UnknownEntryType(pub String);

impl FromStr for EntryType {
    type Err = UnknownEntryType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(EntryType::Income),
            "expense" => Ok(EntryType::Expense),
            other => Err(UnknownEntryType(other.to_string())),
        }
    }
}

impl ToSql for EntryType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for EntryType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: i64,
    pub owner: String,
    pub name: String,
    pub currency: String,
    pub initial_balance: Decimal,
    pub balance: Decimal,
    pub color: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    /// `None` for the shared default categories.
    pub owner: Option<String>,
    pub name: String,
    pub entry_type: EntryType,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl Category {
    pub fn is_shared(&self) -> bool {
        self.owner.is_none()
    }

    pub fn visible_to(&self, owner: &str) -> bool {
        self.owner.as_deref().is_none_or(|o| o == owner)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub owner: String,
    pub description: String,
    pub amount: Decimal,
    pub entry_type: EntryType,
    pub date: NaiveDateTime,
    pub category_id: i64,
    pub wallet_id: i64,
}

impl Transaction {
    pub fn signed_amount(&self) -> Decimal {
        self.entry_type.signed(self.amount)
    }
}

/// Metadata kept for every wallet-to-wallet transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub id: i64,
    pub owner: String,
    pub from_wallet_id: Option<i64>,
    pub to_wallet_id: Option<i64>,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewWallet {
    pub owner: String,
    pub name: String,
    pub currency: String,
    pub initial_balance: Decimal,
    pub color: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub owner: String,
    pub name: String,
    pub entry_type: EntryType,
    pub color: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub owner: String,
    pub description: String,
    pub amount: Decimal,
    pub entry_type: EntryType,
    pub date: NaiveDateTime,
    pub category_id: i64,
    pub wallet_id: i64,
}

/// Full replacement record for an existing transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionUpdate {
    pub id: i64,
    pub owner: String,
    pub description: String,
    pub amount: Decimal,
    pub entry_type: EntryType,
    pub date: NaiveDateTime,
    pub category_id: i64,
    pub wallet_id: i64,
}

impl TransactionUpdate {
    /// Starts an update from the stored record, to be edited field by field.
    pub fn from_existing(tx: &Transaction) -> Self {
        Self {
            id: tx.id,
            owner: tx.owner.clone(),
            description: tx.description.clone(),
            amount: tx.amount,
            entry_type: tx.entry_type,
            date: tx.date,
            category_id: tx.category_id,
            wallet_id: tx.wallet_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewTransfer {
    pub owner: String,
    pub from_wallet_id: i64,
    pub to_wallet_id: i64,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDateTime,
}
