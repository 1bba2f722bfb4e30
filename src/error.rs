// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Errors raised by the ledger and the report aggregator.
//!
//! Every variant is recovered at the operation boundary: callers receive a
//! structured failure and no partial state change is ever committed.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::EntryType;

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("Category '{category}' is {expected}, transaction is {actual}")]
    CategoryMismatch {
        category: String,
        expected: EntryType,
        actual: EntryType,
    },
    #[error("Currency mismatch: wallet {from} is {from_currency}, wallet {to} is {to_currency}")]
    CurrencyMismatch {
        from: i64,
        from_currency: String,
        to: i64,
        to_currency: String,
    },
    #[error("Insufficient funds in wallet {wallet}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        wallet: i64,
        balance: Decimal,
        requested: Decimal,
    },
    #[error("Collaborator failed: {0}")]
    Collaborator(String),
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

impl LedgerError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Bad input or a missing reference, as opposed to a storage fault.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Collaborator(_))
    }
}

impl From<reqwest::Error> for LedgerError {
    fn from(err: reqwest::Error) -> Self {
        Self::Collaborator(err.to_string())
    }
}
