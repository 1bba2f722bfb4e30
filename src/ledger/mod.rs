// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger keeps every wallet balance equal to its opening balance plus the
//! signed amounts of its transactions and the transfers moving through it.
//!
//! Each mutating call runs in a single SQLite transaction opened with
//! `BEGIN IMMEDIATE`, so the record write and the balance write land together
//! and concurrent writers against the same database are serialized.

use chrono::{Local, NaiveDateTime};
use rusqlite::{Connection, TransactionBehavior};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Category, EntryType, NewCategory, NewTransaction, NewTransfer, NewWallet, Transaction,
    TransactionUpdate, TransferRecord, Wallet,
};
use crate::notify::{NoopNotifier, Notifier, Outcome};
use crate::report::{self, Period, Report};
use crate::store;

mod categories;
mod reconcile;
mod transactions;
mod transfers;
mod wallets;

pub use reconcile::BalanceDrift;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerPolicy {
    /// Let a transfer take the source wallet below zero.
    pub allow_overdraft: bool,
}

/// A newly recorded transaction and the wallet it moved.
#[derive(Debug, Clone, Serialize)]
pub struct Posted {
    pub transaction: Transaction,
    pub wallet: Wallet,
}

/// An edited transaction and the one or two wallets whose balance changed.
#[derive(Debug, Clone, Serialize)]
pub struct Revised {
    pub transaction: Transaction,
    pub wallets: Vec<Wallet>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Removed {
    pub transaction: Transaction,
    pub wallet: Option<Wallet>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Transferred {
    pub transfer: TransferRecord,
    pub from: Wallet,
    pub to: Wallet,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletRemoval {
    pub wallet: Wallet,
    pub transactions_removed: usize,
}

/// Result of a category delete. `InUse` is an expected refusal, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CategoryRemoval {
    Deleted(Category),
    InUse { category: Category, transactions: i64 },
}

pub struct Ledger {
    conn: Connection,
    policy: LedgerPolicy,
    notifier: Box<dyn Notifier>,
}

impl Ledger {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            policy: LedgerPolicy::default(),
            notifier: Box::new(NoopNotifier),
        }
    }

    pub fn with_policy(mut self, policy: LedgerPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn policy(&self) -> LedgerPolicy {
        self.policy
    }

    /// Runs `f` inside an immediate transaction; any error rolls everything back.
    fn write<T>(
        &mut self,
        f: impl FnOnce(&rusqlite::Transaction<'_>) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    fn finish<T>(
        &self,
        title: &str,
        result: LedgerResult<T>,
        describe: impl FnOnce(&T) -> Outcome,
    ) -> LedgerResult<T> {
        let outcome = match &result {
            Ok(value) => describe(value),
            Err(err) if err.is_rejection() => {
                tracing::warn!(operation = title, error = %err, "ledger operation rejected");
                Outcome::warning(title, err.to_string())
            }
            Err(err) => {
                tracing::error!(operation = title, error = %err, "ledger operation failed");
                Outcome::error(title, err.to_string())
            }
        };
        self.notifier.notify(&outcome);
        result
    }

    // Transactions

    pub fn add_transaction(&mut self, new: NewTransaction) -> LedgerResult<Posted> {
        let result = self.write(|tx| transactions::post(tx, new));
        self.finish("Transaction added", result, |p| {
            tracing::info!(
                transaction = p.transaction.id,
                wallet = p.wallet.id,
                balance = %p.wallet.balance,
                "transaction posted"
            );
            Outcome::success(
                "Transaction added",
                format!(
                    "{} {} recorded in {}",
                    p.transaction.entry_type, p.transaction.amount, p.wallet.name
                ),
            )
        })
    }

    /// Posts a batch atomically: either every transaction lands or none does.
    pub fn add_transactions(&mut self, batch: Vec<NewTransaction>) -> LedgerResult<Vec<Posted>> {
        let result = self.write(|tx| {
            batch
                .into_iter()
                .map(|new| transactions::post(tx, new))
                .collect::<LedgerResult<Vec<_>>>()
        });
        self.finish("Transactions imported", result, |posted| {
            tracing::info!(count = posted.len(), "transaction batch posted");
            Outcome::success(
                "Transactions imported",
                format!("{} transactions recorded", posted.len()),
            )
        })
    }

    pub fn update_transaction(&mut self, update: TransactionUpdate) -> LedgerResult<Revised> {
        let result = self.write(|tx| transactions::revise(tx, update));
        self.finish("Transaction updated", result, |r| {
            tracing::info!(
                transaction = r.transaction.id,
                wallets = r.wallets.len(),
                "transaction revised"
            );
            Outcome::success(
                "Transaction updated",
                format!("'{}' saved", r.transaction.description),
            )
        })
    }

    pub fn delete_transaction(&mut self, owner: &str, id: i64) -> LedgerResult<Removed> {
        let result = self.write(|tx| transactions::remove(tx, owner, id));
        self.finish("Transaction deleted", result, |r| {
            tracing::info!(transaction = r.transaction.id, "transaction removed");
            Outcome::success(
                "Transaction deleted",
                format!("'{}' removed", r.transaction.description),
            )
        })
    }

    pub fn transfer_between_wallets(&mut self, new: NewTransfer) -> LedgerResult<Transferred> {
        let policy = self.policy;
        let result = self.write(|tx| transfers::transfer(tx, policy, new));
        self.finish("Transfer", result, |t| {
            tracing::info!(
                transfer = t.transfer.id,
                from = t.from.id,
                to = t.to.id,
                amount = %t.transfer.amount,
                "transfer applied"
            );
            Outcome::success(
                "Transfer",
                format!(
                    "{} moved from {} to {}",
                    t.transfer.amount, t.from.name, t.to.name
                ),
            )
        })
    }

    // Wallets

    pub fn create_wallet(&mut self, new: NewWallet) -> LedgerResult<Wallet> {
        let result = self.write(|tx| wallets::create(tx, new));
        self.finish("Wallet created", result, |w| {
            tracing::info!(wallet = w.id, "wallet created");
            Outcome::success("Wallet created", format!("{} ({})", w.name, w.currency))
        })
    }

    pub fn rename_wallet(&mut self, owner: &str, id: i64, name: &str) -> LedgerResult<Wallet> {
        let result = self.write(|tx| wallets::rename(tx, owner, id, name));
        self.finish("Wallet renamed", result, |w| {
            Outcome::success("Wallet renamed", format!("Wallet {} is now {}", w.id, w.name))
        })
    }

    /// Deletes the wallet together with every transaction recorded in it.
    pub fn delete_wallet(&mut self, owner: &str, id: i64) -> LedgerResult<WalletRemoval> {
        let result = self.write(|tx| wallets::delete(tx, owner, id));
        self.finish("Wallet deleted", result, |r| {
            tracing::info!(
                wallet = r.wallet.id,
                transactions = r.transactions_removed,
                "wallet removed"
            );
            Outcome::success(
                "Wallet deleted",
                format!(
                    "{} removed with {} transactions",
                    r.wallet.name, r.transactions_removed
                ),
            )
        })
    }

    // Categories

    pub fn create_category(&mut self, new: NewCategory) -> LedgerResult<Category> {
        let result = self.write(|tx| categories::create(tx, new));
        self.finish("Category created", result, |c| {
            Outcome::success("Category created", format!("{} ({})", c.name, c.entry_type))
        })
    }

    pub fn delete_category(&mut self, owner: &str, id: i64) -> LedgerResult<CategoryRemoval> {
        let result = self.write(|tx| categories::delete(tx, owner, id));
        self.finish("Category deleted", result, |r| match r {
            CategoryRemoval::Deleted(c) => {
                Outcome::success("Category deleted", format!("{} removed", c.name))
            }
            CategoryRemoval::InUse {
                category,
                transactions,
            } => Outcome::warning(
                "Cannot delete category",
                format!(
                    "{} is used by {} transactions",
                    category.name, transactions
                ),
            ),
        })
    }

    // Read side

    pub fn wallets(&self, owner: &str) -> LedgerResult<Vec<Wallet>> {
        Ok(store::load_wallets(&self.conn, owner)?)
    }

    pub fn wallet(&self, owner: &str, id: i64) -> LedgerResult<Wallet> {
        wallets::owned(&self.conn, owner, id)
    }

    pub fn categories(&self, owner: &str) -> LedgerResult<Vec<Category>> {
        Ok(store::load_categories(&self.conn, owner)?)
    }

    /// Looks up a visible category by name, own categories first.
    pub fn category_named(
        &self,
        owner: &str,
        name: &str,
        entry_type: EntryType,
    ) -> LedgerResult<Category> {
        store::category_by_name(&self.conn, owner, name.trim(), entry_type)?.ok_or_else(|| {
            LedgerError::validation(format!("no {entry_type} category named '{}'", name.trim()))
        })
    }

    pub fn transactions(&self, owner: &str) -> LedgerResult<Vec<Transaction>> {
        Ok(store::load_transactions(&self.conn, owner)?)
    }

    pub fn transaction(&self, owner: &str, id: i64) -> LedgerResult<Transaction> {
        transactions::owned(&self.conn, owner, id)
    }

    pub fn transfers(&self, owner: &str) -> LedgerResult<Vec<TransferRecord>> {
        Ok(store::load_transfers(&self.conn, owner)?)
    }

    pub fn report(&self, owner: &str, period: &Period) -> LedgerResult<Report> {
        self.report_at(owner, period, Local::now().naive_local())
    }

    /// Builds a report from a fresh snapshot, evaluated as of `now`.
    pub fn report_at(
        &self,
        owner: &str,
        period: &Period,
        now: NaiveDateTime,
    ) -> LedgerResult<Report> {
        let transactions = store::load_transactions(&self.conn, owner)?;
        let categories = store::load_categories(&self.conn, owner)?;
        report::generate(period, &transactions, &categories, now)
    }

    pub fn reconcile(&self, owner: &str) -> LedgerResult<Vec<BalanceDrift>> {
        reconcile::drifts(&self.conn, owner)
    }
}

/// Trims a description and checks it and the amount.
pub(crate) fn validate_entry(description: &str, amount: Decimal) -> LedgerResult<String> {
    let description = description.trim();
    if description.is_empty() {
        return Err(LedgerError::validation("description must not be empty"));
    }
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "amount must be greater than zero, got {amount}"
        )));
    }
    Ok(description.to_string())
}

/// Moves a balance by `delta`, refusing results a `Decimal` cannot hold.
pub(crate) fn shift(balance: Decimal, delta: Decimal) -> LedgerResult<Decimal> {
    balance
        .checked_add(delta)
        .ok_or_else(|| LedgerError::validation("balance out of range"))
}
