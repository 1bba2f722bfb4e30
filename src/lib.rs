// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod ledger;
pub mod market;
pub mod models;
pub mod notify;
pub mod receipt;
pub mod report;
pub mod store;
pub mod utils;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{Ledger, LedgerPolicy};
pub use report::{Period, Report, get_report};
