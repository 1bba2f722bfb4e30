// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Receipt scanning used to pre-fill a transaction draft.
//!
//! A scan never bypasses the ledger: the draft it produces still goes through
//! the normal validation in `Ledger::add_transaction`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{EntryType, NewTransaction};
use crate::utils::http_client;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptScan {
    pub description: String,
    pub amount: Decimal,
    /// `YYYY-MM-DD` as printed on the receipt.
    pub date: String,
    #[serde(default)]
    pub items: Option<Vec<ReceiptItem>>,
}

impl ReceiptScan {
    /// Turns the scan into an expense draft. A missing or unreadable date falls
    /// back to `today`.
    pub fn into_new_transaction(
        self,
        owner: &str,
        wallet_id: i64,
        category_id: i64,
        today: NaiveDate,
    ) -> NewTransaction {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").unwrap_or(today);
        NewTransaction {
            owner: owner.to_string(),
            description: self.description,
            amount: self.amount,
            entry_type: EntryType::Expense,
            date: NaiveDateTime::new(date, NaiveTime::MIN),
            category_id,
            wallet_id,
        }
    }
}

pub trait ReceiptReader {
    fn read(&self, image_url: &str) -> LedgerResult<ReceiptScan>;
}

/// Posts `{ "imageUrl": ... }` to a vision endpoint and parses its JSON reply.
#[derive(Debug, Clone)]
pub struct HttpReceiptReader {
    endpoint: String,
}

impl HttpReceiptReader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanRequest<'a> {
    image_url: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScanResponse {
    Scan(ReceiptScan),
    Failure { error: String },
}

impl ReceiptReader for HttpReceiptReader {
    fn read(&self, image_url: &str) -> LedgerResult<ReceiptScan> {
        let client = http_client()?;
        let resp = client
            .post(&self.endpoint)
            .json(&ScanRequest { image_url })
            .send()?
            .error_for_status()?;
        match resp.json::<ScanResponse>()? {
            ScanResponse::Scan(scan) => {
                tracing::debug!(amount = %scan.amount, "receipt scanned");
                Ok(scan)
            }
            ScanResponse::Failure { error } => Err(LedgerError::Collaborator(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_payload_parses_numbers_and_items() {
        let raw = r#"{"description":"Indomaret","amount":45500,"date":"2025-04-02",
            "items":[{"name":"Milk","amount":"20500"},{"name":"Bread","amount":25000}]}"#;
        let scan: ReceiptScan = serde_json::from_str(raw).unwrap();
        assert_eq!(scan.amount, Decimal::from(45_500));
        assert_eq!(scan.items.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn draft_falls_back_to_today_on_bad_date() {
        let scan = ReceiptScan {
            description: "Parking".into(),
            amount: Decimal::from(5000),
            date: "yesterday".into(),
            items: None,
        };
        let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let draft = scan.into_new_transaction("ana", 3, 7, today);
        assert_eq!(draft.date.date(), today);
        assert_eq!(draft.entry_type, EntryType::Expense);
        assert_eq!(draft.wallet_id, 3);
        assert_eq!(draft.category_id, 7);
    }
}
