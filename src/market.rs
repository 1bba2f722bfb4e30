// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Display-only market data. Nothing here feeds the ledger.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{LedgerError, LedgerResult};
use crate::utils::http_client;

const FRANKFURTER_LATEST: &str = "https://api.frankfurter.dev/v1/latest";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSnapshot {
    pub symbol: String,
    pub price: Decimal,
    pub as_of: DateTime<Utc>,
}

pub trait PriceSource {
    fn latest(&self, symbol: Option<&str>) -> LedgerResult<PriceSnapshot>;
}

/// Exchange rates from Frankfurter (ECB reference rates).
///
/// The symbol is the foreign currency; the price is expressed in `quote`.
#[derive(Debug, Clone)]
pub struct FrankfurterRates {
    quote: String,
    default_symbol: String,
}

impl FrankfurterRates {
    pub fn new(quote: &str) -> Self {
        Self {
            quote: quote.to_uppercase(),
            default_symbol: "USD".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Latest {
    base: String,
    date: NaiveDate,
    rates: HashMap<String, f64>,
}

fn snapshot_from(latest: Latest, quote: &str) -> LedgerResult<PriceSnapshot> {
    let rate = latest.rates.get(quote).copied().ok_or_else(|| {
        LedgerError::Collaborator(format!("no {}/{} rate in response", latest.base, quote))
    })?;
    let price = Decimal::try_from(rate).map_err(|e| {
        LedgerError::Collaborator(format!("invalid rate {rate} for {}/{quote}: {e}", latest.base))
    })?;
    Ok(PriceSnapshot {
        symbol: format!("{}/{}", latest.base, quote),
        price,
        as_of: latest.date.and_time(NaiveTime::MIN).and_utc(),
    })
}

impl PriceSource for FrankfurterRates {
    fn latest(&self, symbol: Option<&str>) -> LedgerResult<PriceSnapshot> {
        let base = symbol
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.default_symbol.as_str())
            .to_uppercase();
        if base == self.quote {
            return Ok(PriceSnapshot {
                symbol: format!("{base}/{base}"),
                price: Decimal::ONE,
                as_of: Utc::now(),
            });
        }
        let client = http_client()?;
        let latest: Latest = client
            .get(FRANKFURTER_LATEST)
            .query(&[("from", base.as_str()), ("to", self.quote.as_str())])
            .send()?
            .error_for_status()?
            .json()?;
        snapshot_from(latest, &self.quote)
    }
}
