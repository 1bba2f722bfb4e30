// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period reports over a snapshot of transactions.
//!
//! Everything here is a pure function of its inputs and the `now` it is given,
//! so reports can be produced concurrently from any number of callers.

use chrono::{Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, EntryType, Transaction};

/// Name of the bucket used when a transaction points at a missing category.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Period {
    /// Builds a period from its name. Custom periods need both dates.
    pub fn parse(kind: &str, start: Option<NaiveDate>, end: Option<NaiveDate>) -> LedgerResult<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            "yearly" => Ok(Period::Yearly),
            "custom" => match (start, end) {
                (Some(start), Some(end)) => Period::custom(start, end),
                _ => Err(LedgerError::validation(
                    "custom period requires both a start and an end date",
                )),
            },
            other => Err(LedgerError::validation(format!(
                "unknown period '{other}', expected daily, weekly, monthly, yearly or custom"
            ))),
        }
    }

    pub fn custom(start: NaiveDate, end: NaiveDate) -> LedgerResult<Self> {
        if start > end {
            return Err(LedgerError::validation(format!(
                "custom period starts after it ends ({start} > {end})"
            )));
        }
        Ok(Period::Custom { start, end })
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
            Period::Custom { .. } => "custom",
        }
    }

    /// Resolves the period to concrete bounds relative to `now`.
    ///
    /// Named periods end at `now`. Monthly and yearly windows step back by
    /// calendar months, clamping to the last day of a shorter month.
    pub fn window(&self, now: NaiveDateTime) -> Window {
        let start = match self {
            Period::Daily => now.date().and_time(NaiveTime::MIN),
            Period::Weekly => now - Duration::days(7),
            Period::Monthly => now
                .checked_sub_months(Months::new(1))
                .unwrap_or(NaiveDateTime::MIN),
            Period::Yearly => now
                .checked_sub_months(Months::new(12))
                .unwrap_or(NaiveDateTime::MIN),
            Period::Custom { start, end } => {
                return Window {
                    start: start.and_time(NaiveTime::MIN),
                    end: end.and_time(NaiveTime::MIN) + Duration::milliseconds(86_399_999),
                };
            }
        };
        Window { start, end: now }
    }
}

/// Inclusive time bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category_id: i64,
    pub category_name: String,
    pub entry_type: EntryType,
    /// Income adds, expense subtracts, so a mixed category nets against itself.
    pub amount: Decimal,
    /// Share of total income for a positive net, of total expense for a negative one.
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub period: Period,
    pub window: Window,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub category_summary: Vec<CategorySummary>,
}

/// Report over the local clock.
pub fn get_report(
    period: &Period,
    transactions: &[Transaction],
    categories: &[Category],
) -> LedgerResult<Report> {
    generate(period, transactions, categories, Local::now().naive_local())
}

pub fn generate(
    period: &Period,
    transactions: &[Transaction],
    categories: &[Category],
    now: NaiveDateTime,
) -> LedgerResult<Report> {
    let window = period.window(now);
    let by_id: HashMap<i64, &Category> = categories.iter().map(|c| (c.id, c)).collect();

    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut buckets: HashMap<i64, CategorySummary> = HashMap::new();

    for t in transactions.iter().filter(|t| window.contains(t.date)) {
        match t.entry_type {
            EntryType::Income => total_income = sum(total_income, t.amount)?,
            EntryType::Expense => total_expense = sum(total_expense, t.amount)?,
        }
        let bucket = buckets.entry(t.category_id).or_insert_with(|| {
            let (name, entry_type) = match by_id.get(&t.category_id) {
                Some(c) => (c.name.clone(), c.entry_type),
                None => (UNKNOWN_CATEGORY.to_string(), t.entry_type),
            };
            CategorySummary {
                category_id: t.category_id,
                category_name: name,
                entry_type,
                amount: Decimal::ZERO,
                percentage: Decimal::ZERO,
            }
        });
        bucket.amount = sum(bucket.amount, t.signed_amount())?;
    }

    let mut category_summary: Vec<CategorySummary> = buckets
        .into_values()
        .map(|mut s| {
            s.percentage = share(s.amount, total_income, total_expense);
            s
        })
        .collect();
    category_summary.sort_by(|a, b| {
        b.amount
            .abs()
            .cmp(&a.amount.abs())
            .then_with(|| a.category_name.cmp(&b.category_name))
            .then_with(|| a.category_id.cmp(&b.category_id))
    });

    Ok(Report {
        period: *period,
        window,
        total_income,
        total_expense,
        balance: sum(total_income, -total_expense)?,
        category_summary,
    })
}

fn sum(acc: Decimal, amount: Decimal) -> LedgerResult<Decimal> {
    acc.checked_add(amount)
        .ok_or_else(|| LedgerError::validation("report total out of range"))
}

fn share(amount: Decimal, total_income: Decimal, total_expense: Decimal) -> Decimal {
    let base = if amount > Decimal::ZERO {
        total_income
    } else if amount < Decimal::ZERO {
        total_expense.abs()
    } else {
        return Decimal::ZERO;
    };
    if base.is_zero() {
        return Decimal::ZERO;
    }
    amount
        .checked_div(base)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .map(|p| p.abs())
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn daily_starts_at_midnight() {
        let now = at(2025, 6, 15, 14, 30);
        let w = Period::Daily.window(now);
        assert_eq!(w.start, at(2025, 6, 15, 0, 0));
        assert_eq!(w.end, now);
    }

    #[test]
    fn weekly_is_seven_days_back() {
        let now = at(2025, 6, 15, 14, 30);
        assert_eq!(Period::Weekly.window(now).start, at(2025, 6, 8, 14, 30));
    }

    #[test]
    fn monthly_uses_calendar_months() {
        let now = at(2025, 3, 31, 9, 0);
        assert_eq!(Period::Monthly.window(now).start, at(2025, 2, 28, 9, 0));
        let leap = at(2024, 3, 31, 9, 0);
        assert_eq!(Period::Monthly.window(leap).start, at(2024, 2, 29, 9, 0));
    }

    #[test]
    fn yearly_steps_back_one_year() {
        let now = at(2024, 2, 29, 8, 0);
        assert_eq!(Period::Yearly.window(now).start, at(2023, 2, 28, 8, 0));
    }

    #[test]
    fn custom_end_covers_the_whole_day() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let w = Period::custom(d, d).unwrap().window(at(2030, 1, 1, 0, 0));
        assert!(w.contains(at(2025, 1, 10, 0, 0)));
        assert!(w.contains(d.and_hms_milli_opt(23, 59, 59, 999).unwrap()));
        assert!(!w.contains(at(2025, 1, 11, 0, 0)));
        assert!(!w.contains(d.pred_opt().unwrap().and_hms_opt(23, 59, 59).unwrap()));
    }

    #[test]
    fn custom_requires_both_dates() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert!(matches!(
            Period::parse("custom", Some(d), None),
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            Period::parse("custom", None, None),
            Err(LedgerError::Validation(_))
        ));
        assert_eq!(
            Period::parse(" Custom ", Some(d), Some(d)).unwrap(),
            Period::Custom { start: d, end: d }
        );
    }

    #[test]
    fn custom_rejects_reversed_range() {
        let a = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert!(Period::custom(a, b).is_err());
    }

    #[test]
    fn unknown_period_is_rejected() {
        assert!(Period::parse("hourly", None, None).is_err());
    }

    #[test]
    fn share_guards_zero_base() {
        assert_eq!(
            share(Decimal::from(-50), Decimal::from(100), Decimal::ZERO),
            Decimal::ZERO
        );
        assert_eq!(
            share(Decimal::from(25), Decimal::from(100), Decimal::ZERO),
            Decimal::from(25)
        );
        assert_eq!(
            share(Decimal::ZERO, Decimal::from(100), Decimal::from(100)),
            Decimal::ZERO
        );
    }
}
