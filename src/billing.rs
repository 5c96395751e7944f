// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Credit-card statement cycle math.
//!
//! Everything here is a pure function of (cycle config, charges, today):
//! no clock access, no storage, no caching. Callers pass the reference
//! date explicitly so results are deterministic under test.

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("closing day {0} is outside 1-31")]
    InvalidClosingDay(u32),
    #[error("due day {0} is outside 1-31")]
    InvalidDueDay(u32),
    #[error("installment count must be at least 1, got {0}")]
    InvalidInstallments(u32),
}

/// Per-card cycle configuration. The due day is informational only;
/// period boundaries depend on the closing day alone.
#[derive(Debug, Clone, Copy)]
pub struct CycleConfig {
    pub closing_day: u32,
    pub due_day: Option<u32>,
}

impl CycleConfig {
    pub fn validate(&self) -> Result<(), BillingError> {
        if !(1..=31).contains(&self.closing_day) {
            return Err(BillingError::InvalidClosingDay(self.closing_day));
        }
        if let Some(d) = self.due_day {
            if !(1..=31).contains(&d) {
                return Err(BillingError::InvalidDueDay(d));
            }
        }
        Ok(())
    }
}

/// One charge as the engine sees it: a dated signed amount. Totals use
/// magnitudes, so callers normalize sign before persisting, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Charge {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub payee: String,
    pub installment_no: Option<u32>,
    pub installment_total: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodLabel {
    Current,
    Next,
}

/// A statement period; both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatementPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: PeriodLabel,
}

impl StatementPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub total: Decimal,
    pub charges: Vec<Charge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceSummary {
    pub current_period: StatementPeriod,
    pub next_period: StatementPeriod,
    pub current: Invoice,
    pub next: Invoice,
    /// Sum of magnitudes of every charge dated strictly after `today`,
    /// across all periods: credit already earmarked by scheduled rows.
    pub committed: Decimal,
}

/// Closing date in the month containing `anchor`, clamped to the last
/// day of that month when the configured day overshoots it.
pub fn closing_date_for(anchor: NaiveDate, closing_day: u32) -> NaiveDate {
    let first = anchor - Days::new(u64::from(anchor.day0()));
    let last = first + Months::new(1) - Days::new(1);
    let day = closing_day.clamp(1, last.day());
    first + Days::new(u64::from(day - 1))
}

/// Classify a card's charges into the current and next statement
/// periods and aggregate the totals.
///
/// A charge made on or after the closing day belongs to the following
/// cycle, so when `today` is the closing date itself the current period
/// starts tomorrow. Charges outside both periods are excluded from the
/// invoices but still count toward `committed` when dated in the
/// strict future.
pub fn compute_invoice_summary(
    cfg: &CycleConfig,
    charges: &[Charge],
    today: NaiveDate,
) -> Result<InvoiceSummary, BillingError> {
    cfg.validate()?;

    let this_close = closing_date_for(today, cfg.closing_day);
    let (start, end) = if today < this_close {
        let prev_close = closing_date_for(this_close - Months::new(1), cfg.closing_day);
        (prev_close + Days::new(1), this_close)
    } else {
        let next_close = closing_date_for(this_close + Months::new(1), cfg.closing_day);
        (this_close + Days::new(1), next_close)
    };
    let current_period = StatementPeriod {
        start,
        end,
        label: PeriodLabel::Current,
    };
    let next_period = StatementPeriod {
        start: end + Days::new(1),
        end: closing_date_for(end + Months::new(1), cfg.closing_day),
        label: PeriodLabel::Next,
    };

    let mut current = Invoice {
        total: Decimal::ZERO,
        charges: Vec::new(),
    };
    let mut next = Invoice {
        total: Decimal::ZERO,
        charges: Vec::new(),
    };
    let mut committed = Decimal::ZERO;
    for c in charges {
        if current_period.contains(c.date) {
            current.total += c.amount.abs();
            current.charges.push(c.clone());
        } else if next_period.contains(c.date) {
            next.total += c.amount.abs();
            next.charges.push(c.clone());
        }
        if c.date > today {
            committed += c.amount.abs();
        }
    }
    // Input order is unspecified; fix it so identical inputs render identically.
    current.charges.sort_by_key(|c| (c.date, c.id));
    next.charges.sort_by_key(|c| (c.date, c.id));

    Ok(InvoiceSummary {
        current_period,
        next_period,
        current,
        next,
        committed,
    })
}

/// Split a purchase into `count` monthly rows starting at `first_date`.
/// Later dates clamp to month end (a Jan 31 purchase falls on Feb 28).
/// Amounts are even 2dp parts, with the rounding remainder folded into
/// the first installment so the rows always sum to `total`.
pub fn expand_installments(
    first_date: NaiveDate,
    total: Decimal,
    count: u32,
) -> Result<Vec<(NaiveDate, Decimal)>, BillingError> {
    if count == 0 {
        return Err(BillingError::InvalidInstallments(count));
    }
    let n = Decimal::from(count);
    let part = (total / n).round_dp(2);
    let mut rows = Vec::with_capacity(count as usize);
    for i in 0..count {
        let date = first_date + Months::new(i);
        let amount = if i == 0 {
            total - part * (n - Decimal::ONE)
        } else {
            part
        };
        rows.push((date, amount));
    }
    Ok(rows)
}
