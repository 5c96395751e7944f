// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cardbook::billing::{
    BillingError, Charge, CycleConfig, closing_date_for, compute_invoice_summary,
    expand_installments,
};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn cfg(closing_day: u32) -> CycleConfig {
    CycleConfig {
        closing_day,
        due_day: None,
    }
}

fn charge(id: i64, date: NaiveDate, amount: &str) -> Charge {
    Charge {
        id,
        date,
        amount: dec(amount),
        payee: format!("payee-{}", id),
        installment_no: None,
        installment_total: None,
    }
}

#[test]
fn scenario_mid_cycle_partition_and_totals() {
    // closing 10, today Nov 15: current [Nov 11, Dec 10], next [Dec 11, Jan 10]
    let charges = vec![
        charge(1, day(2025, 11, 20), "100"),
        charge(2, day(2025, 12, 5), "50"),
        charge(3, day(2025, 12, 15), "30"),
    ];
    let s = compute_invoice_summary(&cfg(10), &charges, day(2025, 11, 15)).unwrap();

    assert_eq!(s.current_period.start, day(2025, 11, 11));
    assert_eq!(s.current_period.end, day(2025, 12, 10));
    assert_eq!(s.next_period.start, day(2025, 12, 11));
    assert_eq!(s.next_period.end, day(2026, 1, 10));

    assert_eq!(s.current.total, dec("150"));
    assert_eq!(s.next.total, dec("30"));
    let cur_ids: Vec<i64> = s.current.charges.iter().map(|c| c.id).collect();
    assert_eq!(cur_ids, vec![1, 2]);
    let next_ids: Vec<i64> = s.next.charges.iter().map(|c| c.id).collect();
    assert_eq!(next_ids, vec![3]);

    // all three are dated after Nov 15
    assert_eq!(s.committed, dec("180"));
}

#[test]
fn february_clamps_closing_day_31() {
    let s = compute_invoice_summary(&cfg(31), &[], day(2025, 2, 15)).unwrap();
    // January closes on the 31st as usual, so the period opens Feb 1
    assert_eq!(s.current_period.start, day(2025, 2, 1));
    assert_eq!(s.current_period.end, day(2025, 2, 28));
    assert_eq!(s.next_period.start, day(2025, 3, 1));
    assert_eq!(s.next_period.end, day(2025, 3, 31));
}

#[test]
fn leap_year_february_closes_on_29th() {
    let s = compute_invoice_summary(&cfg(31), &[], day(2024, 2, 15)).unwrap();
    assert_eq!(s.current_period.end, day(2024, 2, 29));
}

#[test]
fn thirty_day_month_clamps_closing_day_31() {
    let s = compute_invoice_summary(&cfg(31), &[], day(2025, 4, 10)).unwrap();
    assert_eq!(s.current_period.start, day(2025, 4, 1));
    assert_eq!(s.current_period.end, day(2025, 4, 30));
}

#[test]
fn closing_date_for_clamps_per_month() {
    assert_eq!(closing_date_for(day(2025, 2, 3), 31), day(2025, 2, 28));
    assert_eq!(closing_date_for(day(2024, 2, 3), 31), day(2024, 2, 29));
    assert_eq!(closing_date_for(day(2025, 4, 20), 31), day(2025, 4, 30));
    assert_eq!(closing_date_for(day(2025, 4, 20), 15), day(2025, 4, 15));
    assert_eq!(closing_date_for(day(2025, 6, 30), 30), day(2025, 6, 30));
}

#[test]
fn empty_charges_still_produce_periods() {
    let s = compute_invoice_summary(&cfg(10), &[], day(2025, 11, 15)).unwrap();
    assert_eq!(s.current.total, Decimal::ZERO);
    assert_eq!(s.next.total, Decimal::ZERO);
    assert_eq!(s.committed, Decimal::ZERO);
    assert!(s.current.charges.is_empty());
    assert!(s.next.charges.is_empty());
    assert_eq!(s.current_period.start, day(2025, 11, 11));
    assert_eq!(s.next_period.end, day(2026, 1, 10));
}

#[test]
fn december_rolls_into_next_year() {
    // closing 5, today Dec 20: both periods cross the year boundary
    let s = compute_invoice_summary(&cfg(5), &[], day(2025, 12, 20)).unwrap();
    assert_eq!(s.current_period.start, day(2025, 12, 6));
    assert_eq!(s.current_period.end, day(2026, 1, 5));
    assert_eq!(s.next_period.start, day(2026, 1, 6));
    assert_eq!(s.next_period.end, day(2026, 2, 5));
}

#[test]
fn january_reaches_back_into_prior_year() {
    let s = compute_invoice_summary(&cfg(5), &[], day(2026, 1, 2)).unwrap();
    assert_eq!(s.current_period.start, day(2025, 12, 6));
    assert_eq!(s.current_period.end, day(2026, 1, 5));
}

#[test]
fn periods_are_adjacent_and_never_overlap() {
    for closing_day in [1, 5, 10, 28, 29, 30, 31] {
        for today in [
            day(2024, 2, 29),
            day(2025, 1, 1),
            day(2025, 2, 28),
            day(2025, 6, 15),
            day(2025, 12, 31),
        ] {
            let s = compute_invoice_summary(&cfg(closing_day), &[], today).unwrap();
            assert!(s.current_period.start <= s.current_period.end);
            assert!(s.next_period.start <= s.next_period.end);
            assert_eq!(
                s.current_period.end + Days::new(1),
                s.next_period.start,
                "closing_day={} today={}",
                closing_day,
                today
            );
        }
    }
}

#[test]
fn period_bounds_are_inclusive() {
    // closing 10, today Nov 15: current [Nov 11, Dec 10]
    let charges = vec![
        charge(1, day(2025, 11, 11), "10"),
        charge(2, day(2025, 12, 10), "20"),
        charge(3, day(2026, 1, 10), "40"),
    ];
    let s = compute_invoice_summary(&cfg(10), &charges, day(2025, 11, 15)).unwrap();
    assert_eq!(s.current.total, dec("30"));
    // next period end Jan 10 is included too
    assert_eq!(s.next.total, dec("40"));
}

#[test]
fn closing_day_itself_rolls_the_cycle() {
    // The day before the closing day, the statement closing Nov 10 is
    // still the current one.
    let s = compute_invoice_summary(&cfg(10), &[], day(2025, 11, 9)).unwrap();
    assert_eq!(s.current_period.start, day(2025, 10, 11));
    assert_eq!(s.current_period.end, day(2025, 11, 10));

    // On the closing day the cycle has rolled: the open statement now
    // starts tomorrow.
    let s = compute_invoice_summary(&cfg(10), &[], day(2025, 11, 10)).unwrap();
    assert_eq!(s.current_period.start, day(2025, 11, 11));
    assert_eq!(s.current_period.end, day(2025, 12, 10));

    // A purchase made on the 9th is on the statement closing the 10th
    let charges = vec![charge(1, day(2025, 11, 9), "25")];
    let s = compute_invoice_summary(&cfg(10), &charges, day(2025, 11, 9)).unwrap();
    assert_eq!(s.current.total, dec("25"));
}

#[test]
fn charges_outside_both_periods_only_feed_committed() {
    // closing 10, today Nov 15: periods span Nov 11 .. Jan 10
    let charges = vec![
        charge(1, day(2025, 9, 1), "500"),  // long settled
        charge(2, day(2026, 3, 1), "200"),  // far-future installment
        charge(3, day(2025, 11, 20), "50"), // current
    ];
    let s = compute_invoice_summary(&cfg(10), &charges, day(2025, 11, 15)).unwrap();
    assert_eq!(s.current.total, dec("50"));
    assert_eq!(s.next.total, Decimal::ZERO);
    assert_eq!(s.committed, dec("250"));
}

#[test]
fn committed_uses_strict_future() {
    let charges = vec![
        charge(1, day(2025, 11, 15), "10"), // today: not committed
        charge(2, day(2025, 11, 16), "20"),
    ];
    let s = compute_invoice_summary(&cfg(10), &charges, day(2025, 11, 15)).unwrap();
    assert_eq!(s.committed, dec("20"));
    // today's charge still lands on the current invoice
    assert_eq!(s.current.total, dec("30"));
}

#[test]
fn committed_covers_at_least_the_next_invoice() {
    let charges = vec![
        charge(1, day(2025, 12, 12), "75"),
        charge(2, day(2026, 1, 2), "25"),
        charge(3, day(2026, 4, 1), "100"),
    ];
    let s = compute_invoice_summary(&cfg(10), &charges, day(2025, 11, 15)).unwrap();
    assert_eq!(s.next.total, dec("100"));
    assert!(s.committed >= s.next.total);
    assert_eq!(s.committed, dec("200"));
}

#[test]
fn totals_use_magnitudes() {
    let charges = vec![
        charge(1, day(2025, 11, 20), "-100"),
        charge(2, day(2025, 12, 5), "50"),
    ];
    let s = compute_invoice_summary(&cfg(10), &charges, day(2025, 11, 15)).unwrap();
    assert_eq!(s.current.total, dec("150"));
    assert_eq!(s.committed, dec("150"));
}

#[test]
fn identical_inputs_yield_identical_summaries() {
    let charges = vec![
        charge(2, day(2025, 12, 5), "50"),
        charge(1, day(2025, 11, 20), "100"),
        charge(3, day(2025, 12, 15), "30"),
    ];
    let a = compute_invoice_summary(&cfg(10), &charges, day(2025, 11, 15)).unwrap();
    let b = compute_invoice_summary(&cfg(10), &charges, day(2025, 11, 15)).unwrap();
    assert_eq!(a, b);
    // charges render in date order regardless of input order
    let ids: Vec<i64> = a.current.charges.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn out_of_range_closing_day_fails_fast() {
    let err = compute_invoice_summary(&cfg(0), &[], day(2025, 11, 15)).unwrap_err();
    assert!(matches!(err, BillingError::InvalidClosingDay(0)));
    let err = compute_invoice_summary(&cfg(32), &[], day(2025, 11, 15)).unwrap_err();
    assert!(matches!(err, BillingError::InvalidClosingDay(32)));
}

#[test]
fn out_of_range_due_day_fails_fast() {
    let bad = CycleConfig {
        closing_day: 10,
        due_day: Some(45),
    };
    let err = compute_invoice_summary(&bad, &[], day(2025, 11, 15)).unwrap_err();
    assert!(matches!(err, BillingError::InvalidDueDay(45)));
}

#[test]
fn first_and_last_closing_days_are_valid() {
    let s = compute_invoice_summary(&cfg(1), &[], day(2025, 6, 15)).unwrap();
    assert_eq!(s.current_period.start, day(2025, 6, 2));
    assert_eq!(s.current_period.end, day(2025, 7, 1));

    let s = compute_invoice_summary(&cfg(31), &[], day(2025, 7, 30)).unwrap();
    assert_eq!(s.current_period.start, day(2025, 7, 1));
    assert_eq!(s.current_period.end, day(2025, 7, 31));
}

#[test]
fn installments_split_evenly_with_remainder_up_front() {
    let rows = expand_installments(day(2025, 11, 15), dec("100"), 3).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], (day(2025, 11, 15), dec("33.34")));
    assert_eq!(rows[1], (day(2025, 12, 15), dec("33.33")));
    assert_eq!(rows[2], (day(2026, 1, 15), dec("33.33")));
    let total: Decimal = rows.iter().map(|(_, a)| *a).sum();
    assert_eq!(total, dec("100"));
}

#[test]
fn installment_dates_clamp_to_month_end() {
    let rows = expand_installments(day(2025, 1, 31), dec("90"), 3).unwrap();
    let dates: Vec<NaiveDate> = rows.iter().map(|(d, _)| *d).collect();
    assert_eq!(dates, vec![day(2025, 1, 31), day(2025, 2, 28), day(2025, 3, 31)]);
}

#[test]
fn zero_installments_is_rejected() {
    let err = expand_installments(day(2025, 1, 31), dec("90"), 0).unwrap_err();
    assert!(matches!(err, BillingError::InvalidInstallments(0)));
}
