// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::billing::{Charge, Invoice, StatementPeriod, compute_invoice_summary};
use crate::models::Card;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let name = sub.get_one::<String>("card").unwrap();
    // Wall clock enters here, at the command boundary only.
    let today = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };

    let card = load_card(conn, name)?;
    let charges = load_charges(conn, card.id)?;
    let summary = compute_invoice_summary(&card.cycle(), &charges, today)?;

    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }

    print_invoice("Current", &summary.current_period, &summary.current, &card.currency);
    print_invoice("Next", &summary.next_period, &summary.next, &card.currency);
    println!(
        "Committed (future charges): {}",
        fmt_money(&summary.committed, &card.currency)
    );
    if let Some(limit) = card.credit_limit {
        println!(
            "Limit {} | available after committed {}",
            fmt_money(&limit, &card.currency),
            fmt_money(&(limit - summary.committed), &card.currency)
        );
    }
    Ok(())
}

fn print_invoice(title: &str, period: &StatementPeriod, invoice: &Invoice, ccy: &str) {
    println!(
        "{} statement {} .. {} | total {}",
        title,
        period.start,
        period.end,
        fmt_money(&invoice.total, ccy)
    );
    if invoice.charges.is_empty() {
        return;
    }
    let rows: Vec<Vec<String>> = invoice
        .charges
        .iter()
        .map(|c| {
            let inst = match (c.installment_no, c.installment_total) {
                (Some(i), Some(n)) => format!("{}/{}", i, n),
                _ => String::new(),
            };
            vec![
                c.date.to_string(),
                c.payee.clone(),
                c.amount.round_dp(2).to_string(),
                inst,
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Date", "Payee", "Amount", "Inst."], rows));
}

pub fn load_card(conn: &Connection, name: &str) -> Result<Card> {
    let mut stmt = conn.prepare(
        "SELECT id, name, closing_day, due_day, credit_limit, currency FROM cards WHERE name=?1",
    )?;
    let card = stmt
        .query_row(params![name], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, u32>(2)?,
                r.get::<_, Option<u32>>(3)?,
                r.get::<_, Option<String>>(4)?,
                r.get::<_, String>(5)?,
            ))
        })
        .with_context(|| format!("Card '{}' not found", name))?;
    let (id, name, closing_day, due_day, limit_s, currency) = card;
    let credit_limit = limit_s
        .map(|s| {
            s.parse::<Decimal>()
                .with_context(|| format!("Invalid credit limit '{}' on card", s))
        })
        .transpose()?;
    Ok(Card {
        id,
        name,
        closing_day,
        due_day,
        credit_limit,
        currency,
    })
}

/// Load every charge on a card. A row whose stored date or amount does
/// not parse fails the whole call; a corrupt row must not silently
/// vanish from a statement.
pub fn load_charges(conn: &Connection, card_id: i64) -> Result<Vec<Charge>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, amount, payee, installment_no, installment_total
         FROM transactions WHERE card_id=?1",
    )?;
    let mut rows = stmt.query(params![card_id])?;
    let mut charges = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date_s: String = r.get(1)?;
        let amount_s: String = r.get(2)?;
        let payee: String = r.get(3)?;
        let installment_no: Option<u32> = r.get(4)?;
        let installment_total: Option<u32> = r.get(5)?;
        let date = parse_date(&date_s)
            .with_context(|| format!("Transaction {} has malformed date", id))?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Transaction {} has malformed amount '{}'", id, amount_s))?;
        charges.push(Charge {
            id,
            date,
            amount,
            payee,
            installment_no,
            installment_total,
        });
    }
    Ok(charges)
}
