// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::billing::CycleConfig;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut problems = 0usize;

    // Transactions attached to neither an account nor a card
    let orphans: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE account_id IS NULL AND card_id IS NULL",
        [],
        |r| r.get(0),
    )?;
    if orphans > 0 {
        problems += 1;
        println!("{} transactions have no account and no card", orphans);
    }

    // Stored text that no longer parses
    let mut stmt = conn.prepare("SELECT id, date, amount FROM transactions")?;
    let mut rows = stmt.query([])?;
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let amount: String = r.get(2)?;
        if chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
            problems += 1;
            println!("Transaction {} has malformed date '{}'", id, date);
        }
        if amount.parse::<Decimal>().is_err() {
            problems += 1;
            println!("Transaction {} has malformed amount '{}'", id, amount);
        }
    }

    // Card cycle configs that would fail invoice math
    let mut stmt = conn.prepare("SELECT id, name, closing_day, due_day FROM cards")?;
    let mut rows = stmt.query([])?;
    while let Some(r) = rows.next()? {
        let name: String = r.get(1)?;
        let cfg = CycleConfig {
            closing_day: r.get(2)?,
            due_day: r.get(3)?,
        };
        if let Err(e) = cfg.validate() {
            problems += 1;
            println!("Card '{}': {}", name, e);
        }
    }

    // Installment tags that disagree with themselves
    let bad_inst: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions
         WHERE installment_no IS NOT NULL
           AND (installment_total IS NULL OR installment_no < 1 OR installment_no > installment_total)",
        [],
        |r| r.get(0),
    )?;
    if bad_inst > 0 {
        problems += 1;
        println!("{} transactions have inconsistent installment tags", bad_inst);
    }

    if problems == 0 {
        println!("No problems found");
    }
    Ok(())
}
