// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{id_for_account, id_for_card, id_for_category, parse_date, parse_decimal};
use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, params};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    amount: String,
    payee: String,
    category: Option<String>,
    note: Option<String>,
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let file = m.get_one::<String>("file").unwrap();

    let (account_id, card_id, currency) = match (
        m.get_one::<String>("account"),
        m.get_one::<String>("card"),
    ) {
        (Some(acct), None) => {
            let id = id_for_account(conn, acct)?;
            let ccy: String = conn.query_row(
                "SELECT currency FROM accounts WHERE id=?1",
                params![id],
                |r| r.get(0),
            )?;
            (Some(id), None, ccy)
        }
        (None, Some(card)) => {
            let id = id_for_card(conn, card)?;
            let ccy: String = conn.query_row(
                "SELECT currency FROM cards WHERE id=?1",
                params![id],
                |r| r.get(0),
            )?;
            (None, Some(id), ccy)
        }
        _ => return Err(anyhow!("Pass exactly one of --account or --card")),
    };

    let mut rdr = csv::Reader::from_path(file).with_context(|| format!("Open CSV '{}'", file))?;
    let tx = conn.transaction()?;
    let mut n = 0usize;
    for rec in rdr.deserialize::<CsvRow>() {
        let row = rec.context("Malformed CSV record")?;
        let date = parse_date(&row.date)?;
        let amount = parse_decimal(&row.amount)?;
        let category_id = match row.category.as_deref().filter(|s| !s.is_empty()) {
            Some(name) => Some(id_for_category(&tx, name)?),
            None => None,
        };
        tx.execute(
            "INSERT INTO transactions(date, account_id, card_id, amount, payee, category_id, currency, note)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                date.to_string(),
                account_id,
                card_id,
                amount.to_string(),
                row.payee,
                category_id,
                currency,
                row.note
            ],
        )?;
        n += 1;
    }
    tx.commit()?;
    println!("Imported {} transactions from {}", n, file);
    Ok(())
}
