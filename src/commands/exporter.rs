// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ExportRow {
    pub date: String,
    pub source: String,
    pub payee: String,
    pub amount: String,
    pub currency: String,
    pub category: String,
    pub note: String,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let file = m.get_one::<String>("file").unwrap();
    let month = m.get_one::<String>("month").map(|s| s.to_string());
    let rows = export_rows(conn, month.as_deref())?;

    let mut wtr = csv::Writer::from_path(file).with_context(|| format!("Open CSV '{}'", file))?;
    let n = rows.len();
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    println!("Exported {} transactions to {}", n, file);
    Ok(())
}

pub fn export_rows(conn: &Connection, month: Option<&str>) -> Result<Vec<ExportRow>> {
    let mut sql = String::from(
        "SELECT t.date, IFNULL(a.name, k.name), t.payee, t.amount, t.currency, c.name, t.note
         FROM transactions t
         LEFT JOIN accounts a ON t.account_id=a.id
         LEFT JOIN cards k ON t.card_id=k.id
         LEFT JOIN categories c ON t.category_id=c.id",
    );
    if month.is_some() {
        sql.push_str(" WHERE substr(t.date,1,7)=?1");
    }
    sql.push_str(" ORDER BY t.date, t.id");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = match month {
        Some(mth) => stmt.query(rusqlite::params![mth])?,
        None => stmt.query([])?,
    };
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let date: String = r.get(0)?;
        let source: Option<String> = r.get(1)?;
        let payee: String = r.get(2)?;
        let amount: String = r.get(3)?;
        let currency: String = r.get(4)?;
        let category: Option<String> = r.get(5)?;
        let note: Option<String> = r.get(6)?;
        data.push(ExportRow {
            date,
            source: source.unwrap_or_default(),
            payee,
            amount,
            currency,
            category: category.unwrap_or_default(),
            note: note.unwrap_or_default(),
        });
    }
    Ok(data)
}
