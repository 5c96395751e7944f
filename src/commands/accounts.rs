// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

// Card spending lives in `cards`; these are the cash-side account kinds.
const ACCOUNT_TYPES: &[&str] = &["checking", "savings", "cash", "investment"];

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", _)) => list(conn)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let typ = sub.get_one::<String>("type").unwrap().to_lowercase();
    let ccy = sub.get_one::<String>("currency").unwrap().to_uppercase();
    if !ACCOUNT_TYPES.contains(&typ.as_str()) {
        return Err(anyhow!(
            "Unknown account type '{}', expected one of: {}",
            typ,
            ACCOUNT_TYPES.join(", ")
        ));
    }
    conn.execute(
        "INSERT INTO accounts(name, type, currency) VALUES (?1, ?2, ?3)",
        params![name, typ, ccy],
    )?;
    println!("Added {} account '{}' in {}", typ, name, ccy);
    Ok(())
}

fn list(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT a.name, a.type, a.currency, COUNT(t.id)
         FROM accounts a
         LEFT JOIN transactions t ON t.account_id=a.id
         GROUP BY a.id ORDER BY a.name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, i64>(3)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (name, typ, ccy, txs) = row?;
        data.push(vec![name, typ, ccy, txs.to_string()]);
    }
    println!(
        "{}",
        pretty_table(&["Account", "Type", "CCY", "Transactions"], data)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let n = conn.execute("DELETE FROM accounts WHERE name=?1", params![name])?;
    if n == 0 {
        println!("No account named '{}'", name);
    } else {
        println!("Removed account '{}'", name);
    }
    Ok(())
}
