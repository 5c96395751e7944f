// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::billing::CycleConfig;
use crate::utils::{parse_day, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", _)) => list(conn)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute("DELETE FROM cards WHERE name=?1", params![name])?;
            println!("Removed card '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let closing_day = parse_day(sub.get_one::<String>("closing-day").unwrap())?;
    let due_day = sub
        .get_one::<String>("due-day")
        .map(|s| parse_day(s))
        .transpose()?;
    let limit = sub
        .get_one::<String>("limit")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let ccy = sub.get_one::<String>("currency").unwrap().to_uppercase();

    // Reject a bad cycle at entry; a corrupt card row would poison invoice math.
    let cfg = CycleConfig {
        closing_day,
        due_day,
    };
    cfg.validate()?;

    conn.execute(
        "INSERT INTO cards(name, closing_day, due_day, credit_limit, currency)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            name,
            closing_day,
            due_day,
            limit.map(|d| d.to_string()),
            ccy
        ],
    )?;
    println!(
        "Added card '{}' (closes day {}, {})",
        name, closing_day, ccy
    );
    Ok(())
}

fn list(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT name, closing_day, due_day, credit_limit, currency FROM cards ORDER BY name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, u32>(1)?,
            r.get::<_, Option<u32>>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, String>(4)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (n, close, due, limit, ccy) = row?;
        data.push(vec![
            n,
            close.to_string(),
            due.map(|d| d.to_string()).unwrap_or_default(),
            limit.unwrap_or_default(),
            ccy,
        ]);
    }
    println!(
        "{}",
        pretty_table(&["Name", "Closes", "Due", "Limit", "Currency"], data)
    );
    Ok(())
}
