// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{
    fx_convert, get_base_currency, http_client, parse_date, parse_decimal, pretty_table,
    set_base_currency,
};
use anyhow::{Context, Result};
use chrono::{Days, Utc};
use rusqlite::{Connection, params};
use serde::Deserialize;
use std::collections::BTreeMap;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-base", sub)) => {
            let ccy = sub.get_one::<String>("currency").unwrap().to_uppercase();
            set_base_currency(conn, &ccy)?;
            println!("Base currency set to {}", ccy);
        }
        Some(("add", sub)) => {
            let date = parse_date(sub.get_one::<String>("date").unwrap())?;
            let quote = sub.get_one::<String>("quote").unwrap().to_uppercase();
            let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
            let base = get_base_currency(conn)?;
            conn.execute(
                "INSERT INTO fx_rates(date, base, quote, rate) VALUES (?1,?2,?3,?4)
                 ON CONFLICT(date, base, quote) DO UPDATE SET rate=excluded.rate",
                params![date.to_string(), base, quote, rate.to_string()],
            )?;
            println!("Recorded 1 {} = {} {} on {}", base, rate, quote, date);
        }
        Some(("fetch", sub)) => {
            let days: usize = *sub.get_one::<usize>("days").unwrap_or(&120);
            fetch_rates(conn, days)?;
        }
        Some(("list", _)) => list_rates(conn)?,
        Some(("convert", sub)) => convert_amount(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn distinct_currencies(conn: &Connection) -> Result<Vec<String>> {
    let mut out = Vec::<String>::new();
    for sql in [
        "SELECT DISTINCT currency FROM accounts",
        "SELECT DISTINCT currency FROM cards",
        "SELECT DISTINCT currency FROM transactions",
    ] {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
        for row in rows {
            let c: String = row?;
            if !c.is_empty() && !out.contains(&c) {
                out.push(c);
            }
        }
    }
    Ok(out)
}

#[derive(Debug, Deserialize)]
struct FrankfurterSeries {
    rates: BTreeMap<String, BTreeMap<String, f64>>,
}

fn fetch_rates(conn: &mut Connection, days: usize) -> Result<()> {
    let base = get_base_currency(conn)?;
    let quotes: Vec<String> = distinct_currencies(conn)?
        .into_iter()
        .filter(|c| *c != base)
        .collect();
    if quotes.is_empty() {
        println!("No foreign currencies in use; nothing to fetch");
        return Ok(());
    }
    let end = Utc::now().date_naive();
    let start = end - Days::new(days as u64);
    let url = format!(
        "https://api.frankfurter.app/{}..{}?from={}&to={}",
        start,
        end,
        base,
        quotes.join(",")
    );
    let resp: FrankfurterSeries = http_client()?
        .get(&url)
        .send()
        .context("FX rate request failed")?
        .error_for_status()
        .context("FX rate request rejected")?
        .json()
        .context("FX rate response was not valid JSON")?;

    let tx = conn.transaction()?;
    let mut n = 0usize;
    for (date, day_rates) in &resp.rates {
        for (quote, rate) in day_rates {
            tx.execute(
                "INSERT INTO fx_rates(date, base, quote, rate) VALUES (?1,?2,?3,?4)
                 ON CONFLICT(date, base, quote) DO UPDATE SET rate=excluded.rate",
                params![date, base, quote, rate.to_string()],
            )?;
            n += 1;
        }
    }
    tx.commit()?;
    println!("Stored {} rates for {} -> {}", n, base, quotes.join(","));
    Ok(())
}

fn list_rates(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT date, base, quote, rate FROM fx_rates ORDER BY date DESC, quote LIMIT 100",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (d, b, q, rate) = row?;
        data.push(vec![d, b, q, rate]);
    }
    println!("{}", pretty_table(&["Date", "Base", "Quote", "Rate"], data));
    Ok(())
}

fn convert_amount(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let from = sub.get_one::<String>("from").unwrap().to_uppercase();
    let to = sub.get_one::<String>("to").unwrap().to_uppercase();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let out = fx_convert(conn, date, amount, &from, &to)?;
    println!("{} {} = {} {} on {}", amount, from, out.round_dp(4), to, date);
    Ok(())
}
