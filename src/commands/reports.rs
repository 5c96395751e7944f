// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{fx_convert, get_base_currency, maybe_print_json, parse_month, pretty_table};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balances", sub)) => balances(conn, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn balances(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let show_base = sub.get_flag("base");
    let out_ccy = sub.get_one::<String>("currency").map(|s| s.to_uppercase());

    let mut stmt = conn.prepare(
        "SELECT a.name, a.currency, IFNULL(SUM(t.amount),0) AS bal
         FROM accounts a
         LEFT JOIN transactions t ON t.account_id=a.id
         GROUP BY a.id ORDER BY a.name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, f64>(2)?,
        ))
    })?;

    let base = get_base_currency(conn)?;
    let target = out_ccy.as_deref().unwrap_or(&base);
    let today = Utc::now().date_naive();
    let mut data = Vec::new();
    for row in rows {
        let (name, ccy, bal) = row?;
        let bal = Decimal::try_from(bal).context("Balance out of range")?;
        let mut line = vec![name, ccy.clone(), bal.round_dp(2).to_string()];
        if show_base || out_ccy.is_some() {
            let conv = fx_convert(conn, today, bal, &ccy, target)?;
            line.push(format!("{} {}", target, conv.round_dp(2)));
        }
        data.push(line);
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let headers: &[&str] = if show_base || out_ccy.is_some() {
            &["Account", "CCY", "Balance", "Converted"]
        } else {
            &["Account", "CCY", "Balance"]
        };
        println!("{}", pretty_table(headers, data));
    }
    Ok(())
}

fn spend_by_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let base = get_base_currency(conn)?;

    let mut cats_stmt = conn.prepare("SELECT id, name FROM categories ORDER BY name")?;
    let cats = cats_stmt.query_map([], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?)))?;

    let mut data = Vec::new();
    for c in cats {
        let (cid, cname) = c?;
        let mut tstmt = conn.prepare(
            "SELECT date, amount, currency FROM transactions
             WHERE category_id=?1 AND substr(date,1,7)=?2",
        )?;
        let mut trs = tstmt.query(rusqlite::params![cid, month])?;
        let mut spent = Decimal::ZERO;
        while let Some(r) = trs.next()? {
            let d: String = r.get(0)?;
            let amt_s: String = r.get(1)?;
            let ccy: String = r.get(2)?;
            let date = crate::utils::parse_date(&d)?;
            let amt = amt_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' in transactions", amt_s))?;
            spent += fx_convert(conn, date, amt.abs(), &ccy, &base)?;
        }
        if !spent.is_zero() {
            data.push(vec![cname, format!("{:.2}", spent)]);
        }
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let spent_hdr = format!("Spent ({})", base);
        println!("{}", pretty_table(&["Category", spent_hdr.as_str()], data));
    }
    Ok(())
}
