// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::billing::expand_installments;
use crate::utils::{
    id_for_account, id_for_card, id_for_category, maybe_print_json, parse_date, parse_decimal,
    pretty_table,
};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let payee = sub.get_one::<String>("payee").unwrap();
    let category = sub.get_one::<String>("category").map(|s| s.to_string());
    let note = sub.get_one::<String>("note").map(|s| s.to_string());
    let installments = sub
        .get_one::<String>("installments")
        .map(|s| s.parse::<u32>())
        .transpose()
        .map_err(|_| anyhow!("Invalid installment count"))?;

    let category_id = if let Some(cat) = category {
        Some(id_for_category(conn, &cat)?)
    } else {
        None
    };

    let (account_id, card_id, currency) = match (
        sub.get_one::<String>("account"),
        sub.get_one::<String>("card"),
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

    if let Some(n) = installments {
        if card_id.is_none() {
            return Err(anyhow!("--installments requires --card"));
        }
        let rows = expand_installments(date, amount, n)?;
        for (i, (d, part)) in rows.iter().enumerate() {
            conn.execute(
                "INSERT INTO transactions(date, account_id, card_id, amount, payee, category_id, currency, installment_no, installment_total, note)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    d.to_string(),
                    account_id,
                    card_id,
                    part.to_string(),
                    payee,
                    category_id,
                    currency,
                    (i + 1) as u32,
                    n,
                    note
                ],
            )?;
        }
        println!(
            "Recorded {} at '{}' in {} installments starting {}",
            amount, payee, n, date
        );
    } else {
        conn.execute(
            "INSERT INTO transactions(date, account_id, card_id, amount, payee, category_id, currency, note)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                date.to_string(),
                account_id,
                card_id,
                amount.to_string(),
                payee,
                category_id,
                currency,
                note
            ],
        )?;
        println!("Recorded {} on {} at '{}'", amount, date, payee);
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.source.clone(),
                    r.payee.clone(),
                    r.amount.clone(),
                    r.currency.clone(),
                    r.category.clone(),
                    r.installment.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Source", "Payee", "Amount", "CCY", "Category", "Inst."],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub source: String,
    pub payee: String,
    pub amount: String,
    pub currency: String,
    pub category: String,
    pub installment: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT t.date, IFNULL(a.name, k.name), t.payee, t.amount, t.currency, c.name,
                t.installment_no, t.installment_total
         FROM transactions t
         LEFT JOIN accounts a ON t.account_id=a.id
         LEFT JOIN cards k ON t.card_id=k.id
         LEFT JOIN categories c ON t.category_id=c.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(t.date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(acct) = sub.get_one::<String>("account") {
        sql.push_str(" AND a.name=?");
        params_vec.push(acct.into());
    }
    if let Some(card) = sub.get_one::<String>("card") {
        sql.push_str(" AND k.name=?");
        params_vec.push(card.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND c.name=?");
        params_vec.push(cat.into());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let date: String = r.get(0)?;
        let source: Option<String> = r.get(1)?;
        let payee: String = r.get(2)?;
        let amount: String = r.get(3)?;
        let currency: String = r.get(4)?;
        let category: Option<String> = r.get(5)?;
        let inst_no: Option<u32> = r.get(6)?;
        let inst_total: Option<u32> = r.get(7)?;
        let installment = match (inst_no, inst_total) {
            (Some(i), Some(n)) => format!("{}/{}", i, n),
            _ => String::new(),
        };
        data.push(TransactionRow {
            date,
            source: source.unwrap_or_default(),
            payee,
            amount,
            currency,
            category: category.unwrap_or_default(),
            installment,
        });
    }
    Ok(data)
}
