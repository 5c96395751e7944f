// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cardbook::{cli, commands::accounts};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(r#"
        CREATE TABLE accounts(id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL UNIQUE, type TEXT NOT NULL, currency TEXT NOT NULL);
        CREATE TABLE transactions(id INTEGER PRIMARY KEY AUTOINCREMENT, date TEXT NOT NULL, account_id INTEGER, card_id INTEGER, amount TEXT NOT NULL, payee TEXT NOT NULL, category_id INTEGER, currency TEXT NOT NULL, installment_no INTEGER, installment_total INTEGER, note TEXT);
    "#).unwrap();
    conn
}

fn account_matches(args: &[&str]) -> clap::ArgMatches {
    let mut full = vec!["cardbook", "account"];
    full.extend_from_slice(args);
    let m = cli::build_cli().get_matches_from(full);
    let (_, sub) = m.subcommand().unwrap();
    sub.clone()
}

#[test]
fn add_normalizes_type_and_currency() {
    let conn = setup();
    let m = account_matches(&["add", "Main", "--type", "Savings", "--currency", "eur"]);
    accounts::handle(&conn, &m).unwrap();

    let (typ, ccy): (String, String) = conn
        .query_row(
            "SELECT type, currency FROM accounts WHERE name='Main'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(typ, "savings");
    assert_eq!(ccy, "EUR");
}

#[test]
fn unknown_account_type_is_rejected() {
    let conn = setup();
    let m = account_matches(&["add", "Vault", "--type", "crypto"]);
    let err = accounts::handle(&conn, &m).unwrap_err();
    assert!(err.to_string().contains("Unknown account type 'crypto'"));
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);
}

#[test]
fn rm_of_missing_account_is_not_an_error() {
    let conn = setup();
    let m = account_matches(&["rm", "Ghost"]);
    accounts::handle(&conn, &m).unwrap();
}

#[test]
fn rm_deletes_the_named_account() {
    let conn = setup();
    let m = account_matches(&["add", "Main"]);
    accounts::handle(&conn, &m).unwrap();
    let m = account_matches(&["rm", "Main"]);
    accounts::handle(&conn, &m).unwrap();
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);
}
