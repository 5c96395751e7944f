// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::billing::CycleConfig;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub r#type: String,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub name: String,
    pub closing_day: u32,
    pub due_day: Option<u32>,
    pub credit_limit: Option<Decimal>,
    pub currency: String,
}

impl Card {
    pub fn cycle(&self) -> CycleConfig {
        CycleConfig {
            closing_day: self.closing_day,
            due_day: self.due_day,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub account_id: Option<i64>,
    pub card_id: Option<i64>,
    pub amount: Decimal,
    pub payee: String,
    pub category_id: Option<i64>,
    pub currency: String,
    pub installment_no: Option<u32>,
    pub installment_total: Option<u32>,
    pub note: Option<String>,
}
