// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use super::movements::range_from_matches;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use crate::view::MovementBook;

#[derive(Serialize)]
struct TotalRow {
    category: Option<String>,
    total: Decimal,
}

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("totals", sub)) => totals(store, sub)?,
        Some(("net", sub)) => net(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn totals(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let (from, to) = range_from_matches(sub)?;
    let names: HashMap<i64, String> = {
        let mut live = store.observe_active_categories()?;
        live.latest()
            .iter()
            .map(|c| (c.id, c.name.clone()))
            .collect()
    };
    let mut live = store.observe_category_totals(from, to)?;
    let data: Vec<TotalRow> = live
        .latest()
        .iter()
        .map(|t| TotalRow {
            category: t.category_id.and_then(|id| names.get(&id).cloned()),
            total: t.total,
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.category.clone().unwrap_or_else(|| "(none)".to_string()),
                    r.total.round_dp(2).to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Total"], rows));
    }
    Ok(())
}

fn net(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut live = store.observe_net_for_account(id)?;
    // No movements reads as zero.
    let net = live.latest().unwrap_or(Decimal::ZERO);
    let symbol = store.settings()?.currency_symbol;
    println!("Account {}: {}", id, fmt_money(&net, &symbol));
    Ok(())
}

pub fn balance(book: &MovementBook) -> Result<()> {
    let mut live = book.balance()?;
    let total = *live.latest();
    let symbol = book.store().settings()?.currency_symbol;
    println!("Balance: {}", fmt_money(&total, &symbol));
    Ok(())
}
