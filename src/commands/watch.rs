// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::Movement;
use crate::utils::{fmt_datetime, pretty_table};
use crate::view::MovementBook;

pub fn handle(book: &MovementBook, m: &clap::ArgMatches) -> Result<()> {
    let take = m.get_one::<usize>("take").copied();
    let mut live = book.transactions()?;
    print_snapshot(live.latest());
    let mut seen = 0usize;
    loop {
        if let Some(limit) = take {
            if seen >= limit {
                return Ok(());
            }
        }
        match live.recv() {
            Ok(movs) => {
                print_snapshot(movs);
                seen += 1;
            }
            // Store dropped; nothing further will arrive.
            Err(_) => return Ok(()),
        }
    }
}

fn print_snapshot(movs: &[Movement]) {
    let rows = movs
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                fmt_datetime(t.date),
                if t.is_income { "+" } else { "-" }.to_string(),
                t.amount.round_dp(2).to_string(),
                t.category_name.clone().unwrap_or_default(),
                t.title.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Date", "", "Amount", "Category", "Title"], rows)
    );
}
