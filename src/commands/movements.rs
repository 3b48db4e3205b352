// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::utils::{
    end_of_day, fmt_datetime, maybe_print_json, parse_date, parse_decimal, pretty_table,
    start_of_day,
};
use crate::view::MovementBook;

/// How long CLI commands wait for a fire-and-forget write to show up on the
/// live stream before giving up.
const EFFECT_TIMEOUT: Duration = Duration::from_secs(2);

pub(crate) fn range_from_matches(m: &clap::ArgMatches) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let from = match m.get_one::<String>("from") {
        Some(s) => parse_date(s)?,
        None => NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN),
    };
    let to = match m.get_one::<String>("to") {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    Ok((start_of_day(from), end_of_day(to)?))
}

pub fn handle(book: &MovementBook, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(book, sub)?,
        Some(("edit", sub)) => edit(book, sub)?,
        Some(("list", sub)) => list(book, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(book: &MovementBook, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let date = sub.get_one::<String>("date").unwrap();
    let note = sub.get_one::<String>("note").map(|s| s.as_str());

    // Subscribe before writing so the effect cannot be missed.
    let mut live = book.transactions()?;
    let before = live.latest().len();
    book.add_movement(title, amount, category, date, note);
    match live.wait_for(EFFECT_TIMEOUT, |movs| movs.len() > before) {
        Ok(movs) => println!(
            "Recorded '{}' ({}); {} movements total",
            title,
            amount,
            movs.len()
        ),
        Err(_) => println!("Write did not surface in time; stream may be stale"),
    }
    Ok(())
}

fn edit(book: &MovementBook, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut live = book.transactions()?;
    live.latest();
    book.edit_movement_meta(
        id,
        sub.get_one::<String>("title").map(|s| s.as_str()),
        sub.get_one::<String>("category").map(|s| s.as_str()),
        sub.get_one::<String>("date").map(|s| s.as_str()),
        sub.get_one::<String>("note").map(|s| s.as_str()),
    );
    // An edit of an unknown id never re-emits; a timeout is not an error.
    match live.recv_timeout(EFFECT_TIMEOUT) {
        Ok(_) => println!("Updated movement {}", id),
        Err(_) => println!("No change observed for movement {}", id),
    }
    Ok(())
}

fn list(book: &MovementBook, sub: &clap::ArgMatches) -> Result<()> {
    let (from, to) = range_from_matches(sub)?;
    let mut live = book.store().observe_expenses_in_range(from, to)?;
    let rows = live.latest();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), rows)? {
        let data = rows
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    fmt_datetime(e.occurred_at),
                    e.movement_type.as_str().to_string(),
                    e.amount.round_dp(2).to_string(),
                    e.category_id.map(|c| c.to_string()).unwrap_or_default(),
                    e.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Occurred", "Type", "Amount", "Category", "Description"],
                data
            )
        );
    }
    Ok(())
}
