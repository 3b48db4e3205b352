// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::Account;
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let balance = match sub.get_one::<String>("balance") {
                Some(s) => parse_decimal(s)?,
                None => Decimal::ZERO,
            };
            let id = store.upsert_account(&Account {
                id: 0,
                name: name.to_string(),
                initial_balance: balance,
                active: true,
            })?;
            println!("Added account '{}' (id {})", name, id);
        }
        Some(("list", sub)) => {
            let mut live = store.observe_accounts()?;
            let accounts = live.latest();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), accounts)? {
                let rows = accounts
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.name.clone(),
                            a.initial_balance.round_dp(2).to_string(),
                            if a.active { "yes" } else { "no" }.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Name", "Initial balance", "Active"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.delete_account(id)?;
            println!("Removed account {} and its movements", id);
        }
        _ => {}
    }
    Ok(())
}
