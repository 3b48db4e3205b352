// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::Category;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = store.upsert_category(&Category {
                id: 0,
                name: name.to_string(),
                color_hex: sub.get_one::<String>("color").cloned(),
                active: true,
            })?;
            println!("Added category '{}' (id {})", name, id);
        }
        Some(("list", sub)) => {
            let mut live = store.observe_active_categories()?;
            let categories = live.latest();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), categories)? {
                let rows = categories
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.name.clone(),
                            c.color_hex.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Id", "Name", "Color"], rows));
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.soft_delete_category(id)?;
            println!("Deactivated category {}", id);
        }
        _ => {}
    }
    Ok(())
}
