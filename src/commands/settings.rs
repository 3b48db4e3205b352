// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::settings::{
    KEY_CURRENCY_SYMBOL, KEY_DEFAULT_CATEGORY, KEY_DEFAULT_PAYMENT_METHOD, KEY_SHOW_TIPS,
};
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let settings = store.settings()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &settings)? {
                let rows = vec![
                    vec![KEY_CURRENCY_SYMBOL.to_string(), settings.currency_symbol],
                    vec![KEY_DEFAULT_CATEGORY.to_string(), settings.default_category],
                    vec![
                        KEY_DEFAULT_PAYMENT_METHOD.to_string(),
                        settings.default_payment_method,
                    ],
                    vec![KEY_SHOW_TIPS.to_string(), settings.show_tips.to_string()],
                ];
                println!("{}", pretty_table(&["Key", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            let value = sub.get_one::<String>("value").unwrap();
            match key.as_str() {
                KEY_CURRENCY_SYMBOL => store.set_currency_symbol(value)?,
                KEY_DEFAULT_CATEGORY => store.set_default_category(value)?,
                KEY_DEFAULT_PAYMENT_METHOD => store.set_default_payment_method(value)?,
                KEY_SHOW_TIPS => store.set_show_tips(value == "true")?,
                // clap restricts the key to the four known values
                other => {
                    println!("Unknown setting key '{}'", other);
                    return Ok(());
                }
            }
            println!("Set {} = {}", key, value);
        }
        _ => {}
    }
    Ok(())
}
