// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use monedero::{cli, commands, db, store::Store, view::MovementBook};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = Store::open()?;
    let book = MovementBook::new(store.clone());

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("account", sub)) => commands::accounts::handle(&store, sub)?,
        Some(("category", sub)) => commands::categories::handle(&store, sub)?,
        Some(("mov", sub)) => commands::movements::handle(&book, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("balance", _)) => commands::reports::balance(&book)?,
        Some(("settings", sub)) => commands::settings::handle(&store, sub)?,
        Some(("watch", sub)) => commands::watch::handle(&book, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
