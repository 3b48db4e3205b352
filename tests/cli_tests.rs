// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use monedero::store::Store;
use monedero::view::MovementBook;
use monedero::{cli, commands};
use rust_decimal::Decimal;

fn dispatch(book: &MovementBook, argv: &[&str]) {
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("account", sub)) => commands::accounts::handle(book.store(), sub).unwrap(),
        Some(("category", sub)) => commands::categories::handle(book.store(), sub).unwrap(),
        Some(("mov", sub)) => commands::movements::handle(book, sub).unwrap(),
        Some(("report", sub)) => commands::reports::handle(book.store(), sub).unwrap(),
        Some(("balance", _)) => commands::reports::balance(book).unwrap(),
        Some(("settings", sub)) => commands::settings::handle(book.store(), sub).unwrap(),
        other => panic!("unexpected subcommand {:?}", other),
    }
}

#[test]
fn mov_add_persists_through_the_cli() {
    let book = MovementBook::new(Store::open_in_memory().unwrap());
    dispatch(
        &book,
        &[
            "monedero", "mov", "add", "Coffee", "-3.50", "--category", "Comida", "--date",
            "2025-01-02",
        ],
    );

    let store = book.store();
    assert_eq!(store.expense_count().unwrap(), 1);
    assert!(store.id_by_category_name("Comida").unwrap().is_some());
    assert_eq!(store.account_count().unwrap(), 1);
}

#[test]
fn account_and_category_commands_round_trip() {
    let book = MovementBook::new(Store::open_in_memory().unwrap());
    dispatch(
        &book,
        &["monedero", "account", "add", "Banco", "--balance", "150"],
    );
    dispatch(&book, &["monedero", "category", "add", "Salud"]);

    let store = book.store();
    assert_eq!(store.account_count().unwrap(), 1);
    assert!(store.id_by_category_name("Salud").unwrap().is_some());

    // Listing paths should not error on populated stores.
    dispatch(&book, &["monedero", "account", "list"]);
    dispatch(&book, &["monedero", "category", "list", "--json"]);
    dispatch(&book, &["monedero", "mov", "list"]);
    dispatch(&book, &["monedero", "report", "totals"]);
    dispatch(&book, &["monedero", "balance"]);
}

#[test]
fn negative_balance_parses_as_a_value_not_a_flag() {
    let book = MovementBook::new(Store::open_in_memory().unwrap());
    dispatch(
        &book,
        &["monedero", "account", "add", "Tarjeta", "--balance", "-150.25"],
    );

    let store = book.store();
    let id = store.first_account_id().unwrap().unwrap();
    let acct = store.account_by_id(id).unwrap().unwrap();
    assert_eq!(acct.initial_balance, "-150.25".parse::<Decimal>().unwrap());
}

#[test]
fn settings_set_via_cli() {
    let book = MovementBook::new(Store::open_in_memory().unwrap());
    dispatch(
        &book,
        &["monedero", "settings", "set", "currency_symbol", "$"],
    );
    dispatch(&book, &["monedero", "settings", "set", "show_tips", "false"]);

    let s = book.store().settings().unwrap();
    assert_eq!(s.currency_symbol, "$");
    assert!(!s.show_tips);
    dispatch(&book, &["monedero", "settings", "get"]);
}
