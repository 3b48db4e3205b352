// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use chrono::{Local, NaiveDate};
use monedero::store::Store;
use monedero::view::MovementBook;
use rust_decimal::Decimal;

const LONG: Duration = Duration::from_secs(5);

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn book() -> MovementBook {
    MovementBook::new(Store::open_in_memory().unwrap())
}

#[test]
fn add_movement_bootstraps_default_account_and_category() {
    let book = book();
    let mut balance = book.balance().unwrap();
    let mut transactions = book.transactions().unwrap();

    book.add_movement("Salary", dec("1500.0"), "Income", "2024-01-15", None);

    let total = balance.wait_for(LONG, |b| *b == dec("1500.0")).unwrap();
    assert_eq!(*total, dec("1500.0"));

    let movs = transactions.wait_for(LONG, |m| m.len() == 1).unwrap();
    assert_eq!(movs[0].title.as_deref(), Some("Salary"));
    assert!(movs[0].is_income);
    assert_eq!(movs[0].amount, dec("1500.0"));
    assert_eq!(movs[0].category_name.as_deref(), Some("Income"));
    assert_eq!(
        movs[0].date.date(),
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    );

    let store = book.store();
    let mut accounts = store.observe_accounts().unwrap();
    let accounts = accounts.latest();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "Principal");
    assert!(store.id_by_category_name("Income").unwrap().is_some());
}

#[test]
fn repeated_category_name_creates_one_row() {
    let book = book();
    let mut transactions = book.transactions().unwrap();

    book.add_movement("Lunch", dec("-12"), "Comida", "2024-02-01", None);
    book.add_movement("Dinner", dec("-20"), "Comida", "2024-02-02", None);
    transactions.wait_for(LONG, |m| m.len() == 2).unwrap();

    let mut categories = book.store().observe_active_categories().unwrap();
    let categories = categories.latest();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Comida");
}

#[test]
fn balance_is_signed_fold_over_all_movements() {
    let book = book();
    let mut balance = book.balance().unwrap();

    book.add_movement("Salary", dec("1500"), "", "2024-01-15", None);
    book.add_movement("Groceries", dec("-25.5"), "", "2024-01-16", None);
    book.add_movement("Rent", dec("-100"), "", "2024-01-17", None);

    let total = balance.wait_for(LONG, |b| *b == dec("1374.5")).unwrap();
    assert_eq!(*total, dec("1374.5"));
}

#[test]
fn blank_category_means_uncategorized() {
    let book = book();
    let mut transactions = book.transactions().unwrap();

    book.add_movement("Misc", dec("-3"), "  ", "2024-03-01", None);
    let movs = transactions.wait_for(LONG, |m| m.len() == 1).unwrap();
    assert_eq!(movs[0].category_name, None);

    let stored = book.store().expense_by_id(movs[0].id).unwrap().unwrap();
    assert_eq!(stored.category_id, None);
}

#[test]
fn unparsable_date_silently_becomes_now() {
    let book = book();
    let today = Local::now().date_naive();
    let mut transactions = book.transactions().unwrap();

    book.add_movement("Taxi", dec("-8"), "", "yesterday-ish", None);
    let movs = transactions.wait_for(LONG, |m| m.len() == 1).unwrap();
    assert_eq!(movs[0].date.date(), today);
}

#[test]
fn blank_title_falls_back_to_note() {
    let book = book();
    let mut transactions = book.transactions().unwrap();

    book.add_movement("", dec("-5"), "", "2024-01-01", Some("peaje"));
    let movs = transactions.wait_for(LONG, |m| m.len() == 1).unwrap();
    assert_eq!(movs[0].title.as_deref(), Some("peaje"));
    assert_eq!(movs[0].note.as_deref(), Some("peaje"));
}

#[test]
fn edit_rewrites_meta_but_preserves_amount_and_type() {
    let book = book();
    let mut transactions = book.transactions().unwrap();

    book.add_movement("Lunch", dec("-25"), "Comida", "2024-02-01", None);
    let id = transactions.wait_for(LONG, |m| m.len() == 1).unwrap()[0].id;

    book.edit_movement_meta(id, Some("Dinner"), Some("Restaurantes"), None, None);
    let movs = transactions
        .wait_for(LONG, |m| {
            m.first().map(|t| t.title.as_deref()) == Some(Some("Dinner"))
        })
        .unwrap();
    assert_eq!(movs.len(), 1);
    assert_eq!(movs[0].amount, dec("25"));
    assert!(!movs[0].is_income);
    assert_eq!(movs[0].category_name.as_deref(), Some("Restaurantes"));
    assert_eq!(
        movs[0].date.date(),
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    );

    // Both category rows exist now; the movement points at the new one.
    let store = book.store();
    assert!(store.id_by_category_name("Comida").unwrap().is_some());
    let stored = store.expense_by_id(id).unwrap().unwrap();
    assert_eq!(
        stored.category_id,
        store.id_by_category_name("Restaurantes").unwrap()
    );
}

#[test]
fn edit_with_no_overrides_keeps_stored_values() {
    let book = book();
    let mut transactions = book.transactions().unwrap();

    book.add_movement("Cine", dec("-10"), "Ocio", "2024-04-05", None);
    let id = transactions.wait_for(LONG, |m| m.len() == 1).unwrap()[0].id;
    let before = book.store().expense_by_id(id).unwrap().unwrap();

    book.edit_movement_meta(id, None, None, None, None);
    // The rewrite re-emits even when nothing differs.
    transactions.recv_timeout(LONG).unwrap();

    let after = book.store().expense_by_id(id).unwrap().unwrap();
    assert_eq!(after.category_id, before.category_id);
    assert_eq!(after.description, before.description);
    assert_eq!(after.occurred_at, before.occurred_at);
    assert_eq!(after.amount, before.amount);
    assert_eq!(after.movement_type, before.movement_type);
}

#[test]
fn edit_of_unknown_id_is_a_silent_noop() {
    let book = book();
    let mut transactions = book.transactions().unwrap();

    book.edit_movement_meta(999, Some("ghost"), None, None, None);
    assert!(transactions.recv_timeout(Duration::from_millis(300)).is_err());
    assert_eq!(book.store().expense_count().unwrap(), 0);
}

#[test]
fn existing_account_is_reused_not_recreated() {
    let store = Store::open_in_memory().unwrap();
    let acct = store
        .upsert_account(&monedero::models::Account::new("Efectivo"))
        .unwrap();
    let book = MovementBook::new(store.clone());
    let mut transactions = book.transactions().unwrap();

    book.add_movement("Pan", dec("-2"), "", "2024-01-01", None);
    let movs = transactions.wait_for(LONG, |m| m.len() == 1).unwrap();
    assert!(movs[0].id > 0);

    assert_eq!(store.account_count().unwrap(), 1);
    let stored = store.expense_by_id(movs[0].id).unwrap().unwrap();
    assert_eq!(stored.account_id, acct);
}
