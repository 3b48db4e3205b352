// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use monedero::models::{Account, Category, Expense, MovementType};
use monedero::store::Store;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn account(store: &Store, name: &str, balance: &str) -> i64 {
    store
        .upsert_account(&Account {
            id: 0,
            name: name.to_string(),
            initial_balance: dec(balance),
            active: true,
        })
        .unwrap()
}

fn movement(
    store: &Store,
    account_id: i64,
    category_id: Option<i64>,
    amount: &str,
    movement_type: MovementType,
    at: NaiveDateTime,
) -> i64 {
    store
        .upsert_expense(&Expense {
            id: 0,
            account_id,
            category_id,
            amount: dec(amount),
            movement_type,
            description: None,
            occurred_at: at,
        })
        .unwrap()
}

#[test]
fn expense_round_trip_preserves_fields_and_sign() {
    let store = Store::open_in_memory().unwrap();
    let acct = account(&store, "Banco", "0");
    let cat = store.upsert_category(&Category::new("Salud")).unwrap();
    let id = store
        .upsert_expense(&Expense {
            id: 0,
            account_id: acct,
            category_id: Some(cat),
            amount: dec("12.50"),
            movement_type: MovementType::Income,
            description: Some("reembolso".to_string()),
            occurred_at: dt(2025, 3, 4, 9),
        })
        .unwrap();

    let back = store.expense_by_id(id).unwrap().unwrap();
    assert_eq!(back.account_id, acct);
    assert_eq!(back.category_id, Some(cat));
    assert_eq!(back.amount, dec("12.50"));
    assert_eq!(back.movement_type, MovementType::Income);
    assert_eq!(back.description.as_deref(), Some("reembolso"));
    assert_eq!(back.occurred_at, dt(2025, 3, 4, 9));
    assert_eq!(back.signed_amount(), dec("12.50"));
}

#[test]
fn upsert_with_existing_id_overwrites_whole_row() {
    let store = Store::open_in_memory().unwrap();
    let acct = account(&store, "Banco", "0");
    let id = movement(&store, acct, None, "10", MovementType::Expense, dt(2025, 1, 1, 8));

    store
        .upsert_expense(&Expense {
            id,
            account_id: acct,
            category_id: None,
            amount: dec("42"),
            movement_type: MovementType::Income,
            description: Some("corrected".to_string()),
            occurred_at: dt(2025, 1, 2, 8),
        })
        .unwrap();

    assert_eq!(store.expense_count().unwrap(), 1);
    let back = store.expense_by_id(id).unwrap().unwrap();
    assert_eq!(back.amount, dec("42"));
    assert_eq!(back.movement_type, MovementType::Income);
    assert_eq!(back.description.as_deref(), Some("corrected"));
}

#[test]
fn accounts_listed_by_name_ascending() {
    let store = Store::open_in_memory().unwrap();
    account(&store, "Tarjeta", "0");
    account(&store, "Banco", "0");
    account(&store, "Efectivo", "0");

    let mut live = store.observe_accounts().unwrap();
    let names: Vec<&str> = live.latest().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Banco", "Efectivo", "Tarjeta"]);
}

#[test]
fn expenses_in_range_newest_first_inclusive_bounds() {
    let store = Store::open_in_memory().unwrap();
    let acct = account(&store, "Banco", "0");
    movement(&store, acct, None, "1", MovementType::Expense, dt(2025, 1, 1, 0));
    movement(&store, acct, None, "2", MovementType::Expense, dt(2025, 1, 3, 12));
    movement(&store, acct, None, "3", MovementType::Expense, dt(2025, 1, 5, 23));
    movement(&store, acct, None, "4", MovementType::Expense, dt(2025, 2, 1, 0));

    let mut live = store
        .observe_expenses_in_range(dt(2025, 1, 1, 0), dt(2025, 1, 5, 23))
        .unwrap();
    let amounts: Vec<Decimal> = live.latest().iter().map(|e| e.amount).collect();
    assert_eq!(amounts, [dec("3"), dec("2"), dec("1")]);
}

#[test]
fn deleting_account_cascades_to_its_expenses() {
    let store = Store::open_in_memory().unwrap();
    let a1 = account(&store, "Banco", "0");
    let a2 = account(&store, "Efectivo", "0");
    movement(&store, a1, None, "5", MovementType::Expense, dt(2025, 1, 1, 0));
    movement(&store, a1, None, "6", MovementType::Income, dt(2025, 1, 2, 0));
    movement(&store, a2, None, "7", MovementType::Expense, dt(2025, 1, 3, 0));

    store.delete_account(a1).unwrap();

    assert_eq!(store.account_count().unwrap(), 1);
    assert_eq!(store.expense_count().unwrap(), 1);
    assert_eq!(
        store.observe_net_for_account(a2).unwrap().latest().clone(),
        Some(dec("-7"))
    );
}

#[test]
fn soft_deleted_category_disappears_from_active_but_keeps_references() {
    let store = Store::open_in_memory().unwrap();
    let acct = account(&store, "Banco", "0");
    let cat = store.upsert_category(&Category::new("Ocio")).unwrap();
    let id = movement(
        &store,
        acct,
        Some(cat),
        "9",
        MovementType::Expense,
        dt(2025, 1, 1, 0),
    );

    store.soft_delete_category(cat).unwrap();

    let mut live = store.observe_active_categories().unwrap();
    assert!(live.latest().is_empty());
    // The expense row is untouched: still present, reference intact.
    let back = store.expense_by_id(id).unwrap().unwrap();
    assert_eq!(back.category_id, Some(cat));
}

#[test]
fn id_by_category_name_is_exact_match() {
    let store = Store::open_in_memory().unwrap();
    let cat = store.upsert_category(&Category::new("Alimentación")).unwrap();

    assert_eq!(store.id_by_category_name("Alimentación").unwrap(), Some(cat));
    assert_eq!(store.id_by_category_name("alimentación").unwrap(), None);
    assert_eq!(store.id_by_category_name("Transporte").unwrap(), None);
}

#[test]
fn category_totals_group_signed_sums_with_null_group() {
    let store = Store::open_in_memory().unwrap();
    let acct = account(&store, "Banco", "0");
    let cat = store.upsert_category(&Category::new("Nómina")).unwrap();
    movement(&store, acct, Some(cat), "100", MovementType::Income, dt(2025, 1, 10, 0));
    movement(&store, acct, Some(cat), "30", MovementType::Expense, dt(2025, 1, 11, 0));
    movement(&store, acct, None, "10", MovementType::Expense, dt(2025, 1, 12, 0));
    // Outside the range; must not count.
    movement(&store, acct, Some(cat), "999", MovementType::Income, dt(2025, 3, 1, 0));

    let mut live = store
        .observe_category_totals(dt(2025, 1, 1, 0), dt(2025, 1, 31, 23))
        .unwrap();
    let totals = live.latest().clone();
    assert_eq!(totals.len(), 2);
    // The uncategorized group sorts first.
    assert_eq!(totals[0].category_id, None);
    assert_eq!(totals[0].total, dec("-10"));
    assert_eq!(totals[1].category_id, Some(cat));
    assert_eq!(totals[1].total, dec("70"));
}

#[test]
fn net_for_account_is_none_without_movements() {
    let store = Store::open_in_memory().unwrap();
    let acct = account(&store, "Banco", "0");
    let mut live = store.observe_net_for_account(acct).unwrap();
    assert_eq!(live.latest().clone(), None);
}

#[test]
fn total_initial_balance_counts_active_accounts_only() {
    let store = Store::open_in_memory().unwrap();
    account(&store, "Banco", "100.50");
    account(&store, "Efectivo", "19.50");
    let closed = account(&store, "Vieja", "1000");
    store
        .upsert_account(&Account {
            id: closed,
            name: "Vieja".to_string(),
            initial_balance: dec("1000"),
            active: false,
        })
        .unwrap();

    let mut live = store.observe_total_initial_balance().unwrap();
    assert_eq!(live.latest().clone(), Some(dec("120.00")));
}

#[test]
fn account_by_id_point_lookup() {
    let store = Store::open_in_memory().unwrap();
    let id = account(&store, "Banco", "50");
    let found = store.account_by_id(id).unwrap().unwrap();
    assert_eq!(found.name, "Banco");
    assert_eq!(found.initial_balance, dec("50"));
    assert!(found.active);
    assert!(store.account_by_id(id + 1).unwrap().is_none());
}

#[test]
fn first_account_id_is_lowest_identity() {
    let store = Store::open_in_memory().unwrap();
    assert_eq!(store.first_account_id().unwrap(), None);
    let a1 = account(&store, "Zeta", "0");
    account(&store, "Alfa", "0");
    assert_eq!(store.first_account_id().unwrap(), Some(a1));
}

#[test]
fn account_spend_scenario() {
    // Account "Efectivo" with initial balance, one 25.00 expense in a known
    // category: the category total and the account net both read -25.
    let store = Store::open_in_memory().unwrap();
    let acct = account(&store, "Efectivo", "100.0");
    let cat = store.upsert_category(&Category::new("Alimentación")).unwrap();
    let when = dt(2025, 6, 15, 13);
    movement(&store, acct, Some(cat), "25.0", MovementType::Expense, when);

    let mut totals = store
        .observe_category_totals(dt(2025, 6, 14, 13), dt(2025, 6, 16, 13))
        .unwrap();
    let rows = totals.latest().clone();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category_id, Some(cat));
    assert_eq!(rows[0].total, dec("-25.0"));

    let mut net = store.observe_net_for_account(acct).unwrap();
    assert_eq!(net.latest().clone(), Some(dec("-25.0")));
}

#[test]
fn reupserting_an_account_keeps_its_expenses() {
    let store = Store::open_in_memory().unwrap();
    let acct = account(&store, "Banco", "0");
    movement(&store, acct, None, "25", MovementType::Expense, dt(2025, 5, 1, 12));

    // A rename must not touch the account's movements.
    store
        .upsert_account(&Account {
            id: acct,
            name: "Banco Principal".to_string(),
            initial_balance: dec("10"),
            active: true,
        })
        .unwrap();

    assert_eq!(store.expense_count().unwrap(), 1);
    let back = store.account_by_id(acct).unwrap().unwrap();
    assert_eq!(back.name, "Banco Principal");
    assert_eq!(back.initial_balance, dec("10"));
}

#[test]
fn reupserting_a_category_keeps_expense_references() {
    let store = Store::open_in_memory().unwrap();
    let acct = account(&store, "Banco", "0");
    let cat = store.upsert_category(&Category::new("Hogar")).unwrap();
    let id = movement(&store, acct, Some(cat), "30", MovementType::Expense, dt(2025, 5, 2, 12));

    store
        .upsert_category(&Category {
            id: cat,
            name: "Casa".to_string(),
            color_hex: Some("#AABBCC".to_string()),
            active: true,
        })
        .unwrap();

    let back = store.expense_by_id(id).unwrap().unwrap();
    assert_eq!(back.category_id, Some(cat));
}
