// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Repository facade: one-to-one pass-through over the store, grouped by
//! entity. Decouples the presentation layer from the storage technology;
//! no added logic, no error translation.

use anyhow::Result;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::live::Live;
use crate::models::{Account, Category, CategoryTotal, Expense};
use crate::store::Store;

#[derive(Clone)]
pub struct AccountRepository {
    store: Store,
}

impl AccountRepository {
    pub fn new(store: Store) -> Self {
        AccountRepository { store }
    }

    pub fn upsert(&self, account: &Account) -> Result<i64> {
        self.store.upsert_account(account)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.store.delete_account(id)
    }

    pub fn observe_all(&self) -> Result<Live<Vec<Account>>> {
        self.store.observe_accounts()
    }

    pub fn observe_total_initial_balance(&self) -> Result<Live<Option<Decimal>>> {
        self.store.observe_total_initial_balance()
    }
}

#[derive(Clone)]
pub struct CategoryRepository {
    store: Store,
}

impl CategoryRepository {
    pub fn new(store: Store) -> Self {
        CategoryRepository { store }
    }

    pub fn upsert(&self, category: &Category) -> Result<i64> {
        self.store.upsert_category(category)
    }

    pub fn soft_delete(&self, id: i64) -> Result<()> {
        self.store.soft_delete_category(id)
    }

    pub fn id_by_name(&self, name: &str) -> Result<Option<i64>> {
        self.store.id_by_category_name(name)
    }

    pub fn observe_active(&self) -> Result<Live<Vec<Category>>> {
        self.store.observe_active_categories()
    }
}

#[derive(Clone)]
pub struct ExpenseRepository {
    store: Store,
}

impl ExpenseRepository {
    pub fn new(store: Store) -> Self {
        ExpenseRepository { store }
    }

    pub fn upsert(&self, expense: &Expense) -> Result<i64> {
        self.store.upsert_expense(expense)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.store.delete_expense(id)
    }

    pub fn observe_by_date_range(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Live<Vec<Expense>>> {
        self.store.observe_expenses_in_range(from, to)
    }

    pub fn observe_totals_by_category(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Live<Vec<CategoryTotal>>> {
        self.store.observe_category_totals(from, to)
    }

    pub fn observe_net_for_account(&self, account_id: i64) -> Result<Live<Option<Decimal>>> {
        self.store.observe_net_for_account(account_id)
    }
}
