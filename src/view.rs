// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reactive view state over the store: a display-ready movement list, a
//! running balance, and the two convenience write paths the UI calls.
//!
//! Writes are fire-and-forget: they are handed to a worker thread and the
//! caller sees the effect only when the live streams re-emit. A failed
//! write leaves the streams unchanged.

use std::collections::HashMap;
use std::sync::mpsc::{Sender, channel};
use std::thread;

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::live::{Live, Table};
use crate::models::{Account, Category, Expense, Movement, MovementType};
use crate::store::{Store, categories, expenses};

enum Op {
    Add {
        title: String,
        signed_amount: Decimal,
        category_name: String,
        date_str: String,
        note: Option<String>,
    },
    Edit {
        id: i64,
        new_title: Option<String>,
        new_category_name: Option<String>,
        new_date_str: Option<String>,
        new_note: Option<String>,
    },
}

/// View-state holder for the movement ledger. Constructed from an explicit
/// store handle; dropping it shuts the write worker down.
pub struct MovementBook {
    store: Store,
    ops: Sender<Op>,
}

impl MovementBook {
    pub fn new(store: Store) -> Self {
        let (ops, rx) = channel::<Op>();
        let worker = store.clone();
        thread::spawn(move || {
            for op in rx {
                if let Err(e) = apply(&worker, op) {
                    tracing::warn!(error = %e, "movement write failed");
                }
            }
        });
        MovementBook { store, ops }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Live display-ready movements: expenses joined with the names of the
    /// ACTIVE categories. Soft-deleted categories render as uncategorized
    /// without their stored reference being touched.
    pub fn transactions(&self) -> Result<Live<Vec<Movement>>> {
        self.store
            .subscribe(&[Table::Expenses, Table::Categories], movements_snapshot)
    }

    /// Live sum of signed amounts over all movements. Account initial
    /// balances are deliberately not part of this figure; see
    /// `Store::observe_total_initial_balance` for that side.
    pub fn balance(&self) -> Result<Live<Decimal>> {
        self.store.subscribe(&[Table::Expenses], |conn: &Connection| {
            Ok(expenses::all(conn)?
                .iter()
                .map(Expense::signed_amount)
                .sum())
        })
    }

    /// Records a movement. The default account and the named category are
    /// created on first use; the sign of `signed_amount` selects the
    /// movement type and the magnitude is stored. `date_str` is a
    /// YYYY-MM-DD calendar date taken at start of day; anything unparsable
    /// silently becomes the current timestamp.
    pub fn add_movement(
        &self,
        title: &str,
        signed_amount: Decimal,
        category_name: &str,
        date_str: &str,
        note: Option<&str>,
    ) {
        let sent = self.ops.send(Op::Add {
            title: title.to_string(),
            signed_amount,
            category_name: category_name.to_string(),
            date_str: date_str.to_string(),
            note: note.map(str::to_string),
        });
        if sent.is_err() {
            tracing::warn!("movement worker gone; add dropped");
        }
    }

    /// Rewrites metadata of an existing movement, preserving its amount and
    /// type. Omitted fields keep their stored values; an unknown id is a
    /// silent no-op. The stored description holds both title and note, so a
    /// provided `new_note` rewrites it when no `new_title` is given.
    pub fn edit_movement_meta(
        &self,
        id: i64,
        new_title: Option<&str>,
        new_category_name: Option<&str>,
        new_date_str: Option<&str>,
        new_note: Option<&str>,
    ) {
        let sent = self.ops.send(Op::Edit {
            id,
            new_title: new_title.map(str::to_string),
            new_category_name: new_category_name.map(str::to_string),
            new_date_str: new_date_str.map(str::to_string),
            new_note: new_note.map(str::to_string),
        });
        if sent.is_err() {
            tracing::warn!("movement worker gone; edit dropped");
        }
    }
}

fn movements_snapshot(conn: &Connection) -> Result<Vec<Movement>> {
    let names: HashMap<i64, String> = categories::active(conn)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    Ok(expenses::all(conn)?
        .into_iter()
        .map(|e| Movement {
            id: e.id,
            title: e.description.clone(),
            amount: e.amount,
            is_income: e.movement_type == MovementType::Income,
            category_name: e.category_id.and_then(|id| names.get(&id).cloned()),
            date: e.occurred_at,
            // description doubles as the note in the display model
            note: e.description,
        })
        .collect())
}

fn apply(store: &Store, op: Op) -> Result<()> {
    match op {
        Op::Add {
            title,
            signed_amount,
            category_name,
            date_str,
            note,
        } => {
            let account_id = ensure_default_account(store)?;
            let category_id = ensure_category(store, &category_name)?;
            let movement_type = if signed_amount > Decimal::ZERO {
                MovementType::Income
            } else {
                MovementType::Expense
            };
            let description = if title.trim().is_empty() { note } else { Some(title) };
            store.upsert_expense(&Expense {
                id: 0,
                account_id,
                category_id,
                amount: signed_amount.abs(),
                movement_type,
                description,
                occurred_at: parse_movement_date(&date_str),
            })?;
            Ok(())
        }
        Op::Edit {
            id,
            new_title,
            new_category_name,
            new_date_str,
            new_note,
        } => {
            let Some(existing) = store.expense_by_id(id)? else {
                tracing::debug!(id, "edit for unknown movement ignored");
                return Ok(());
            };
            let category_id = match new_category_name {
                Some(name) => ensure_category(store, &name)?,
                None => existing.category_id,
            };
            let occurred_at = match new_date_str {
                Some(s) => parse_movement_date(&s),
                None => existing.occurred_at,
            };
            let description = if let Some(t) = new_title.filter(|t| !t.trim().is_empty()) {
                Some(t)
            } else if new_note.is_some() {
                new_note
            } else {
                existing.description.clone()
            };
            store.upsert_expense(&Expense {
                id,
                account_id: existing.account_id,
                category_id,
                amount: existing.amount,
                movement_type: existing.movement_type,
                description,
                occurred_at,
            })?;
            Ok(())
        }
    }
}

/// Lowest-identity account, created as "Principal" when none exists yet.
fn ensure_default_account(store: &Store) -> Result<i64> {
    if let Some(id) = store.first_account_id()? {
        return Ok(id);
    }
    store.upsert_account(&Account::new("Principal"))
}

/// Exact-name resolve-or-create; a blank name means "no category". The
/// lookup-then-insert is not atomic, but all writes funnel through the one
/// worker thread, so the duplicate race is unreachable on this path.
fn ensure_category(store: &Store, name: &str) -> Result<Option<i64>> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }
    if let Some(id) = store.id_by_category_name(name)? {
        return Ok(Some(id));
    }
    Ok(Some(store.upsert_category(&Category::new(name))?))
}

fn parse_movement_date(s: &str) -> NaiveDateTime {
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(d) => d.and_time(NaiveTime::MIN),
        Err(_) => Local::now().naive_local(),
    }
}
