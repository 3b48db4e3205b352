// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDateTime;
use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;

use super::Store;
use crate::live::{Live, Table};
use crate::models::{CategoryTotal, Expense, MovementType};
use crate::utils::{fmt_datetime, parse_datetime};

const COLUMNS: &str = "id, account_id, category_id, amount, movement_type, description, occurred_at";

fn decode(r: &Row) -> Result<Expense> {
    let amount_s: String = r.get(3)?;
    let type_s: String = r.get(4)?;
    let occurred_s: String = r.get(6)?;
    Ok(Expense {
        id: r.get(0)?,
        account_id: r.get(1)?,
        category_id: r.get(2)?,
        amount: amount_s
            .parse()
            .with_context(|| format!("Invalid amount '{}'", amount_s))?,
        movement_type: MovementType::parse(&type_s)
            .ok_or_else(|| anyhow!("Unknown movement type '{}'", type_s))?,
        description: r.get(5)?,
        occurred_at: parse_datetime(&occurred_s)?,
    })
}

/// Every movement, most recent first.
pub(crate) fn all(conn: &Connection) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM expenses ORDER BY occurred_at DESC, id DESC"
    ))?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(decode(r)?);
    }
    Ok(out)
}

pub(crate) fn in_range(
    conn: &Connection,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM expenses WHERE occurred_at BETWEEN ?1 AND ?2
         ORDER BY occurred_at DESC, id DESC"
    ))?;
    let mut rows = stmt.query(params![fmt_datetime(from), fmt_datetime(to)])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(decode(r)?);
    }
    Ok(out)
}

/// Signed sums per category over the inclusive range. Accumulated as Decimal
/// in Rust rather than SUM() in SQL, which would round-trip through float.
/// Movements without a category form the `None` group, emitted first.
pub(crate) fn category_totals(
    conn: &Connection,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> Result<Vec<CategoryTotal>> {
    let mut totals: BTreeMap<Option<i64>, Decimal> = BTreeMap::new();
    for e in in_range(conn, from, to)? {
        *totals.entry(e.category_id).or_insert(Decimal::ZERO) += e.signed_amount();
    }
    Ok(totals
        .into_iter()
        .map(|(category_id, total)| CategoryTotal { category_id, total })
        .collect())
}

/// Net signed sum for one account; None when it has no movements.
pub(crate) fn net_for_account(conn: &Connection, account_id: i64) -> Result<Option<Decimal>> {
    let mut stmt =
        conn.prepare("SELECT amount, movement_type FROM expenses WHERE account_id = ?1")?;
    let mut rows = stmt.query(params![account_id])?;
    let mut net: Option<Decimal> = None;
    while let Some(r) = rows.next()? {
        let amount_s: String = r.get(0)?;
        let type_s: String = r.get(1)?;
        let amount: Decimal = amount_s
            .parse()
            .with_context(|| format!("Invalid amount '{}'", amount_s))?;
        let mt = MovementType::parse(&type_s)
            .ok_or_else(|| anyhow!("Unknown movement type '{}'", type_s))?;
        net = Some(net.unwrap_or(Decimal::ZERO) + mt.signed(amount));
    }
    Ok(net)
}

impl Store {
    /// Inserts (id 0) or fully replaces the row sharing the identity. This
    /// is an overwrite, not a partial patch.
    pub fn upsert_expense(&self, expense: &Expense) -> Result<i64> {
        let id = self.with_conn(|conn| {
            if expense.id == 0 {
                conn.execute(
                    "INSERT INTO expenses(account_id, category_id, amount, movement_type, description, occurred_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        expense.account_id,
                        expense.category_id,
                        expense.amount.to_string(),
                        expense.movement_type.as_str(),
                        expense.description,
                        fmt_datetime(expense.occurred_at)
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            } else {
                conn.execute(
                    "INSERT OR REPLACE INTO expenses(id, account_id, category_id, amount, movement_type, description, occurred_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        expense.id,
                        expense.account_id,
                        expense.category_id,
                        expense.amount.to_string(),
                        expense.movement_type.as_str(),
                        expense.description,
                        fmt_datetime(expense.occurred_at)
                    ],
                )?;
                Ok(expense.id)
            }
        })?;
        tracing::debug!(id, kind = expense.movement_type.as_str(), "upserted expense");
        self.publish(Table::Expenses);
        Ok(id)
    }

    pub fn delete_expense(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
            Ok(())
        })?;
        tracing::debug!(id, "deleted expense");
        self.publish(Table::Expenses);
        Ok(())
    }

    pub fn expense_by_id(&self, id: i64) -> Result<Option<Expense>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {COLUMNS} FROM expenses WHERE id = ?1"))?;
            let mut rows = stmt.query(params![id])?;
            match rows.next()? {
                Some(r) => Ok(Some(decode(r)?)),
                None => Ok(None),
            }
        })
    }

    pub fn expense_count(&self) -> Result<i64> {
        self.with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))?))
    }

    /// Live movements within `[from, to]`, most recent first.
    pub fn observe_expenses_in_range(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Live<Vec<Expense>>> {
        self.subscribe(&[Table::Expenses], move |conn: &Connection| in_range(conn, from, to))
    }

    /// Live per-category signed totals within `[from, to]`.
    pub fn observe_category_totals(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Live<Vec<CategoryTotal>>> {
        self.subscribe(&[Table::Expenses], move |conn: &Connection| {
            category_totals(conn, from, to)
        })
    }

    /// Live net balance of one account; callers treat None as zero.
    pub fn observe_net_for_account(&self, account_id: i64) -> Result<Live<Option<Decimal>>> {
        self.subscribe(&[Table::Expenses], move |conn: &Connection| {
            net_for_account(conn, account_id)
        })
    }
}
