// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use super::Store;
use crate::live::{Live, Table};
use crate::models::Account;

pub(crate) fn all(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt =
        conn.prepare("SELECT id, name, initial_balance, active FROM accounts ORDER BY name ASC")?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let balance_s: String = r.get(2)?;
        out.push(Account {
            id: r.get(0)?,
            name: r.get(1)?,
            initial_balance: balance_s
                .parse()
                .with_context(|| format!("Invalid initial balance '{}'", balance_s))?,
            active: r.get(3)?,
        });
    }
    Ok(out)
}

/// Sum of initial balances over active accounts; None when there are none.
pub(crate) fn total_initial_balance(conn: &Connection) -> Result<Option<Decimal>> {
    let mut stmt = conn.prepare("SELECT initial_balance FROM accounts WHERE active = 1")?;
    let mut rows = stmt.query([])?;
    let mut total: Option<Decimal> = None;
    while let Some(r) = rows.next()? {
        let s: String = r.get(0)?;
        let v: Decimal = s
            .parse()
            .with_context(|| format!("Invalid initial balance '{}'", s))?;
        total = Some(total.unwrap_or(Decimal::ZERO) + v);
    }
    Ok(total)
}

impl Store {
    /// Inserts (id 0) or rewrites the row in place by primary key; returns
    /// the identity. Must stay an upsert, not INSERT OR REPLACE: REPLACE is
    /// delete+insert under `PRAGMA foreign_keys`, which would cascade away
    /// the account's expenses on a mere rename.
    pub fn upsert_account(&self, account: &Account) -> Result<i64> {
        let id = self.with_conn(|conn| {
            if account.id == 0 {
                conn.execute(
                    "INSERT INTO accounts(name, initial_balance, active) VALUES (?1, ?2, ?3)",
                    params![
                        account.name,
                        account.initial_balance.to_string(),
                        account.active
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            } else {
                conn.execute(
                    "INSERT INTO accounts(id, name, initial_balance, active)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(id) DO UPDATE SET
                         name = excluded.name,
                         initial_balance = excluded.initial_balance,
                         active = excluded.active",
                    params![
                        account.id,
                        account.name,
                        account.initial_balance.to_string(),
                        account.active
                    ],
                )?;
                Ok(account.id)
            }
        })?;
        tracing::debug!(id, name = %account.name, "upserted account");
        self.publish(Table::Accounts);
        Ok(id)
    }

    /// Removes the account; its expenses go with it (ON DELETE CASCADE).
    pub fn delete_account(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM accounts WHERE id = ?1", params![id])?;
            Ok(())
        })?;
        tracing::debug!(id, "deleted account");
        self.publish(Table::Accounts);
        // Cascade may have removed movements too.
        self.publish(Table::Expenses);
        Ok(())
    }

    pub fn account_by_id(&self, id: i64) -> Result<Option<Account>> {
        self.with_conn(|conn| {
            let row: Option<(i64, String, String, bool)> = conn
                .query_row(
                    "SELECT id, name, initial_balance, active FROM accounts WHERE id = ?1",
                    params![id],
                    |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
                )
                .optional()?;
            match row {
                Some((id, name, balance_s, active)) => Ok(Some(Account {
                    id,
                    name,
                    initial_balance: balance_s
                        .parse()
                        .with_context(|| format!("Invalid initial balance '{}'", balance_s))?,
                    active,
                })),
                None => Ok(None),
            }
        })
    }

    /// Lowest-identity account, the one `add_movement` defaults to.
    pub fn first_account_id(&self) -> Result<Option<i64>> {
        self.with_conn(|conn| {
            Ok(conn
                .query_row("SELECT id FROM accounts ORDER BY id LIMIT 1", [], |r| {
                    r.get(0)
                })
                .optional()?)
        })
    }

    pub fn account_count(&self) -> Result<i64> {
        self.with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))?))
    }

    /// Live account list, ordered by name.
    pub fn observe_accounts(&self) -> Result<Live<Vec<Account>>> {
        self.subscribe(&[Table::Accounts], all)
    }

    pub fn observe_total_initial_balance(&self) -> Result<Live<Option<Decimal>>> {
        self.subscribe(&[Table::Accounts], total_initial_balance)
    }
}
