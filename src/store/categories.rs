// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

use super::Store;
use crate::live::{Live, Table};
use crate::models::Category;

pub(crate) fn active(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, color_hex, active FROM categories WHERE active = 1 ORDER BY name ASC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(Category {
            id: r.get(0)?,
            name: r.get(1)?,
            color_hex: r.get(2)?,
            active: r.get(3)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

impl Store {
    /// Inserts (id 0) or rewrites the row in place by primary key. In-place
    /// rather than INSERT OR REPLACE: REPLACE deletes first and would null
    /// out dependent expense references via ON DELETE SET NULL.
    pub fn upsert_category(&self, category: &Category) -> Result<i64> {
        let id = self.with_conn(|conn| {
            if category.id == 0 {
                conn.execute(
                    "INSERT INTO categories(name, color_hex, active) VALUES (?1, ?2, ?3)",
                    params![category.name, category.color_hex, category.active],
                )?;
                Ok(conn.last_insert_rowid())
            } else {
                conn.execute(
                    "INSERT INTO categories(id, name, color_hex, active)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(id) DO UPDATE SET
                         name = excluded.name,
                         color_hex = excluded.color_hex,
                         active = excluded.active",
                    params![
                        category.id,
                        category.name,
                        category.color_hex,
                        category.active
                    ],
                )?;
                Ok(category.id)
            }
        })?;
        tracing::debug!(id, name = %category.name, "upserted category");
        self.publish(Table::Categories);
        Ok(id)
    }

    /// Flips `active` off. Dependent expenses keep their category_id; the
    /// row stays, so foreign keys remain valid. Only a hard SQL delete would
    /// trigger the schema's ON DELETE SET NULL.
    pub fn soft_delete_category(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE categories SET active = 0 WHERE id = ?1",
                params![id],
            )?;
            Ok(())
        })?;
        tracing::debug!(id, "soft-deleted category");
        self.publish(Table::Categories);
        Ok(())
    }

    /// Exact-name lookup used to avoid duplicate creation.
    pub fn id_by_category_name(&self, name: &str) -> Result<Option<i64>> {
        self.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT id FROM categories WHERE name = ?1 LIMIT 1",
                    params![name],
                    |r| r.get(0),
                )
                .optional()?)
        })
    }

    /// Live list of active categories, ordered by name.
    pub fn observe_active_categories(&self) -> Result<Live<Vec<Category>>> {
        self.subscribe(&[Table::Categories], active)
    }
}
