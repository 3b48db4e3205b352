// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Data access layer, organized by entity:
//! - `accounts` - account CRUD and the initial-balance aggregate
//! - `categories` - category CRUD with soft delete
//! - `expenses` - movement CRUD and the two signed aggregations
//!
//! All reads are available as live queries: the result is re-delivered in
//! full whenever a write touches one of the tables the query depends on.

use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use rusqlite::Connection;

use crate::db;
use crate::live::{Live, LiveBus, Table};

pub mod accounts;
pub mod categories;
pub mod expenses;

/// Handle to the shared store. Explicitly constructed and passed to whoever
/// needs it; lifecycle belongs to the process entry point. Cloning is cheap
/// and all clones share one connection and one invalidation bus.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
    bus: Arc<LiveBus>,
}

impl Store {
    /// Opens the file-backed store at the platform data dir.
    pub fn open() -> Result<Self> {
        Ok(Self::new(db::open_or_init()?))
    }

    /// In-memory store with the same schema, for tests and dry runs.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(db::open_in_memory()?))
    }

    pub fn new(conn: Connection) -> Self {
        Store {
            conn: Arc::new(Mutex::new(conn)),
            bus: Arc::new(LiveBus::new()),
        }
    }

    pub(crate) fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let guard = self
            .conn
            .lock()
            .map_err(|_| anyhow!("store mutex poisoned"))?;
        f(&guard)
    }

    /// Invalidates every live query reading `table`. Called by write paths
    /// after the connection lock is released; recomputes re-acquire it.
    pub(crate) fn publish(&self, table: Table) {
        self.bus.publish(table);
    }

    /// Registers a live query. `query` runs once now for the initial
    /// snapshot, then on every write to one of `tables`.
    pub fn subscribe<T, F>(&self, tables: &[Table], query: F) -> Result<Live<T>>
    where
        T: Send + 'static,
        F: Fn(&Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        self.bus.subscribe(tables, move || {
            let guard = conn.lock().map_err(|_| anyhow!("store mutex poisoned"))?;
            query(&guard)
        })
    }
}
