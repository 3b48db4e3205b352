// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Preference store: four scalar settings persisted as key/value pairs.
//! Writes are per-key and not transactional across keys; a missing key
//! falls back to its own default, so any partial state is well-formed.

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

use crate::live::{Live, Table};
use crate::models::Settings;
use crate::store::Store;

pub const KEY_CURRENCY_SYMBOL: &str = "currency_symbol";
pub const KEY_DEFAULT_CATEGORY: &str = "default_category";
pub const KEY_DEFAULT_PAYMENT_METHOD: &str = "default_payment_method";
pub const KEY_SHOW_TIPS: &str = "show_tips";

fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    Ok(conn
        .query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?)
}

pub(crate) fn load(conn: &Connection) -> Result<Settings> {
    let d = Settings::default();
    Ok(Settings {
        currency_symbol: get(conn, KEY_CURRENCY_SYMBOL)?.unwrap_or(d.currency_symbol),
        default_category: get(conn, KEY_DEFAULT_CATEGORY)?.unwrap_or(d.default_category),
        default_payment_method: get(conn, KEY_DEFAULT_PAYMENT_METHOD)?
            .unwrap_or(d.default_payment_method),
        show_tips: get(conn, KEY_SHOW_TIPS)?
            .map(|v| v == "true")
            .unwrap_or(d.show_tips),
    })
}

impl Store {
    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO settings(key, value) VALUES(?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value",
                params![key, value],
            )?;
            Ok(())
        })?;
        tracing::debug!(key, "setting written");
        self.publish(Table::Settings);
        Ok(())
    }

    pub fn set_currency_symbol(&self, symbol: &str) -> Result<()> {
        self.set_setting(KEY_CURRENCY_SYMBOL, symbol)
    }

    pub fn set_default_category(&self, category: &str) -> Result<()> {
        self.set_setting(KEY_DEFAULT_CATEGORY, category)
    }

    pub fn set_default_payment_method(&self, method: &str) -> Result<()> {
        self.set_setting(KEY_DEFAULT_PAYMENT_METHOD, method)
    }

    pub fn set_show_tips(&self, show: bool) -> Result<()> {
        self.set_setting(KEY_SHOW_TIPS, if show { "true" } else { "false" })
    }

    /// Current snapshot, one-shot.
    pub fn settings(&self) -> Result<Settings> {
        self.with_conn(load)
    }

    /// Live combined snapshot of the four settings.
    pub fn observe_settings(&self) -> Result<Live<Settings>> {
        self.subscribe(&[Table::Settings], load)
    }
}
