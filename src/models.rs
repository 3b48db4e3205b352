// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a movement. The stored `amount` is always a non-negative
/// magnitude; the sign is derived from this at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementType {
    Income,
    Expense,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Income => "INCOME",
            MovementType::Expense => "EXPENSE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "INCOME" => Some(MovementType::Income),
            "EXPENSE" => Some(MovementType::Expense),
            _ => None,
        }
    }

    /// Applies the direction to a stored magnitude.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            MovementType::Income => amount,
            MovementType::Expense => -amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub initial_balance: Decimal,
    pub active: bool,
}

impl Account {
    /// New account pending identity assignment (id 0 means "assign on insert").
    pub fn new(name: &str) -> Self {
        Account {
            id: 0,
            name: name.to_string(),
            initial_balance: Decimal::ZERO,
            active: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color_hex: Option<String>,
    pub active: bool,
}

impl Category {
    pub fn new(name: &str) -> Self {
        Category {
            id: 0,
            name: name.to_string(),
            color_hex: None,
            active: true,
        }
    }
}

/// A single movement record. Historically named "expense"; it covers income
/// as well, with `movement_type` carrying the direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub account_id: i64,
    pub category_id: Option<i64>,
    pub amount: Decimal,
    pub movement_type: MovementType,
    pub description: Option<String>,
    pub occurred_at: NaiveDateTime,
}

impl Expense {
    pub fn signed_amount(&self) -> Decimal {
        self.movement_type.signed(self.amount)
    }
}

/// One group of the per-category aggregation. Movements without a category
/// fold into the `category_id: None` group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category_id: Option<i64>,
    pub total: Decimal,
}

/// Display-ready movement with the category name already joined in. Title
/// and note both come from the stored description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub id: i64,
    pub title: Option<String>,
    pub amount: Decimal,
    pub is_income: bool,
    pub category_name: Option<String>,
    pub date: NaiveDateTime,
    pub note: Option<String>,
}

/// User preferences. Each field falls back to its own default when the
/// backing key is absent, so a partially-written store is still well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub currency_symbol: String,
    pub default_category: String,
    pub default_payment_method: String,
    pub show_tips: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency_symbol: "S/.".to_string(),
            default_category: "General".to_string(),
            default_payment_method: "Efectivo".to_string(),
            show_tips: true,
        }
    }
}
