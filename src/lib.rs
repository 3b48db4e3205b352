// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod db;
pub mod live;
pub mod models;
pub mod repo;
pub mod settings;
pub mod store;
pub mod utils;
pub mod view;
