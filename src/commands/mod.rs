// Copyright (c) 2026 Monedero contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod categories;
pub mod movements;
pub mod reports;
pub mod settings;
pub mod watch;
