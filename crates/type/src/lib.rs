// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use diagnostic::{Diagnostic, IntoDiagnostic};
pub use timestamp::HybridTimestamp;

pub mod diagnostic;
pub mod timestamp;
