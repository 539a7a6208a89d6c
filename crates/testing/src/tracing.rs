// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Log output for tests.
//!
//! Filtering follows `RUST_LOG`; without it only warnings and errors are
//! printed. Safe to call from every test, only the first call installs the
//! subscriber.

use tracing_subscriber::EnvFilter;

pub fn init() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_test_writer()
		.try_init();
}
