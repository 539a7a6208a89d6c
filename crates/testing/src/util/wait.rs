// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Wait utilities for testing
//!
//! Poll a condition instead of sleeping for a fixed time, so tests that
//! observe background work (event delivery, log sequencing) are both fast
//! and reliable.

use std::time::{Duration, Instant};

use tokio::time::sleep;

/// Default timeout for wait operations (5 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default poll interval (1 millisecond)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Wait for a condition to become true, polling at regular intervals
///
/// # Panics
/// Panics if the condition doesn't become true within `timeout`
pub async fn wait_for_condition<F>(condition: F, timeout: Duration, poll_interval: Duration, timeout_message: &str)
where
	F: Fn() -> bool,
{
	let start = Instant::now();
	while !condition() {
		if start.elapsed() > timeout {
			panic!("Timeout after {:?}: {}", timeout, timeout_message);
		}
		sleep(poll_interval).await;
	}
}

/// Wait for a condition with default timeout and poll interval
pub async fn wait_for<F>(condition: F, message: &str)
where
	F: Fn() -> bool,
{
	wait_for_condition(condition, DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL, message).await;
}

/// Assert that a condition stays false for the whole `window`.
///
/// Used to check that something does *not* happen, e.g. that a DDL future
/// stays pending while its activation instant is still in the future.
pub async fn assert_stays_false<F>(condition: F, window: Duration, message: &str)
where
	F: Fn() -> bool,
{
	let start = Instant::now();
	while start.elapsed() < window {
		assert!(!condition(), "{}", message);
		sleep(DEFAULT_POLL_INTERVAL).await;
	}
}
