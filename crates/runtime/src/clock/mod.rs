// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Hybrid clock service.
//!
//! The catalog only needs two things from a clock: a monotonically
//! increasing reading, and a way to suspend until the local clock has
//! reached a given instant.

use async_trait::async_trait;
use halyard_type::HybridTimestamp;

mod manual;
mod system;
mod waiter;

pub use manual::ManualClock;
pub use system::SystemClock;
pub use waiter::ClockWaiter;

#[async_trait]
pub trait ClockService: Send + Sync + 'static {
	/// Returns a reading strictly greater than every reading returned before.
	fn now(&self) -> HybridTimestamp;

	/// Resolves once `now()` has reached `target`.
	async fn wait_until(&self, target: HybridTimestamp);
}
