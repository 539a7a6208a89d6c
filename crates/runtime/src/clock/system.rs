// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	sync::atomic::{AtomicU64, Ordering},
	time::{Duration, SystemTime, UNIX_EPOCH},
};

use async_trait::async_trait;
use halyard_type::HybridTimestamp;
use tokio::time::sleep;

use super::ClockService;

/// Hybrid clock backed by the system wall clock.
///
/// Physical time comes from `SystemTime`; the logical counter breaks ties
/// and keeps readings monotonic when the wall clock stalls or steps back.
#[derive(Debug, Default)]
pub struct SystemClock {
	last: AtomicU64,
}

impl SystemClock {
	pub fn new() -> Self {
		Self::default()
	}
}

fn physical_now() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
		.unwrap_or(0)
}

#[async_trait]
impl ClockService for SystemClock {
	fn now(&self) -> HybridTimestamp {
		let physical = HybridTimestamp::new(physical_now(), 0).0;
		let mut current = self.last.load(Ordering::Acquire);
		loop {
			let candidate = if physical > current {
				physical
			} else {
				current.saturating_add(1)
			};
			match self.last.compare_exchange_weak(current, candidate, Ordering::AcqRel, Ordering::Acquire) {
				Ok(_) => return HybridTimestamp(candidate),
				Err(actual) => current = actual,
			}
		}
	}

	async fn wait_until(&self, target: HybridTimestamp) {
		loop {
			let now = self.now();
			if now >= target {
				return;
			}
			let remaining = target.physical().saturating_sub(now.physical()).max(1);
			sleep(Duration::from_millis(remaining)).await;
		}
	}
}
