// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{sync::Arc, time::Duration};

use halyard_type::HybridTimestamp;
use tracing::trace;

use super::ClockService;

/// Waits for local time to pass an instant, accounting for clock skew
/// between nodes.
#[derive(Clone)]
pub struct ClockWaiter {
	clock: Arc<dyn ClockService>,
	max_clock_skew: Duration,
}

impl ClockWaiter {
	pub fn new(clock: Arc<dyn ClockService>, max_clock_skew: Duration) -> Self {
		Self {
			clock,
			max_clock_skew,
		}
	}

	pub fn clock(&self) -> &Arc<dyn ClockService> {
		&self.clock
	}

	pub fn max_clock_skew(&self) -> Duration {
		self.max_clock_skew
	}

	/// Resolves once the local clock has reached `target`.
	pub async fn wait_for(&self, target: HybridTimestamp) {
		if self.clock.now() >= target {
			return;
		}
		trace!(%target, "waiting for clock");
		self.clock.wait_until(target).await;
	}

	/// Resolves once `activation` has passed on every node whose clock is
	/// within `max_clock_skew` of ours.
	pub async fn wait_for_activation(&self, activation: HybridTimestamp) {
		self.wait_for(activation.add_duration(self.max_clock_skew)).await;
	}
}
