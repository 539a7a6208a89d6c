// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use async_trait::async_trait;
use halyard_type::HybridTimestamp;
use tokio::sync::watch;

use super::ClockService;

/// A clock that only moves when told to.
///
/// Every `now()` still advances the logical counter by one, so readings stay
/// strictly increasing. Physical time moves through `advance` and `set`.
#[derive(Debug)]
pub struct ManualClock {
	current: watch::Sender<HybridTimestamp>,
}

impl ManualClock {
	pub fn new(start: HybridTimestamp) -> Self {
		let (current, _) = watch::channel(start);
		Self {
			current,
		}
	}

	/// Starts at physical time `millis` with a zero logical counter.
	pub fn starting_at(millis: u64) -> Self {
		Self::new(HybridTimestamp::new(millis, 0))
	}

	pub fn advance(&self, duration: Duration) {
		self.current.send_modify(|ts| *ts = ts.add_duration(duration));
	}

	/// Moves the clock to `target`; never moves it backwards.
	pub fn set(&self, target: HybridTimestamp) {
		self.current.send_modify(|ts| {
			if target > *ts {
				*ts = target;
			}
		});
	}

	/// The current reading, without ticking.
	pub fn peek(&self) -> HybridTimestamp {
		*self.current.borrow()
	}
}

impl Default for ManualClock {
	fn default() -> Self {
		Self::starting_at(1)
	}
}

#[async_trait]
impl ClockService for ManualClock {
	fn now(&self) -> HybridTimestamp {
		let mut reading = HybridTimestamp::MIN;
		self.current.send_modify(|ts| {
			*ts = ts.tick();
			reading = *ts;
		});
		reading
	}

	async fn wait_until(&self, target: HybridTimestamp) {
		let mut rx = self.current.subscribe();
		loop {
			if *rx.borrow_and_update() >= target {
				return;
			}
			// The sender lives as long as `self`, so the channel cannot close here.
			if rx.changed().await.is_err() {
				return;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use tokio::time::timeout;

	use super::*;

	#[test]
	fn test_now_ticks_logical_counter() {
		let clock = ManualClock::starting_at(100);
		let a = clock.now();
		let b = clock.now();
		assert_eq!(a.physical(), 100);
		assert_eq!(b.physical(), 100);
		assert!(b > a);
	}

	#[test]
	fn test_advance_moves_physical_time() {
		let clock = ManualClock::starting_at(100);
		clock.advance(Duration::from_millis(50));
		assert_eq!(clock.peek().physical(), 150);
	}

	#[test]
	fn test_set_never_moves_backwards() {
		let clock = ManualClock::starting_at(100);
		clock.set(HybridTimestamp::new(50, 0));
		assert_eq!(clock.peek().physical(), 100);
		clock.set(HybridTimestamp::new(200, 0));
		assert_eq!(clock.peek().physical(), 200);
	}

	#[tokio::test]
	async fn test_wait_until_resolves_after_advance() {
		let clock = Arc::new(ManualClock::starting_at(100));
		let target = HybridTimestamp::new(120, 0);

		let waiter = {
			let clock = clock.clone();
			tokio::spawn(async move { clock.wait_until(target).await })
		};

		tokio::task::yield_now().await;
		assert!(!waiter.is_finished());

		clock.advance(Duration::from_millis(20));
		timeout(Duration::from_secs(1), waiter).await.unwrap().unwrap();
	}

	#[tokio::test]
	async fn test_wait_until_reached_returns_immediately() {
		let clock = ManualClock::starting_at(100);
		timeout(Duration::from_millis(100), clock.wait_until(HybridTimestamp::new(100, 0))).await.unwrap();
	}
}
