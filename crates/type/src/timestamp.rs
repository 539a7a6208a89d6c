// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	ops::Deref,
	time::Duration,
};

use serde::{Deserialize, Serialize};

/// Number of low bits holding the logical counter.
pub const LOGICAL_TIME_BITS_SIZE: u32 = 16;

const LOGICAL_TIME_MASK: u64 = (1 << LOGICAL_TIME_BITS_SIZE) - 1;

/// A hybrid logical clock reading.
///
/// The high 48 bits hold physical time in milliseconds since the unix epoch,
/// the low 16 bits a logical counter that orders events within one millisecond.
/// Ordering the raw `u64` orders the timestamps.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, PartialOrd, PartialEq, Ord, Eq, Hash, Serialize, Deserialize)]
pub struct HybridTimestamp(pub u64);

impl HybridTimestamp {
	pub const MIN: HybridTimestamp = HybridTimestamp(0);
	pub const MAX: HybridTimestamp = HybridTimestamp(u64::MAX);

	pub fn new(physical: u64, logical: u16) -> Self {
		Self(physical.saturating_mul(1 << LOGICAL_TIME_BITS_SIZE) | u64::from(logical))
	}

	pub fn physical(&self) -> u64 {
		self.0 >> LOGICAL_TIME_BITS_SIZE
	}

	pub fn logical(&self) -> u16 {
		(self.0 & LOGICAL_TIME_MASK) as u16
	}

	/// Returns a timestamp shifted forward by `millis` of physical time,
	/// keeping the logical part.
	pub fn add_physical_time(self, millis: u64) -> Self {
		Self(self.0.saturating_add(millis.saturating_mul(1 << LOGICAL_TIME_BITS_SIZE)))
	}

	pub fn add_duration(self, duration: Duration) -> Self {
		let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
		self.add_physical_time(millis)
	}

	/// The smallest timestamp strictly greater than `self`.
	pub fn tick(self) -> Self {
		Self(self.0.saturating_add(1))
	}
}

impl Deref for HybridTimestamp {
	type Target = u64;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<u64> for HybridTimestamp {
	fn from(value: u64) -> Self {
		Self(value)
	}
}

impl From<HybridTimestamp> for u64 {
	fn from(value: HybridTimestamp) -> Self {
		value.0
	}
}

impl Display for HybridTimestamp {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.physical(), self.logical())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_physical_and_logical_parts() {
		let ts = HybridTimestamp::new(1_700_000_000_000, 7);
		assert_eq!(ts.physical(), 1_700_000_000_000);
		assert_eq!(ts.logical(), 7);
	}

	#[test]
	fn test_add_physical_time_keeps_logical() {
		let ts = HybridTimestamp::new(1000, 3).add_physical_time(250);
		assert_eq!(ts.physical(), 1250);
		assert_eq!(ts.logical(), 3);
	}

	#[test]
	fn test_add_duration() {
		let ts = HybridTimestamp::new(1000, 0).add_duration(Duration::from_secs(2));
		assert_eq!(ts.physical(), 3000);
	}

	#[test]
	fn test_tick_orders_after() {
		let ts = HybridTimestamp::new(1000, u16::MAX);
		let next = ts.tick();
		assert!(next > ts);
		assert_eq!(next.physical(), 1001);
		assert_eq!(next.logical(), 0);
	}

	#[test]
	fn test_ordering_follows_physical_then_logical() {
		let a = HybridTimestamp::new(10, 500);
		let b = HybridTimestamp::new(11, 0);
		assert!(a < b);
		assert!(HybridTimestamp::MIN < a);
	}

	#[test]
	fn test_saturates_instead_of_overflowing() {
		assert_eq!(HybridTimestamp::MAX.add_physical_time(1), HybridTimestamp::MAX);
		assert_eq!(HybridTimestamp::MAX.tick(), HybridTimestamp::MAX);
	}

	#[test]
	fn test_display() {
		assert_eq!(HybridTimestamp::new(42, 1).to_string(), "42:1");
	}
}
