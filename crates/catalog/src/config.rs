// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay added to the commit timestamp of an update to get its activation
/// timestamp.
pub const DEFAULT_DELAY_DURATION: Duration = Duration::ZERO;

/// Upper bound of clock drift between any two nodes of the cluster.
pub const DEFAULT_MAX_CLOCK_SKEW: Duration = Duration::from_millis(7);

/// Number of failed event deliveries kept for redelivery.
pub const DEFAULT_EVENT_FAILURE_BUFFER: usize = 1024;

/// Configuration of a [`CatalogManager`](crate::CatalogManager).
///
/// Durations are read as milliseconds when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
	#[serde(with = "millis")]
	pub delay_duration: Duration,
	#[serde(with = "millis")]
	pub max_clock_skew: Duration,
	pub event_failure_buffer: usize,
}

impl CatalogConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn delay_duration(mut self, delay: Duration) -> Self {
		self.delay_duration = delay;
		self
	}

	pub fn max_clock_skew(mut self, skew: Duration) -> Self {
		self.max_clock_skew = skew;
		self
	}

	pub fn event_failure_buffer(mut self, capacity: usize) -> Self {
		self.event_failure_buffer = capacity;
		self
	}
}

impl Default for CatalogConfig {
	fn default() -> Self {
		Self {
			delay_duration: DEFAULT_DELAY_DURATION,
			max_clock_skew: DEFAULT_MAX_CLOCK_SKEW,
			event_failure_buffer: DEFAULT_EVENT_FAILURE_BUFFER,
		}
	}
}

mod millis {
	use std::time::Duration;

	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
		u64::deserialize(deserializer).map(Duration::from_millis)
	}
}
