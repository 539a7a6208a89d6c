// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use super::ZoneId;

pub const DEFAULT_ZONE_NAME: &str = "Default";
pub const DEFAULT_PARTITION_COUNT: u32 = 25;
pub const DEFAULT_REPLICA_COUNT: u32 = 1;
pub const MAX_PARTITION_COUNT: u32 = 65_000;
pub const DEFAULT_FILTER: &str = "$..*";

/// Auto adjust timer value meaning "never".
pub const INFINITE_TIMER_VALUE: u32 = i32::MAX as u32;

/// A distribution zone: how the data of the tables assigned to it is
/// partitioned and replicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDescriptor {
	pub id: ZoneId,
	pub name: String,
	pub partitions: u32,
	pub replicas: u32,
	pub data_nodes_auto_adjust: u32,
	pub data_nodes_auto_adjust_scale_up: u32,
	pub data_nodes_auto_adjust_scale_down: u32,
	pub filter: String,
}

impl ZoneDescriptor {
	pub fn new(id: ZoneId, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
			partitions: DEFAULT_PARTITION_COUNT,
			replicas: DEFAULT_REPLICA_COUNT,
			data_nodes_auto_adjust: INFINITE_TIMER_VALUE,
			data_nodes_auto_adjust_scale_up: INFINITE_TIMER_VALUE,
			data_nodes_auto_adjust_scale_down: INFINITE_TIMER_VALUE,
			filter: DEFAULT_FILTER.to_string(),
		}
	}

	pub fn is_default(&self) -> bool {
		self.name == DEFAULT_ZONE_NAME
	}
}
