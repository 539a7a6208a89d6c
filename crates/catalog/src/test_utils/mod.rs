// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fixtures for tests that run a whole catalog manager on one node.

use std::{
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use async_trait::async_trait;
use halyard_runtime::ManualClock;

use crate::{
	CatalogConfig, CatalogManager, CatalogVersion, Result, UpdateHandler, UpdateLog, VersionedUpdate,
	command::{ColumnParams, CreateTableParams},
	descriptor::ColumnType,
	log::memory::{MemoryLogStorage, MemoryUpdateLog},
};

/// Physical time, in milliseconds, the test clock starts at.
pub const TEST_CLOCK_START: u64 = 1_000;

pub struct TestCatalog {
	pub manager: CatalogManager,
	pub storage: MemoryLogStorage,
	pub clock: Arc<ManualClock>,
}

impl TestCatalog {
	/// A second manager over the same log storage and clock, as if the node
	/// had been restarted. Not started.
	pub fn reopen(&self, config: CatalogConfig) -> CatalogManager {
		let log = MemoryUpdateLog::with_storage(self.storage.clone(), self.clock.clone());
		CatalogManager::new(config, Arc::new(log), self.clock.clone())
	}
}

/// Test config: no activation delay and no clock skew, so DDL statements
/// return as soon as their version is applied.
pub fn test_config() -> CatalogConfig {
	CatalogConfig::default().delay_duration(Duration::ZERO).max_clock_skew(Duration::ZERO)
}

pub async fn start_test_catalog() -> TestCatalog {
	start_test_catalog_with(test_config()).await
}

pub async fn start_test_catalog_with(config: CatalogConfig) -> TestCatalog {
	let clock = Arc::new(ManualClock::starting_at(TEST_CLOCK_START));
	let storage = MemoryLogStorage::new();
	let log = MemoryUpdateLog::with_storage(storage.clone(), clock.clone());
	let manager = CatalogManager::new(config, Arc::new(log), clock.clone());
	manager.start().await.unwrap();
	TestCatalog {
		manager,
		storage,
		clock,
	}
}

/// Starts a manager whose log rejects the first `rejections` appends.
pub async fn start_conflicting_catalog(rejections: usize) -> (TestCatalog, Arc<ConflictingLog>) {
	let clock = Arc::new(ManualClock::starting_at(TEST_CLOCK_START));
	let storage = MemoryLogStorage::new();
	let log = Arc::new(ConflictingLog::new(
		Arc::new(MemoryUpdateLog::with_storage(storage.clone(), clock.clone())),
		rejections,
	));
	let manager = CatalogManager::new(test_config(), log.clone(), clock.clone());
	manager.start().await.unwrap();
	(
		TestCatalog {
			manager,
			storage,
			clock,
		},
		log,
	)
}

pub fn column(name: &str, column_type: ColumnType) -> ColumnParams {
	ColumnParams::new(name, column_type)
}

/// `<name> (ID INT32 NOT NULL PRIMARY KEY, VAL STRING)` in the default
/// schema and zone.
pub fn simple_table(name: &str) -> CreateTableParams {
	CreateTableParams::new(
		name,
		vec![column("ID", ColumnType::Int32).not_null(), column("VAL", ColumnType::String)],
		vec!["ID".to_string()],
	)
}

/// Wraps a log and loses the race for the next version a fixed number of
/// times, committing nothing, as if other nodes kept appending first.
pub struct ConflictingLog {
	inner: Arc<dyn UpdateLog>,
	remaining: AtomicUsize,
	attempts: AtomicUsize,
}

impl ConflictingLog {
	pub fn new(inner: Arc<dyn UpdateLog>, rejections: usize) -> Self {
		Self {
			inner,
			remaining: AtomicUsize::new(rejections),
			attempts: AtomicUsize::new(0),
		}
	}

	/// Appends seen so far, rejected ones included.
	pub fn attempts(&self) -> usize {
		self.attempts.load(Ordering::SeqCst)
	}

	pub fn reject_next(&self, rejections: usize) {
		self.remaining.store(rejections, Ordering::SeqCst);
	}
}

#[async_trait]
impl UpdateLog for ConflictingLog {
	fn register_update_handler(&self, handler: Arc<dyn UpdateHandler>) -> Result<()> {
		self.inner.register_update_handler(handler)
	}

	async fn start(&self) -> Result<()> {
		self.inner.start().await
	}

	async fn stop(&self) -> Result<()> {
		self.inner.stop().await
	}

	async fn append(&self, update: VersionedUpdate) -> Result<bool> {
		self.attempts.fetch_add(1, Ordering::SeqCst);
		let rejected = self.remaining.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1)).is_ok();
		if rejected {
			return Ok(false);
		}
		self.inner.append(update).await
	}

	async fn committed_version(&self) -> Result<CatalogVersion> {
		self.inner.committed_version().await
	}
}
