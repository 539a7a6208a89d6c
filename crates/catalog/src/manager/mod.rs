// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	sync::{
		Arc,
		atomic::{AtomicBool, AtomicU64, Ordering},
	},
	time::Duration,
};

use halyard_runtime::{ClockService, ClockWaiter};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::{
	Catalog, CatalogConfig, CatalogEventListener, CatalogEventType, CatalogVersion, Error, EventPublisher, Result,
	SnapshotHistory, UpdateLog, VersionTracker, handler::CatalogUpdateHandler,
};

mod read;
mod retry;

pub use retry::MAX_RETRY_COUNT;

/// Entry point of the catalog on one node.
///
/// Serves reads from the local snapshot history and turns DDL statements
/// into updates appended to the shared update log.
#[derive(Clone)]
pub struct CatalogManager(Arc<Inner>);

struct Inner {
	history: SnapshotHistory,
	tracker: VersionTracker,
	publisher: EventPublisher,
	log: Arc<dyn UpdateLog>,
	clock_waiter: ClockWaiter,
	delay_duration_ms: AtomicU64,
	started: AtomicBool,
	handler: Mutex<Option<(Arc<CatalogUpdateHandler>, JoinHandle<()>)>>,
}

impl CatalogManager {
	pub fn new(config: CatalogConfig, log: Arc<dyn UpdateLog>, clock: Arc<dyn ClockService>) -> Self {
		Self(Arc::new(Inner {
			history: SnapshotHistory::new(),
			tracker: VersionTracker::new(CatalogVersion::INITIAL),
			publisher: EventPublisher::new(config.event_failure_buffer),
			log,
			clock_waiter: ClockWaiter::new(clock, config.max_clock_skew),
			delay_duration_ms: AtomicU64::new(duration_millis(config.delay_duration)),
			started: AtomicBool::new(false),
			handler: Mutex::new(None),
		}))
	}

	/// Registers the initial catalog, attaches to the update log and
	/// replays every update committed so far. Returns once the replayed
	/// versions are registered and their events delivered.
	pub async fn start(&self) -> Result<()> {
		if self.0.started.swap(true, Ordering::AcqRel) {
			return Err(Error::Log("catalog manager is already started".to_string()));
		}

		self.0.history.register(Arc::new(Catalog::initial()));

		let (handler, dispatcher) = CatalogUpdateHandler::spawn(
			self.0.history.clone(),
			self.0.tracker.clone(),
			self.0.publisher.clone(),
		);
		*self.0.handler.lock() = Some((handler.clone(), dispatcher));

		self.0.log.register_update_handler(handler)?;
		self.0.log.start().await?;

		let committed = self.0.log.committed_version().await?;
		self.0.tracker.wait_for(committed).await?;

		info!(version = %committed, "catalog manager started");
		Ok(())
	}

	/// Stops the update log, lets queued events drain, then fails every
	/// DDL still waiting for its version.
	pub async fn stop(&self) -> Result<()> {
		self.0.log.stop().await?;

		let handler = self.0.handler.lock().take();
		if let Some((handler, dispatcher)) = handler {
			handler.close();
			dispatcher.await.map_err(|err| Error::Log(format!("event dispatcher failed: {}", err)))?;
		}
		self.0.tracker.close();

		debug!(version = ?self.0.history.latest_version(), "catalog manager stopped");
		Ok(())
	}

	pub fn listen<L>(&self, event_type: CatalogEventType, listener: L)
	where
		L: CatalogEventListener,
	{
		self.0.publisher.listen(event_type, listener);
	}

	pub fn event_publisher(&self) -> &EventPublisher {
		&self.0.publisher
	}

	pub fn version_tracker(&self) -> &VersionTracker {
		&self.0.tracker
	}

	/// Delay applied to updates saved from now on. Versions already
	/// committed keep their activation timestamp.
	pub fn set_delay_duration(&self, delay: Duration) {
		self.0.delay_duration_ms.store(duration_millis(delay), Ordering::Release);
	}

	pub fn delay_duration(&self) -> Duration {
		Duration::from_millis(self.0.delay_duration_ms.load(Ordering::Acquire))
	}
}

fn duration_millis(duration: Duration) -> u64 {
	u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
