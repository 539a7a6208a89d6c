// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use async_trait::async_trait;
use halyard_runtime::ClockService;
use halyard_type::HybridTimestamp;
use parking_lot::Mutex;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, error, info, warn};

use super::{UpdateHandler, UpdateLog};
use crate::{CatalogVersion, CausalityToken, Error, Result, VersionedUpdate};

/// Committed updates of a [`MemoryUpdateLog`], in their encoded form.
///
/// Cloning shares the storage, which lets a new log instance be opened over
/// the updates committed by a stopped one.
#[derive(Clone, Default)]
pub struct MemoryLogStorage(Arc<Mutex<StorageState>>);

#[derive(Default)]
struct StorageState {
	entries: Vec<StoredUpdate>,
	sink: Option<mpsc::UnboundedSender<StoredUpdate>>,
}

#[derive(Clone)]
struct StoredUpdate {
	bytes: Arc<[u8]>,
	commit_timestamp: HybridTimestamp,
	causality_token: CausalityToken,
}

impl MemoryLogStorage {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.0.lock().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Decodes the committed update for `version`.
	pub fn update(&self, version: CatalogVersion) -> Result<Option<VersionedUpdate>> {
		let index = match version.0.checked_sub(1).and_then(|index| usize::try_from(index).ok()) {
			Some(index) => index,
			None => return Ok(None),
		};
		let bytes = match self.0.lock().entries.get(index) {
			Some(stored) => stored.bytes.clone(),
			None => return Ok(None),
		};
		VersionedUpdate::decode(&bytes).map(Some)
	}
}

/// Single node update log.
///
/// Appends are serialized by a lock and commit with a timestamp read from
/// the clock under that lock, so commit timestamps follow log order. A
/// sequencer task hands committed updates to the handler one at a time.
pub struct MemoryUpdateLog {
	storage: MemoryLogStorage,
	clock: Arc<dyn ClockService>,
	handler: Mutex<Option<Arc<dyn UpdateHandler>>>,
	sequencer: Mutex<Option<JoinHandle<()>>>,
}

impl MemoryUpdateLog {
	pub fn new(clock: Arc<dyn ClockService>) -> Self {
		Self::with_storage(MemoryLogStorage::new(), clock)
	}

	pub fn with_storage(storage: MemoryLogStorage, clock: Arc<dyn ClockService>) -> Self {
		Self {
			storage,
			clock,
			handler: Mutex::new(None),
			sequencer: Mutex::new(None),
		}
	}

	pub fn storage(&self) -> &MemoryLogStorage {
		&self.storage
	}
}

#[async_trait]
impl UpdateLog for MemoryUpdateLog {
	fn register_update_handler(&self, handler: Arc<dyn UpdateHandler>) -> Result<()> {
		let mut slot = self.handler.lock();
		if slot.is_some() {
			return Err(Error::Log("update handler is already registered".to_string()));
		}
		*slot = Some(handler);
		Ok(())
	}

	async fn start(&self) -> Result<()> {
		let handler =
			self.handler.lock().clone().ok_or_else(|| Error::Log("no update handler registered".to_string()))?;

		let (tx, mut rx) = mpsc::unbounded_channel::<StoredUpdate>();
		let replayed = {
			let mut state = self.storage.0.lock();
			if state.sink.is_some() {
				return Err(Error::Log("log storage is attached to a running log".to_string()));
			}
			for stored in &state.entries {
				let _ = tx.send(stored.clone());
			}
			state.sink = Some(tx);
			state.entries.len()
		};

		let sequencer = tokio::spawn(async move {
			while let Some(stored) = rx.recv().await {
				if let Err(err) = deliver(handler.as_ref(), stored) {
					error!(%err, "update handler failed, stopping delivery");
					handler.halt(err);
					break;
				}
			}
		});
		*self.sequencer.lock() = Some(sequencer);

		info!(replayed, "update log started");
		Ok(())
	}

	async fn stop(&self) -> Result<()> {
		self.storage.0.lock().sink.take();

		let sequencer = self.sequencer.lock().take();
		if let Some(sequencer) = sequencer {
			sequencer.await.map_err(|err| Error::Log(format!("sequencer task failed: {}", err)))?;
		}
		debug!("update log stopped");
		Ok(())
	}

	async fn append(&self, update: VersionedUpdate) -> Result<bool> {
		let bytes: Arc<[u8]> = update.encode()?.into();

		let mut state = self.storage.0.lock();
		let expected = CatalogVersion(committed(&state.entries).saturating_add(1));
		if update.version() != expected {
			debug!(version = %update.version(), %expected, "rejected update for stale version");
			return Ok(false);
		}

		let stored = StoredUpdate {
			bytes,
			commit_timestamp: self.clock.now(),
			causality_token: CausalityToken(expected.0),
		};
		state.entries.push(stored.clone());

		if let Some(sink) = &state.sink {
			if sink.send(stored).is_err() {
				warn!(version = %expected, "update committed but the handler is gone");
			}
		}
		Ok(true)
	}

	async fn committed_version(&self) -> Result<CatalogVersion> {
		Ok(CatalogVersion(committed(&self.storage.0.lock().entries)))
	}
}

fn committed(entries: &[StoredUpdate]) -> u64 {
	u64::try_from(entries.len()).unwrap_or(u64::MAX)
}

fn deliver(handler: &dyn UpdateHandler, stored: StoredUpdate) -> Result<()> {
	let update = VersionedUpdate::decode(&stored.bytes)?;
	handler.handle(update, stored.commit_timestamp, stored.causality_token)
}
