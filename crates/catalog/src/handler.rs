// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use halyard_type::HybridTimestamp;
use parking_lot::Mutex;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, instrument, warn};

use crate::{
	Catalog, CatalogEvent, CatalogVersion, CausalityToken, Error, EventPublisher, Result, SnapshotHistory, UpdateHandler,
	VersionTracker, VersionedUpdate,
};

/// Events of one registered version, queued for delivery.
struct Notification {
	version: CatalogVersion,
	events: Vec<CatalogEvent>,
}

/// Turns committed updates into registered snapshots.
///
/// Snapshot registration happens synchronously on the log's delivery path.
/// Event delivery runs on a dispatcher task, one version at a time in
/// version order; a version is marked done in the tracker once all of its
/// events have been delivered.
pub(crate) struct CatalogUpdateHandler {
	history: SnapshotHistory,
	tracker: VersionTracker,
	dispatcher: Mutex<Option<mpsc::UnboundedSender<Notification>>>,
}

impl CatalogUpdateHandler {
	/// Must be called from within a tokio runtime.
	pub(crate) fn spawn(
		history: SnapshotHistory,
		tracker: VersionTracker,
		publisher: EventPublisher,
	) -> (Arc<Self>, JoinHandle<()>) {
		let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();

		let handler = Arc::new(Self {
			history,
			tracker: tracker.clone(),
			dispatcher: Mutex::new(Some(tx)),
		});

		let dispatcher = tokio::spawn(async move {
			while let Some(notification) = rx.recv().await {
				for event in &notification.events {
					publisher.publish(event).await;
				}
				tracker.done(notification.version);
			}
		});

		(handler, dispatcher)
	}

	/// Stops accepting notifications. The dispatcher finishes the queued
	/// ones and exits.
	pub(crate) fn close(&self) {
		self.dispatcher.lock().take();
	}

	/// Queues `events` behind those of earlier versions. The dispatcher marks
	/// `version` done once they are delivered.
	fn notify(&self, version: CatalogVersion, events: Vec<CatalogEvent>) {
		let dispatcher = self.dispatcher.lock();
		let sent = match dispatcher.as_ref() {
			Some(tx) => tx
				.send(Notification {
					version,
					events,
				})
				.is_ok(),
			None => false,
		};
		if !sent {
			warn!(%version, "event dispatcher is closed, events of this version are not delivered");
		}
	}
}

impl UpdateHandler for CatalogUpdateHandler {
	#[instrument(
		name = "catalog::handle_update",
		level = "debug",
		skip_all,
		fields(version = %update.version(), token = %causality_token)
	)]
	fn handle(
		&self,
		update: VersionedUpdate,
		commit_timestamp: HybridTimestamp,
		causality_token: CausalityToken,
	) -> Result<()> {
		let version = update.version();
		if self.history.catalog(version).is_some() {
			debug!("update already applied, skipping");
			self.notify(version, Vec::new());
			return Ok(());
		}

		let previous = version
			.prev()
			.and_then(|prev| self.history.catalog(prev))
			.ok_or_else(|| Error::invariant(format!("no catalog registered before version {}", version)))?;

		let mut activation = commit_timestamp.add_duration(update.delay_duration());
		if activation <= previous.activation_timestamp() {
			activation = previous.activation_timestamp().tick();
		}

		let catalog = update.apply(Catalog::clone(&previous))?.stamp(version, activation);
		self.history.register(Arc::new(catalog));

		let events: Vec<CatalogEvent> =
			update.entries().iter().filter_map(|entry| entry.event(causality_token, version)).collect();
		debug!(entries = update.entries().len(), events = events.len(), %activation, "registered catalog version");

		self.notify(version, events);
		Ok(())
	}

	/// Nothing past the failed update is ever applied, so every DDL waiting
	/// for a later version fails with `error`.
	fn halt(&self, error: Error) {
		self.close();
		self.tracker.fail(error);
	}
}
