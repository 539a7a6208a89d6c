// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::VecDeque,
	fmt::{self, Debug, Formatter},
	panic::AssertUnwindSafe,
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
};

use dashmap::DashMap;
use futures_util::{FutureExt, future::join_all};
use parking_lot::Mutex;
use tracing::{debug, error, warn};

use super::{CatalogEvent, CatalogEventListener, CatalogEventType};

/// A delivery that failed and was kept for [`EventPublisher::redeliver_failed`].
#[derive(Clone)]
pub struct FailedDelivery {
	pub event: CatalogEvent,
	pub listener: Arc<dyn CatalogEventListener>,
	pub reason: String,
}

impl Debug for FailedDelivery {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("FailedDelivery").field("event", &self.event).field("reason", &self.reason).finish()
	}
}

/// Fans catalog events out to the listeners registered for their type.
///
/// A failing or panicking listener never affects the other listeners or the
/// caller; the failure is logged, counted and kept in a bounded buffer so it
/// can be redelivered.
#[derive(Clone)]
pub struct EventPublisher(Arc<Inner>);

struct Inner {
	listeners: DashMap<CatalogEventType, Vec<Arc<dyn CatalogEventListener>>>,
	delivery_failures: AtomicU64,
	failed: Mutex<VecDeque<FailedDelivery>>,
	failure_buffer: usize,
}

impl EventPublisher {
	pub fn new(failure_buffer: usize) -> Self {
		Self(Arc::new(Inner {
			listeners: DashMap::new(),
			delivery_failures: AtomicU64::new(0),
			failed: Mutex::new(VecDeque::new()),
			failure_buffer,
		}))
	}

	pub fn listen<L>(&self, event_type: CatalogEventType, listener: L)
	where
		L: CatalogEventListener,
	{
		self.listen_arc(event_type, Arc::new(listener));
	}

	pub fn listen_arc(&self, event_type: CatalogEventType, listener: Arc<dyn CatalogEventListener>) {
		self.0.listeners.entry(event_type).or_default().push(listener);
	}

	pub fn listener_count(&self, event_type: CatalogEventType) -> usize {
		self.0.listeners.get(&event_type).map(|l| l.len()).unwrap_or(0)
	}

	/// Delivers `event` to every listener of its type and resolves once all
	/// of them have finished. Returns the number of failed deliveries.
	pub async fn publish(&self, event: &CatalogEvent) -> usize {
		let listeners = match self.0.listeners.get(&event.event_type()) {
			Some(listeners) => listeners.clone(),
			None => return 0,
		};

		let results = join_all(listeners.iter().map(|listener| deliver(listener.as_ref(), event))).await;

		let mut failures = 0;
		for (listener, result) in listeners.into_iter().zip(results) {
			if let Err(reason) = result {
				self.record_failure(event.clone(), listener, reason);
				failures += 1;
			}
		}
		failures
	}

	/// Total number of failed deliveries since creation, redeliveries
	/// included.
	pub fn delivery_failures(&self) -> u64 {
		self.0.delivery_failures.load(Ordering::Acquire)
	}

	pub fn failed_deliveries(&self) -> Vec<FailedDelivery> {
		self.0.failed.lock().iter().cloned().collect()
	}

	/// Retries every buffered failed delivery once. Deliveries failing again
	/// go back into the buffer. Returns the number that succeeded.
	pub async fn redeliver_failed(&self) -> usize {
		let pending: Vec<FailedDelivery> = self.0.failed.lock().drain(..).collect();
		debug!(pending = pending.len(), "redelivering failed catalog events");

		let mut delivered = 0;
		for failed in pending {
			match deliver(failed.listener.as_ref(), &failed.event).await {
				Ok(()) => delivered += 1,
				Err(reason) => self.record_failure(failed.event, failed.listener, reason),
			}
		}
		delivered
	}

	fn record_failure(&self, event: CatalogEvent, listener: Arc<dyn CatalogEventListener>, reason: String) {
		error!(
			version = %event.catalog_version,
			token = %event.causality_token,
			event_type = ?event.event_type(),
			%reason,
			"catalog event listener failed"
		);
		self.0.delivery_failures.fetch_add(1, Ordering::AcqRel);

		if self.0.failure_buffer == 0 {
			return;
		}
		let mut failed = self.0.failed.lock();
		if failed.len() >= self.0.failure_buffer {
			warn!(capacity = self.0.failure_buffer, "failed delivery buffer full, dropping oldest");
			failed.pop_front();
		}
		failed.push_back(FailedDelivery {
			event,
			listener,
			reason,
		});
	}
}

async fn deliver(listener: &dyn CatalogEventListener, event: &CatalogEvent) -> Result<(), String> {
	match AssertUnwindSafe(listener.on(event)).catch_unwind().await {
		Ok(Ok(())) => Ok(()),
		Ok(Err(err)) => Err(err.to_string()),
		Err(_) => Err("listener panicked".to_string()),
	}
}
