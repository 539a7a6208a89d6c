// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::{BTreeMap, BTreeSet},
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
};

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::trace;

use crate::{CatalogVersion, Error, Result};

/// Watermark over fully processed catalog versions.
///
/// A version is done once its snapshot is registered and every event it
/// produced has been delivered. Versions may be marked done out of order;
/// `done_until` only moves past a version once every version below it is
/// done too.
#[derive(Clone)]
pub struct VersionTracker(Arc<Inner>);

struct Inner {
	done_until: AtomicU64,
	state: Mutex<State>,
}

#[derive(Default)]
struct State {
	done: BTreeSet<u64>,
	waiters: BTreeMap<u64, Vec<oneshot::Sender<()>>>,
	failure: Option<Error>,
}

impl VersionTracker {
	pub fn new(initial: CatalogVersion) -> Self {
		Self(Arc::new(Inner {
			done_until: AtomicU64::new(initial.0),
			state: Mutex::new(State::default()),
		}))
	}

	pub fn done_until(&self) -> CatalogVersion {
		CatalogVersion(self.0.done_until.load(Ordering::Acquire))
	}

	pub fn done(&self, version: CatalogVersion) {
		let mut state = self.0.state.lock();
		let done_until = self.0.done_until.load(Ordering::Acquire);
		if version.0 <= done_until {
			return;
		}

		state.done.insert(version.0);
		let mut until = done_until;
		while state.done.remove(&(until + 1)) {
			until += 1;
		}
		if until == done_until {
			return;
		}

		self.0.done_until.store(until, Ordering::Release);
		let pending = state.waiters.split_off(&(until + 1));
		let ready = std::mem::replace(&mut state.waiters, pending);
		drop(state);

		trace!(done_until = until, "catalog versions done");
		for waiter in ready.into_values().flatten() {
			let _ = waiter.send(());
		}
	}

	/// Resolves once every version up to and including `version` is done.
	///
	/// Fails with [`Error::Stopped`] if the tracker is closed first, or with
	/// the error it was failed with.
	pub async fn wait_for(&self, version: CatalogVersion) -> Result<()> {
		if self.done_until() >= version {
			return Ok(());
		}

		let rx = {
			let mut state = self.0.state.lock();
			if self.done_until() >= version {
				return Ok(());
			}
			if let Some(failure) = &state.failure {
				return Err(failure.clone());
			}
			let (tx, rx) = oneshot::channel();
			state.waiters.entry(version.0).or_default().push(tx);
			rx
		};

		rx.await.map_err(|_| self.failure())
	}

	/// Fails every pending and future wait for a version that is not done.
	pub fn close(&self) {
		self.fail(Error::Stopped);
	}

	/// Like [`VersionTracker::close`], but waiters get `error`. The first
	/// failure sticks.
	pub fn fail(&self, error: Error) {
		let waiters = {
			let mut state = self.0.state.lock();
			if state.failure.is_none() {
				state.failure = Some(error);
			}
			std::mem::take(&mut state.waiters)
		};
		drop(waiters);
	}

	fn failure(&self) -> Error {
		self.0.state.lock().failure.clone().unwrap_or(Error::Stopped)
	}

	pub fn pending_waiters(&self) -> usize {
		self.0.state.lock().waiters.values().map(Vec::len).sum()
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use tokio::time::timeout;

	use super::*;

	#[tokio::test]
	async fn test_wait_for_done_version_resolves_immediately() {
		let tracker = VersionTracker::new(CatalogVersion(3));
		tracker.wait_for(CatalogVersion(2)).await.unwrap();
		tracker.wait_for(CatalogVersion(3)).await.unwrap();
		assert_eq!(tracker.pending_waiters(), 0);
	}

	#[tokio::test]
	async fn test_out_of_order_done() {
		let tracker = VersionTracker::new(CatalogVersion(0));
		tracker.done(CatalogVersion(2));
		assert_eq!(tracker.done_until(), CatalogVersion(0));

		tracker.done(CatalogVersion(1));
		assert_eq!(tracker.done_until(), CatalogVersion(2));

		tracker.done(CatalogVersion(1));
		assert_eq!(tracker.done_until(), CatalogVersion(2));
	}

	#[tokio::test]
	async fn test_waiter_released_when_gap_closes() {
		let tracker = VersionTracker::new(CatalogVersion(0));
		let waiter = {
			let tracker = tracker.clone();
			tokio::spawn(async move { tracker.wait_for(CatalogVersion(2)).await })
		};

		tokio::task::yield_now().await;
		tracker.done(CatalogVersion(2));
		assert!(!waiter.is_finished());

		tracker.done(CatalogVersion(1));
		timeout(Duration::from_secs(1), waiter).await.unwrap().unwrap().unwrap();
		assert_eq!(tracker.pending_waiters(), 0);
	}

	#[tokio::test]
	async fn test_close_fails_pending_waiters() {
		let tracker = VersionTracker::new(CatalogVersion(0));
		let waiter = {
			let tracker = tracker.clone();
			tokio::spawn(async move { tracker.wait_for(CatalogVersion(1)).await })
		};

		while tracker.pending_waiters() == 0 {
			tokio::task::yield_now().await;
		}
		tracker.close();

		let result = timeout(Duration::from_secs(1), waiter).await.unwrap().unwrap();
		assert_eq!(result, Err(Error::Stopped));
		assert_eq!(tracker.wait_for(CatalogVersion(5)).await, Err(Error::Stopped));
	}

	#[tokio::test]
	async fn test_fail_hands_error_to_waiters() {
		let tracker = VersionTracker::new(CatalogVersion(0));
		let waiter = {
			let tracker = tracker.clone();
			tokio::spawn(async move { tracker.wait_for(CatalogVersion(1)).await })
		};

		while tracker.pending_waiters() == 0 {
			tokio::task::yield_now().await;
		}
		tracker.fail(Error::invariant("gap in catalog versions"));
		tracker.close();

		let result = timeout(Duration::from_secs(1), waiter).await.unwrap().unwrap();
		assert_eq!(result, Err(Error::invariant("gap in catalog versions")));
		assert!(matches!(tracker.wait_for(CatalogVersion(1)).await, Err(Error::Invariant(_))));
		tracker.wait_for(CatalogVersion(0)).await.unwrap();
	}
}
