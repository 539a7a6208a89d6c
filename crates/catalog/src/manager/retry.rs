// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::{debug, instrument, warn};

use super::CatalogManager;
use crate::{Catalog, CatalogVersion, Error, Result, UpdateEntry, VersionedUpdate};

/// Attempts at appending an update before giving up on a statement.
pub const MAX_RETRY_COUNT: usize = 10;

impl CatalogManager {
	/// Saves the update `producer` builds against the latest catalog, then
	/// waits until the new version is active cluster wide.
	pub(crate) async fn save_update_and_wait_for_activation<F>(&self, producer: F) -> Result<CatalogVersion>
	where
		F: Fn(&Catalog) -> Result<Vec<UpdateEntry>> + Send + Sync,
	{
		let version = self.save_update(&producer).await?;

		let catalog = self
			.0
			.history
			.catalog(version)
			.ok_or_else(|| Error::invariant(format!("saved version {} is not registered", version)))?;
		self.0.clock_waiter.wait_for_activation(catalog.activation_timestamp()).await;

		Ok(version)
	}

	/// Optimistic save loop.
	///
	/// Builds the entries against the latest local catalog and appends them
	/// as the next version. When another node wins the race for that
	/// version, waits until the winner has been applied locally and builds
	/// again. Validation errors from `producer` end the loop immediately.
	/// An empty entry list saves nothing and yields the current version.
	#[instrument(name = "catalog::save_update", level = "debug", skip_all)]
	pub(crate) async fn save_update<F>(&self, producer: &F) -> Result<CatalogVersion>
	where
		F: Fn(&Catalog) -> Result<Vec<UpdateEntry>> + Send + Sync,
	{
		for attempt in 1..=MAX_RETRY_COUNT {
			let catalog = self.latest_catalog()?;
			let entries = producer(&catalog)?;
			if entries.is_empty() {
				return Ok(catalog.version());
			}

			let version = catalog.version().next();
			let update = VersionedUpdate::new(version, self.delay_duration(), entries);

			if self.0.log.append(update).await? {
				self.0.tracker.wait_for(version).await?;
				debug!(attempt, %version, "catalog update saved");
				return Ok(version);
			}

			let committed = self.0.log.committed_version().await?;
			debug!(attempt, %version, %committed, "lost the race for catalog version, retrying");
			self.0.tracker.wait_for(committed).await?;
		}

		warn!(attempts = MAX_RETRY_COUNT, "giving up on catalog update");
		Err(Error::RetryLimitExceeded {
			attempts: MAX_RETRY_COUNT,
		})
	}
}
