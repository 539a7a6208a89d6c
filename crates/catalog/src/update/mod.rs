// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Catalog, CatalogVersion, Result};

mod entry;

pub use entry::UpdateEntry;

/// The unit appended to the update log: the version it produces, the delay
/// between commit and activation, and the entries to fold into the previous
/// catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedUpdate {
	version: CatalogVersion,
	delay_duration: Duration,
	entries: Vec<UpdateEntry>,
}

impl VersionedUpdate {
	pub fn new(version: CatalogVersion, delay_duration: Duration, entries: Vec<UpdateEntry>) -> Self {
		Self {
			version,
			delay_duration,
			entries,
		}
	}

	pub fn version(&self) -> CatalogVersion {
		self.version
	}

	pub fn delay_duration(&self) -> Duration {
		self.delay_duration
	}

	pub fn entries(&self) -> &[UpdateEntry] {
		&self.entries
	}

	/// Folds every entry, in order, into `catalog`.
	///
	/// The result still carries the version and activation timestamp of the
	/// input; the update handler stamps it.
	pub fn apply(&self, catalog: Catalog) -> Result<Catalog> {
		self.entries.iter().try_fold(catalog, |catalog, entry| entry.apply(catalog))
	}

	pub fn encode(&self) -> Result<Vec<u8>> {
		Ok(postcard::to_stdvec(self)?)
	}

	pub fn decode(bytes: &[u8]) -> Result<Self> {
		Ok(postcard::from_bytes(bytes)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Error;

	#[test]
	fn test_decode_rejects_garbage() {
		let result = VersionedUpdate::decode(&[0xff, 0xff, 0xff]);
		assert!(matches!(result, Err(Error::Codec(_))));
	}

	#[test]
	fn test_apply_folds_in_order() {
		let update = VersionedUpdate::new(
			CatalogVersion(1),
			Duration::ZERO,
			vec![
				UpdateEntry::ObjectIdGenUpdate {
					delta: 2,
				},
				UpdateEntry::ObjectIdGenUpdate {
					delta: 3,
				},
			],
		);
		let catalog = update.apply(Catalog::initial()).unwrap();
		assert_eq!(catalog.object_id_counter(), 7);
		assert_eq!(catalog.version(), CatalogVersion(0));
	}
}
