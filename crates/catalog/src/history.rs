// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::Bound, sync::Arc};

use crossbeam_skiplist::SkipMap;
use halyard_type::HybridTimestamp;

use crate::{Catalog, CatalogVersion, Error, Result};

/// Every registered catalog snapshot, addressable by version and by
/// activation timestamp.
///
/// Registration happens on the single update handling path; lookups are
/// lock free and may run concurrently with it.
#[derive(Clone, Default)]
pub struct SnapshotHistory(Arc<Inner>);

#[derive(Default)]
struct Inner {
	by_version: SkipMap<CatalogVersion, Arc<Catalog>>,
	by_activation: SkipMap<HybridTimestamp, Arc<Catalog>>,
}

impl SnapshotHistory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&self, catalog: Arc<Catalog>) {
		self.0.by_activation.insert(catalog.activation_timestamp(), catalog.clone());
		self.0.by_version.insert(catalog.version(), catalog);
	}

	pub fn catalog(&self, version: CatalogVersion) -> Option<Arc<Catalog>> {
		self.0.by_version.get(&version).map(|e| e.value().clone())
	}

	/// The snapshot active at `timestamp`: the one with the greatest
	/// activation timestamp not after it.
	pub fn catalog_at(&self, timestamp: HybridTimestamp) -> Result<Arc<Catalog>> {
		self.0
			.by_activation
			.upper_bound(Bound::Included(&timestamp))
			.map(|e| e.value().clone())
			.ok_or_else(|| Error::invariant(format!("no catalog is active at {}", timestamp)))
	}

	pub fn latest(&self) -> Option<Arc<Catalog>> {
		self.0.by_version.back().map(|e| e.value().clone())
	}

	pub fn latest_version(&self) -> Option<CatalogVersion> {
		self.0.by_version.back().map(|e| *e.key())
	}

	pub fn len(&self) -> usize {
		self.0.by_version.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.by_version.is_empty()
	}
}
