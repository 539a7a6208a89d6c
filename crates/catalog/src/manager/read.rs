// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use halyard_type::HybridTimestamp;

use super::CatalogManager;
use crate::{
	Catalog, CatalogVersion, Error, Result,
	descriptor::{
		DEFAULT_SCHEMA_NAME, IndexDescriptor, IndexId, SchemaDescriptor, TableDescriptor, TableId, ZoneDescriptor,
		ZoneId,
	},
};

impl CatalogManager {
	pub fn catalog(&self, version: CatalogVersion) -> Option<Arc<Catalog>> {
		self.0.history.catalog(version)
	}

	/// The catalog active at `timestamp`.
	pub fn catalog_at(&self, timestamp: HybridTimestamp) -> Result<Arc<Catalog>> {
		self.0.history.catalog_at(timestamp)
	}

	pub fn latest_catalog(&self) -> Result<Arc<Catalog>> {
		self.0.history.latest().ok_or_else(|| Error::invariant("catalog manager is not started"))
	}

	pub fn latest_catalog_version(&self) -> Result<CatalogVersion> {
		Ok(self.latest_catalog()?.version())
	}

	pub fn active_catalog_version(&self, timestamp: HybridTimestamp) -> Result<CatalogVersion> {
		Ok(self.catalog_at(timestamp)?.version())
	}

	pub fn table(&self, name: &str, timestamp: HybridTimestamp) -> Result<Option<Arc<TableDescriptor>>> {
		let catalog = self.catalog_at(timestamp)?;
		Ok(catalog.schema(DEFAULT_SCHEMA_NAME).and_then(|s| s.table(name)).cloned())
	}

	pub fn table_by_id(&self, id: TableId, timestamp: HybridTimestamp) -> Result<Option<Arc<TableDescriptor>>> {
		Ok(self.catalog_at(timestamp)?.table(id).cloned())
	}

	pub fn table_at_version(&self, id: TableId, version: CatalogVersion) -> Option<Arc<TableDescriptor>> {
		self.catalog(version)?.table(id).cloned()
	}

	pub fn tables(&self, version: CatalogVersion) -> Vec<Arc<TableDescriptor>> {
		self.catalog(version).map(|c| c.tables().cloned().collect()).unwrap_or_default()
	}

	pub fn index(&self, name: &str, timestamp: HybridTimestamp) -> Result<Option<Arc<IndexDescriptor>>> {
		let catalog = self.catalog_at(timestamp)?;
		Ok(catalog.schema(DEFAULT_SCHEMA_NAME).and_then(|s| s.index(name)).cloned())
	}

	pub fn index_by_id(&self, id: IndexId, timestamp: HybridTimestamp) -> Result<Option<Arc<IndexDescriptor>>> {
		Ok(self.catalog_at(timestamp)?.index(id).cloned())
	}

	pub fn index_at_version(&self, id: IndexId, version: CatalogVersion) -> Option<Arc<IndexDescriptor>> {
		self.catalog(version)?.index(id).cloned()
	}

	pub fn indexes(&self, version: CatalogVersion) -> Vec<Arc<IndexDescriptor>> {
		self.catalog(version).map(|c| c.indexes().cloned().collect()).unwrap_or_default()
	}

	/// Schema `name`, or the default schema when `name` is `None`, as of
	/// `version`.
	pub fn schema(&self, name: Option<&str>, version: CatalogVersion) -> Option<Arc<SchemaDescriptor>> {
		self.catalog(version)?.schema(name.unwrap_or(DEFAULT_SCHEMA_NAME)).cloned()
	}

	/// Schema `name`, or the default schema when `name` is `None`, active at
	/// `timestamp`.
	pub fn active_schema(&self, name: Option<&str>, timestamp: HybridTimestamp) -> Result<Option<Arc<SchemaDescriptor>>> {
		Ok(self.catalog_at(timestamp)?.schema(name.unwrap_or(DEFAULT_SCHEMA_NAME)).cloned())
	}

	pub fn zone(&self, name: &str, timestamp: HybridTimestamp) -> Result<Option<Arc<ZoneDescriptor>>> {
		Ok(self.catalog_at(timestamp)?.zone(name).cloned())
	}

	pub fn zone_by_id(&self, id: ZoneId, timestamp: HybridTimestamp) -> Result<Option<Arc<ZoneDescriptor>>> {
		Ok(self.catalog_at(timestamp)?.zone_by_id(id).cloned())
	}

	pub fn zones(&self, version: CatalogVersion) -> Vec<Arc<ZoneDescriptor>> {
		self.catalog(version).map(|c| c.zones().to_vec()).unwrap_or_default()
	}
}
