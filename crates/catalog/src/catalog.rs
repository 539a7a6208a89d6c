// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use halyard_type::HybridTimestamp;

use crate::{
	CatalogVersion, Error, Result,
	descriptor::{
		DEFAULT_SCHEMA_NAME, DEFAULT_ZONE_NAME, IndexDescriptor, IndexId, ObjectId, SchemaDescriptor, SchemaId,
		TableDescriptor, TableId, ZoneDescriptor, ZoneId,
	},
};

const DEFAULT_SCHEMA_ID: SchemaId = SchemaId(0);
const DEFAULT_ZONE_ID: ZoneId = ZoneId(1);
const INITIAL_OBJECT_ID: ObjectId = 2;

/// An immutable snapshot of every schema object at one catalog version.
///
/// Snapshots are never modified once registered; applying an update entry
/// builds a new one and shares every untouched descriptor with its
/// predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
	version: CatalogVersion,
	activation_timestamp: HybridTimestamp,
	object_id_counter: ObjectId,
	zones: Vec<Arc<ZoneDescriptor>>,
	schemas: Vec<Arc<SchemaDescriptor>>,
	tables_by_id: HashMap<TableId, Arc<TableDescriptor>>,
	indexes_by_id: HashMap<IndexId, Arc<IndexDescriptor>>,
}

impl Catalog {
	pub fn new(
		version: CatalogVersion,
		activation_timestamp: HybridTimestamp,
		object_id_counter: ObjectId,
		zones: Vec<Arc<ZoneDescriptor>>,
		schemas: Vec<Arc<SchemaDescriptor>>,
	) -> Self {
		let tables_by_id = schemas.iter().flat_map(|s| s.tables.iter()).map(|t| (t.id, t.clone())).collect();
		let indexes_by_id = schemas.iter().flat_map(|s| s.indexes.iter()).map(|i| (i.id, i.clone())).collect();

		Self {
			version,
			activation_timestamp,
			object_id_counter,
			zones,
			schemas,
			tables_by_id,
			indexes_by_id,
		}
	}

	/// Version 0: the default schema and the default zone, active since the
	/// beginning of time.
	pub fn initial() -> Self {
		Self::new(
			CatalogVersion::INITIAL,
			HybridTimestamp::MIN,
			INITIAL_OBJECT_ID,
			vec![Arc::new(ZoneDescriptor::new(DEFAULT_ZONE_ID, DEFAULT_ZONE_NAME))],
			vec![Arc::new(SchemaDescriptor::new(DEFAULT_SCHEMA_ID, DEFAULT_SCHEMA_NAME))],
		)
	}

	pub fn version(&self) -> CatalogVersion {
		self.version
	}

	pub fn activation_timestamp(&self) -> HybridTimestamp {
		self.activation_timestamp
	}

	/// Next id the object id counter hands out.
	pub fn object_id_counter(&self) -> ObjectId {
		self.object_id_counter
	}

	pub fn zones(&self) -> &[Arc<ZoneDescriptor>] {
		&self.zones
	}

	pub fn zone(&self, name: &str) -> Option<&Arc<ZoneDescriptor>> {
		self.zones.iter().find(|z| z.name == name)
	}

	pub fn zone_by_id(&self, id: ZoneId) -> Option<&Arc<ZoneDescriptor>> {
		self.zones.iter().find(|z| z.id == id)
	}

	pub fn schemas(&self) -> &[Arc<SchemaDescriptor>] {
		&self.schemas
	}

	pub fn schema(&self, name: &str) -> Option<&Arc<SchemaDescriptor>> {
		self.schemas.iter().find(|s| s.name == name)
	}

	pub fn schema_by_id(&self, id: SchemaId) -> Option<&Arc<SchemaDescriptor>> {
		self.schemas.iter().find(|s| s.id == id)
	}

	pub fn table(&self, id: TableId) -> Option<&Arc<TableDescriptor>> {
		self.tables_by_id.get(&id)
	}

	pub fn tables(&self) -> impl Iterator<Item = &Arc<TableDescriptor>> {
		self.schemas.iter().flat_map(|s| s.tables.iter())
	}

	pub fn index(&self, id: IndexId) -> Option<&Arc<IndexDescriptor>> {
		self.indexes_by_id.get(&id)
	}

	pub fn indexes(&self) -> impl Iterator<Item = &Arc<IndexDescriptor>> {
		self.schemas.iter().flat_map(|s| s.indexes.iter())
	}

	/// The schema holding table `id`.
	pub(crate) fn schema_of_table(&self, id: TableId) -> Result<&Arc<SchemaDescriptor>> {
		let table = self.table(id).ok_or_else(|| Error::invariant(format!("table {} does not exist", id)))?;
		self.schema_by_id(table.schema_id)
			.ok_or_else(|| Error::invariant(format!("schema {} of table {} does not exist", table.schema_id, id)))
	}

	/// The schema holding index `id`.
	pub(crate) fn schema_of_index(&self, id: IndexId) -> Result<&Arc<SchemaDescriptor>> {
		self.schemas
			.iter()
			.find(|s| s.index_by_id(id).is_some())
			.ok_or_else(|| Error::invariant(format!("index {} does not exist", id)))
	}

	pub(crate) fn with_schema(self, schema: SchemaDescriptor) -> Result<Self> {
		if self.schema_by_id(schema.id).is_none() {
			return Err(Error::invariant(format!("schema {} does not exist", schema.id)));
		}
		let schemas = self
			.schemas
			.iter()
			.map(|s| {
				if s.id == schema.id {
					Arc::new(schema.clone())
				} else {
					s.clone()
				}
			})
			.collect();
		Ok(Self::new(self.version, self.activation_timestamp, self.object_id_counter, self.zones, schemas))
	}

	pub(crate) fn with_zones(self, zones: Vec<Arc<ZoneDescriptor>>) -> Self {
		Self {
			zones,
			..self
		}
	}

	pub(crate) fn with_object_id_counter(self, object_id_counter: ObjectId) -> Self {
		Self {
			object_id_counter,
			..self
		}
	}

	/// Same content, registered as `version` active from `activation_timestamp`.
	pub(crate) fn stamp(self, version: CatalogVersion, activation_timestamp: HybridTimestamp) -> Self {
		Self {
			version,
			activation_timestamp,
			..self
		}
	}
}
