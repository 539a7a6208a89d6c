// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
	Catalog, CatalogEvent, CatalogEventKind, CatalogVersion, CausalityToken, Error, Result, TableChange,
	descriptor::{ColumnDescriptor, IndexDescriptor, IndexId, ObjectId, TableDescriptor, TableId, ZoneDescriptor, ZoneId},
};

/// One atomic change to the catalog.
///
/// Entries are produced by DDL commands after validation, so applying them
/// only fails when the catalog they are applied to is not the one they were
/// produced against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateEntry {
	NewTable {
		table: TableDescriptor,
	},
	DropTable {
		table_id: TableId,
	},
	NewColumns {
		table_id: TableId,
		columns: Vec<ColumnDescriptor>,
	},
	DropColumns {
		table_id: TableId,
		columns: Vec<String>,
	},
	AlterColumn {
		table_id: TableId,
		column: ColumnDescriptor,
	},
	NewIndex {
		index: IndexDescriptor,
	},
	DropIndex {
		index_id: IndexId,
		table_id: TableId,
	},
	NewZone {
		zone: ZoneDescriptor,
	},
	AlterZone {
		zone: ZoneDescriptor,
	},
	DropZone {
		zone_id: ZoneId,
	},
	ObjectIdGenUpdate {
		delta: ObjectId,
	},
}

impl UpdateEntry {
	pub fn apply(&self, catalog: Catalog) -> Result<Catalog> {
		match self {
			UpdateEntry::NewTable {
				table,
			} => {
				let schema = catalog
					.schema_by_id(table.schema_id)
					.ok_or_else(|| Error::invariant(format!("schema {} does not exist", table.schema_id)))?
					.add_table(table.clone());
				catalog.with_schema(schema)
			}
			UpdateEntry::DropTable {
				table_id,
			} => {
				let schema = catalog.schema_of_table(*table_id)?.remove_table(*table_id);
				catalog.with_schema(schema)
			}
			UpdateEntry::NewColumns {
				table_id,
				columns,
			} => {
				let table = existing_table(&catalog, *table_id)?;
				let mut all = table.columns.clone();
				all.extend(columns.iter().cloned());
				replace_table(catalog, table.with_columns(all))
			}
			UpdateEntry::DropColumns {
				table_id,
				columns,
			} => {
				let table = existing_table(&catalog, *table_id)?;
				let remaining = table.columns.iter().filter(|c| !columns.contains(&c.name)).cloned().collect();
				replace_table(catalog, table.with_columns(remaining))
			}
			UpdateEntry::AlterColumn {
				table_id,
				column,
			} => {
				let table = existing_table(&catalog, *table_id)?;
				if table.column(&column.name).is_none() {
					return Err(Error::invariant(format!(
						"column {} does not exist in table {}",
						column.name, table_id
					)));
				}
				let columns = table
					.columns
					.iter()
					.map(|c| {
						if c.name == column.name {
							column.clone()
						} else {
							c.clone()
						}
					})
					.collect();
				replace_table(catalog, table.with_columns(columns))
			}
			UpdateEntry::NewIndex {
				index,
			} => {
				let schema = catalog.schema_of_table(index.table_id)?.add_index(index.clone());
				catalog.with_schema(schema)
			}
			UpdateEntry::DropIndex {
				index_id,
				..
			} => {
				let schema = catalog.schema_of_index(*index_id)?.remove_index(*index_id);
				catalog.with_schema(schema)
			}
			UpdateEntry::NewZone {
				zone,
			} => {
				let mut zones = catalog.zones().to_vec();
				zones.push(Arc::new(zone.clone()));
				Ok(catalog.with_zones(zones))
			}
			UpdateEntry::AlterZone {
				zone,
			} => {
				if catalog.zone_by_id(zone.id).is_none() {
					return Err(Error::invariant(format!("zone {} does not exist", zone.id)));
				}
				let zones = catalog
					.zones()
					.iter()
					.map(|z| {
						if z.id == zone.id {
							Arc::new(zone.clone())
						} else {
							z.clone()
						}
					})
					.collect();
				Ok(catalog.with_zones(zones))
			}
			UpdateEntry::DropZone {
				zone_id,
			} => {
				if catalog.zone_by_id(*zone_id).is_none() {
					return Err(Error::invariant(format!("zone {} does not exist", zone_id)));
				}
				let zones = catalog.zones().iter().filter(|z| z.id != *zone_id).cloned().collect();
				Ok(catalog.with_zones(zones))
			}
			UpdateEntry::ObjectIdGenUpdate {
				delta,
			} => {
				let counter = catalog.object_id_counter().checked_add(*delta).ok_or_else(|| {
					Error::invariant(format!(
						"object id counter {} overflows by {}",
						catalog.object_id_counter(),
						delta
					))
				})?;
				Ok(catalog.with_object_id_counter(counter))
			}
		}
	}

	/// The event observers get once the version holding this entry is
	/// registered. Id counter bumps are not observable.
	pub fn event(&self, causality_token: CausalityToken, catalog_version: CatalogVersion) -> Option<CatalogEvent> {
		let kind = match self {
			UpdateEntry::NewTable {
				table,
			} => CatalogEventKind::TableCreated {
				table: table.clone(),
			},
			UpdateEntry::DropTable {
				table_id,
			} => CatalogEventKind::TableDropped {
				table_id: *table_id,
			},
			UpdateEntry::NewColumns {
				table_id,
				columns,
			} => CatalogEventKind::TableAltered {
				table_id: *table_id,
				change: TableChange::ColumnsAdded(columns.clone()),
			},
			UpdateEntry::DropColumns {
				table_id,
				columns,
			} => CatalogEventKind::TableAltered {
				table_id: *table_id,
				change: TableChange::ColumnsDropped(columns.clone()),
			},
			UpdateEntry::AlterColumn {
				table_id,
				column,
			} => CatalogEventKind::TableAltered {
				table_id: *table_id,
				change: TableChange::ColumnAltered(column.clone()),
			},
			UpdateEntry::NewIndex {
				index,
			} => CatalogEventKind::IndexCreated {
				index: index.clone(),
			},
			UpdateEntry::DropIndex {
				index_id,
				table_id,
			} => CatalogEventKind::IndexDropped {
				index_id: *index_id,
				table_id: *table_id,
			},
			UpdateEntry::NewZone {
				zone,
			} => CatalogEventKind::ZoneCreated {
				zone: zone.clone(),
			},
			UpdateEntry::AlterZone {
				zone,
			} => CatalogEventKind::ZoneAltered {
				zone: zone.clone(),
			},
			UpdateEntry::DropZone {
				zone_id,
			} => CatalogEventKind::ZoneDropped {
				zone_id: *zone_id,
			},
			UpdateEntry::ObjectIdGenUpdate {
				..
			} => return None,
		};

		Some(CatalogEvent {
			causality_token,
			catalog_version,
			kind,
		})
	}
}

fn existing_table(catalog: &Catalog, id: TableId) -> Result<TableDescriptor> {
	catalog
		.table(id)
		.map(|t| t.as_ref().clone())
		.ok_or_else(|| Error::invariant(format!("table {} does not exist", id)))
}

fn replace_table(catalog: Catalog, table: TableDescriptor) -> Result<Catalog> {
	let schema = catalog.schema_of_table(table.id)?.replace_table(table);
	catalog.with_schema(schema)
}
