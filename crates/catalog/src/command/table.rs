// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{
	params::{CreateTableParams, DropTableParams},
	validate,
};
use crate::{
	Catalog, CatalogManager, CatalogVersion, ObjectKind, Result, UpdateEntry, ValidationError,
	descriptor::{DEFAULT_ZONE_NAME, IndexDescriptor, IndexId, IndexKind, TableDescriptor, TableId},
};

impl CatalogManager {
	/// Creates a table together with the unique hash index `<TABLE>_PK` over
	/// its primary key.
	pub async fn create_table(&self, params: CreateTableParams) -> Result<CatalogVersion> {
		self.save_update_and_wait_for_activation(|catalog| create_table(catalog, &params)).await
	}

	/// Drops a table and every index on it.
	pub async fn drop_table(&self, params: DropTableParams) -> Result<CatalogVersion> {
		self.save_update_and_wait_for_activation(|catalog| drop_table(catalog, &params)).await
	}
}

pub(crate) fn create_table(catalog: &Catalog, params: &CreateTableParams) -> Result<Vec<UpdateEntry>> {
	let schema = validate::schema(catalog, params.schema_name.as_deref())?;
	if schema.table(&params.table_name).is_some() {
		return Err(ValidationError::duplicate(ObjectKind::Table, format!("{}.{}", schema.name, params.table_name))
			.into());
	}

	validate::create_table(params)?;

	let pk_index_name = format!("{}_PK", params.table_name);
	validate::index_name_free(schema, &pk_index_name)?;

	let zone = validate::zone(catalog, params.zone.as_deref().unwrap_or(DEFAULT_ZONE_NAME))?;

	let table_id = catalog.object_id_counter();
	let index_id = table_id + 1;

	let table = TableDescriptor {
		id: TableId(table_id),
		schema_id: schema.id,
		zone_id: zone.id,
		name: params.table_name.clone(),
		columns: params.columns.iter().map(|c| c.to_descriptor()).collect(),
		primary_key_columns: params.primary_key_columns.clone(),
		colocation_columns: params.colocation_columns.clone().unwrap_or_else(|| params.primary_key_columns.clone()),
	};

	let pk_index = IndexDescriptor {
		id: IndexId(index_id),
		name: pk_index_name,
		table_id: table.id,
		unique: true,
		kind: IndexKind::Hash {
			columns: params.primary_key_columns.clone(),
		},
	};

	Ok(vec![
		UpdateEntry::NewTable {
			table,
		},
		UpdateEntry::NewIndex {
			index: pk_index,
		},
		UpdateEntry::ObjectIdGenUpdate {
			delta: 2,
		},
	])
}

pub(crate) fn drop_table(catalog: &Catalog, params: &DropTableParams) -> Result<Vec<UpdateEntry>> {
	let schema = validate::schema(catalog, params.schema_name.as_deref())?;
	let table = validate::table(schema, &params.table_name)?;

	let mut entries: Vec<UpdateEntry> = schema
		.table_indexes(table.id)
		.map(|index| UpdateEntry::DropIndex {
			index_id: index.id,
			table_id: index.table_id,
		})
		.collect();
	entries.push(UpdateEntry::DropTable {
		table_id: table.id,
	});
	Ok(entries)
}
