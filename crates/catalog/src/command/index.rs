// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{
	params::{CreateHashIndexParams, CreateSortedIndexParams, DropIndexParams},
	validate,
};
use crate::{
	Catalog, CatalogManager, CatalogVersion, ObjectKind, Result, UpdateEntry, ValidationError,
	descriptor::{IndexColumn, IndexDescriptor, IndexId, IndexKind},
};

impl CatalogManager {
	pub async fn create_hash_index(&self, params: CreateHashIndexParams) -> Result<CatalogVersion> {
		self.save_update_and_wait_for_activation(|catalog| create_hash_index(catalog, &params)).await
	}

	pub async fn create_sorted_index(&self, params: CreateSortedIndexParams) -> Result<CatalogVersion> {
		self.save_update_and_wait_for_activation(|catalog| create_sorted_index(catalog, &params)).await
	}

	pub async fn drop_index(&self, params: DropIndexParams) -> Result<CatalogVersion> {
		self.save_update_and_wait_for_activation(|catalog| drop_index(catalog, &params)).await
	}
}

fn new_index_entries(index: IndexDescriptor) -> Vec<UpdateEntry> {
	vec![
		UpdateEntry::NewIndex {
			index,
		},
		UpdateEntry::ObjectIdGenUpdate {
			delta: 1,
		},
	]
}

pub(crate) fn create_hash_index(catalog: &Catalog, params: &CreateHashIndexParams) -> Result<Vec<UpdateEntry>> {
	let schema = validate::schema(catalog, params.schema_name.as_deref())?;
	validate::index_name_free(schema, &params.index_name)?;
	let table = validate::table(schema, &params.table_name)?;

	validate::index_columns(table, &params.columns)?;

	Ok(new_index_entries(IndexDescriptor {
		id: IndexId(catalog.object_id_counter()),
		name: params.index_name.clone(),
		table_id: table.id,
		unique: params.unique,
		kind: IndexKind::Hash {
			columns: params.columns.clone(),
		},
	}))
}

pub(crate) fn create_sorted_index(catalog: &Catalog, params: &CreateSortedIndexParams) -> Result<Vec<UpdateEntry>> {
	let schema = validate::schema(catalog, params.schema_name.as_deref())?;
	validate::index_name_free(schema, &params.index_name)?;
	let table = validate::table(schema, &params.table_name)?;

	validate::index_columns(table, &params.columns)?;
	if params.collations.len() != params.columns.len() {
		return Err(ValidationError::invalid("column collations don't match the number of columns").into());
	}

	let columns = params
		.columns
		.iter()
		.zip(&params.collations)
		.map(|(name, collation)| IndexColumn {
			name: name.clone(),
			collation: *collation,
		})
		.collect();

	Ok(new_index_entries(IndexDescriptor {
		id: IndexId(catalog.object_id_counter()),
		name: params.index_name.clone(),
		table_id: table.id,
		unique: params.unique,
		kind: IndexKind::Sorted {
			columns,
		},
	}))
}

pub(crate) fn drop_index(catalog: &Catalog, params: &DropIndexParams) -> Result<Vec<UpdateEntry>> {
	let schema = validate::schema(catalog, params.schema_name.as_deref())?;
	let index = schema.index(&params.index_name).ok_or_else(|| {
		ValidationError::not_found(ObjectKind::Index, format!("{}.{}", schema.name, params.index_name))
	})?;

	Ok(vec![UpdateEntry::DropIndex {
		index_id: index.id,
		table_id: index.table_id,
	}])
}
