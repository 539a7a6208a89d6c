// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use super::{IndexDescriptor, IndexId, SchemaId, TableDescriptor, TableId};

pub const DEFAULT_SCHEMA_NAME: &str = "PUBLIC";

/// A schema and every table and index it holds.
///
/// Updating a schema produces a new descriptor; unchanged tables and indexes
/// are shared with the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
	pub id: SchemaId,
	pub name: String,
	pub tables: Vec<Arc<TableDescriptor>>,
	pub indexes: Vec<Arc<IndexDescriptor>>,
}

impl SchemaDescriptor {
	pub fn new(id: SchemaId, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
			tables: vec![],
			indexes: vec![],
		}
	}

	pub fn table(&self, name: &str) -> Option<&Arc<TableDescriptor>> {
		self.tables.iter().find(|t| t.name == name)
	}

	pub fn table_by_id(&self, id: TableId) -> Option<&Arc<TableDescriptor>> {
		self.tables.iter().find(|t| t.id == id)
	}

	pub fn index(&self, name: &str) -> Option<&Arc<IndexDescriptor>> {
		self.indexes.iter().find(|i| i.name == name)
	}

	pub fn index_by_id(&self, id: IndexId) -> Option<&Arc<IndexDescriptor>> {
		self.indexes.iter().find(|i| i.id == id)
	}

	pub fn table_indexes(&self, table_id: TableId) -> impl Iterator<Item = &Arc<IndexDescriptor>> {
		self.indexes.iter().filter(move |i| i.table_id == table_id)
	}

	pub(crate) fn add_table(&self, table: TableDescriptor) -> Self {
		let mut result = self.clone();
		result.tables.push(Arc::new(table));
		result
	}

	pub(crate) fn replace_table(&self, table: TableDescriptor) -> Self {
		let mut result = self.clone();
		for slot in result.tables.iter_mut().filter(|t| t.id == table.id) {
			*slot = Arc::new(table.clone());
		}
		result
	}

	pub(crate) fn remove_table(&self, id: TableId) -> Self {
		let mut result = self.clone();
		result.tables.retain(|t| t.id != id);
		result
	}

	pub(crate) fn add_index(&self, index: IndexDescriptor) -> Self {
		let mut result = self.clone();
		result.indexes.push(Arc::new(index));
		result
	}

	pub(crate) fn remove_index(&self, id: IndexId) -> Self {
		let mut result = self.clone();
		result.indexes.retain(|i| i.id != id);
		result
	}
}
