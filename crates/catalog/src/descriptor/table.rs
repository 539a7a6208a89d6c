// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use super::{ColumnDescriptor, SchemaId, TableId, ZoneId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
	pub id: TableId,
	pub schema_id: SchemaId,
	pub zone_id: ZoneId,
	pub name: String,
	pub columns: Vec<ColumnDescriptor>,
	pub primary_key_columns: Vec<String>,
	pub colocation_columns: Vec<String>,
}

impl TableDescriptor {
	pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
		self.columns.iter().find(|c| c.name == name)
	}

	pub fn is_primary_key_column(&self, name: &str) -> bool {
		self.primary_key_columns.iter().any(|c| c == name)
	}

	pub(crate) fn with_columns(&self, columns: Vec<ColumnDescriptor>) -> Self {
		Self {
			columns,
			..self.clone()
		}
	}
}
