// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use super::{IndexId, TableId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collation {
	AscNullsFirst,
	AscNullsLast,
	DescNullsFirst,
	DescNullsLast,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexColumn {
	pub name: String,
	pub collation: Collation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
	Hash {
		columns: Vec<String>,
	},
	Sorted {
		columns: Vec<IndexColumn>,
	},
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescriptor {
	pub id: IndexId,
	pub name: String,
	pub table_id: TableId,
	pub unique: bool,
	pub kind: IndexKind,
}

impl IndexDescriptor {
	pub fn columns(&self) -> Vec<&str> {
		match &self.kind {
			IndexKind::Hash {
				columns,
			} => columns.iter().map(String::as_str).collect(),
			IndexKind::Sorted {
				columns,
			} => columns.iter().map(|c| c.name.as_str()).collect(),
		}
	}

	pub fn has_column(&self, name: &str) -> bool {
		self.columns().contains(&name)
	}
}
