// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::descriptor::{Collation, ColumnDescriptor, ColumnType, DefaultValue};

/// Definition of a new column. Unset precision, scale and length take the
/// type's defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnParams {
	pub name: String,
	pub column_type: ColumnType,
	pub nullable: bool,
	pub precision: Option<u32>,
	pub scale: Option<u32>,
	pub length: Option<u32>,
	pub default: Option<DefaultValue>,
}

impl ColumnParams {
	pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
		Self {
			name: name.into(),
			column_type,
			nullable: true,
			precision: None,
			scale: None,
			length: None,
			default: None,
		}
	}

	pub fn not_null(mut self) -> Self {
		self.nullable = false;
		self
	}

	pub fn precision(mut self, precision: u32) -> Self {
		self.precision = Some(precision);
		self
	}

	pub fn scale(mut self, scale: u32) -> Self {
		self.scale = Some(scale);
		self
	}

	pub fn length(mut self, length: u32) -> Self {
		self.length = Some(length);
		self
	}

	pub fn default_value(mut self, default: DefaultValue) -> Self {
		self.default = Some(default);
		self
	}

	pub(crate) fn to_descriptor(&self) -> ColumnDescriptor {
		let base = ColumnDescriptor::new(self.name.clone(), self.column_type, self.nullable);
		ColumnDescriptor {
			precision: self.precision.unwrap_or(base.precision),
			scale: self.scale.unwrap_or(base.scale),
			length: self.length.unwrap_or(base.length),
			default: self.default.clone(),
			..base
		}
	}
}

/// `schema_name` and `zone` fall back to the default schema and zone;
/// `colocation_columns` falls back to the primary key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTableParams {
	pub schema_name: Option<String>,
	pub table_name: String,
	pub zone: Option<String>,
	pub columns: Vec<ColumnParams>,
	pub primary_key_columns: Vec<String>,
	pub colocation_columns: Option<Vec<String>>,
}

impl CreateTableParams {
	pub fn new(table_name: impl Into<String>, columns: Vec<ColumnParams>, primary_key_columns: Vec<String>) -> Self {
		Self {
			table_name: table_name.into(),
			columns,
			primary_key_columns,
			..Default::default()
		}
	}

	pub fn schema(mut self, schema_name: impl Into<String>) -> Self {
		self.schema_name = Some(schema_name.into());
		self
	}

	pub fn zone(mut self, zone: impl Into<String>) -> Self {
		self.zone = Some(zone.into());
		self
	}

	pub fn colocation_columns(mut self, columns: Vec<String>) -> Self {
		self.colocation_columns = Some(columns);
		self
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropTableParams {
	pub schema_name: Option<String>,
	pub table_name: String,
}

impl DropTableParams {
	pub fn new(table_name: impl Into<String>) -> Self {
		Self {
			table_name: table_name.into(),
			..Default::default()
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddColumnsParams {
	pub schema_name: Option<String>,
	pub table_name: String,
	pub columns: Vec<ColumnParams>,
}

impl AddColumnsParams {
	pub fn new(table_name: impl Into<String>, columns: Vec<ColumnParams>) -> Self {
		Self {
			table_name: table_name.into(),
			columns,
			..Default::default()
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropColumnsParams {
	pub schema_name: Option<String>,
	pub table_name: String,
	pub columns: Vec<String>,
}

impl DropColumnsParams {
	pub fn new(table_name: impl Into<String>, columns: Vec<String>) -> Self {
		Self {
			table_name: table_name.into(),
			columns,
			..Default::default()
		}
	}
}

/// Every unset property keeps its current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlterColumnParams {
	pub schema_name: Option<String>,
	pub table_name: String,
	pub column_name: String,
	pub column_type: Option<ColumnType>,
	pub not_null: Option<bool>,
	pub precision: Option<u32>,
	pub scale: Option<u32>,
	pub length: Option<u32>,
	pub default: Option<DefaultValue>,
}

impl AlterColumnParams {
	pub fn new(table_name: impl Into<String>, column_name: impl Into<String>) -> Self {
		Self {
			table_name: table_name.into(),
			column_name: column_name.into(),
			..Default::default()
		}
	}

	pub fn column_type(mut self, column_type: ColumnType) -> Self {
		self.column_type = Some(column_type);
		self
	}

	pub fn not_null(mut self, not_null: bool) -> Self {
		self.not_null = Some(not_null);
		self
	}

	pub fn precision(mut self, precision: u32) -> Self {
		self.precision = Some(precision);
		self
	}

	pub fn scale(mut self, scale: u32) -> Self {
		self.scale = Some(scale);
		self
	}

	pub fn length(mut self, length: u32) -> Self {
		self.length = Some(length);
		self
	}

	pub fn default_value(mut self, default: DefaultValue) -> Self {
		self.default = Some(default);
		self
	}

	pub(crate) fn apply_to(&self, origin: &ColumnDescriptor) -> ColumnDescriptor {
		ColumnDescriptor {
			name: origin.name.clone(),
			column_type: self.column_type.unwrap_or(origin.column_type),
			nullable: !self.not_null.unwrap_or(!origin.nullable),
			precision: self.precision.unwrap_or(origin.precision),
			scale: self.scale.unwrap_or(origin.scale),
			length: self.length.unwrap_or(origin.length),
			default: self.default.clone().or_else(|| origin.default.clone()),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateHashIndexParams {
	pub schema_name: Option<String>,
	pub table_name: String,
	pub index_name: String,
	pub columns: Vec<String>,
	pub unique: bool,
}

impl CreateHashIndexParams {
	pub fn new(table_name: impl Into<String>, index_name: impl Into<String>, columns: Vec<String>) -> Self {
		Self {
			table_name: table_name.into(),
			index_name: index_name.into(),
			columns,
			..Default::default()
		}
	}

	pub fn unique(mut self) -> Self {
		self.unique = true;
		self
	}
}

/// `collations` holds one entry per column, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSortedIndexParams {
	pub schema_name: Option<String>,
	pub table_name: String,
	pub index_name: String,
	pub columns: Vec<String>,
	pub collations: Vec<Collation>,
	pub unique: bool,
}

impl CreateSortedIndexParams {
	pub fn new(
		table_name: impl Into<String>,
		index_name: impl Into<String>,
		columns: Vec<String>,
		collations: Vec<Collation>,
	) -> Self {
		Self {
			table_name: table_name.into(),
			index_name: index_name.into(),
			columns,
			collations,
			..Default::default()
		}
	}

	pub fn unique(mut self) -> Self {
		self.unique = true;
		self
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropIndexParams {
	pub schema_name: Option<String>,
	pub index_name: String,
}

impl DropIndexParams {
	pub fn new(index_name: impl Into<String>) -> Self {
		Self {
			index_name: index_name.into(),
			..Default::default()
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateZoneParams {
	pub zone_name: String,
	pub partitions: Option<u32>,
	pub replicas: Option<u32>,
	pub data_nodes_auto_adjust: Option<u32>,
	pub data_nodes_auto_adjust_scale_up: Option<u32>,
	pub data_nodes_auto_adjust_scale_down: Option<u32>,
	pub filter: Option<String>,
}

impl CreateZoneParams {
	pub fn new(zone_name: impl Into<String>) -> Self {
		Self {
			zone_name: zone_name.into(),
			..Default::default()
		}
	}

	pub fn partitions(mut self, partitions: u32) -> Self {
		self.partitions = Some(partitions);
		self
	}

	pub fn replicas(mut self, replicas: u32) -> Self {
		self.replicas = Some(replicas);
		self
	}

	pub fn data_nodes_auto_adjust(mut self, timer: u32) -> Self {
		self.data_nodes_auto_adjust = Some(timer);
		self
	}

	pub fn data_nodes_auto_adjust_scale_up(mut self, timer: u32) -> Self {
		self.data_nodes_auto_adjust_scale_up = Some(timer);
		self
	}

	pub fn data_nodes_auto_adjust_scale_down(mut self, timer: u32) -> Self {
		self.data_nodes_auto_adjust_scale_down = Some(timer);
		self
	}

	pub fn filter(mut self, filter: impl Into<String>) -> Self {
		self.filter = Some(filter.into());
		self
	}
}

/// Every unset property keeps its current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlterZoneParams {
	pub zone_name: String,
	pub partitions: Option<u32>,
	pub replicas: Option<u32>,
	pub data_nodes_auto_adjust: Option<u32>,
	pub data_nodes_auto_adjust_scale_up: Option<u32>,
	pub data_nodes_auto_adjust_scale_down: Option<u32>,
	pub filter: Option<String>,
}

impl AlterZoneParams {
	pub fn new(zone_name: impl Into<String>) -> Self {
		Self {
			zone_name: zone_name.into(),
			..Default::default()
		}
	}

	pub fn partitions(mut self, partitions: u32) -> Self {
		self.partitions = Some(partitions);
		self
	}

	pub fn replicas(mut self, replicas: u32) -> Self {
		self.replicas = Some(replicas);
		self
	}

	pub fn data_nodes_auto_adjust(mut self, timer: u32) -> Self {
		self.data_nodes_auto_adjust = Some(timer);
		self
	}

	pub fn data_nodes_auto_adjust_scale_up(mut self, timer: u32) -> Self {
		self.data_nodes_auto_adjust_scale_up = Some(timer);
		self
	}

	pub fn data_nodes_auto_adjust_scale_down(mut self, timer: u32) -> Self {
		self.data_nodes_auto_adjust_scale_down = Some(timer);
		self
	}

	pub fn filter(mut self, filter: impl Into<String>) -> Self {
		self.filter = Some(filter.into());
		self
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropZoneParams {
	pub zone_name: String,
}

impl DropZoneParams {
	pub fn new(zone_name: impl Into<String>) -> Self {
		Self {
			zone_name: zone_name.into(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameZoneParams {
	pub zone_name: String,
	pub new_zone_name: String,
}

impl RenameZoneParams {
	pub fn new(zone_name: impl Into<String>, new_zone_name: impl Into<String>) -> Self {
		Self {
			zone_name: zone_name.into(),
			new_zone_name: new_zone_name.into(),
		}
	}
}
