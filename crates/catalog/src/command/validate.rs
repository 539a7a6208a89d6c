// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashSet, sync::Arc};

use super::params::CreateTableParams;
use crate::{
	Catalog, ObjectKind, ValidationError,
	descriptor::{
		ColumnDescriptor, DEFAULT_SCHEMA_NAME, INFINITE_TIMER_VALUE, MAX_PARTITION_COUNT, SchemaDescriptor,
		TableDescriptor, ZoneDescriptor,
	},
};

type Result<T> = std::result::Result<T, ValidationError>;

pub(crate) fn schema<'a>(catalog: &'a Catalog, name: Option<&str>) -> Result<&'a Arc<SchemaDescriptor>> {
	let name = name.unwrap_or(DEFAULT_SCHEMA_NAME);
	catalog.schema(name).ok_or_else(|| ValidationError::not_found(ObjectKind::Schema, name))
}

pub(crate) fn table<'a>(schema: &'a SchemaDescriptor, name: &str) -> Result<&'a Arc<TableDescriptor>> {
	schema.table(name).ok_or_else(|| ValidationError::not_found(ObjectKind::Table, format!("{}.{}", schema.name, name)))
}

pub(crate) fn zone<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a Arc<ZoneDescriptor>> {
	catalog.zone(name).ok_or_else(|| ValidationError::not_found(ObjectKind::Zone, name))
}

pub(crate) fn column<'a>(table: &'a TableDescriptor, name: &str) -> Result<&'a ColumnDescriptor> {
	table.column(name).ok_or_else(|| ValidationError::not_found(ObjectKind::Column, name))
}

/// Index names are unique within a schema, including the `<TABLE>_PK`
/// names of primary key indexes.
pub(crate) fn index_name_free(schema: &SchemaDescriptor, name: &str) -> Result<()> {
	if schema.index(name).is_some() {
		return Err(ValidationError::duplicate(ObjectKind::Index, format!("{}.{}", schema.name, name)));
	}
	Ok(())
}

/// First name occurring twice in `names`.
fn first_duplicate<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
	let mut seen = HashSet::new();
	names.into_iter().find(|name| !seen.insert(*name))
}

pub(crate) fn create_table(params: &CreateTableParams) -> Result<()> {
	if params.columns.is_empty() {
		return Err(ValidationError::invalid("table must include at least one column"));
	}

	if let Some(name) = first_duplicate(params.columns.iter().map(|c| c.name.as_str())) {
		return Err(ValidationError::invalid(format!("duplicate column '{}'", name)));
	}

	if params.primary_key_columns.is_empty() {
		return Err(ValidationError::invalid("table without primary key is not supported"));
	}

	let columns: HashSet<&str> = params.columns.iter().map(|c| c.name.as_str()).collect();
	if let Some(name) = params.primary_key_columns.iter().find(|c| !columns.contains(c.as_str())) {
		return Err(ValidationError::invalid(format!("primary key column '{}' is not a table column", name)));
	}

	if let Some(name) = first_duplicate(params.primary_key_columns.iter().map(String::as_str)) {
		return Err(ValidationError::invalid(format!("duplicate primary key column '{}'", name)));
	}

	if let Some(colocation) = &params.colocation_columns {
		if let Some(name) = first_duplicate(colocation.iter().map(String::as_str)) {
			return Err(ValidationError::invalid(format!("duplicate colocation column '{}'", name)));
		}
		let outstanding: Vec<&str> = colocation
			.iter()
			.filter(|c| !params.primary_key_columns.contains(c))
			.map(String::as_str)
			.collect();
		if !outstanding.is_empty() {
			return Err(ValidationError::invalid(format!(
				"colocation columns must be a subset of the primary key: {}",
				outstanding.join(", ")
			)));
		}
	}

	Ok(())
}

pub(crate) fn index_columns(table: &TableDescriptor, columns: &[String]) -> Result<()> {
	if columns.is_empty() {
		return Err(ValidationError::invalid("no index columns specified"));
	}
	for name in columns {
		column(table, name)?;
	}
	if let Some(name) = first_duplicate(columns.iter().map(String::as_str)) {
		return Err(ValidationError::invalid(format!("duplicate index column '{}'", name)));
	}
	Ok(())
}

pub(crate) fn drop_columns(schema: &SchemaDescriptor, table: &TableDescriptor, columns: &[String]) -> Result<()> {
	for name in columns {
		column(table, name)?;
		if table.is_primary_key_column(name) {
			return Err(ValidationError::invalid(format!("can't drop primary key column '{}'", name)));
		}
	}

	for index in schema.table_indexes(table.id) {
		if let Some(name) = columns.iter().find(|c| index.has_column(c)) {
			return Err(ValidationError::invalid(format!(
				"can't drop column '{}' used by index '{}'",
				name, index.name
			)));
		}
	}
	Ok(())
}

/// Checks that `origin` can be changed to `target` in place.
pub(crate) fn alter_column(origin: &ColumnDescriptor, target: &ColumnDescriptor, primary_key: bool) -> Result<()> {
	let name = &origin.name;

	if origin.nullable != target.nullable {
		if primary_key {
			return Err(ValidationError::unsupported_change(format!(
				"cannot change NOT NULL for primary key column '{}'",
				name
			)));
		}
		if origin.nullable {
			return Err(ValidationError::unsupported_change(format!("cannot set NOT NULL for column '{}'", name)));
		}
	}

	if origin.scale != target.scale {
		return Err(ValidationError::unsupported_change(format!("cannot change scale for column '{}'", name)));
	}

	if origin.column_type != target.column_type {
		if primary_key {
			return Err(ValidationError::unsupported_change(format!(
				"cannot change data type for primary key column '{}'",
				name
			)));
		}
		if !origin.column_type.can_widen_to(target.column_type) {
			return Err(ValidationError::unsupported_change(format!(
				"cannot change data type for column '{}' from {} to {}",
				name, origin.column_type, target.column_type
			)));
		}
	}

	if origin.length != target.length && !target.column_type.has_length() {
		return Err(ValidationError::unsupported_change(format!("cannot change length for column '{}'", name)));
	}
	if target.length < origin.length {
		return Err(ValidationError::unsupported_change(format!(
			"cannot decrease length to {} for column '{}'",
			target.length, name
		)));
	}

	if origin.precision != target.precision && !target.column_type.has_precision() {
		return Err(ValidationError::unsupported_change(format!("cannot change precision for column '{}'", name)));
	}
	if target.precision < origin.precision {
		return Err(ValidationError::unsupported_change(format!(
			"cannot decrease precision to {} for column '{}'",
			target.precision, name
		)));
	}

	Ok(())
}

pub(crate) fn zone_name(name: &str) -> Result<()> {
	if name.trim().is_empty() {
		return Err(ValidationError::invalid("missing zone name"));
	}
	Ok(())
}

pub(crate) fn zone_definition(zone: &ZoneDescriptor) -> Result<()> {
	zone_name(&zone.name)?;

	if zone.partitions == 0 || zone.partitions > MAX_PARTITION_COUNT {
		return Err(ValidationError::invalid(format!(
			"invalid number of partitions {}, expected 1..={}",
			zone.partitions, MAX_PARTITION_COUNT
		)));
	}
	if zone.replicas == 0 {
		return Err(ValidationError::invalid("invalid number of replicas 0"));
	}
	if zone.filter.trim().is_empty() {
		return Err(ValidationError::invalid("missing data nodes filter"));
	}

	let scale_timers_set = zone.data_nodes_auto_adjust_scale_up != INFINITE_TIMER_VALUE
		|| zone.data_nodes_auto_adjust_scale_down != INFINITE_TIMER_VALUE;
	if zone.data_nodes_auto_adjust != INFINITE_TIMER_VALUE && scale_timers_set {
		return Err(ValidationError::invalid(
			"data nodes auto adjust can't be used together with auto adjust scale up or scale down",
		));
	}

	Ok(())
}
