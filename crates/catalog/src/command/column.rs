// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{
	params::{AddColumnsParams, AlterColumnParams, DropColumnsParams},
	validate,
};
use crate::{
	Catalog, CatalogManager, CatalogVersion, ObjectKind, Result, UpdateEntry, ValidationError,
	descriptor::ColumnDescriptor,
};

impl CatalogManager {
	/// Adding no columns saves nothing and returns the latest version.
	pub async fn add_columns(&self, params: AddColumnsParams) -> Result<CatalogVersion> {
		if params.columns.is_empty() {
			return self.latest_catalog_version();
		}
		self.save_update_and_wait_for_activation(|catalog| add_columns(catalog, &params)).await
	}

	/// Dropping no columns saves nothing and returns the latest version.
	pub async fn drop_columns(&self, params: DropColumnsParams) -> Result<CatalogVersion> {
		if params.columns.is_empty() {
			return self.latest_catalog_version();
		}
		self.save_update_and_wait_for_activation(|catalog| drop_columns(catalog, &params)).await
	}

	/// A change that leaves the column as it is saves nothing and returns
	/// the latest version.
	pub async fn alter_column(&self, params: AlterColumnParams) -> Result<CatalogVersion> {
		self.save_update_and_wait_for_activation(|catalog| alter_column(catalog, &params)).await
	}
}

pub(crate) fn add_columns(catalog: &Catalog, params: &AddColumnsParams) -> Result<Vec<UpdateEntry>> {
	let schema = validate::schema(catalog, params.schema_name.as_deref())?;
	let table = validate::table(schema, &params.table_name)?;

	let mut columns: Vec<ColumnDescriptor> = Vec::with_capacity(params.columns.len());
	for column in &params.columns {
		let duplicate = table.column(&column.name).is_some() || columns.iter().any(|c| c.name == column.name);
		if duplicate {
			return Err(ValidationError::duplicate(ObjectKind::Column, &column.name).into());
		}
		columns.push(column.to_descriptor());
	}

	Ok(vec![UpdateEntry::NewColumns {
		table_id: table.id,
		columns,
	}])
}

pub(crate) fn drop_columns(catalog: &Catalog, params: &DropColumnsParams) -> Result<Vec<UpdateEntry>> {
	let schema = validate::schema(catalog, params.schema_name.as_deref())?;
	let table = validate::table(schema, &params.table_name)?;

	validate::drop_columns(schema, table, &params.columns)?;

	Ok(vec![UpdateEntry::DropColumns {
		table_id: table.id,
		columns: params.columns.clone(),
	}])
}

pub(crate) fn alter_column(catalog: &Catalog, params: &AlterColumnParams) -> Result<Vec<UpdateEntry>> {
	let schema = validate::schema(catalog, params.schema_name.as_deref())?;
	let table = validate::table(schema, &params.table_name)?;
	let origin = validate::column(table, &params.column_name)?;

	let target = params.apply_to(origin);
	if &target == origin {
		return Ok(vec![]);
	}

	validate::alter_column(origin, &target, table.is_primary_key_column(&origin.name))?;

	Ok(vec![UpdateEntry::AlterColumn {
		table_id: table.id,
		column: target,
	}])
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		Error,
		command::{
			index::create_hash_index,
			params::{ColumnParams, CreateHashIndexParams, CreateTableParams},
			table::create_table,
		},
		descriptor::{ColumnType, DefaultValue, TableId},
	};

	fn apply(catalog: Catalog, entries: Vec<UpdateEntry>) -> Catalog {
		entries.iter().fold(catalog, |catalog, entry| entry.apply(catalog).unwrap())
	}

	/// Table `T (ID INT32 NOT NULL PK, VAL INT32, NAME STRING)` with index
	/// `T_NAME` on `NAME`.
	fn catalog() -> Catalog {
		let params = CreateTableParams::new(
			"T",
			vec![
				ColumnParams::new("ID", ColumnType::Int32).not_null(),
				ColumnParams::new("VAL", ColumnType::Int32),
				ColumnParams::new("NAME", ColumnType::String),
			],
			vec!["ID".to_string()],
		);
		let catalog = apply(Catalog::initial(), create_table(&Catalog::initial(), &params).unwrap());
		let index = CreateHashIndexParams::new("T", "T_NAME", vec!["NAME".to_string()]);
		let entries = create_hash_index(&catalog, &index).unwrap();
		apply(catalog, entries)
	}

	fn assert_validation(result: Result<Vec<UpdateEntry>>) {
		assert!(matches!(result, Err(Error::Validation(_))), "{:?}", result);
	}

	#[test]
	fn test_add_columns() {
		let catalog = catalog();
		let entries =
			add_columns(&catalog, &AddColumnsParams::new("T", vec![ColumnParams::new("EXTRA", ColumnType::Int64)]))
				.unwrap();
		assert!(matches!(&entries[..], [UpdateEntry::NewColumns { table_id: TableId(2), columns }] if columns.len() == 1));

		assert_validation(add_columns(&catalog, &AddColumnsParams::new("T", vec![ColumnParams::new("VAL", ColumnType::Int64)])));
		assert_validation(add_columns(
			&catalog,
			&AddColumnsParams::new(
				"T",
				vec![ColumnParams::new("X", ColumnType::Int64), ColumnParams::new("X", ColumnType::Int64)],
			),
		));
	}

	#[test]
	fn test_drop_columns_rules() {
		let catalog = catalog();
		drop_columns(&catalog, &DropColumnsParams::new("T", vec!["VAL".to_string()])).unwrap();

		assert_validation(drop_columns(&catalog, &DropColumnsParams::new("T", vec!["ID".to_string()])));
		assert_validation(drop_columns(&catalog, &DropColumnsParams::new("T", vec!["NAME".to_string()])));
		assert_validation(drop_columns(&catalog, &DropColumnsParams::new("T", vec!["MISSING".to_string()])));
	}

	#[test]
	fn test_alter_column_without_change_is_empty() {
		let catalog = catalog();
		let entries = alter_column(&catalog, &AlterColumnParams::new("T", "VAL").column_type(ColumnType::Int32)).unwrap();
		assert!(entries.is_empty());
	}

	#[test]
	fn test_alter_column_changes() {
		let catalog = catalog();

		let entries = alter_column(
			&catalog,
			&AlterColumnParams::new("T", "VAL")
				.column_type(ColumnType::Int64)
				.default_value(DefaultValue::Constant("0".to_string())),
		)
		.unwrap();
		let [UpdateEntry::AlterColumn {
			column,
			..
		}] = &entries[..]
		else {
			panic!("expected AlterColumn, got {:?}", entries);
		};
		assert_eq!(column.column_type, ColumnType::Int64);
		assert!(column.nullable);
		assert_eq!(column.default, Some(DefaultValue::Constant("0".to_string())));

		let result = alter_column(&catalog, &AlterColumnParams::new("T", "VAL").not_null(true));
		assert!(matches!(result, Err(Error::Validation(ValidationError::UnsupportedColumnChange(_)))));

		let result = alter_column(&catalog, &AlterColumnParams::new("T", "ID").column_type(ColumnType::Int64));
		assert!(matches!(result, Err(Error::Validation(ValidationError::UnsupportedColumnChange(_)))));

		let result = alter_column(&catalog, &AlterColumnParams::new("T", "MISSING").column_type(ColumnType::Int64));
		assert!(matches!(result, Err(Error::Validation(ValidationError::NotFound { kind: ObjectKind::Column, .. }))));
	}
}
