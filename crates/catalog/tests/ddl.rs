// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! DDL statements run end to end through the update log.

use halyard_catalog::{
	CatalogVersion, Error, ObjectKind, Result, ValidationError,
	command::{
		AddColumnsParams, AlterColumnParams, AlterZoneParams, CreateHashIndexParams, CreateSortedIndexParams,
		CreateZoneParams, DropColumnsParams, DropIndexParams, DropZoneParams, RenameZoneParams,
	},
	descriptor::{Collation, ColumnType, DEFAULT_ZONE_NAME, ZoneId},
	test_utils::{column, simple_table, start_test_catalog},
};

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_create_same_table() -> Result<()> {
	let test = start_test_catalog().await;
	let manager = &test.manager;

	let (a, b) = tokio::join!(manager.create_table(simple_table("T")), manager.create_table(simple_table("T")));

	let (ok, err) = match (a, b) {
		(Ok(version), Err(err)) | (Err(err), Ok(version)) => (version, err),
		other => panic!("expected exactly one success, got {:?}", other),
	};
	assert_eq!(ok, CatalogVersion(1));
	assert!(matches!(
		err,
		Error::Validation(ValidationError::DuplicateName {
			kind: ObjectKind::Table,
			..
		})
	));
	assert_eq!(manager.latest_catalog_version()?, CatalogVersion(1));

	manager.stop().await
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_create_different_tables() -> Result<()> {
	let test = start_test_catalog().await;
	let manager = &test.manager;

	let (a, b) = tokio::join!(manager.create_table(simple_table("A")), manager.create_table(simple_table("B")));
	let (a, b) = (a?, b?);
	assert_ne!(a, b);
	assert_eq!(a.max(b), CatalogVersion(2));

	let tables = manager.tables(CatalogVersion(2));
	assert_eq!(tables.len(), 2);
	assert_ne!(tables[0].id, tables[1].id);
	assert_eq!(manager.catalog(CatalogVersion(2)).unwrap().object_id_counter(), 6);

	manager.stop().await
}

#[tokio::test]
async fn test_column_statements() -> Result<()> {
	let test = start_test_catalog().await;
	let manager = &test.manager;
	manager.create_table(simple_table("T")).await?;

	let version = manager.add_columns(AddColumnsParams::new("T", vec![column("EXTRA", ColumnType::Int32)])).await?;
	assert_eq!(version, CatalogVersion(2));

	assert_eq!(manager.add_columns(AddColumnsParams::new("T", vec![])).await?, version);
	assert_eq!(manager.drop_columns(DropColumnsParams::new("T", vec![])).await?, version);
	assert_eq!(manager.alter_column(AlterColumnParams::new("T", "EXTRA").column_type(ColumnType::Int32)).await?, version);

	let version = manager.alter_column(AlterColumnParams::new("T", "EXTRA").column_type(ColumnType::Int64)).await?;
	assert_eq!(version, CatalogVersion(3));
	let table = manager.schema(None, version).unwrap().table("T").unwrap().clone();
	assert_eq!(table.column("EXTRA").unwrap().column_type, ColumnType::Int64);

	let result = manager.drop_columns(DropColumnsParams::new("T", vec!["ID".to_string()])).await;
	assert!(matches!(result, Err(Error::Validation(_))));

	let version = manager.drop_columns(DropColumnsParams::new("T", vec!["EXTRA".to_string()])).await?;
	let table = manager.schema(None, version).unwrap().table("T").unwrap().clone();
	assert!(table.column("EXTRA").is_none());
	assert_eq!(table.columns.len(), 2);

	manager.stop().await
}

#[tokio::test]
async fn test_index_statements() -> Result<()> {
	let test = start_test_catalog().await;
	let manager = &test.manager;
	manager.create_table(simple_table("T")).await?;

	let params = CreateSortedIndexParams::new("T", "T_VAL", vec!["VAL".to_string()], vec![Collation::DescNullsLast]);
	let version = manager.create_sorted_index(params).await?;
	let indexes = manager.schema(None, version).unwrap();
	let index = indexes.index("T_VAL").unwrap();
	assert_eq!(index.columns(), vec!["VAL"]);

	let result = manager.drop_columns(DropColumnsParams::new("T", vec!["VAL".to_string()])).await;
	assert!(matches!(result, Err(Error::Validation(_))));

	let version = manager.drop_index(DropIndexParams::new("T_VAL")).await?;
	assert!(manager.schema(None, version).unwrap().index("T_VAL").is_none());
	manager.drop_columns(DropColumnsParams::new("T", vec!["VAL".to_string()])).await?;

	manager.stop().await
}

#[tokio::test]
async fn test_create_table_with_taken_pk_index_name() -> Result<()> {
	let test = start_test_catalog().await;
	let manager = &test.manager;
	manager.create_table(simple_table("A")).await?;
	let before = manager.create_hash_index(CreateHashIndexParams::new("A", "T_PK", vec!["VAL".to_string()])).await?;

	let result = manager.create_table(simple_table("T")).await;
	assert!(matches!(
		result,
		Err(Error::Validation(ValidationError::DuplicateName {
			kind: ObjectKind::Index,
			..
		}))
	));
	assert_eq!(manager.latest_catalog_version()?, before);

	let schema = manager.schema(None, before).unwrap();
	assert!(schema.table("T").is_none());
	assert_eq!(schema.indexes.iter().filter(|index| index.name == "T_PK").count(), 1);

	manager.stop().await
}

#[tokio::test]
async fn test_default_zone_cannot_be_renamed() -> Result<()> {
	let test = start_test_catalog().await;
	let manager = &test.manager;

	let result = manager.rename_zone(RenameZoneParams::new(DEFAULT_ZONE_NAME, "Other")).await;
	let Err(Error::Validation(ValidationError::DefaultZoneProtected(message))) = &result else {
		panic!("unexpected result {:?}", result);
	};
	assert_eq!(message, "default zone can't be renamed");
	assert_eq!(manager.latest_catalog_version()?, CatalogVersion::INITIAL);

	manager.stop().await
}

#[tokio::test]
async fn test_zone_lifecycle() -> Result<()> {
	let test = start_test_catalog().await;
	let manager = &test.manager;

	manager.create_zone(CreateZoneParams::new("Z").partitions(8)).await?;
	let version = manager.rename_zone(RenameZoneParams::new("Z", "Z2")).await?;
	let zones = manager.zones(version);
	assert_eq!(zones.len(), 2);
	let renamed = zones.iter().find(|z| z.name == "Z2").unwrap();
	assert_eq!(renamed.id, ZoneId(2));
	assert_eq!(renamed.partitions, 8);

	let version = manager.alter_zone(AlterZoneParams::new("Z2").replicas(3)).await?;
	let zone = manager.catalog(version).unwrap().zone("Z2").unwrap().clone();
	assert_eq!(zone.replicas, 3);
	assert_eq!(zone.partitions, 8);

	let version = manager.drop_zone(DropZoneParams::new("Z2")).await?;
	assert_eq!(manager.zones(version).len(), 1);

	manager.stop().await
}

#[tokio::test]
async fn test_drop_zone_bound_to_table() -> Result<()> {
	let test = start_test_catalog().await;
	let manager = &test.manager;

	manager.create_zone(CreateZoneParams::new("Z")).await?;
	let before = manager.create_table(simple_table("T").zone("Z")).await?;

	let result = manager.drop_zone(DropZoneParams::new("Z")).await;
	assert_eq!(
		result,
		Err(Error::Validation(ValidationError::ZoneBoundToTable {
			zone: "Z".to_string(),
			table: "T".to_string(),
		}))
	);
	assert_eq!(manager.latest_catalog_version()?, before);

	manager.stop().await
}
