// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Version history, point-in-time reads and replay after restart.

use std::time::Duration;

use halyard_catalog::{
	CatalogVersion, Result,
	command::{AlterColumnParams, CreateHashIndexParams, CreateZoneParams, DropTableParams},
	descriptor::{ColumnType, DEFAULT_SCHEMA_NAME, DEFAULT_ZONE_NAME, DefaultValue},
	test_utils::{TEST_CLOCK_START, simple_table, start_test_catalog, test_config},
};
use halyard_type::HybridTimestamp;

#[tokio::test]
async fn test_started_catalog_serves_initial_version() -> Result<()> {
	let test = start_test_catalog().await;

	assert_eq!(test.manager.latest_catalog_version()?, CatalogVersion::INITIAL);

	let catalog = test.manager.catalog_at(HybridTimestamp::MIN)?;
	assert_eq!(catalog.version(), CatalogVersion::INITIAL);
	assert_eq!(catalog.object_id_counter(), 2);
	assert!(catalog.schema(DEFAULT_SCHEMA_NAME).is_some());
	assert!(catalog.zone(DEFAULT_ZONE_NAME).is_some());

	test.manager.stop().await
}

#[tokio::test]
async fn test_versions_are_contiguous_with_increasing_activation() -> Result<()> {
	let test = start_test_catalog().await;
	let manager = &test.manager;

	assert_eq!(manager.create_table(simple_table("A")).await?, CatalogVersion(1));
	assert_eq!(manager.create_table(simple_table("B")).await?, CatalogVersion(2));
	assert_eq!(manager.create_zone(CreateZoneParams::new("Z")).await?, CatalogVersion(3));
	assert_eq!(manager.drop_table(DropTableParams::new("A")).await?, CatalogVersion(4));

	let mut previous = manager.catalog(CatalogVersion::INITIAL).unwrap();
	for version in 1..=4 {
		let catalog = manager.catalog(CatalogVersion(version)).unwrap();
		assert_eq!(catalog.version(), CatalogVersion(version));
		assert!(catalog.activation_timestamp() > previous.activation_timestamp());
		assert!(catalog.object_id_counter() >= previous.object_id_counter());
		previous = catalog;
	}
	assert!(manager.catalog(CatalogVersion(5)).is_none());

	manager.stop().await
}

#[tokio::test]
async fn test_point_in_time_reads() -> Result<()> {
	let test = start_test_catalog().await;
	let manager = &test.manager;

	manager.create_table(simple_table("T")).await?;
	let created = manager.catalog(CatalogVersion(1)).unwrap().activation_timestamp();

	manager.drop_table(DropTableParams::new("T")).await?;
	let dropped = manager.catalog(CatalogVersion(2)).unwrap().activation_timestamp();

	let before = HybridTimestamp::new(TEST_CLOCK_START - 1, 0);
	assert_eq!(manager.active_catalog_version(before)?, CatalogVersion::INITIAL);
	assert!(manager.table("T", before)?.is_none());

	let table = manager.table("T", created)?.unwrap();
	assert_eq!(manager.active_catalog_version(created)?, CatalogVersion(1));
	assert_eq!(manager.table_by_id(table.id, created)?.unwrap().name, "T");
	assert!(manager.index("T_PK", created)?.is_some());

	assert!(manager.table("T", dropped)?.is_none());
	assert!(manager.index("T_PK", dropped)?.is_none());
	assert_eq!(manager.table_at_version(table.id, CatalogVersion(1)).unwrap().name, "T");
	assert!(manager.table_at_version(table.id, CatalogVersion(2)).is_none());

	manager.stop().await
}

#[tokio::test]
async fn test_recreated_table_gets_new_id() -> Result<()> {
	let test = start_test_catalog().await;
	let manager = &test.manager;

	manager.create_table(simple_table("T")).await?;
	let first = manager.tables(CatalogVersion(1));
	assert_eq!(first.len(), 1);

	manager.drop_table(DropTableParams::new("T")).await?;
	assert!(manager.tables(CatalogVersion(2)).is_empty());
	assert!(manager.indexes(CatalogVersion(2)).is_empty());

	manager.create_table(simple_table("T")).await?;
	let second = manager.tables(CatalogVersion(3));
	assert_eq!(second.len(), 1);
	assert_ne!(first[0].id, second[0].id);
	assert!(*second[0].id > *first[0].id);

	manager.stop().await
}

#[tokio::test]
async fn test_restart_replays_identical_snapshots() -> Result<()> {
	let test = start_test_catalog().await;
	{
		let manager = &test.manager;
		manager.create_zone(CreateZoneParams::new("Z").partitions(4)).await?;
		manager.create_table(simple_table("T").zone("Z")).await?;
		manager.create_hash_index(CreateHashIndexParams::new("T", "T_VAL", vec!["VAL".to_string()])).await?;
		manager.alter_column(AlterColumnParams::new("T", "VAL").length(100_000)).await?;
		manager
			.alter_column(AlterColumnParams::new("T", "VAL").default_value(DefaultValue::Constant("-".to_string())))
			.await?;
		manager.create_table(simple_table("U")).await?;
		manager.stop().await?;
	}
	let latest = test.manager.latest_catalog_version()?;

	test.clock.advance(Duration::from_secs(10));
	let restarted = test.reopen(test_config());
	restarted.start().await?;
	assert_eq!(restarted.latest_catalog_version()?, latest);

	for version in 0..=*latest {
		let version = CatalogVersion(version);
		assert_eq!(restarted.catalog(version), test.manager.catalog(version), "snapshot {} differs", version);
	}

	let schema = restarted.schema(None, latest).unwrap();
	let column = schema.table("T").unwrap().column("VAL").unwrap().clone();
	assert_eq!(column.length, 100_000);
	assert_eq!(column.default, Some(DefaultValue::Constant("-".to_string())));
	assert_eq!(restarted.zones(latest).len(), 2);

	restarted.stop().await
}

#[tokio::test]
async fn test_restart_continues_numbering() -> Result<()> {
	let test = start_test_catalog().await;
	test.manager.create_table(simple_table("T")).await?;
	test.manager.stop().await?;

	let restarted = test.reopen(test_config());
	restarted.start().await?;
	assert_eq!(restarted.create_table(simple_table("U")).await?, CatalogVersion(2));

	let u = restarted.catalog(CatalogVersion(2)).unwrap();
	let u = u.schema(DEFAULT_SCHEMA_NAME).unwrap().table("U").unwrap().clone();
	assert_eq!(*u.id, 4);
	assert_eq!(u.column("ID").unwrap().column_type, ColumnType::Int32);

	restarted.stop().await
}
