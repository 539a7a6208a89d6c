// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Event delivery as seen from DDL callers.

use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use halyard_catalog::{
	CatalogEvent, CatalogEventKind, CatalogEventListener, CatalogEventType, CatalogVersion, CausalityToken,
	ListenerError, Result, TableChange,
	command::{AddColumnsParams, AlterColumnParams, CreateZoneParams, DropTableParams, DropZoneParams},
	descriptor::ColumnType,
	test_utils::{column, simple_table, start_test_catalog},
};
use parking_lot::Mutex;

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<CatalogEvent>>>);

impl Recorder {
	fn events(&self) -> Vec<CatalogEvent> {
		self.0.lock().clone()
	}
}

#[async_trait]
impl CatalogEventListener for Recorder {
	async fn on(&self, event: &CatalogEvent) -> std::result::Result<(), ListenerError> {
		self.0.lock().push(event.clone());
		Ok(())
	}
}

/// Fails until healed.
#[derive(Clone, Default)]
struct Broken {
	healed: Arc<AtomicBool>,
	seen: Recorder,
}

#[async_trait]
impl CatalogEventListener for Broken {
	async fn on(&self, event: &CatalogEvent) -> std::result::Result<(), ListenerError> {
		if !self.healed.load(Ordering::SeqCst) {
			return Err("listener is broken".into());
		}
		self.seen.on(event).await
	}
}

#[tokio::test]
async fn test_events_delivered_before_ddl_returns() -> Result<()> {
	let test = start_test_catalog().await;
	let manager = &test.manager;

	let tables = Recorder::default();
	let indexes = Recorder::default();
	manager.listen(CatalogEventType::TableCreate, tables.clone());
	manager.listen(CatalogEventType::IndexCreate, indexes.clone());

	let version = manager.create_table(simple_table("T")).await?;

	let events = tables.events();
	assert_eq!(events.len(), 1);
	assert_eq!(events[0].catalog_version, version);
	assert_eq!(events[0].causality_token, CausalityToken(1));
	let CatalogEventKind::TableCreated {
		table,
	} = &events[0].kind
	else {
		panic!("unexpected event {:?}", events[0]);
	};
	assert_eq!(table.name, "T");

	let events = indexes.events();
	assert_eq!(events.len(), 1);
	assert_eq!(events[0].catalog_version, version);
	assert!(matches!(&events[0].kind, CatalogEventKind::IndexCreated { index } if index.name == "T_PK"));

	manager.stop().await
}

#[tokio::test]
async fn test_events_follow_version_order() -> Result<()> {
	let test = start_test_catalog().await;
	let manager = &test.manager;

	let recorder = Recorder::default();
	for event_type in [
		CatalogEventType::TableCreate,
		CatalogEventType::TableDrop,
		CatalogEventType::TableAlter,
		CatalogEventType::IndexDrop,
		CatalogEventType::ZoneCreate,
		CatalogEventType::ZoneDrop,
	] {
		manager.listen(event_type, recorder.clone());
	}

	manager.create_zone(CreateZoneParams::new("Z")).await?;
	manager.create_table(simple_table("T").zone("Z")).await?;
	manager.alter_column(AlterColumnParams::new("T", "VAL").length(100_000)).await?;
	manager.drop_table(DropTableParams::new("T")).await?;
	manager.drop_zone(DropZoneParams::new("Z")).await?;

	let events = recorder.events();
	let types: Vec<CatalogEventType> = events.iter().map(|e| e.event_type()).collect();
	assert_eq!(
		types,
		vec![
			CatalogEventType::ZoneCreate,
			CatalogEventType::TableCreate,
			CatalogEventType::TableAlter,
			CatalogEventType::IndexDrop,
			CatalogEventType::TableDrop,
			CatalogEventType::ZoneDrop,
		]
	);

	let versions: Vec<u64> = events.iter().map(|e| *e.catalog_version).collect();
	assert_eq!(versions, vec![1, 2, 3, 4, 4, 5]);
	assert!(matches!(
		&events[2].kind,
		CatalogEventKind::TableAltered { change: TableChange::ColumnAltered(c), .. } if c.length == 100_000
	));

	manager.stop().await
}

#[tokio::test]
async fn test_failing_listener_does_not_fail_ddl() -> Result<()> {
	let test = start_test_catalog().await;
	let manager = &test.manager;

	let broken = Broken::default();
	let healthy = Recorder::default();
	manager.listen(CatalogEventType::TableCreate, broken.clone());
	manager.listen(CatalogEventType::TableCreate, healthy.clone());

	let version = manager.create_table(simple_table("T")).await?;
	assert_eq!(version, CatalogVersion(1));
	assert_eq!(healthy.events().len(), 1);

	let publisher = manager.event_publisher();
	assert_eq!(publisher.delivery_failures(), 1);
	let failed = publisher.failed_deliveries();
	assert_eq!(failed.len(), 1);
	assert_eq!(failed[0].event.catalog_version, version);

	assert_eq!(manager.create_table(simple_table("U")).await?, CatalogVersion(2));

	broken.healed.store(true, Ordering::SeqCst);
	assert_eq!(publisher.redeliver_failed().await, 2);
	assert!(publisher.failed_deliveries().is_empty());

	let redelivered: Vec<CatalogVersion> = broken.seen.events().iter().map(|e| e.catalog_version).collect();
	assert_eq!(redelivered, vec![CatalogVersion(1), CatalogVersion(2)]);

	manager.stop().await
}

#[tokio::test]
async fn test_alter_column_type_event() -> Result<()> {
	let test = start_test_catalog().await;
	let manager = &test.manager;

	let recorder = Recorder::default();
	manager.listen(CatalogEventType::TableAlter, recorder.clone());

	manager.create_table(simple_table("T")).await?;
	manager.add_columns(AddColumnsParams::new("T", vec![column("N", ColumnType::Int16)])).await?;
	manager.alter_column(AlterColumnParams::new("T", "N").column_type(ColumnType::Int64)).await?;

	let events = recorder.events();
	assert_eq!(events.len(), 2);
	assert!(matches!(&events[0].kind, CatalogEventKind::TableAltered { change: TableChange::ColumnsAdded(c), .. } if c.len() == 1));
	assert!(matches!(
		&events[1].kind,
		CatalogEventKind::TableAltered { change: TableChange::ColumnAltered(c), .. } if c.column_type == ColumnType::Int64
	));

	manager.stop().await
}
