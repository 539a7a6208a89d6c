// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use async_trait::async_trait;

use crate::{
	CatalogVersion, CausalityToken,
	descriptor::{ColumnDescriptor, IndexDescriptor, IndexId, TableDescriptor, TableId, ZoneDescriptor, ZoneId},
};

mod publisher;

pub use publisher::{EventPublisher, FailedDelivery};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CatalogEventType {
	TableCreate,
	TableDrop,
	TableAlter,
	IndexCreate,
	IndexDrop,
	ZoneCreate,
	ZoneAlter,
	ZoneDrop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableChange {
	ColumnsAdded(Vec<ColumnDescriptor>),
	ColumnsDropped(Vec<String>),
	ColumnAltered(ColumnDescriptor),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEventKind {
	TableCreated {
		table: TableDescriptor,
	},
	TableDropped {
		table_id: TableId,
	},
	TableAltered {
		table_id: TableId,
		change: TableChange,
	},
	IndexCreated {
		index: IndexDescriptor,
	},
	IndexDropped {
		index_id: IndexId,
		table_id: TableId,
	},
	ZoneCreated {
		zone: ZoneDescriptor,
	},
	ZoneAltered {
		zone: ZoneDescriptor,
	},
	ZoneDropped {
		zone_id: ZoneId,
	},
}

/// A catalog change, published after the version that holds it has been
/// registered locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEvent {
	pub causality_token: CausalityToken,
	pub catalog_version: CatalogVersion,
	pub kind: CatalogEventKind,
}

impl CatalogEvent {
	pub fn event_type(&self) -> CatalogEventType {
		match self.kind {
			CatalogEventKind::TableCreated {
				..
			} => CatalogEventType::TableCreate,
			CatalogEventKind::TableDropped {
				..
			} => CatalogEventType::TableDrop,
			CatalogEventKind::TableAltered {
				..
			} => CatalogEventType::TableAlter,
			CatalogEventKind::IndexCreated {
				..
			} => CatalogEventType::IndexCreate,
			CatalogEventKind::IndexDropped {
				..
			} => CatalogEventType::IndexDrop,
			CatalogEventKind::ZoneCreated {
				..
			} => CatalogEventType::ZoneCreate,
			CatalogEventKind::ZoneAltered {
				..
			} => CatalogEventType::ZoneAlter,
			CatalogEventKind::ZoneDropped {
				..
			} => CatalogEventType::ZoneDrop,
		}
	}
}

pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait CatalogEventListener: Send + Sync + 'static {
	async fn on(&self, event: &CatalogEvent) -> Result<(), ListenerError>;
}
