// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Immutable descriptors of catalog objects.

mod column;
mod id;
mod index;
mod schema;
mod table;
mod zone;

pub use column::{
	ColumnDescriptor, ColumnType, DEFAULT_DECIMAL_PRECISION, DEFAULT_DECIMAL_SCALE, DEFAULT_VARLEN_LENGTH,
	DefaultValue,
};
pub use id::{IndexId, ObjectId, SchemaId, TableId, ZoneId};
pub use index::{Collation, IndexColumn, IndexDescriptor, IndexKind};
pub use schema::{DEFAULT_SCHEMA_NAME, SchemaDescriptor};
pub use table::TableDescriptor;
pub use zone::{
	DEFAULT_FILTER, DEFAULT_PARTITION_COUNT, DEFAULT_REPLICA_COUNT, DEFAULT_ZONE_NAME, INFINITE_TIMER_VALUE,
	MAX_PARTITION_COUNT, ZoneDescriptor,
};
