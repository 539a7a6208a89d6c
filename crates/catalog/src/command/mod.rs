// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! DDL statements.
//!
//! Each statement is a pure producer: it validates its parameters against a
//! catalog snapshot and returns the update entries to append. The manager
//! methods in this module run the producer through the save loop.

mod column;
mod index;
mod params;
mod table;
mod validate;
mod zone;

pub use params::{
	AddColumnsParams, AlterColumnParams, AlterZoneParams, ColumnParams, CreateHashIndexParams, CreateSortedIndexParams,
	CreateTableParams, CreateZoneParams, DropColumnsParams, DropIndexParams, DropTableParams, DropZoneParams,
	RenameZoneParams,
};
