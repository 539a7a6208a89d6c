// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

// #![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(not(debug_assertions), deny(warnings))]
// #![cfg_attr(not(debug_assertions), deny(clippy::unwrap_used))]
// #![cfg_attr(not(debug_assertions), deny(clippy::expect_used))]

//! Versioned schema catalog.
//!
//! Every DDL statement becomes a [`VersionedUpdate`] that is appended to a
//! replicated [`UpdateLog`]. Each node folds committed updates, in log order,
//! into immutable [`Catalog`] snapshots and keeps every snapshot addressable
//! by version and by activation timestamp.

pub use catalog::Catalog;
pub use config::CatalogConfig;
pub use error::{Error, ObjectKind, ValidationError};
pub use event::{
	CatalogEvent, CatalogEventKind, CatalogEventListener, CatalogEventType, EventPublisher, FailedDelivery,
	ListenerError, TableChange,
};
pub use history::SnapshotHistory;
pub use log::{UpdateHandler, UpdateLog, memory::MemoryUpdateLog};
pub use manager::{CatalogManager, MAX_RETRY_COUNT};
pub use tracker::VersionTracker;
pub use update::{UpdateEntry, VersionedUpdate};
pub use version::{CatalogVersion, CausalityToken};

mod catalog;
pub mod command;
mod config;
pub mod descriptor;
mod error;
mod event;
mod handler;
mod history;
pub mod log;
mod manager;
pub mod test_utils;
mod tracker;
mod update;
mod version;

pub type Result<T> = std::result::Result<T, Error>;
