// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The replicated, totally ordered log catalog updates are committed to.

use std::sync::Arc;

use async_trait::async_trait;
use halyard_type::HybridTimestamp;

use crate::{CatalogVersion, CausalityToken, Error, Result, VersionedUpdate};

pub mod memory;

/// Receives every committed update exactly once, in version order.
///
/// An error is fatal for the node: the log stops delivering.
pub trait UpdateHandler: Send + Sync + 'static {
	fn handle(
		&self,
		update: VersionedUpdate,
		commit_timestamp: HybridTimestamp,
		causality_token: CausalityToken,
	) -> Result<()>;

	/// Called once with the error that stopped delivery.
	fn halt(&self, _error: Error) {}
}

#[async_trait]
pub trait UpdateLog: Send + Sync + 'static {
	/// Must be called exactly once, before [`UpdateLog::start`].
	fn register_update_handler(&self, handler: Arc<dyn UpdateHandler>) -> Result<()>;

	/// Delivers every already committed update to the handler, then every
	/// update committed from now on.
	async fn start(&self) -> Result<()>;

	async fn stop(&self) -> Result<()>;

	/// Commits `update` if its version directly follows the last committed
	/// one. Returns `false`, committing nothing, otherwise.
	async fn append(&self, update: VersionedUpdate) -> Result<bool>;

	/// Version of the last committed update.
	async fn committed_version(&self) -> Result<CatalogVersion>;
}
