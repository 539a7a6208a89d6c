// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	ops::Deref,
};

use serde::{Deserialize, Serialize};

/// Position of a catalog snapshot in the global update sequence.
///
/// Version `0` is the built-in initial catalog; every committed update
/// produces the next version.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, PartialOrd, PartialEq, Ord, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogVersion(pub u64);

impl CatalogVersion {
	pub const INITIAL: CatalogVersion = CatalogVersion(0);

	pub fn next(self) -> Self {
		Self(self.0 + 1)
	}

	pub fn prev(self) -> Option<Self> {
		self.0.checked_sub(1).map(Self)
	}
}

impl Deref for CatalogVersion {
	type Target = u64;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<u64> for CatalogVersion {
	fn from(value: u64) -> Self {
		Self(value)
	}
}

impl Display for CatalogVersion {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

/// Opaque token the update log attaches to a committed update.
///
/// Carried on every event produced by the update so consumers can order
/// catalog changes against other log traffic.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, PartialOrd, PartialEq, Ord, Eq, Hash, Serialize, Deserialize)]
pub struct CausalityToken(pub u64);

impl Deref for CausalityToken {
	type Target = u64;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Display for CausalityToken {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_next_and_prev() {
		let v = CatalogVersion(4);
		assert_eq!(v.next(), CatalogVersion(5));
		assert_eq!(v.prev(), Some(CatalogVersion(3)));
		assert_eq!(CatalogVersion::INITIAL.prev(), None);
	}
}
