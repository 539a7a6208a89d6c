// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	ops::Deref,
};

use serde::{Deserialize, Serialize};

/// Raw value of the catalog wide object id counter.
///
/// Schemas, zones, tables and indexes draw their ids from the same counter,
/// so an id is never reused across object kinds or after a drop.
pub type ObjectId = u32;

macro_rules! object_id {
	($name:ident) => {
		#[repr(transparent)]
		#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, Serialize, Deserialize)]
		pub struct $name(pub ObjectId);

		impl Deref for $name {
			type Target = ObjectId;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}

		impl From<ObjectId> for $name {
			fn from(value: ObjectId) -> Self {
				Self(value)
			}
		}

		impl From<$name> for ObjectId {
			fn from(value: $name) -> Self {
				value.0
			}
		}

		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
				Display::fmt(&self.0, f)
			}
		}
	};
}

object_id!(SchemaId);
object_id!(ZoneId);
object_id!(TableId);
object_id!(IndexId);
