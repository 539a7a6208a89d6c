// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

pub const DEFAULT_DECIMAL_PRECISION: u32 = 19;
pub const DEFAULT_DECIMAL_SCALE: u32 = 3;
pub const DEFAULT_VARLEN_LENGTH: u32 = 65_536;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
	Boolean,
	Int8,
	Int16,
	Int32,
	Int64,
	Float,
	Double,
	Decimal,
	Date,
	Time,
	Datetime,
	Timestamp,
	Uuid,
	String,
	ByteArray,
}

impl ColumnType {
	/// Whether a column of this type may be changed to `target` in place.
	///
	/// Only lossless widening of integer and floating point types is
	/// supported.
	pub fn can_widen_to(self, target: ColumnType) -> bool {
		use ColumnType::*;
		matches!(
			(self, target),
			(Int8, Int16) | (Int8, Int32) | (Int8, Int64) | (Int16, Int32) | (Int16, Int64) | (Int32, Int64) | (Float, Double)
		)
	}

	pub fn has_length(self) -> bool {
		matches!(self, ColumnType::String | ColumnType::ByteArray)
	}

	pub fn has_precision(self) -> bool {
		matches!(self, ColumnType::Decimal)
	}

	pub(crate) fn default_precision(self) -> u32 {
		if self.has_precision() {
			DEFAULT_DECIMAL_PRECISION
		} else {
			0
		}
	}

	pub(crate) fn default_scale(self) -> u32 {
		if self.has_precision() {
			DEFAULT_DECIMAL_SCALE
		} else {
			0
		}
	}

	pub(crate) fn default_length(self) -> u32 {
		if self.has_length() {
			DEFAULT_VARLEN_LENGTH
		} else {
			0
		}
	}
}

impl Display for ColumnType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let name = match self {
			ColumnType::Boolean => "BOOLEAN",
			ColumnType::Int8 => "INT8",
			ColumnType::Int16 => "INT16",
			ColumnType::Int32 => "INT32",
			ColumnType::Int64 => "INT64",
			ColumnType::Float => "FLOAT",
			ColumnType::Double => "DOUBLE",
			ColumnType::Decimal => "DECIMAL",
			ColumnType::Date => "DATE",
			ColumnType::Time => "TIME",
			ColumnType::Datetime => "DATETIME",
			ColumnType::Timestamp => "TIMESTAMP",
			ColumnType::Uuid => "UUID",
			ColumnType::String => "STRING",
			ColumnType::ByteArray => "BYTE_ARRAY",
		};
		f.write_str(name)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultValue {
	Constant(String),
	FunctionCall(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
	pub name: String,
	pub column_type: ColumnType,
	pub nullable: bool,
	pub precision: u32,
	pub scale: u32,
	pub length: u32,
	pub default: Option<DefaultValue>,
}

impl ColumnDescriptor {
	pub fn new(name: impl Into<String>, column_type: ColumnType, nullable: bool) -> Self {
		Self {
			name: name.into(),
			column_type,
			nullable,
			precision: column_type.default_precision(),
			scale: column_type.default_scale(),
			length: column_type.default_length(),
			default: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::ColumnType::*;

	#[test]
	fn test_widening_allow_list() {
		assert!(Int8.can_widen_to(Int64));
		assert!(Int16.can_widen_to(Int32));
		assert!(Int32.can_widen_to(Int64));
		assert!(Float.can_widen_to(Double));

		assert!(!Int64.can_widen_to(Int32));
		assert!(!Int32.can_widen_to(Double));
		assert!(!Double.can_widen_to(Float));
		assert!(!String.can_widen_to(ByteArray));
		assert!(!Int32.can_widen_to(Int32));
	}

	#[test]
	fn test_length_and_precision_kinds() {
		assert!(String.has_length());
		assert!(ByteArray.has_length());
		assert!(!Int32.has_length());
		assert!(Decimal.has_precision());
		assert!(!Double.has_precision());
	}
}
