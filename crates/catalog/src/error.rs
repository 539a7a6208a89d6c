// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use halyard_type::{Diagnostic, IntoDiagnostic};

/// Kind of catalog object named in an error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKind {
	Schema,
	Table,
	Column,
	Index,
	Zone,
}

impl Display for ObjectKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ObjectKind::Schema => f.write_str("schema"),
			ObjectKind::Table => f.write_str("table"),
			ObjectKind::Column => f.write_str("column"),
			ObjectKind::Index => f.write_str("index"),
			ObjectKind::Zone => f.write_str("distribution zone"),
		}
	}
}

/// A DDL statement that is not valid against the catalog it was checked
/// against. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
	#[error("{kind} '{name}' already exists")]
	DuplicateName {
		kind: ObjectKind,
		name: String,
	},

	#[error("{kind} '{name}' not found")]
	NotFound {
		kind: ObjectKind,
		name: String,
	},

	#[error("invalid definition: {0}")]
	InvalidDefinition(String),

	#[error("unsupported column change: {0}")]
	UnsupportedColumnChange(String),

	#[error("distribution zone '{zone}' is assigned to table '{table}'")]
	ZoneBoundToTable {
		zone: String,
		table: String,
	},

	#[error("{0}")]
	DefaultZoneProtected(String),
}

impl ValidationError {
	pub fn duplicate(kind: ObjectKind, name: impl Into<String>) -> Self {
		ValidationError::DuplicateName {
			kind,
			name: name.into(),
		}
	}

	pub fn not_found(kind: ObjectKind, name: impl Into<String>) -> Self {
		ValidationError::NotFound {
			kind,
			name: name.into(),
		}
	}

	pub fn invalid(message: impl Into<String>) -> Self {
		ValidationError::InvalidDefinition(message.into())
	}

	pub fn unsupported_change(message: impl Into<String>) -> Self {
		ValidationError::UnsupportedColumnChange(message.into())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Validation(#[from] ValidationError),

	#[error("max retry limit exceeded: {attempts}")]
	RetryLimitExceeded {
		attempts: usize,
	},

	#[error("update log failure: {0}")]
	Log(String),

	#[error("catalog invariant violated: {0}")]
	Invariant(String),

	#[error("update codec failure: {0}")]
	Codec(String),

	#[error("catalog manager is stopped")]
	Stopped,
}

impl Error {
	pub fn invariant(message: impl Into<String>) -> Self {
		Error::Invariant(message.into())
	}

	pub fn is_validation(&self) -> bool {
		matches!(self, Error::Validation(_))
	}

	pub fn diagnostic(&self) -> Diagnostic {
		self.clone().into_diagnostic()
	}
}

impl From<postcard::Error> for Error {
	fn from(err: postcard::Error) -> Self {
		Error::Codec(err.to_string())
	}
}

impl IntoDiagnostic for ValidationError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			ValidationError::DuplicateName {
				..
			} => Diagnostic::new("CA_001", message).with_help("choose a different name"),
			ValidationError::NotFound {
				..
			} => Diagnostic::new("CA_002", message),
			ValidationError::InvalidDefinition(_) => Diagnostic::new("CA_003", message),
			ValidationError::UnsupportedColumnChange(_) => Diagnostic::new("CA_004", message)
				.with_help("only widening type changes and dropping NOT NULL are supported"),
			ValidationError::ZoneBoundToTable {
				..
			} => Diagnostic::new("CA_005", message)
				.with_help("drop or move the tables assigned to the zone first"),
			ValidationError::DefaultZoneProtected(_) => Diagnostic::new("CA_006", message),
		}
	}
}

impl IntoDiagnostic for Error {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			Error::Validation(err) => err.into_diagnostic(),
			Error::RetryLimitExceeded {
				attempts,
			} => Diagnostic::new("CA_010", message)
				.with_help("concurrent DDL kept winning the race, retry the statement")
				.with_note(format!("attempts: {}", attempts)),
			Error::Log(_) => Diagnostic::new("CA_011", message),
			Error::Invariant(_) => Diagnostic::new("CA_012", message),
			Error::Codec(_) => Diagnostic::new("CA_013", message),
			Error::Stopped => Diagnostic::new("CA_014", message),
		}
	}
}
