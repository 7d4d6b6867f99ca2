// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::{Deref, DerefMut},
};

use serde::{Deserialize, Serialize};

mod diagnostic;
pub mod internal;
mod r#macro;
mod render;

pub use render::DefaultRenderer;

use crate::{
	fragment::Fragment,
	overload::{BinaryOperator, ComparisonOperator, UnaryOperator},
	value::{Family, Type},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub statement: Option<String>,
	pub message: String,
	pub fragment: Fragment,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
	pub cause: Option<Box<Diagnostic>>,
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.code)
	}
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Diagnostic {
	fn into_diagnostic(self) -> Diagnostic {
		self
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Diagnostic);

impl Deref for Error {
	type Target = Diagnostic;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DerefMut for Error {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let out = DefaultRenderer::render_string(&self.0);
		f.write_str(out.as_str())
	}
}

impl Error {
	pub fn diagnostic(self) -> Diagnostic {
		self.0
	}
}

impl std::error::Error for Error {}

/// Distinguishes the enum construction failures.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumErrorKind {
	UnknownLabel,
	UnknownPhysical,
	NotWritable,
	Unspecified,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
	#[error("could not parse \"{}\" as type {target}", .fragment.text())]
	Parse {
		target: Type,
		fragment: Fragment,
		cause: Option<String>,
	},

	#[error("{message}")]
	OutOfRange {
		target: Type,
		message: String,
		fragment: Fragment,
	},

	#[error("unsupported cast from {from} to {to}")]
	UnsupportedCast {
		from: Family,
		to: Family,
	},

	#[error("unknown unary operator: {operator}{operand}")]
	UnaryOperatorNotFound {
		operator: UnaryOperator,
		operand: Type,
	},

	#[error("unsupported binary operator: <{left}> {operator} <{right}>")]
	BinaryOperatorNotFound {
		operator: BinaryOperator,
		left: Type,
		right: Type,
	},

	#[error("unsupported comparison operator: <{left}> {operator} <{right}>")]
	ComparisonOperatorNotFound {
		operator: ComparisonOperator,
		left: Type,
		right: Type,
	},

	#[error("{message}")]
	Enum {
		kind: EnumErrorKind,
		message: String,
		fragment: Fragment,
	},
}

impl From<TypeError> for Error {
	fn from(err: TypeError) -> Self {
		Error(err.into_diagnostic())
	}
}

impl From<Diagnostic> for Error {
	fn from(diagnostic: Diagnostic) -> Self {
		Error(diagnostic)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_type_error_display() {
		let err = TypeError::Parse {
			target: Type::Bool,
			fragment: Fragment::internal("maybe"),
			cause: None,
		};
		assert_eq!(err.to_string(), "could not parse \"maybe\" as type bool");

		let err = TypeError::UnsupportedCast {
			from: Family::Box2D,
			to: Family::Int,
		};
		assert_eq!(err.to_string(), "unsupported cast from box2d to int");
	}

	#[test]
	fn test_error_derefs_to_diagnostic() {
		let err: Error = TypeError::UnsupportedCast {
			from: Family::Box2D,
			to: Family::Int,
		}
		.into();
		assert_eq!(err.code, "CAST_001");
		assert_eq!(err.diagnostic().message, "unsupported cast from box2d to int");
	}
}
