// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The piece of input text a diagnostic points at.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Fragment {
	/// No fragment information available
	#[default]
	None,

	/// Fragment from a statement with position information
	Statement {
		text: String,
		line: u32,
		column: u32,
	},

	/// Fragment from internal/runtime code, e.g. a value handed to a parser
	Internal {
		text: String,
	},
}

impl Fragment {
	pub fn internal(text: impl Into<String>) -> Self {
		Fragment::Internal {
			text: text.into(),
		}
	}

	pub fn statement(text: impl Into<String>, line: u32, column: u32) -> Self {
		Fragment::Statement {
			text: text.into(),
			line,
			column,
		}
	}

	pub fn testing(text: &str) -> Self {
		Self::statement(text, 1, 0)
	}

	pub fn text(&self) -> &str {
		match self {
			Fragment::None => "",
			Fragment::Statement {
				text,
				..
			}
			| Fragment::Internal {
				text,
			} => text,
		}
	}

	/// Returns the sub-fragment of `length` characters starting at character `offset`.
	pub fn sub_fragment(&self, offset: usize, length: usize) -> Fragment {
		let sub: String = self.text().chars().skip(offset).take(length).collect();
		match self {
			Fragment::None => Fragment::None,
			Fragment::Statement {
				line,
				column,
				..
			} => Fragment::Statement {
				text: sub,
				line: *line,
				column: *column + offset as u32,
			},
			Fragment::Internal {
				..
			} => Fragment::Internal {
				text: sub,
			},
		}
	}
}

impl Display for Fragment {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.text())
	}
}

impl From<&str> for Fragment {
	fn from(text: &str) -> Self {
		Fragment::internal(text)
	}
}

impl From<String> for Fragment {
	fn from(text: String) -> Self {
		Fragment::internal(text)
	}
}
