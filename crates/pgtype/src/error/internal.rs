// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::Diagnostic;
use crate::fragment::Fragment;

/// Where in the crate an invariant broke.
#[derive(Clone, Copy, Debug)]
pub struct Location<'a> {
	pub file: &'a str,
	pub line: u32,
	pub column: u32,
	pub function: &'a str,
}

/// Builds the `INTERNAL_ERROR` diagnostic for a broken invariant of the type
/// system, e.g. a heterogeneous array or an ambiguous overload table.
pub fn internal_with_context(reason: impl Into<String>, location: Location<'_>) -> Diagnostic {
	let Location {
		file,
		line,
		column,
		function,
	} = location;
	let file_name = file.rsplit('/').next().unwrap_or(file);
	Diagnostic {
		code: "INTERNAL_ERROR".to_string(),
		statement: None,
		message: format!("internal error: {}", reason.into()),
		fragment: Fragment::None,
		label: Some(format!("invariant violated at {}:{}:{}", file, line, column)),
		help: Some(format!(
			"this is a bug in reifydb-pgtype {} ({}); please report it together with the statement",
			env!("CARGO_PKG_VERSION"),
			file_name
		)),
		notes: vec![format!("raised in {}", function)],
		cause: None,
	}
}
