// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use tracing::instrument;

use super::parse_error;
use crate::{fragment::Fragment, value::Type};

/// Parses true, false, yes, no, on, off or any case insensitive prefix of
/// them that is not ambiguous, plus `1` and `0`.
#[instrument(name = "pgtype::parse::bool", level = "trace", skip_all)]
pub fn parse_bool(fragment: Fragment) -> crate::Result<bool> {
	let value = fragment.text().trim();
	let parsed = match value.as_bytes().first() {
		Some(b't' | b'T') if is_prefix_of(value, "true") => Some(true),
		Some(b'f' | b'F') if is_prefix_of(value, "false") => Some(false),
		Some(b'y' | b'Y') if is_prefix_of(value, "yes") => Some(true),
		Some(b'n' | b'N') if is_prefix_of(value, "no") => Some(false),
		Some(b'1') if value == "1" => Some(true),
		Some(b'0') if value == "0" => Some(false),
		// a lone "o" could be on or off
		Some(b'o' | b'O') if value.len() > 1 => {
			if is_prefix_of(value, "on") {
				Some(true)
			} else if is_prefix_of(value, "off") {
				Some(false)
			} else {
				None
			}
		}
		_ => None,
	};
	parsed.ok_or_else(|| parse_error(&Type::Bool, fragment, Some("invalid bool value".to_string())))
}

fn is_prefix_of(value: &str, word: &str) -> bool {
	value.len() <= word.len() && word[..value.len()].eq_ignore_ascii_case(value)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(s: &str) -> crate::Result<bool> {
		parse_bool(Fragment::testing(s))
	}

	#[test]
	fn test_bool_words_and_prefixes() {
		assert_eq!(parse("true").unwrap(), true);
		assert_eq!(parse("T").unwrap(), true);
		assert_eq!(parse("fAl").unwrap(), false);
		assert_eq!(parse("  YES").unwrap(), true);
		assert_eq!(parse("n").unwrap(), false);
		assert_eq!(parse("on").unwrap(), true);
		assert_eq!(parse("OF").unwrap(), false);
		assert_eq!(parse("1").unwrap(), true);
		assert_eq!(parse("0").unwrap(), false);
	}

	#[test]
	fn test_bool_rejects() {
		assert!(parse("o").is_err());
		assert!(parse("truex").is_err());
		assert!(parse("10").is_err());
		assert!(parse("").is_err());
		assert!(parse("maybe").is_err());
		assert_eq!(parse("maybe").unwrap_err().code, "PARSE_001");
	}
}
