// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use tracing::instrument;

use super::{out_of_range, parse_error};
use crate::{
	fragment::Fragment,
	value::{BitArray, Type, hex},
};

/// Parses the `\x` hex form, or otherwise the escape form in which `\\` is a
/// backslash and `\ooo` an octal byte.
#[instrument(name = "pgtype::parse::bytes", level = "trace", skip_all)]
pub fn parse_bytes(fragment: Fragment) -> crate::Result<Vec<u8>> {
	let text = fragment.text();
	if let Some(digits) = text.strip_prefix("\\x").or_else(|| text.strip_prefix("\\X")) {
		return hex::decode(digits)
			.ok_or_else(|| parse_error(&Type::Bytes, fragment.clone(), Some("invalid hexadecimal data".to_string())));
	}
	decode_escape(text)
		.ok_or_else(|| parse_error(&Type::Bytes, fragment.clone(), Some("invalid input syntax for type bytea".into())))
}

fn decode_escape(text: &str) -> Option<Vec<u8>> {
	let bytes = text.as_bytes();
	let mut out = Vec::with_capacity(bytes.len());
	let mut i = 0;
	while i < bytes.len() {
		if bytes[i] != b'\\' {
			out.push(bytes[i]);
			i += 1;
			continue;
		}
		match bytes.get(i + 1) {
			Some(b'\\') => {
				out.push(b'\\');
				i += 2;
			}
			Some(b'0'..=b'3') => {
				let digits = bytes.get(i + 1..i + 4)?;
				if !digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
					return None;
				}
				out.push((digits[0] - b'0') * 64 + (digits[1] - b'0') * 8 + (digits[2] - b'0'));
				i += 4;
			}
			_ => return None,
		}
	}
	Some(out)
}

/// Parses a string of `0` and `1`. `bit(n)` requires exactly n bits and
/// `varbit(n)` at most n.
#[instrument(name = "pgtype::parse::bit", level = "trace", skip_all)]
pub fn parse_bit(ty: &Type, fragment: Fragment) -> crate::Result<BitArray> {
	let Some(bits) = BitArray::parse(fragment.text()) else {
		return Err(parse_error(ty, fragment, Some("not a valid binary digit".to_string())));
	};
	match ty {
		Type::Bit(width) if bits.len() != *width as usize => Err(out_of_range(
			ty,
			fragment,
			format!("bit string length {} does not match type bit({})", bits.len(), width),
		)),
		Type::VarBit(Some(width)) if bits.len() > *width as usize => Err(out_of_range(
			ty,
			fragment,
			format!("bit string length {} too large for type varbit({})", bits.len(), width),
		)),
		_ => Ok(bits),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_bytes_hex() {
		assert_eq!(parse_bytes(Fragment::testing("\\xdeadBEEF")).unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
		assert!(parse_bytes(Fragment::testing("\\xabc")).is_err());
	}

	#[test]
	fn test_bytes_escape() {
		assert_eq!(parse_bytes(Fragment::testing("ab\\\\c")).unwrap(), b"ab\\c".to_vec());
		assert_eq!(parse_bytes(Fragment::testing("\\001\\377")).unwrap(), vec![1, 255]);
		assert!(parse_bytes(Fragment::testing("\\q")).is_err());
		assert!(parse_bytes(Fragment::testing("\\01")).is_err());
	}

	#[test]
	fn test_bit_widths() {
		assert_eq!(parse_bit(&Type::VarBit(None), Fragment::testing("0101")).unwrap().to_string(), "0101");
		assert!(parse_bit(&Type::Bit(4), Fragment::testing("0101")).is_ok());
		assert_eq!(parse_bit(&Type::Bit(4), Fragment::testing("01")).unwrap_err().code, "PARSE_002");
		assert_eq!(parse_bit(&Type::VarBit(Some(2)), Fragment::testing("011")).unwrap_err().code, "PARSE_002");
		assert_eq!(parse_bit(&Type::VarBit(None), Fragment::testing("012")).unwrap_err().code, "PARSE_001");
	}
}
