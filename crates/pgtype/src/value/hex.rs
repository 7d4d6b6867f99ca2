// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

pub fn encode(bytes: &[u8]) -> String {
	let mut out = String::with_capacity(bytes.len() * 2);
	for b in bytes {
		out.push(HEX_DIGITS[(b >> 4) as usize] as char);
		out.push(HEX_DIGITS[(b & 0x0f) as usize] as char);
	}
	out
}

pub fn encode_upper(bytes: &[u8]) -> String {
	encode(bytes).to_uppercase()
}

fn nibble(c: u8) -> Option<u8> {
	match c {
		b'0'..=b'9' => Some(c - b'0'),
		b'a'..=b'f' => Some(c - b'a' + 10),
		b'A'..=b'F' => Some(c - b'A' + 10),
		_ => None,
	}
}

/// Decodes an even length hex string. Returns `None` on odd length or a
/// non hex character.
pub fn decode(s: &str) -> Option<Vec<u8>> {
	let bytes = s.as_bytes();
	if bytes.len() % 2 != 0 {
		return None;
	}
	bytes.chunks(2).map(|pair| Some(nibble(pair[0])? << 4 | nibble(pair[1])?)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hex_encode() {
		assert_eq!(encode(b"Hello"), "48656c6c6f");
		assert_eq!(encode_upper(&[0xde, 0xad]), "DEAD");
		assert_eq!(encode(b""), "");
	}

	#[test]
	fn test_hex_decode() {
		assert_eq!(decode("48656c6c6f"), Some(b"Hello".to_vec()));
		assert_eq!(decode("DEad"), Some(vec![0xde, 0xad]));
		assert_eq!(decode("abc"), None);
		assert_eq!(decode("zz"), None);
	}
}
