// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter, Write};

use serde::{Deserialize, Serialize};

/// A string of bits, packed most significant bit first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BitArray {
	bytes: Vec<u8>,
	len: usize,
}

impl BitArray {
	pub fn from_bits(bits: impl IntoIterator<Item = bool>) -> Self {
		let mut result = Self::default();
		for bit in bits {
			result.push(bit);
		}
		result
	}

	/// Parses a string of `0` and `1` characters.
	pub fn parse(s: &str) -> Option<Self> {
		let mut result = Self::default();
		for c in s.chars() {
			match c {
				'0' => result.push(false),
				'1' => result.push(true),
				_ => return None,
			}
		}
		Some(result)
	}

	pub fn push(&mut self, bit: bool) {
		if self.len % 8 == 0 {
			self.bytes.push(0);
		}
		if bit {
			let last = self.bytes.len() - 1;
			self.bytes[last] |= 0x80 >> (self.len % 8);
		}
		self.len += 1;
	}

	pub fn get(&self, idx: usize) -> Option<bool> {
		if idx >= self.len {
			return None;
		}
		Some(self.bytes[idx / 8] & (0x80 >> (idx % 8)) != 0)
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub(crate) fn heap_size(&self) -> usize {
		self.bytes.capacity()
	}
}

impl Display for BitArray {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		for idx in 0..self.len {
			f.write_char(if self.get(idx) == Some(true) {
				'1'
			} else {
				'0'
			})?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_bit_array_parse() {
		let bits = BitArray::parse("101100111").unwrap();
		assert_eq!(bits.len(), 9);
		assert_eq!(bits.get(0), Some(true));
		assert_eq!(bits.get(1), Some(false));
		assert_eq!(bits.get(8), Some(true));
		assert_eq!(bits.get(9), None);
		assert_eq!(bits.to_string(), "101100111");
	}

	#[test]
	fn test_bit_array_rejects_other_chars() {
		assert!(BitArray::parse("10a").is_none());
		assert!(BitArray::parse("").unwrap().is_empty());
	}

	#[test]
	fn test_bit_array_from_bits() {
		assert_eq!(BitArray::from_bits([true, false, true]), BitArray::parse("101").unwrap());
	}
}
