// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// How cacheable the result of an operator or cast is, ordered from the most
/// to the least optimizable.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Volatility {
	/// Immutable, and additionally safe to evaluate below a security barrier
	/// because it reveals nothing about its arguments through errors.
	LeakProof,
	/// Same inputs always give the same output, in any context.
	Immutable,
	/// Same inputs give the same output within one statement, e.g. the result
	/// depends on the session time zone.
	Stable,
	/// May differ across calls with identical inputs.
	Volatile,
}

impl Volatility {
	/// Whether a call with constant arguments may be folded into a constant
	/// at plan time.
	pub fn is_constant_foldable(&self) -> bool {
		matches!(self, Volatility::LeakProof | Volatility::Immutable)
	}
}

impl Display for Volatility {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Volatility::LeakProof => f.write_str("leakproof"),
			Volatility::Immutable => f.write_str("immutable"),
			Volatility::Stable => f.write_str("stable"),
			Volatility::Volatile => f.write_str("volatile"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_volatility_order() {
		assert!(Volatility::LeakProof < Volatility::Immutable);
		assert!(Volatility::Immutable < Volatility::Stable);
		assert!(Volatility::Stable < Volatility::Volatile);
	}

	#[test]
	fn test_volatility_foldable() {
		assert!(Volatility::LeakProof.is_constant_foldable());
		assert!(Volatility::Immutable.is_constant_foldable());
		assert!(!Volatility::Stable.is_constant_foldable());
		assert!(!Volatility::Volatile.is_constant_foldable());
	}
}
