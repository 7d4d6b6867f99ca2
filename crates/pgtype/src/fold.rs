// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::overload::ComparisonOperator;

/// A comparison rewritten into a canonical registry key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folded {
	pub op: ComparisonOperator,
	/// Evaluate with the operands swapped.
	pub flip: bool,
	/// Negate the result of the canonical comparison.
	pub negate: bool,
}

impl Folded {
	/// Returns the operands in the order the canonical operator expects them.
	pub fn apply<T>(&self, left: T, right: T) -> (T, T) {
		if self.flip { (right, left) } else { (left, right) }
	}

	/// Maps the canonical comparison result back onto the original operator.
	pub fn result(&self, canonical: bool) -> bool {
		canonical != self.negate
	}
}

/// Rewrites `op` into one of the canonical comparison operators.
pub fn fold_comparison(op: ComparisonOperator) -> Folded {
	use ComparisonOperator::*;

	let (op, flip, negate) = match op {
		NE => (EQ, false, true),
		GT => (LT, true, false),
		GE => (LE, true, false),
		NotIn => (In, false, true),
		NotLike => (Like, false, true),
		NotILike => (ILike, false, true),
		NotSimilarTo => (SimilarTo, false, true),
		NotRegMatch => (RegMatch, false, true),
		NotRegIMatch => (RegIMatch, false, true),
		IsDistinctFrom => (IsNotDistinctFrom, false, true),
		other => (other, false, false),
	};
	Folded {
		op,
		flip,
		negate,
	}
}

static INVERSE: Lazy<HashMap<ComparisonOperator, ComparisonOperator>> = Lazy::new(build_inverse);

#[instrument(name = "pgtype::fold::build_inverse", level = "debug")]
fn build_inverse() -> HashMap<ComparisonOperator, ComparisonOperator> {
	let mut inverse = HashMap::new();
	for op in ComparisonOperator::ALL {
		let folded = fold_comparison(op).op;
		if folded != op {
			if inverse.insert(folded, op).is_some() || inverse.insert(op, folded).is_some() {
				crate::panic_internal!("comparison operators {} and {} fold ambiguously", op, folded);
			}
		}
	}
	for (op, other) in &inverse {
		if inverse.get(other) != Some(op) {
			crate::panic_internal!("inverse of {} is not an involution", op);
		}
	}
	debug!(entries = inverse.len(), "built comparison inverse table");
	inverse
}

/// The operator that `op` folds into, or the operator folding into `op`.
pub fn inverse(op: ComparisonOperator) -> Option<ComparisonOperator> {
	INVERSE.get(&op).copied()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fold_ge_flips_into_le() {
		let folded = fold_comparison(ComparisonOperator::GE);
		assert_eq!(
			folded,
			Folded {
				op: ComparisonOperator::LE,
				flip: true,
				negate: false
			}
		);
		// 5 >= 3 evaluates as 3 <= 5
		assert_eq!(folded.apply(5, 3), (3, 5));
		assert!(folded.result(3 <= 5));
	}

	#[test]
	fn test_fold_canonical_is_identity() {
		for op in ComparisonOperator::ALL.into_iter().filter(|op| !op.is_derived()) {
			let folded = fold_comparison(op);
			assert_eq!(folded.op, op);
			assert!(!folded.flip && !folded.negate);
		}
	}

	#[test]
	fn test_inverse_table() {
		assert_eq!(inverse(ComparisonOperator::NE), Some(ComparisonOperator::EQ));
		assert_eq!(inverse(ComparisonOperator::EQ), Some(ComparisonOperator::NE));
		assert_eq!(inverse(ComparisonOperator::IsNotDistinctFrom), Some(ComparisonOperator::IsDistinctFrom));
		assert_eq!(inverse(ComparisonOperator::Contains), None);
	}
}
