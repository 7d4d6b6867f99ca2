// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use reifydb_pgtype::{ComparisonOperator, Registry, Type, fold::inverse, fold_comparison};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_test_writer().try_init();
}

#[test]
fn test_inverse_is_an_involution() {
	init_tracing();
	for op in ComparisonOperator::ALL {
		if let Some(other) = inverse(op) {
			assert_eq!(inverse(other), Some(op), "{}", op);
			assert_ne!(other, op);
		}
	}
}

#[test]
fn test_every_derived_operator_folds_to_a_key() {
	init_tracing();
	for op in ComparisonOperator::ALL.into_iter().filter(|op| op.is_derived()) {
		let folded = fold_comparison(op);
		assert!(!folded.op.is_derived(), "{} folds into {}", op, folded.op);
		assert!(folded.flip || folded.negate, "{}", op);
		assert_eq!(inverse(op), Some(folded.op));
	}
}

#[test]
fn test_folded_comparison_agrees_with_direct_evaluation() {
	init_tracing();
	let canonical = |op: ComparisonOperator, l: i64, r: i64| match op {
		ComparisonOperator::EQ => l == r,
		ComparisonOperator::LT => l < r,
		ComparisonOperator::LE => l <= r,
		other => panic!("not a numeric comparison: {}", other),
	};
	let direct = |op: ComparisonOperator, l: i64, r: i64| match op {
		ComparisonOperator::NE => l != r,
		ComparisonOperator::GT => l > r,
		ComparisonOperator::GE => l >= r,
		other => canonical(other, l, r),
	};
	for op in [ComparisonOperator::NE, ComparisonOperator::GT, ComparisonOperator::GE] {
		for (l, r) in [(5, 3), (3, 5), (4, 4)] {
			let folded = fold_comparison(op);
			let (a, b) = folded.apply(l, r);
			assert_eq!(folded.result(canonical(folded.op, a, b)), direct(op, l, r), "{} {} {}", l, op, r);
		}
	}
}

#[test]
fn test_folded_key_resolves_in_registry() {
	init_tracing();
	let registry = Registry::global();
	for op in [ComparisonOperator::GE, ComparisonOperator::NE, ComparisonOperator::IsDistinctFrom] {
		let folded = fold_comparison(op);
		let (left, right) = folded.apply(&Type::Date, &Type::TimestampTZ);
		assert!(registry.lookup_comparison(folded.op, left, right).is_some(), "{}", op);
	}
}
