// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{
	operator::ComparisonOperator,
	registry::{ComparisonRow, TypePattern},
};
use crate::{
	value::Family as F,
	volatility::Volatility::{self, Immutable, LeakProof, Stable},
};

/// Families comparable with themselves through `=`, `<`, `<=` and
/// `IS NOT DISTINCT FROM`. `Enum` and `CollatedString` stand for any enum
/// and any collated string.
const SAME_FAMILY: [(F, Volatility); 23] = [
	(F::Enum, Immutable),
	(F::Bool, LeakProof),
	(F::Bytes, LeakProof),
	(F::Date, LeakProof),
	(F::Decimal, Immutable),
	(F::CollatedString, LeakProof),
	(F::Float, LeakProof),
	(F::Box2D, LeakProof),
	(F::Geography, LeakProof),
	(F::Geometry, LeakProof),
	(F::INet, LeakProof),
	(F::Int, LeakProof),
	(F::Interval, LeakProof),
	(F::Json, Immutable),
	(F::Oid, LeakProof),
	(F::String, LeakProof),
	(F::Time, LeakProof),
	(F::TimeTZ, LeakProof),
	(F::Timestamp, LeakProof),
	(F::TimestampTZ, LeakProof),
	(F::Uuid, LeakProof),
	(F::Bit, LeakProof),
	(F::Tuple, Immutable),
];

const CROSS_FAMILY: [(F, F, Volatility); 16] = [
	(F::Date, F::Timestamp, Immutable),
	(F::Date, F::TimestampTZ, Stable),
	(F::Decimal, F::Float, LeakProof),
	(F::Decimal, F::Int, LeakProof),
	(F::Float, F::Decimal, LeakProof),
	(F::Float, F::Int, LeakProof),
	(F::Int, F::Decimal, LeakProof),
	(F::Int, F::Float, LeakProof),
	(F::Int, F::Oid, LeakProof),
	(F::Oid, F::Int, LeakProof),
	(F::Timestamp, F::Date, Immutable),
	(F::Timestamp, F::TimestampTZ, Stable),
	(F::TimestampTZ, F::Date, Stable),
	(F::TimestampTZ, F::Timestamp, Stable),
	(F::Time, F::TimeTZ, Stable),
	(F::TimeTZ, F::Time, Stable),
];

/// Left operand families of `IN`; the right operand is always a tuple.
const IN_FAMILIES: [F; 23] = [
	F::Enum,
	F::Bool,
	F::Bytes,
	F::Date,
	F::Decimal,
	F::CollatedString,
	F::Tuple,
	F::Float,
	F::Box2D,
	F::Geography,
	F::Geometry,
	F::INet,
	F::Int,
	F::Interval,
	F::Json,
	F::Oid,
	F::String,
	F::Time,
	F::TimeTZ,
	F::Timestamp,
	F::TimestampTZ,
	F::Uuid,
	F::Bit,
];

fn row(
	operator: ComparisonOperator,
	left: impl Into<TypePattern>,
	right: impl Into<TypePattern>,
	nullable_args: bool,
	volatility: Volatility,
) -> ComparisonRow {
	ComparisonRow {
		operator,
		left: left.into(),
		right: right.into(),
		nullable_args,
		volatility,
		is_preferred: false,
	}
}

fn ordering_rows(operator: ComparisonOperator, nullable_args: bool) -> Vec<ComparisonRow> {
	let mut rows = Vec::new();
	for (family, volatility) in SAME_FAMILY {
		// jsonb has no ordering
		if family == F::Json && matches!(operator, ComparisonOperator::LT | ComparisonOperator::LE) {
			continue;
		}
		if family == F::Tuple {
			continue;
		}
		rows.push(row(operator, family, family, nullable_args, volatility));
	}
	for (left, right, volatility) in CROSS_FAMILY {
		rows.push(row(operator, left, right, nullable_args, volatility));
	}
	rows.push(row(operator, F::Tuple, F::Tuple, nullable_args, Immutable));
	rows
}

/// Four rows of a box2d/geometry bounding box predicate.
fn box2d_rows(operator: ComparisonOperator) -> Vec<ComparisonRow> {
	vec![
		row(operator, F::Box2D, F::Box2D, false, Immutable),
		row(operator, F::Box2D, F::Geometry, false, Immutable),
		row(operator, F::Geometry, F::Box2D, false, Immutable),
		row(operator, F::Geometry, F::Geometry, false, Immutable),
	]
}

pub(crate) fn base_rows() -> Vec<ComparisonRow> {
	use ComparisonOperator::*;

	let string_array = TypePattern::ArrayOf(F::String);
	let mut rows = Vec::new();

	rows.extend(ordering_rows(EQ, false));
	rows.extend(ordering_rows(LT, false));
	rows.extend(ordering_rows(LE, false));

	rows.push(ComparisonRow {
		operator: IsNotDistinctFrom,
		left: F::Unknown.into(),
		right: F::Unknown.into(),
		nullable_args: true,
		volatility: LeakProof,
		is_preferred: true,
	});
	rows.extend(ordering_rows(IsNotDistinctFrom, true));

	for family in IN_FAMILIES {
		rows.push(row(In, family, F::Tuple, true, LeakProof));
	}

	for operator in [Like, ILike, SimilarTo] {
		rows.push(row(operator, F::String, F::String, false, LeakProof));
	}

	rows.push(row(RegMatch, F::String, F::String, false, Immutable));
	rows.extend(box2d_rows(RegMatch));
	rows.push(row(RegIMatch, F::String, F::String, false, Immutable));

	rows.push(row(JSONExists, F::Json, F::String, false, Immutable));
	rows.push(row(JSONSomeExists, F::Json, string_array, false, Immutable));
	rows.push(row(JSONAllExists, F::Json, string_array, false, Immutable));

	for operator in [Contains, ContainedBy] {
		rows.push(row(operator, F::Array, F::Array, false, Immutable));
		rows.push(row(operator, F::Json, F::Json, false, Immutable));
	}

	rows.push(row(Overlaps, F::Array, F::Array, false, Immutable));
	rows.push(row(Overlaps, F::INet, F::INet, false, Immutable));
	rows.extend(box2d_rows(Overlaps));

	rows
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rows_of(operator: ComparisonOperator) -> Vec<ComparisonRow> {
		base_rows().into_iter().filter(|r| r.operator == operator).collect()
	}

	#[test]
	fn test_no_derived_operator_is_a_key() {
		assert!(base_rows().iter().all(|r| !r.operator.is_derived()));
	}

	#[test]
	fn test_jsonb_is_equality_only() {
		let json = TypePattern::Family(F::Json);
		assert!(rows_of(ComparisonOperator::EQ).iter().any(|r| r.left == json && r.right == json));
		assert!(!rows_of(ComparisonOperator::LT).iter().any(|r| r.left == json && r.right == json));
		assert!(!rows_of(ComparisonOperator::LE).iter().any(|r| r.left == json && r.right == json));
	}

	#[test]
	fn test_is_not_distinct_from_is_nullable() {
		let rows = rows_of(ComparisonOperator::IsNotDistinctFrom);
		assert!(rows.iter().all(|r| r.nullable_args));
		assert_eq!(rows.iter().filter(|r| r.is_preferred).count(), 1);
		assert_eq!(rows.len(), rows_of(ComparisonOperator::EQ).len() + 1);
	}

	#[test]
	fn test_in_rows_take_a_tuple() {
		let rows = rows_of(ComparisonOperator::In);
		assert_eq!(rows.len(), 23);
		assert!(rows.iter().all(|r| r.right == F::Tuple.into() && r.nullable_args && r.volatility == LeakProof));
	}

	#[test]
	fn test_cross_family_time_rows_are_stable() {
		let row = rows_of(ComparisonOperator::EQ)
			.into_iter()
			.find(|r| r.left == F::Time.into() && r.right == F::TimeTZ.into())
			.unwrap();
		assert_eq!(row.volatility, Stable);
	}
}
