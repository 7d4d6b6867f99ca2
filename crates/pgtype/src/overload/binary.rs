// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{
	operator::BinaryOperator,
	registry::{BinaryRow, TypePattern},
};
use crate::{value::Family as F, volatility::Volatility};

type Signature = (TypePattern, TypePattern, TypePattern);

fn sig(left: F, right: F, ret: F) -> Signature {
	(left.into(), right.into(), ret.into())
}

/// Same family arithmetic and the decimal/int promotions.
fn numeric(int_result: F) -> Vec<Signature> {
	vec![
		sig(F::Int, F::Int, int_result),
		sig(F::Float, F::Float, F::Float),
		sig(F::Decimal, F::Decimal, F::Decimal),
		sig(F::Decimal, F::Int, F::Decimal),
		sig(F::Int, F::Decimal, F::Decimal),
	]
}

fn push(rows: &mut Vec<BinaryRow>, operator: BinaryOperator, signatures: Vec<Signature>) {
	push_with(rows, operator, signatures, Volatility::Immutable);
}

fn push_with(rows: &mut Vec<BinaryRow>, operator: BinaryOperator, signatures: Vec<Signature>, volatility: Volatility) {
	for (left, right, ret) in signatures {
		rows.push(BinaryRow {
			operator,
			left,
			right,
			return_type: ret.representative(),
			nullable_args: false,
			volatility,
		});
	}
}

pub(crate) fn base_rows() -> Vec<BinaryRow> {
	use BinaryOperator::*;

	let string_array = TypePattern::ArrayOf(F::String);
	let mut rows = Vec::new();

	for operator in [Bitand, Bitor] {
		push(
			&mut rows,
			operator,
			vec![sig(F::Int, F::Int, F::Int), sig(F::Bit, F::Bit, F::Bit), sig(F::INet, F::INet, F::INet)],
		);
	}
	push(&mut rows, Bitxor, vec![sig(F::Int, F::Int, F::Int), sig(F::Bit, F::Bit, F::Bit)]);

	let mut plus = numeric(F::Int);
	plus.extend([
		sig(F::Date, F::Int, F::Date),
		sig(F::Int, F::Date, F::Date),
		sig(F::Date, F::Time, F::Timestamp),
		sig(F::Time, F::Date, F::Timestamp),
		sig(F::Date, F::TimeTZ, F::TimestampTZ),
		sig(F::TimeTZ, F::Date, F::TimestampTZ),
		sig(F::Time, F::Interval, F::Time),
		sig(F::Interval, F::Time, F::Time),
		sig(F::TimeTZ, F::Interval, F::TimeTZ),
		sig(F::Interval, F::TimeTZ, F::TimeTZ),
		sig(F::Timestamp, F::Interval, F::Timestamp),
		sig(F::Interval, F::Timestamp, F::Timestamp),
	]);
	push(&mut rows, Plus, plus);
	push_with(
		&mut rows,
		Plus,
		vec![sig(F::TimestampTZ, F::Interval, F::TimestampTZ), sig(F::Interval, F::TimestampTZ, F::TimestampTZ)],
		Volatility::Stable,
	);
	push(
		&mut rows,
		Plus,
		vec![
			sig(F::Interval, F::Interval, F::Interval),
			sig(F::Date, F::Interval, F::Timestamp),
			sig(F::Interval, F::Date, F::Timestamp),
			sig(F::INet, F::Int, F::INet),
			sig(F::Int, F::INet, F::INet),
		],
	);

	let mut minus = numeric(F::Int);
	minus.extend([
		sig(F::Date, F::Int, F::Date),
		sig(F::Date, F::Date, F::Int),
		sig(F::Date, F::Time, F::Timestamp),
		sig(F::Time, F::Time, F::Interval),
		sig(F::Timestamp, F::Timestamp, F::Interval),
		sig(F::TimestampTZ, F::TimestampTZ, F::Interval),
	]);
	push(&mut rows, Minus, minus);
	push_with(
		&mut rows,
		Minus,
		vec![sig(F::Timestamp, F::TimestampTZ, F::Interval), sig(F::TimestampTZ, F::Timestamp, F::Interval)],
		Volatility::Stable,
	);
	push(
		&mut rows,
		Minus,
		vec![
			sig(F::Time, F::Interval, F::Time),
			sig(F::TimeTZ, F::Interval, F::TimeTZ),
			sig(F::Timestamp, F::Interval, F::Timestamp),
		],
	);
	push_with(&mut rows, Minus, vec![sig(F::TimestampTZ, F::Interval, F::TimestampTZ)], Volatility::Stable);
	push(
		&mut rows,
		Minus,
		vec![
			sig(F::Date, F::Interval, F::Timestamp),
			sig(F::Interval, F::Interval, F::Interval),
			sig(F::Json, F::String, F::Json),
			sig(F::Json, F::Int, F::Json),
			(F::Json.into(), string_array, F::Json.into()),
			sig(F::INet, F::INet, F::Int),
			sig(F::INet, F::Int, F::INet),
		],
	);

	let mut mult = numeric(F::Int);
	mult.extend([
		sig(F::Int, F::Interval, F::Interval),
		sig(F::Interval, F::Int, F::Interval),
		sig(F::Interval, F::Float, F::Interval),
		sig(F::Float, F::Interval, F::Interval),
		sig(F::Decimal, F::Interval, F::Interval),
		sig(F::Interval, F::Decimal, F::Interval),
	]);
	push(&mut rows, Mult, mult);

	let mut div = numeric(F::Decimal);
	div.extend([sig(F::Interval, F::Int, F::Interval), sig(F::Interval, F::Float, F::Interval)]);
	push(&mut rows, Div, div);

	push(&mut rows, FloorDiv, numeric(F::Int));
	push(&mut rows, Mod, numeric(F::Int));

	push(
		&mut rows,
		Concat,
		vec![
			sig(F::String, F::String, F::String),
			sig(F::Bytes, F::Bytes, F::Bytes),
			sig(F::Bit, F::Bit, F::Bit),
			sig(F::Json, F::Json, F::Json),
		],
	);

	for shift in [LShift, RShift] {
		push(
			&mut rows,
			shift,
			vec![sig(F::Int, F::Int, F::Int), sig(F::Bit, F::Int, F::Bit), sig(F::INet, F::INet, F::Bool)],
		);
	}

	push(&mut rows, Pow, numeric(F::Int));

	push(&mut rows, JSONFetchVal, vec![sig(F::Json, F::String, F::Json), sig(F::Json, F::Int, F::Json)]);
	push(&mut rows, JSONFetchValPath, vec![(F::Json.into(), string_array, F::Json.into())]);
	push(&mut rows, JSONFetchText, vec![sig(F::Json, F::String, F::String), sig(F::Json, F::Int, F::String)]);
	push(&mut rows, JSONFetchTextPath, vec![(F::Json.into(), string_array, F::String.into())]);

	rows
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::Type;

	fn find(operator: BinaryOperator, left: F, right: F) -> BinaryRow {
		base_rows()
			.into_iter()
			.find(|r| r.operator == operator && r.left == left.into() && r.right == right.into())
			.unwrap()
	}

	#[test]
	fn test_int_division_yields_decimal() {
		assert_eq!(find(BinaryOperator::Div, F::Int, F::Int).return_type, Type::Decimal);
		assert_eq!(find(BinaryOperator::FloorDiv, F::Int, F::Int).return_type, Type::Int8);
	}

	#[test]
	fn test_stable_rows_depend_on_session_zone() {
		let stable: Vec<_> = base_rows().into_iter().filter(|r| r.volatility == Volatility::Stable).collect();
		assert_eq!(stable.len(), 5);
		assert!(stable.iter().all(|r| r.left == F::TimestampTZ.into() || r.right == F::TimestampTZ.into()));
	}

	#[test]
	fn test_inet_shift_is_containment() {
		assert_eq!(find(BinaryOperator::LShift, F::INet, F::INet).return_type, Type::Bool);
		assert_eq!(find(BinaryOperator::Minus, F::INet, F::INet).return_type, Type::Int8);
	}

	#[test]
	fn test_json_path_operators_take_string_arrays() {
		let row = base_rows().into_iter().find(|r| r.operator == BinaryOperator::JSONFetchTextPath).unwrap();
		assert_eq!(row.right, TypePattern::ArrayOf(F::String));
		assert_eq!(row.return_type, Type::Text);
	}
}
