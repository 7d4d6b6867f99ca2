// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{
	operator::UnaryOperator,
	registry::{TypePattern, UnaryRow},
};
use crate::{value::Family, volatility::Volatility};

fn row(operator: UnaryOperator, operand: Family) -> UnaryRow {
	let operand = TypePattern::Family(operand);
	UnaryRow {
		operator,
		operand,
		return_type: operand.representative(),
		volatility: Volatility::Immutable,
	}
}

pub(crate) fn base_rows() -> Vec<UnaryRow> {
	let mut rows = Vec::new();
	for family in [Family::Int, Family::Float, Family::Decimal, Family::Interval] {
		rows.push(row(UnaryOperator::Minus, family));
	}
	for family in [Family::Int, Family::Bit, Family::INet] {
		rows.push(row(UnaryOperator::Complement, family));
	}
	for operator in [UnaryOperator::Sqrt, UnaryOperator::Cbrt] {
		for family in [Family::Float, Family::Decimal] {
			rows.push(row(operator, family));
		}
	}
	rows
}
