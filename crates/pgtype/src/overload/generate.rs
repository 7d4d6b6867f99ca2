// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use tracing::{debug, instrument};

use super::{
	operator::{BinaryOperator, ComparisonOperator},
	registry::{BaseTables, BinaryRow, ComparisonRow, Registry, Table, TypePattern, count},
};
use crate::{value::Family, volatility::Volatility};

/// Adds the array entries derived from the scalar rows and seals the tables
/// into a [`Registry`]. Must run after the base tables are complete.
#[instrument(name = "pgtype::overload::generate_derived_entries", level = "debug", skip_all)]
pub fn generate_derived_entries(mut base: BaseTables) -> Registry {
	let before = count(&base.binary) + count(&base.comparison);
	generate_array_concat(&mut base.binary);
	generate_array_comparisons(&mut base.comparison);
	debug!(generated = count(&base.binary) + count(&base.comparison) - before, "generated array overloads");
	Registry::from_tables(base)
}

fn concat_row(left: TypePattern, right: TypePattern, family: Family) -> BinaryRow {
	BinaryRow {
		operator: BinaryOperator::Concat,
		left,
		right,
		return_type: TypePattern::ArrayOf(family).representative(),
		nullable_args: true,
		volatility: Volatility::Immutable,
	}
}

fn generate_array_concat(binary: &mut Table<BinaryOperator, BinaryRow>) {
	let rows = binary.entry(BinaryOperator::Concat).or_default();
	for family in Family::SCALARS {
		rows.push(concat_row(TypePattern::ArrayOf(family), TypePattern::Family(family), family));
		rows.push(concat_row(TypePattern::Family(family), TypePattern::ArrayOf(family), family));
	}
	for family in Family::SCALARS {
		rows.push(concat_row(TypePattern::ArrayOf(family), TypePattern::ArrayOf(family), family));
	}
}

/// The volatility of `family = family`. Every generated array comparison
/// mirrors it.
fn eq_volatility(
	comparison: &Table<ComparisonOperator, ComparisonRow>,
	operator: ComparisonOperator,
	family: Family,
) -> Volatility {
	let key = TypePattern::Family(family);
	let eq_row = comparison
		.get(&ComparisonOperator::EQ)
		.and_then(|rows| rows.iter().find(|row| row.left == key && row.right == key));
	match eq_row {
		Some(row) => row.volatility,
		None => crate::panic_internal!("could not find comparison op {}({},{})", operator, family, family),
	}
}

fn generate_array_comparisons(comparison: &mut Table<ComparisonOperator, ComparisonRow>) {
	for family in Family::SCALARS {
		let array = TypePattern::ArrayOf(family);
		for (operator, nullable_args) in [
			(ComparisonOperator::EQ, false),
			(ComparisonOperator::LE, false),
			(ComparisonOperator::LT, false),
			(ComparisonOperator::IsNotDistinctFrom, true),
		] {
			let volatility = eq_volatility(comparison, operator, family);
			comparison.entry(operator).or_default().push(ComparisonRow {
				operator,
				left: array,
				right: array,
				nullable_args,
				volatility,
				is_preferred: false,
			});
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::overload::registry::build_base_tables;

	#[test]
	fn test_concat_rows_per_scalar() {
		let registry = generate_derived_entries(build_base_tables());
		let generated: Vec<_> =
			registry.binary_rows(BinaryOperator::Concat).iter().filter(|row| row.nullable_args).collect();
		assert_eq!(generated.len(), Family::SCALARS.len() * 3);
		assert!(generated.iter().all(|row| row.volatility == Volatility::Immutable));
	}

	#[test]
	#[should_panic(expected = "could not find comparison op")]
	fn test_missing_eq_row_panics() {
		let mut base = build_base_tables();
		if let Some(rows) = base.comparison.get_mut(&ComparisonOperator::EQ) {
			rows.retain(|row| row.left != TypePattern::Family(Family::Uuid));
		}
		generate_derived_entries(base);
	}
}
