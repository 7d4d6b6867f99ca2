// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	collections::HashMap,
	fmt::{Display, Formatter},
	hash::Hash,
};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use super::{
	binary, comparison, generate,
	operator::{BinaryOperator, ComparisonOperator, UnaryOperator},
	unary,
};
use crate::{
	error::TypeError,
	fold::{Folded, fold_comparison},
	return_error,
	value::{Family, Type},
	volatility::Volatility,
};

/// The operand slot of an overload row.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypePattern {
	/// Any type of the family. `Family(Enum)`, `Family(Tuple)`,
	/// `Family(Array)` and `Family(CollatedString)` are the any-enum,
	/// any-tuple, any-array and any-collated-string pseudo keys.
	Family(Family),
	/// An array whose element type belongs to the family.
	ArrayOf(Family),
}

impl TypePattern {
	pub fn matches(&self, ty: &Type) -> bool {
		match self {
			TypePattern::Family(family) => ty.family() == *family,
			TypePattern::ArrayOf(family) => {
				ty.family() == Family::Array && ty.element().is_some_and(|e| e.family() == *family)
			}
		}
	}

	/// Whether some type matches both patterns. `Family(Array)` overlaps every
	/// `ArrayOf` pattern.
	pub fn overlaps(&self, other: &TypePattern) -> bool {
		match (self, other) {
			(TypePattern::Family(Family::Array), TypePattern::ArrayOf(_))
			| (TypePattern::ArrayOf(_), TypePattern::Family(Family::Array)) => true,
			_ => self == other,
		}
	}

	/// The type a row with this pattern reports, e.g. as a return type.
	pub fn representative(&self) -> Type {
		match self {
			TypePattern::Family(family) => Type::representative(*family),
			TypePattern::ArrayOf(family) => Type::array_of(Type::representative(*family)),
		}
	}
}

impl From<Family> for TypePattern {
	fn from(family: Family) -> Self {
		TypePattern::Family(family)
	}
}

impl Display for TypePattern {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			TypePattern::Family(family) => write!(f, "{}", family),
			TypePattern::ArrayOf(family) => write!(f, "{}[]", family),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnaryRow {
	pub operator: UnaryOperator,
	pub operand: TypePattern,
	pub return_type: Type,
	pub volatility: Volatility,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinaryRow {
	pub operator: BinaryOperator,
	pub left: TypePattern,
	pub right: TypePattern,
	pub return_type: Type,
	/// When false the operator yields NULL as soon as either operand is NULL.
	pub nullable_args: bool,
	pub volatility: Volatility,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
	pub operator: ComparisonOperator,
	pub left: TypePattern,
	pub right: TypePattern,
	/// When false the comparison yields NULL as soon as either operand is NULL.
	pub nullable_args: bool,
	pub volatility: Volatility,
	/// Breaks ties when both operands are untyped NULLs.
	pub is_preferred: bool,
}

impl ComparisonRow {
	pub fn return_type(&self) -> Type {
		Type::Bool
	}
}

/// Rows of one table grouped by operator, in insertion order.
pub type Table<O, R> = HashMap<O, Vec<R>>;

/// The hand enumerated rows, before any generated entry is added.
#[derive(Clone, Debug, Default)]
pub struct BaseTables {
	pub unary: Table<UnaryOperator, UnaryRow>,
	pub binary: Table<BinaryOperator, BinaryRow>,
	pub comparison: Table<ComparisonOperator, ComparisonRow>,
}

/// Builds the hand enumerated tables. Generated entries are added by
/// [`generate::generate_derived_entries`].
#[instrument(name = "pgtype::overload::build_base_tables", level = "debug")]
pub fn build_base_tables() -> BaseTables {
	let tables = BaseTables {
		unary: group(unary::base_rows(), |row| row.operator),
		binary: group(binary::base_rows(), |row| row.operator),
		comparison: group(comparison::base_rows(), |row| row.operator),
	};
	debug!(
		unary = count(&tables.unary),
		binary = count(&tables.binary),
		comparison = count(&tables.comparison),
		"built base overload tables"
	);
	tables
}

fn group<O: Eq + Hash, R>(rows: Vec<R>, operator: impl Fn(&R) -> O) -> Table<O, R> {
	let mut table: Table<O, R> = HashMap::new();
	for row in rows {
		table.entry(operator(&row)).or_default().push(row);
	}
	table
}

pub(crate) fn count<O, R>(table: &Table<O, R>) -> usize {
	table.values().map(Vec::len).sum()
}

/// The operator overload registry. Immutable once built.
#[derive(Clone, Debug)]
pub struct Registry {
	unary: Table<UnaryOperator, UnaryRow>,
	binary: Table<BinaryOperator, BinaryRow>,
	comparison: Table<ComparisonOperator, ComparisonRow>,
}

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::build);

impl Registry {
	/// The process wide registry, built on first use.
	pub fn global() -> &'static Registry {
		&REGISTRY
	}

	/// Builds a fresh registry: base tables first, generated entries second.
	#[instrument(name = "pgtype::overload::registry::build", level = "debug")]
	pub fn build() -> Registry {
		let registry = generate::generate_derived_entries(build_base_tables());
		debug!(
			unary = count(&registry.unary),
			binary = count(&registry.binary),
			comparison = count(&registry.comparison),
			"built overload registry"
		);
		registry
	}

	/// Wraps fully built tables, rejecting a table in which two rows of one
	/// operator can match the same operand types.
	pub(crate) fn from_tables(tables: BaseTables) -> Registry {
		for (operator, rows) in &tables.unary {
			verify_unique(operator, rows.iter().map(|row| (row.operand, None)));
		}
		for (operator, rows) in &tables.binary {
			verify_unique(operator, rows.iter().map(|row| (row.left, Some(row.right))));
		}
		for (operator, rows) in &tables.comparison {
			verify_unique(operator, rows.iter().map(|row| (row.left, Some(row.right))));
		}
		Registry {
			unary: tables.unary,
			binary: tables.binary,
			comparison: tables.comparison,
		}
	}

	pub fn unary_rows(&self, operator: UnaryOperator) -> &[UnaryRow] {
		self.unary.get(&operator).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn binary_rows(&self, operator: BinaryOperator) -> &[BinaryRow] {
		self.binary.get(&operator).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn comparison_rows(&self, operator: ComparisonOperator) -> &[ComparisonRow] {
		self.comparison.get(&operator).map(Vec::as_slice).unwrap_or(&[])
	}

	#[instrument(name = "pgtype::overload::lookup_unary", level = "trace", skip(self))]
	pub fn lookup_unary(&self, operator: UnaryOperator, operand: &Type) -> Option<&UnaryRow> {
		let found = self.unary_rows(operator).iter().find(|row| row.operand.matches(operand));
		if found.is_none() {
			trace!(%operator, %operand, "no unary overload");
		}
		found
	}

	#[instrument(name = "pgtype::overload::lookup_binary", level = "trace", skip(self))]
	pub fn lookup_binary(&self, operator: BinaryOperator, left: &Type, right: &Type) -> Option<&BinaryRow> {
		let found =
			self.binary_rows(operator).iter().find(|row| row.left.matches(left) && row.right.matches(right));
		if found.is_none() {
			trace!(%operator, %left, %right, "no binary overload");
		}
		found
	}

	/// Looks up a canonical comparison operator. Derived operators such as
	/// `!=` are never keys; fold them first or use
	/// [`Registry::resolve_comparison`].
	#[instrument(name = "pgtype::overload::lookup_comparison", level = "trace", skip(self))]
	pub fn lookup_comparison(
		&self,
		operator: ComparisonOperator,
		left: &Type,
		right: &Type,
	) -> Option<&ComparisonRow> {
		let rows = self.comparison_rows(operator);
		let found = if left.family() == Family::Unknown && right.family() == Family::Unknown {
			rows.iter()
				.find(|row| row.is_preferred)
				.or_else(|| rows.iter().find(|row| row.left.matches(left) && row.right.matches(right)))
		} else {
			rows.iter().find(|row| row.left.matches(left) && row.right.matches(right))
		};
		if found.is_none() {
			trace!(%operator, %left, %right, "no comparison overload");
		}
		found
	}

	/// Folds `operator` into its canonical form and looks the canonical
	/// operator up with the operands in evaluation order.
	pub fn resolve_comparison(
		&self,
		operator: ComparisonOperator,
		left: &Type,
		right: &Type,
	) -> Option<(Folded, &ComparisonRow)> {
		let folded = fold_comparison(operator);
		let (left, right) = folded.apply(left, right);
		self.lookup_comparison(folded.op, left, right).map(|row| (folded, row))
	}

	pub fn lookup_unary_family(&self, operator: UnaryOperator, operand: Family) -> Option<&UnaryRow> {
		self.lookup_unary(operator, &Type::representative(operand))
	}

	pub fn lookup_binary_families(&self, operator: BinaryOperator, left: Family, right: Family) -> Option<&BinaryRow> {
		self.lookup_binary(operator, &Type::representative(left), &Type::representative(right))
	}

	pub fn lookup_comparison_families(
		&self,
		operator: ComparisonOperator,
		left: Family,
		right: Family,
	) -> Option<&ComparisonRow> {
		self.lookup_comparison(operator, &Type::representative(left), &Type::representative(right))
	}

	pub fn lookup_unary_or_err(&self, operator: UnaryOperator, operand: &Type) -> crate::Result<&UnaryRow> {
		match self.lookup_unary(operator, operand) {
			Some(row) => Ok(row),
			None => return_error!(TypeError::UnaryOperatorNotFound {
				operator,
				operand: operand.clone(),
			}),
		}
	}

	pub fn lookup_binary_or_err(
		&self,
		operator: BinaryOperator,
		left: &Type,
		right: &Type,
	) -> crate::Result<&BinaryRow> {
		match self.lookup_binary(operator, left, right) {
			Some(row) => Ok(row),
			None => return_error!(TypeError::BinaryOperatorNotFound {
				operator,
				left: left.clone(),
				right: right.clone(),
			}),
		}
	}

	pub fn lookup_comparison_or_err(
		&self,
		operator: ComparisonOperator,
		left: &Type,
		right: &Type,
	) -> crate::Result<&ComparisonRow> {
		match self.lookup_comparison(operator, left, right) {
			Some(row) => Ok(row),
			None => return_error!(TypeError::ComparisonOperatorNotFound {
				operator,
				left: left.clone(),
				right: right.clone(),
			}),
		}
	}
}

fn verify_unique<O: Display>(
	operator: &O,
	keys: impl Iterator<Item = (TypePattern, Option<TypePattern>)>,
) {
	let keys: Vec<_> = keys.collect();
	for (idx, key) in keys.iter().enumerate() {
		let Some(earlier) = keys[..idx].iter().find(|earlier| keys_overlap(earlier, key)) else {
			continue;
		};
		match (earlier, key) {
			((first, None), (second, None)) => {
				crate::panic_internal!("overlapping overloads {}({}) and {}({})", operator, first, operator, second)
			}
			((first_left, first_right), (left, right)) => crate::panic_internal!(
				"overlapping overloads {}({},{}) and {}({},{})",
				operator,
				first_left,
				OptionalPattern(first_right),
				operator,
				left,
				OptionalPattern(right)
			),
		}
	}
}

fn keys_overlap(a: &(TypePattern, Option<TypePattern>), b: &(TypePattern, Option<TypePattern>)) -> bool {
	let right = match (&a.1, &b.1) {
		(Some(left), Some(right)) => left.overlaps(right),
		(None, None) => true,
		_ => false,
	};
	right && a.0.overlaps(&b.0)
}

struct OptionalPattern<'a>(&'a Option<TypePattern>);

impl Display for OptionalPattern<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.0 {
			Some(pattern) => write!(f, "{}", pattern),
			None => Ok(()),
		}
	}
}
