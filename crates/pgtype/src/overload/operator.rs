// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnaryOperator {
	Minus,
	Complement,
	Sqrt,
	Cbrt,
}

impl UnaryOperator {
	pub const ALL: [UnaryOperator; 4] =
		[UnaryOperator::Minus, UnaryOperator::Complement, UnaryOperator::Sqrt, UnaryOperator::Cbrt];
}

impl Display for UnaryOperator {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			UnaryOperator::Minus => f.write_str("-"),
			UnaryOperator::Complement => f.write_str("~"),
			UnaryOperator::Sqrt => f.write_str("|/"),
			UnaryOperator::Cbrt => f.write_str("||/"),
		}
	}
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BinaryOperator {
	Bitand,
	Bitor,
	Bitxor,
	Plus,
	Minus,
	Mult,
	Div,
	FloorDiv,
	Mod,
	Pow,
	Concat,
	LShift,
	RShift,
	/// `->`
	JSONFetchVal,
	/// `#>`
	JSONFetchValPath,
	/// `->>`
	JSONFetchText,
	/// `#>>`
	JSONFetchTextPath,
}

impl BinaryOperator {
	pub const ALL: [BinaryOperator; 17] = [
		BinaryOperator::Bitand,
		BinaryOperator::Bitor,
		BinaryOperator::Bitxor,
		BinaryOperator::Plus,
		BinaryOperator::Minus,
		BinaryOperator::Mult,
		BinaryOperator::Div,
		BinaryOperator::FloorDiv,
		BinaryOperator::Mod,
		BinaryOperator::Pow,
		BinaryOperator::Concat,
		BinaryOperator::LShift,
		BinaryOperator::RShift,
		BinaryOperator::JSONFetchVal,
		BinaryOperator::JSONFetchValPath,
		BinaryOperator::JSONFetchText,
		BinaryOperator::JSONFetchTextPath,
	];
}

impl Display for BinaryOperator {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let symbol = match self {
			BinaryOperator::Bitand => "&",
			BinaryOperator::Bitor => "|",
			BinaryOperator::Bitxor => "#",
			BinaryOperator::Plus => "+",
			BinaryOperator::Minus => "-",
			BinaryOperator::Mult => "*",
			BinaryOperator::Div => "/",
			BinaryOperator::FloorDiv => "//",
			BinaryOperator::Mod => "%",
			BinaryOperator::Pow => "^",
			BinaryOperator::Concat => "||",
			BinaryOperator::LShift => "<<",
			BinaryOperator::RShift => ">>",
			BinaryOperator::JSONFetchVal => "->",
			BinaryOperator::JSONFetchValPath => "#>",
			BinaryOperator::JSONFetchText => "->>",
			BinaryOperator::JSONFetchTextPath => "#>>",
		};
		f.write_str(symbol)
	}
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComparisonOperator {
	EQ,
	LT,
	GT,
	LE,
	GE,
	NE,
	In,
	NotIn,
	Like,
	NotLike,
	ILike,
	NotILike,
	SimilarTo,
	NotSimilarTo,
	RegMatch,
	NotRegMatch,
	RegIMatch,
	NotRegIMatch,
	IsDistinctFrom,
	IsNotDistinctFrom,
	Contains,
	ContainedBy,
	JSONExists,
	JSONSomeExists,
	JSONAllExists,
	Overlaps,
}

impl ComparisonOperator {
	pub const ALL: [ComparisonOperator; 26] = [
		ComparisonOperator::EQ,
		ComparisonOperator::LT,
		ComparisonOperator::GT,
		ComparisonOperator::LE,
		ComparisonOperator::GE,
		ComparisonOperator::NE,
		ComparisonOperator::In,
		ComparisonOperator::NotIn,
		ComparisonOperator::Like,
		ComparisonOperator::NotLike,
		ComparisonOperator::ILike,
		ComparisonOperator::NotILike,
		ComparisonOperator::SimilarTo,
		ComparisonOperator::NotSimilarTo,
		ComparisonOperator::RegMatch,
		ComparisonOperator::NotRegMatch,
		ComparisonOperator::RegIMatch,
		ComparisonOperator::NotRegIMatch,
		ComparisonOperator::IsDistinctFrom,
		ComparisonOperator::IsNotDistinctFrom,
		ComparisonOperator::Contains,
		ComparisonOperator::ContainedBy,
		ComparisonOperator::JSONExists,
		ComparisonOperator::JSONSomeExists,
		ComparisonOperator::JSONAllExists,
		ComparisonOperator::Overlaps,
	];

	/// Operators that are rewritten into another operator before lookup and
	/// therefore never appear as registry keys.
	pub fn is_derived(&self) -> bool {
		matches!(
			self,
			ComparisonOperator::NE
				| ComparisonOperator::GT
				| ComparisonOperator::GE
				| ComparisonOperator::NotIn
				| ComparisonOperator::NotLike
				| ComparisonOperator::NotILike
				| ComparisonOperator::NotSimilarTo
				| ComparisonOperator::NotRegMatch
				| ComparisonOperator::NotRegIMatch
				| ComparisonOperator::IsDistinctFrom
		)
	}
}

impl Display for ComparisonOperator {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let symbol = match self {
			ComparisonOperator::EQ => "=",
			ComparisonOperator::LT => "<",
			ComparisonOperator::GT => ">",
			ComparisonOperator::LE => "<=",
			ComparisonOperator::GE => ">=",
			ComparisonOperator::NE => "!=",
			ComparisonOperator::In => "IN",
			ComparisonOperator::NotIn => "NOT IN",
			ComparisonOperator::Like => "LIKE",
			ComparisonOperator::NotLike => "NOT LIKE",
			ComparisonOperator::ILike => "ILIKE",
			ComparisonOperator::NotILike => "NOT ILIKE",
			ComparisonOperator::SimilarTo => "SIMILAR TO",
			ComparisonOperator::NotSimilarTo => "NOT SIMILAR TO",
			ComparisonOperator::RegMatch => "~",
			ComparisonOperator::NotRegMatch => "!~",
			ComparisonOperator::RegIMatch => "~*",
			ComparisonOperator::NotRegIMatch => "!~*",
			ComparisonOperator::IsDistinctFrom => "IS DISTINCT FROM",
			ComparisonOperator::IsNotDistinctFrom => "IS NOT DISTINCT FROM",
			ComparisonOperator::Contains => "@>",
			ComparisonOperator::ContainedBy => "<@",
			ComparisonOperator::JSONExists => "?",
			ComparisonOperator::JSONSomeExists => "?|",
			ComparisonOperator::JSONAllExists => "?&",
			ComparisonOperator::Overlaps => "&&",
		};
		f.write_str(symbol)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_operator_display() {
		assert_eq!(UnaryOperator::Cbrt.to_string(), "||/");
		assert_eq!(BinaryOperator::JSONFetchTextPath.to_string(), "#>>");
		assert_eq!(ComparisonOperator::IsNotDistinctFrom.to_string(), "IS NOT DISTINCT FROM");
	}

	#[test]
	fn test_derived_comparison_operators() {
		let derived: Vec<_> = ComparisonOperator::ALL.iter().filter(|op| op.is_derived()).collect();
		assert_eq!(derived.len(), 10);
		assert!(!ComparisonOperator::EQ.is_derived());
		assert!(!ComparisonOperator::Overlaps.is_derived());
	}
}
