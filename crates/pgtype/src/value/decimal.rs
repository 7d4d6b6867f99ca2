// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use bigdecimal::{BigDecimal, ParseBigDecimalError};
use num_bigint::{BigInt, Sign};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// An arbitrary precision decimal, including the non finite values NUMERIC
/// supports.
///
/// Construction normalizes negative zero to zero and every NaN spelling to
/// a single quiet NaN.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decimal {
	Finite(BigDecimal),
	NaN,
	Infinite {
		negative: bool,
	},
}

impl Decimal {
	pub fn new(value: BigDecimal) -> Self {
		if value.is_zero() {
			let (_, scale) = value.as_bigint_and_exponent();
			return Decimal::Finite(BigDecimal::new(BigInt::zero(), scale));
		}
		Decimal::Finite(value)
	}

	pub fn infinity() -> Self {
		Decimal::Infinite {
			negative: false,
		}
	}

	pub fn neg_infinity() -> Self {
		Decimal::Infinite {
			negative: true,
		}
	}

	pub fn is_finite(&self) -> bool {
		matches!(self, Decimal::Finite(_))
	}

	pub fn is_negative(&self) -> bool {
		match self {
			Decimal::Finite(value) => value.sign() == Sign::Minus,
			Decimal::NaN => false,
			Decimal::Infinite {
				negative,
			} => *negative,
		}
	}

	pub(crate) fn heap_size(&self) -> usize {
		match self {
			Decimal::Finite(value) => (value.digits() as usize).div_ceil(2),
			_ => 0,
		}
	}
}

impl FromStr for Decimal {
	type Err = ParseBigDecimalError;

	/// Accepts the BigDecimal grammar plus `NaN`, `sNaN`, `-NaN`, `Infinity`,
	/// `inf` and their signed forms, case insensitive.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		let (negative, unsigned) = match s.as_bytes().first() {
			Some(b'-') => (true, &s[1..]),
			Some(b'+') => (false, &s[1..]),
			_ => (false, s),
		};
		match unsigned.to_ascii_lowercase().as_str() {
			"nan" | "snan" => return Ok(Decimal::NaN),
			"infinity" | "inf" => {
				return Ok(Decimal::Infinite {
					negative,
				});
			}
			_ => {}
		}
		BigDecimal::from_str(s).map(Decimal::new)
	}
}

impl Display for Decimal {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Decimal::Finite(value) => f.write_str(&value.to_plain_string()),
			Decimal::NaN => f.write_str("NaN"),
			Decimal::Infinite {
				negative: false,
			} => f.write_str("Infinity"),
			Decimal::Infinite {
				negative: true,
			} => f.write_str("-Infinity"),
		}
	}
}
