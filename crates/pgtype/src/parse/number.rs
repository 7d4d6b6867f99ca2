// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::num::IntErrorKind;

use tracing::instrument;

use super::{out_of_range, parse_error};
use crate::{
	fragment::Fragment,
	value::{Decimal, Type},
};

/// Parses a base 10 integer and checks it fits the width of `ty`.
#[instrument(name = "pgtype::parse::int", level = "trace", skip_all)]
pub fn parse_int(ty: &Type, fragment: Fragment) -> crate::Result<i64> {
	let value = match fragment.text().trim().parse::<i64>() {
		Ok(value) => value,
		Err(err) => {
			return Err(match err.kind() {
				IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
					out_of_range(ty, fragment, format!("value out of range for type {}", ty))
				}
				_ => parse_error(ty, fragment, Some(err.to_string())),
			});
		}
	};
	let fits = match ty {
		Type::Int2 => i16::try_from(value).is_ok(),
		Type::Int4 => i32::try_from(value).is_ok(),
		_ => true,
	};
	if !fits {
		return Err(out_of_range(ty, fragment, format!("integer out of range for type {}", ty)));
	}
	Ok(value)
}

/// Parses a float. `NaN`, `Infinity` and `inf` are accepted in any case with
/// an optional sign; finite input that overflows the width of `ty` is out of
/// range.
#[instrument(name = "pgtype::parse::float", level = "trace", skip_all)]
pub fn parse_float(ty: &Type, fragment: Fragment) -> crate::Result<f64> {
	let text = fragment.text().trim();
	let value = match text.parse::<f64>() {
		Ok(value) => value,
		Err(err) => return Err(parse_error(ty, fragment, Some(err.to_string()))),
	};
	let explicit_infinity = {
		let unsigned = text.trim_start_matches(['+', '-']).to_ascii_lowercase();
		unsigned == "inf" || unsigned == "infinity"
	};
	let value = match ty {
		Type::Float4 => value as f32 as f64,
		_ => value,
	};
	if value.is_infinite() && !explicit_infinity {
		let message = format!("\"{}\" is out of range for type {}", text, ty);
		return Err(out_of_range(ty, fragment, message));
	}
	Ok(value)
}

/// Parses an arbitrary precision decimal. Negative zero becomes zero and a
/// signaling NaN becomes NaN.
#[instrument(name = "pgtype::parse::decimal", level = "trace", skip_all)]
pub fn parse_decimal(fragment: Fragment) -> crate::Result<Decimal> {
	match fragment.text().parse::<Decimal>() {
		Ok(value) => Ok(value),
		Err(err) => Err(parse_error(&Type::Decimal, fragment, Some(err.to_string()))),
	}
}
