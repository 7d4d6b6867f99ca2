// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::{
	error::TypeError,
	return_error,
	value::{Family, Type},
	volatility::Volatility,
};

/// A legal explicit cast between two families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastRow {
	pub from: Family,
	pub to: Family,
	pub volatility: Volatility,
	/// Exempt from the check comparing this volatility against the volatility
	/// of the equivalent Postgres cast.
	pub ignore_volatility_check: bool,
}

/// Casts grouped by destination family.
#[rustfmt::skip]
const CASTS: &[(Family, &[(Family, Volatility)])] = {
	use Family as F;
	use Volatility::{Immutable as I, Stable as S};
	&[
		(F::Bit, &[(F::Unknown, I), (F::Bit, I), (F::Int, I), (F::String, I), (F::CollatedString, I)]),
		(F::Bool, &[
			(F::Unknown, I), (F::Bool, I), (F::Int, I), (F::Float, I), (F::Decimal, I), (F::String, I),
			(F::CollatedString, I),
		]),
		(F::Int, &[
			(F::Unknown, I), (F::Bool, I), (F::Int, I), (F::Float, I), (F::Decimal, I), (F::String, I),
			(F::CollatedString, I), (F::Timestamp, I), (F::TimestampTZ, I), (F::Date, I), (F::Interval, I),
			(F::Oid, I), (F::Bit, I),
		]),
		(F::Float, &[
			(F::Unknown, I), (F::Bool, I), (F::Int, I), (F::Float, I), (F::Decimal, I), (F::String, I),
			(F::CollatedString, I), (F::Timestamp, I), (F::TimestampTZ, I), (F::Date, I), (F::Interval, I),
		]),
		(F::Box2D, &[
			(F::Unknown, I), (F::String, I), (F::CollatedString, I), (F::Geometry, I), (F::Box2D, I),
		]),
		(F::Geography, &[
			(F::Unknown, I), (F::Bytes, I), (F::Json, I), (F::String, I), (F::CollatedString, I),
			(F::Geography, I), (F::Geometry, I),
		]),
		(F::Geometry, &[
			(F::Unknown, I), (F::Box2D, I), (F::Bytes, I), (F::Json, I), (F::String, I), (F::CollatedString, I),
			(F::Geography, I), (F::Geometry, I),
		]),
		(F::Decimal, &[
			(F::Unknown, I), (F::Bool, I), (F::Int, I), (F::Float, I), (F::Decimal, I), (F::String, I),
			(F::CollatedString, I), (F::Timestamp, I), (F::TimestampTZ, I), (F::Date, I), (F::Interval, I),
		]),
		(F::String, &[
			(F::Unknown, I), (F::Bool, I), (F::Int, I), (F::Float, S), (F::Decimal, I), (F::String, I),
			(F::CollatedString, I), (F::Bit, I), (F::Array, S), (F::Tuple, I), (F::Geometry, I), (F::Box2D, I),
			(F::Geography, I), (F::Bytes, S), (F::Timestamp, I), (F::TimestampTZ, S), (F::Interval, I),
			(F::Uuid, I), (F::Date, I), (F::Time, I), (F::TimeTZ, I), (F::Oid, I), (F::INet, I), (F::Json, I),
			(F::Enum, I),
		]),
		(F::CollatedString, &[
			(F::Unknown, I), (F::Bool, I), (F::Int, I), (F::Float, S), (F::Decimal, I), (F::String, I),
			(F::CollatedString, I), (F::Bit, I), (F::Array, S), (F::Tuple, I), (F::Box2D, I), (F::Geometry, I),
			(F::Geography, I), (F::Bytes, S), (F::Timestamp, I), (F::TimestampTZ, S), (F::Interval, I),
			(F::Uuid, I), (F::Date, I), (F::Time, I), (F::TimeTZ, I), (F::Oid, I), (F::INet, I), (F::Json, I),
			(F::Enum, I),
		]),
		(F::Bytes, &[
			(F::Unknown, I), (F::String, I), (F::CollatedString, I), (F::Bytes, I), (F::Uuid, I), (F::Geometry, I),
			(F::Geography, I),
		]),
		(F::Date, &[
			(F::Unknown, I), (F::String, S), (F::CollatedString, S), (F::Date, I), (F::Timestamp, I),
			(F::TimestampTZ, S), (F::Int, I),
		]),
		(F::Time, &[
			(F::Unknown, I), (F::String, S), (F::CollatedString, S), (F::Time, I), (F::TimeTZ, I),
			(F::Timestamp, I), (F::TimestampTZ, S), (F::Interval, I),
		]),
		(F::TimeTZ, &[
			(F::Unknown, I), (F::String, S), (F::CollatedString, S), (F::Time, S), (F::TimeTZ, I),
			(F::TimestampTZ, S),
		]),
		(F::Timestamp, &[
			(F::Unknown, I), (F::String, S), (F::CollatedString, S), (F::Date, I), (F::Timestamp, I),
			(F::TimestampTZ, S), (F::Int, I),
		]),
		(F::TimestampTZ, &[
			(F::Unknown, I), (F::String, S), (F::CollatedString, S), (F::Date, S), (F::Timestamp, S),
			(F::TimestampTZ, I), (F::Int, I),
		]),
		(F::Interval, &[
			(F::Unknown, I), (F::String, I), (F::CollatedString, I), (F::Int, I), (F::Time, I), (F::Interval, I),
			(F::Float, I), (F::Decimal, I),
		]),
		(F::Oid, &[(F::Unknown, I), (F::String, S), (F::CollatedString, S), (F::Int, S), (F::Oid, S)]),
		(F::Uuid, &[(F::Unknown, I), (F::String, I), (F::CollatedString, I), (F::Bytes, I), (F::Uuid, I)]),
		(F::INet, &[(F::Unknown, I), (F::String, I), (F::CollatedString, I), (F::INet, I)]),
		(F::Array, &[(F::Unknown, I), (F::String, S)]),
		(F::Json, &[(F::Unknown, I), (F::String, I), (F::Json, I), (F::Geometry, I), (F::Geography, I)]),
		(F::Enum, &[(F::Unknown, I), (F::String, I), (F::Enum, I), (F::Bytes, I)]),
		(F::Tuple, &[(F::Unknown, I)]),
	]
};

static MATRIX: Lazy<HashMap<(Family, Family), CastRow>> = Lazy::new(build_cast_matrix);

#[instrument(name = "pgtype::cast::build_matrix", level = "debug")]
fn build_cast_matrix() -> HashMap<(Family, Family), CastRow> {
	let mut matrix = HashMap::new();
	for (to, sources) in CASTS {
		for (from, volatility) in sources.iter() {
			let row = CastRow {
				from: *from,
				to: *to,
				volatility: *volatility,
				ignore_volatility_check: *from == Family::Int && *to == Family::Oid,
			};
			if matrix.insert((*from, *to), row).is_some() {
				crate::panic_internal!("duplicate cast from {} to {}", from, to);
			}
		}
	}
	debug!(casts = matrix.len(), "built cast matrix");
	matrix
}

/// Looks up the cast from `from` to `to`. Only exact family pairs match.
#[instrument(name = "pgtype::cast::lookup", level = "trace")]
pub fn lookup_cast(from: Family, to: Family) -> Option<&'static CastRow> {
	let found = MATRIX.get(&(from, to));
	if found.is_none() {
		trace!(%from, %to, "no cast");
	}
	found
}

pub fn lookup_cast_or_err(from: Family, to: Family) -> crate::Result<&'static CastRow> {
	match lookup_cast(from, to) {
		Some(row) => Ok(row),
		None => return_error!(TypeError::UnsupportedCast {
			from,
			to
		}),
	}
}

/// Classifies both types and looks up the cast between their families.
/// Element types of arrays and tuples are the caller's concern.
pub fn lookup_cast_types(from: &Type, to: &Type) -> Option<&'static CastRow> {
	lookup_cast(from.family(), to.family())
}

/// Every row of the matrix, in no particular order.
pub fn cast_rows() -> impl Iterator<Item = &'static CastRow> {
	MATRIX.values()
}
