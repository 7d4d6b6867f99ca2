// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Coarse equivalence class of concrete types. Every lookup table keys on the
/// family, never on the concrete width or parameters of a type.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Family {
	/// The type of NULL and of untyped placeholders
	Unknown,
	/// Pseudo family matching every other family
	Any,
	Bool,
	/// int2, int4 and int8
	Int,
	/// float4 and float8
	Float,
	Decimal,
	Date,
	Timestamp,
	Interval,
	/// text, varchar(n), char(n), "char" and name
	String,
	Bytes,
	TimestampTZ,
	/// A string carrying a collation locale
	CollatedString,
	/// oid and the reg* aliases
	Oid,
	Uuid,
	/// Arrays of any element type, including int2vector and oidvector
	Array,
	INet,
	Time,
	/// json and jsonb
	Json,
	TimeTZ,
	Tuple,
	/// bit(n) and varbit(n)
	Bit,
	Geometry,
	Geography,
	Enum,
	Box2D,
}

impl Family {
	pub const ALL: [Family; 26] = [
		Family::Unknown,
		Family::Any,
		Family::Bool,
		Family::Int,
		Family::Float,
		Family::Decimal,
		Family::Date,
		Family::Timestamp,
		Family::Interval,
		Family::String,
		Family::Bytes,
		Family::TimestampTZ,
		Family::CollatedString,
		Family::Oid,
		Family::Uuid,
		Family::Array,
		Family::INet,
		Family::Time,
		Family::Json,
		Family::TimeTZ,
		Family::Tuple,
		Family::Bit,
		Family::Geometry,
		Family::Geography,
		Family::Enum,
		Family::Box2D,
	];

	/// Scalar families for which array overloads are generated, in
	/// generation order.
	pub const SCALARS: [Family; 20] = [
		Family::Bool,
		Family::Box2D,
		Family::Int,
		Family::Float,
		Family::Decimal,
		Family::Date,
		Family::Timestamp,
		Family::Interval,
		Family::Geography,
		Family::Geometry,
		Family::String,
		Family::Bytes,
		Family::TimestampTZ,
		Family::Oid,
		Family::Uuid,
		Family::INet,
		Family::Time,
		Family::TimeTZ,
		Family::Json,
		Family::Bit,
	];

	pub fn is_scalar(&self) -> bool {
		Self::SCALARS.contains(self)
	}

	pub fn is_numeric(&self) -> bool {
		matches!(self, Family::Int | Family::Float | Family::Decimal)
	}

	pub fn is_temporal(&self) -> bool {
		matches!(
			self,
			Family::Date | Family::Time | Family::TimeTZ | Family::Timestamp | Family::TimestampTZ | Family::Interval
		)
	}

	pub fn is_composite(&self) -> bool {
		matches!(self, Family::Array | Family::Tuple)
	}
}

impl Display for Family {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Family::Unknown => "unknown",
			Family::Any => "any",
			Family::Bool => "bool",
			Family::Int => "int",
			Family::Float => "float",
			Family::Decimal => "decimal",
			Family::Date => "date",
			Family::Timestamp => "timestamp",
			Family::Interval => "interval",
			Family::String => "string",
			Family::Bytes => "bytes",
			Family::TimestampTZ => "timestamptz",
			Family::CollatedString => "collatedstring",
			Family::Oid => "oid",
			Family::Uuid => "uuid",
			Family::Array => "array",
			Family::INet => "inet",
			Family::Time => "time",
			Family::Json => "jsonb",
			Family::TimeTZ => "timetz",
			Family::Tuple => "tuple",
			Family::Bit => "varbit",
			Family::Geometry => "geometry",
			Family::Geography => "geography",
			Family::Enum => "enum",
			Family::Box2D => "box2d",
		};
		f.write_str(name)
	}
}
