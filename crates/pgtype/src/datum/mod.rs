// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	mem::size_of,
};

use uuid::Uuid;

mod array;
mod r#enum;
mod format;
mod oid;
mod tuple;

pub use array::{Array, MAX_ARRAY_LENGTH};
pub use format::{FmtCtx, FmtFlags};
pub use oid::{OidDatum, OidWrapper, WrappedKind};
pub use r#enum::EnumValue;
pub use tuple::Tuple;

use crate::value::{
	BitArray, Box2D, Date, Decimal, Geography, Geometry, Interval, IpAddr, Time, TimeTZ, Timestamp, TimestampTZ,
	Type, oids,
};

/// A string with a collation locale.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CollatedString {
	pub contents: String,
	pub locale: String,
}

/// One SQL value.
#[derive(Clone, Debug, PartialEq)]
pub enum Datum {
	/// SQL NULL, of the unknown type
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Decimal(Decimal),
	String(String),
	CollatedString(CollatedString),
	Bytes(Vec<u8>),
	Bit(BitArray),
	Uuid(Uuid),
	INet(IpAddr),
	Date(Date),
	Time(Time),
	TimeTZ(TimeTZ),
	Timestamp(Timestamp),
	TimestampTZ(TimestampTZ),
	Interval(Interval),
	Geometry(Geometry),
	Geography(Geography),
	Box2D(Box2D),
	Json(serde_json::Value),
	Enum(EnumValue),
	Array(Array),
	Tuple(Tuple),
	Oid(OidDatum),
	/// An int, string or array carrying a custom type oid, e.g. `name`
	OidWrapper(OidWrapper),
}

impl Datum {
	pub fn null() -> Datum {
		Datum::Null
	}

	pub fn bool(value: bool) -> Datum {
		Datum::Bool(value)
	}

	pub fn int(value: i64) -> Datum {
		Datum::Int(value)
	}

	pub fn float(value: f64) -> Datum {
		Datum::Float(value)
	}

	pub fn decimal(value: Decimal) -> Datum {
		Datum::Decimal(value)
	}

	pub fn string(value: impl Into<String>) -> Datum {
		Datum::String(value.into())
	}

	pub fn collated_string(contents: impl Into<String>, locale: impl Into<String>) -> Datum {
		Datum::CollatedString(CollatedString {
			contents: contents.into(),
			locale: locale.into(),
		})
	}

	/// A string typed as `name`.
	pub fn name(value: impl Into<String>) -> Datum {
		Datum::OidWrapper(OidWrapper::wrap(Datum::String(value.into()), oids::NAME))
	}

	pub fn bytes(value: impl Into<Vec<u8>>) -> Datum {
		Datum::Bytes(value.into())
	}

	pub fn uuid(value: Uuid) -> Datum {
		Datum::Uuid(value)
	}

	pub fn inet(value: IpAddr) -> Datum {
		Datum::INet(value)
	}

	pub fn date(value: Date) -> Datum {
		Datum::Date(value)
	}

	pub fn time(value: Time) -> Datum {
		Datum::Time(value)
	}

	pub fn timestamp(value: Timestamp) -> Datum {
		Datum::Timestamp(value)
	}

	pub fn timestamptz(value: TimestampTZ) -> Datum {
		Datum::TimestampTZ(value)
	}

	pub fn interval(value: Interval) -> Datum {
		Datum::Interval(value)
	}

	pub fn json(value: serde_json::Value) -> Datum {
		Datum::Json(value)
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Datum::Null)
	}

	/// The semantic type of the value.
	pub fn resolved_type(&self) -> Type {
		match self {
			Datum::Null => Type::Unknown,
			Datum::Bool(_) => Type::Bool,
			Datum::Int(_) => Type::Int8,
			Datum::Float(_) => Type::Float8,
			Datum::Decimal(_) => Type::Decimal,
			Datum::String(_) => Type::Text,
			Datum::CollatedString(s) => Type::collated(s.locale.clone()),
			Datum::Bytes(_) => Type::Bytes,
			Datum::Bit(_) => Type::VarBit(None),
			Datum::Uuid(_) => Type::Uuid,
			Datum::INet(_) => Type::INet,
			Datum::Date(_) => Type::Date,
			Datum::Time(_) => Type::Time,
			Datum::TimeTZ(_) => Type::TimeTZ,
			Datum::Timestamp(_) => Type::Timestamp,
			Datum::TimestampTZ(_) => Type::TimestampTZ,
			Datum::Interval(_) => Type::Interval,
			Datum::Geometry(_) => Type::Geometry,
			Datum::Geography(_) => Type::Geography,
			Datum::Box2D(_) => Type::Box2D,
			Datum::Json(_) => Type::Jsonb,
			Datum::Enum(e) => Type::Enum(e.enum_type().clone()),
			Datum::Array(a) => a.resolved_type(),
			Datum::Tuple(t) => t.resolved_type().clone(),
			Datum::Oid(o) => Type::Oid(o.kind()),
			Datum::OidWrapper(w) => w.resolved_type(),
		}
	}

	/// Whether the textual form alone does not determine the type, so a
	/// parsable rendering must annotate it.
	pub fn is_ambiguous(&self) -> bool {
		match self {
			Datum::Null
			| Datum::Bool(_)
			| Datum::Bit(_)
			| Datum::CollatedString(_)
			| Datum::Tuple(_) => false,
			Datum::Int(_)
			| Datum::Float(_)
			| Datum::Decimal(_)
			| Datum::String(_)
			| Datum::Bytes(_)
			| Datum::Uuid(_)
			| Datum::INet(_)
			| Datum::Date(_)
			| Datum::Time(_)
			| Datum::TimeTZ(_)
			| Datum::Timestamp(_)
			| Datum::TimestampTZ(_)
			| Datum::Interval(_)
			| Datum::Geometry(_)
			| Datum::Geography(_)
			| Datum::Box2D(_)
			| Datum::Json(_)
			| Datum::Enum(_)
			| Datum::Oid(_) => true,
			Datum::Array(a) => a.is_ambiguous(),
			Datum::OidWrapper(w) => w.inner().is_ambiguous(),
		}
	}

	/// Lower bound of the memory held by the value, including owned heap
	/// data and excluding allocator overhead.
	pub fn size_estimate(&self) -> usize {
		match self {
			Datum::Null => 0,
			Datum::Bool(_) => size_of::<bool>(),
			Datum::Int(_) => size_of::<i64>(),
			Datum::Float(_) => size_of::<f64>(),
			Datum::Decimal(d) => size_of::<Decimal>() + d.heap_size(),
			Datum::String(s) => size_of::<String>() + s.len(),
			Datum::CollatedString(s) => size_of::<CollatedString>() + s.contents.len() + s.locale.len(),
			Datum::Bytes(b) => size_of::<Vec<u8>>() + b.len(),
			Datum::Bit(b) => size_of::<BitArray>() + b.heap_size(),
			Datum::Uuid(_) => size_of::<Uuid>(),
			Datum::INet(_) => size_of::<IpAddr>(),
			Datum::Date(_) => size_of::<Date>(),
			Datum::Time(_) => size_of::<Time>(),
			Datum::TimeTZ(_) => size_of::<TimeTZ>(),
			Datum::Timestamp(_) => size_of::<Timestamp>(),
			Datum::TimestampTZ(_) => size_of::<TimestampTZ>(),
			Datum::Interval(_) => size_of::<Interval>(),
			Datum::Geometry(g) => size_of::<Geometry>() + g.heap_size(),
			Datum::Geography(g) => size_of::<Geography>() + g.heap_size(),
			Datum::Box2D(_) => size_of::<Box2D>(),
			Datum::Json(v) => size_of::<serde_json::Value>() + v.to_string().len(),
			Datum::Enum(_) => size_of::<EnumValue>(),
			Datum::Array(a) => a.size_estimate(),
			Datum::Tuple(t) => t.size_estimate(),
			Datum::Oid(o) => size_of::<OidDatum>() + o.name().map(str::len).unwrap_or(0),
			Datum::OidWrapper(w) => size_of::<OidWrapper>() + w.inner().size_estimate(),
		}
	}

	/// Strips an oid wrapper, returning the plain int, string or array.
	pub fn unwrap_oid(self) -> Datum {
		match self {
			Datum::OidWrapper(w) => w.into_inner(),
			other => other,
		}
	}

	/// Renders the value with the given flags and default session settings.
	pub fn to_string_with(&self, flags: FmtFlags) -> String {
		let mut ctx = FmtCtx::new(flags);
		ctx.format_datum(self);
		ctx.into_string()
	}
}

impl Display for Datum {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.to_string_with(FmtFlags::SIMPLE))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_resolved_types() {
		assert_eq!(Datum::Null.resolved_type(), Type::Unknown);
		assert_eq!(Datum::int(3).resolved_type(), Type::Int8);
		assert_eq!(Datum::collated_string("a", "de").resolved_type(), Type::collated("de"));
		assert_eq!(Datum::name("pg_class").resolved_type(), Type::Name);
	}

	#[test]
	fn test_ambiguity() {
		assert!(Datum::int(1).is_ambiguous());
		assert!(Datum::string("x").is_ambiguous());
		assert!(!Datum::bool(true).is_ambiguous());
		assert!(!Datum::collated_string("x", "en").is_ambiguous());
		assert!(!Datum::Null.is_ambiguous());
		assert!(Datum::name("x").is_ambiguous());
	}

	#[test]
	fn test_size_estimate_counts_heap() {
		let short = Datum::string("a");
		let long = Datum::string("a".repeat(100));
		assert_eq!(long.size_estimate() - short.size_estimate(), 99);
		assert_eq!(Datum::Null.size_estimate(), 0);
	}

	#[test]
	fn test_unwrap_oid() {
		assert_eq!(Datum::name("relname").unwrap_oid(), Datum::string("relname"));
		assert_eq!(Datum::int(7).unwrap_oid(), Datum::int(7));
	}
}
