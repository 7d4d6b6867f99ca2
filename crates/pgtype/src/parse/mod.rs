// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Text to datum conversion for every concrete type.
//!
//! Each parser returns the datum together with a flag telling whether the
//! result depends on the parse context, i.e. on the current instant or on the
//! session time zone.

mod array;
mod boolean;
mod bytes;
mod interval;
mod misc;
mod number;
mod string;
mod temporal;

pub use array::{parse_array, parse_vector};
pub use boolean::parse_bool;
pub use bytes::{parse_bit, parse_bytes};
pub use interval::parse_interval;
pub use misc::{parse_box2d, parse_enum, parse_geography, parse_geometry, parse_inet, parse_json, parse_oid, parse_uuid};
pub use number::{parse_decimal, parse_float, parse_int};
pub use string::{parse_collated_string, parse_string};
pub use temporal::{parse_date, parse_time, parse_timestamp, parse_timestamptz, parse_timetz};
use tracing::instrument;

use crate::{
	config::ParseTimeContext,
	datum::Datum,
	error::{Error, TypeError},
	fragment::Fragment,
	value::Type,
};

/// Parses `text` as a value of `ty`.
///
/// Returns the datum and whether it depends on `ctx`. Tuple, unknown and any
/// destinations have no text form; requesting one is a bug in the caller.
#[instrument(name = "pgtype::parse::require_string", level = "trace", skip(ty, ctx), fields(ty = %ty))]
pub fn parse_and_require_string(ty: &Type, text: &str, ctx: &dyn ParseTimeContext) -> crate::Result<(Datum, bool)> {
	let fragment = Fragment::internal(text);
	let datum = match ty {
		Type::Bool => Datum::Bool(parse_bool(fragment)?),
		Type::Int2 | Type::Int4 | Type::Int8 => Datum::Int(parse_int(ty, fragment)?),
		Type::Float4 | Type::Float8 => Datum::Float(parse_float(ty, fragment)?),
		Type::Decimal => Datum::Decimal(parse_decimal(fragment)?),
		Type::Text | Type::VarChar(_) | Type::Char(_) | Type::QChar | Type::Name => parse_string(ty, text),
		Type::CollatedString {
			..
		} => parse_collated_string(ty, fragment)?,
		Type::Bytes => Datum::Bytes(parse_bytes(fragment)?),
		Type::Bit(_) | Type::VarBit(_) => Datum::Bit(parse_bit(ty, fragment)?),
		Type::Uuid => Datum::Uuid(parse_uuid(fragment)?),
		Type::INet => Datum::INet(parse_inet(fragment)?),
		Type::Date => {
			let (date, depends) = parse_date(ctx, fragment)?;
			return Ok((Datum::Date(date), depends));
		}
		Type::Time => {
			let (time, depends) = parse_time(ctx, fragment)?;
			return Ok((Datum::Time(time), depends));
		}
		Type::TimeTZ => {
			let (time, depends) = parse_timetz(ctx, fragment)?;
			return Ok((Datum::TimeTZ(time), depends));
		}
		Type::Timestamp => {
			let (ts, depends) = parse_timestamp(ctx, fragment)?;
			return Ok((Datum::Timestamp(ts), depends));
		}
		Type::TimestampTZ => {
			let (ts, depends) = parse_timestamptz(ctx, fragment)?;
			return Ok((Datum::TimestampTZ(ts), depends));
		}
		Type::Interval => Datum::Interval(parse_interval(fragment)?),
		Type::Json | Type::Jsonb => Datum::Json(parse_json(ty, fragment)?),
		Type::Geometry => Datum::Geometry(parse_geometry(fragment)?),
		Type::Geography => Datum::Geography(parse_geography(fragment)?),
		Type::Box2D => Datum::Box2D(parse_box2d(fragment)?),
		Type::Oid(kind) => Datum::Oid(parse_oid(*kind, fragment)?),
		Type::Enum(_) | Type::AnyEnum => Datum::Enum(parse_enum(ty, text)?),
		Type::Int2Vector | Type::OidVector => {
			let (array, depends) = parse_vector(ty, fragment, ctx)?;
			return Ok((Datum::Array(array), depends));
		}
		Type::Array(element) => {
			let (array, depends) = parse_array(element, fragment, ctx)?;
			return Ok((Datum::Array(array), depends));
		}
		Type::Tuple {
			..
		}
		| Type::Unknown
		| Type::Any => crate::panic_internal!("unknown type {} ({:?})", ty, ty),
	};
	Ok((datum, false))
}

pub(crate) fn parse_error(target: &Type, fragment: Fragment, cause: Option<String>) -> Error {
	TypeError::Parse {
		target: target.clone(),
		fragment,
		cause,
	}
	.into()
}

pub(crate) fn out_of_range(target: &Type, fragment: Fragment, message: impl Into<String>) -> Error {
	TypeError::OutOfRange {
		target: target.clone(),
		message: message.into(),
		fragment,
	}
	.into()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		config::SimpleParseTimeContext,
		value::{TimestampTZ, oids},
	};

	fn ctx() -> SimpleParseTimeContext {
		SimpleParseTimeContext::new(TimestampTZ::from_micros(0).unwrap())
	}

	#[test]
	fn test_parse_dispatch_scalars() {
		let (datum, depends) = parse_and_require_string(&Type::Bool, "  YES", &ctx()).unwrap();
		assert_eq!(datum, Datum::bool(true));
		assert!(!depends);

		let (datum, _) = parse_and_require_string(&Type::Int4, "42", &ctx()).unwrap();
		assert_eq!(datum, Datum::int(42));

		let (datum, _) = parse_and_require_string(&Type::VarChar(Some(3)), "héllo", &ctx()).unwrap();
		assert_eq!(datum, Datum::string("hél"));
	}

	#[test]
	fn test_parse_name_is_wrapped() {
		let (datum, _) = parse_and_require_string(&Type::Name, "pg_class", &ctx()).unwrap();
		match &datum {
			Datum::OidWrapper(w) => assert_eq!(w.oid(), oids::NAME),
			other => panic!("expected oid wrapper, got {:?}", other),
		}
		assert_eq!(datum.resolved_type(), Type::Name);
	}

	#[test]
	fn test_parse_relative_dates_depend_on_context() {
		let (datum, depends) = parse_and_require_string(&Type::Date, "today", &ctx()).unwrap();
		assert_eq!(datum.to_string_with(crate::datum::FmtFlags::BARE_STRINGS), "1970-01-01");
		assert!(depends);
	}

	#[test]
	fn test_parse_error_codes() {
		let err = parse_and_require_string(&Type::Bool, "maybe", &ctx()).unwrap_err();
		assert_eq!(err.code, "PARSE_001");
		let err = parse_and_require_string(&Type::Int2, "40000", &ctx()).unwrap_err();
		assert_eq!(err.code, "PARSE_002");
	}

	#[test]
	#[should_panic(expected = "INTERNAL_ERROR")]
	fn test_parse_tuple_panics() {
		let _ = parse_and_require_string(&Type::any_tuple(), "(1,2)", &ctx());
	}

	#[test]
	#[should_panic(expected = "INTERNAL_ERROR")]
	fn test_parse_unknown_panics() {
		let _ = parse_and_require_string(&Type::Unknown, "1", &ctx());
	}
}
