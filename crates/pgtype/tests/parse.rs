// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{error::Error, fs, path::Path};

use reifydb_pgtype::{
	Datum, FmtFlags, SessionConfig, SimpleParseTimeContext, Type, parse_and_require_string,
	value::{OidKind, TimestampTZ},
};
use test_each_file::test_each_path;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_test_writer().try_init();
}

// 2024-03-15 12:00:00 UTC
const NOW_MICROS: i64 = 1_710_504_000_000_000;

fn ctx() -> SimpleParseTimeContext {
	SimpleParseTimeContext::new(TimestampTZ::from_micros(NOW_MICROS).unwrap())
}

/// Maps the type names used by the scripts onto types.
fn type_named(name: &str) -> Result<Type, Box<dyn Error>> {
	if let Some(element) = name.strip_suffix("[]") {
		return Ok(Type::array_of(type_named(element)?));
	}
	let width = |s: &str| -> Result<u32, Box<dyn Error>> {
		Ok(s.strip_suffix(')').ok_or("missing ')'")?.parse::<u32>()?)
	};
	if let Some(rest) = name.strip_prefix("varchar(") {
		return Ok(Type::VarChar(Some(width(rest)?)));
	}
	if let Some(rest) = name.strip_prefix("char(") {
		return Ok(Type::Char(width(rest)?));
	}
	if let Some(rest) = name.strip_prefix("bit(") {
		return Ok(Type::Bit(width(rest)?));
	}
	if let Some(rest) = name.strip_prefix("varbit(") {
		return Ok(Type::VarBit(Some(width(rest)?)));
	}
	if let Some(locale) = name.strip_prefix("string collate ") {
		return Ok(Type::collated(locale));
	}
	Ok(match name {
		"bool" => Type::Bool,
		"int2" => Type::Int2,
		"int4" => Type::Int4,
		"int8" => Type::Int8,
		"float4" => Type::Float4,
		"float8" => Type::Float8,
		"decimal" => Type::Decimal,
		"string" => Type::Text,
		"\"char\"" => Type::QChar,
		"name" => Type::Name,
		"bytes" => Type::Bytes,
		"varbit" => Type::VarBit(None),
		"uuid" => Type::Uuid,
		"inet" => Type::INet,
		"date" => Type::Date,
		"time" => Type::Time,
		"timetz" => Type::TimeTZ,
		"timestamp" => Type::Timestamp,
		"timestamptz" => Type::TimestampTZ,
		"interval" => Type::Interval,
		"json" => Type::Json,
		"jsonb" => Type::Jsonb,
		"box2d" => Type::Box2D,
		"oid" => Type::Oid(OidKind::Oid),
		"regclass" => Type::Oid(OidKind::RegClass),
		"int2vector" => Type::Int2Vector,
		"oidvector" => Type::OidVector,
		other => return Err(format!("unknown type {}", other).into()),
	})
}

/// Runs a parse script. Every non blank, non comment line reads
/// `<type> | <input> | <expected>` where the expected value is the exported
/// rendering of the parsed datum, or `error <CODE>`.
fn run_script(path: &Path) -> Result<(), Box<dyn Error>> {
	let script = fs::read_to_string(path)?;
	let ctx = ctx();
	for (number, line) in script.lines().enumerate() {
		let line = line.trim();
		if line.is_empty() || line.starts_with('#') {
			continue;
		}
		let columns: Vec<&str> = line.splitn(3, " | ").collect();
		let [ty, input, expected] = columns.as_slice() else {
			return Err(format!("{}:{}: malformed line", path.display(), number + 1).into());
		};
		let ty = type_named(ty.trim())?;
		let actual = match parse_and_require_string(&ty, input, &ctx) {
			Ok((datum, _)) => datum.to_string_with(FmtFlags::EXPORT),
			Err(err) => format!("error {}", err.code),
		};
		if actual != expected.trim() {
			return Err(format!(
				"{}:{}: parsing {:?} as {}: expected {:?}, got {:?}",
				path.display(),
				number + 1,
				input,
				ty,
				expected.trim(),
				actual
			)
			.into());
		}
	}
	Ok(())
}

test_each_path! { in "crates/pgtype/tests/scripts/parse" as parse => run_test }

fn run_test(path: &Path) {
	init_tracing();
	run_script(path).expect("test failed")
}

#[test]
fn test_parse_bool_trims_and_ignores_case() {
	init_tracing();
	let (datum, depends) = parse_and_require_string(&Type::Bool, "  YES", &ctx()).unwrap();
	assert_eq!(datum, Datum::bool(true));
	assert!(!depends);
}

#[test]
fn test_parse_context_dependence() {
	init_tracing();
	let ctx = ctx();
	for (ty, text, depends) in [
		(Type::Date, "2024-01-01", false),
		(Type::Date, "today", true),
		(Type::Timestamp, "now", true),
		(Type::TimestampTZ, "2024-01-01 00:00:00", true),
		(Type::TimestampTZ, "2024-01-01 00:00:00+00", false),
		(Type::TimeTZ, "10:00", true),
		(Type::TimeTZ, "10:00-03", false),
		(Type::Time, "10:00", false),
		(Type::array_of(Type::Date), "{2024-01-01,yesterday}", true),
		(Type::Int8, "7", false),
	] {
		let (_, actual) = parse_and_require_string(&ty, text, &ctx).unwrap();
		assert_eq!(actual, depends, "{} as {}", text, ty);
	}
}

#[test]
fn test_parse_session_zone_applies_to_zoned_types() {
	init_tracing();
	let ctx = ctx().with_config(SessionConfig::new().time_zone_offset_secs(-5 * 3600));
	let (datum, _) = parse_and_require_string(&Type::TimestampTZ, "2024-03-15 07:00:00", &ctx).unwrap();
	assert_eq!(datum, Datum::timestamptz(TimestampTZ::from_micros(NOW_MICROS).unwrap()));
	let (datum, _) = parse_and_require_string(&Type::Date, "today", &ctx).unwrap();
	assert_eq!(datum.to_string_with(FmtFlags::BARE_STRINGS), "2024-03-15");
}

#[test]
fn test_parse_error_carries_text_and_type() {
	init_tracing();
	let err = parse_and_require_string(&Type::Int4, "twelve", &ctx()).unwrap_err();
	assert_eq!(err.code, "PARSE_001");
	assert!(err.message.contains("twelve"), "{}", err.message);
	assert!(err.message.contains("int"), "{}", err.message);
}

#[test]
fn test_parse_error_nests_inner_cause() {
	init_tracing();
	let err = parse_and_require_string(&Type::TimeTZ, "10:00+aé1", &ctx()).unwrap_err();
	assert_eq!(err.code, "PARSE_001");
	let cause = err.cause.as_ref().expect("parse error without cause");
	assert!(cause.message.contains("invalid time zone"), "{}", cause.message);
}

#[test]
fn test_parse_round_trips_parsable_rendering() {
	init_tracing();
	let ctx = ctx();
	for (ty, text) in [
		(Type::Bool, "true"),
		(Type::Int8, "-42"),
		(Type::Float8, "1.5"),
		(Type::Decimal, "-12.340"),
		(Type::Text, "it's"),
		(Type::Bytes, "\\x00ff"),
		(Type::Uuid, "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11"),
		(Type::INet, "10.0.0.0/8"),
		(Type::Date, "2024-02-29"),
		(Type::Time, "23:59:59.999999"),
		(Type::Timestamp, "1999-12-31 23:59:59"),
		(Type::Interval, "1 year 2 mons -3 days 04:05:06"),
		(Type::Jsonb, r#"{"a": [1, null]}"#),
		(Type::TimeTZ, "10:30:00-03"),
		(Type::TimestampTZ, "2024-03-15 12:00:00+02"),
		(Type::VarBit(None), "0101"),
		(Type::Oid(OidKind::Oid), "1259"),
		(Type::Box2D, "BOX(1 2,3 4)"),
		(Type::Geometry, "SRID=4326;POINT(1 2)"),
		(Type::Geography, "POINT(10 20)"),
	] {
		let (datum, _) = parse_and_require_string(&ty, text, &ctx).unwrap();
		let rendered = datum.to_string_with(FmtFlags::BARE_STRINGS);
		let (again, _) = parse_and_require_string(&ty, &rendered, &ctx).unwrap();
		assert_eq!(again, datum, "{} as {} rendered {}", text, ty, rendered);
	}
}

#[test]
#[should_panic(expected = "INTERNAL_ERROR")]
fn test_parse_any_panics() {
	let _ = parse_and_require_string(&Type::Any, "1", &ctx());
}
