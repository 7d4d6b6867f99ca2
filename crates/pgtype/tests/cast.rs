// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use reifydb_pgtype::{Family, Type, Volatility, cast::cast_rows, lookup_cast, lookup_cast_or_err, lookup_cast_types};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_test_writer().try_init();
}

fn has_identity_cast(family: Family) -> bool {
	!matches!(family, Family::Unknown | Family::Any | Family::Array | Family::Tuple)
}

#[test]
fn test_every_concrete_family_casts_to_itself() {
	init_tracing();
	for family in Family::ALL.into_iter().filter(|f| has_identity_cast(*f)) {
		let row = lookup_cast(family, family).unwrap_or_else(|| panic!("no identity cast for {}", family));
		let expected = if family == Family::Oid {
			Volatility::Stable
		} else {
			Volatility::Immutable
		};
		assert_eq!(row.volatility, expected, "{}", family);
	}
}

#[test]
fn test_unknown_casts_to_every_target() {
	init_tracing();
	for family in Family::ALL.into_iter().filter(|f| !matches!(f, Family::Unknown | Family::Any)) {
		let row = lookup_cast(Family::Unknown, family).unwrap_or_else(|| panic!("no cast to {}", family));
		assert_eq!(row.volatility, Volatility::Immutable);
	}
}

#[test]
fn test_stable_string_casts() {
	init_tracing();
	for (from, to) in [
		(Family::String, Family::Date),
		(Family::String, Family::Timestamp),
		(Family::String, Family::TimestampTZ),
		(Family::Float, Family::String),
		(Family::Bytes, Family::String),
		(Family::Array, Family::String),
		(Family::TimestampTZ, Family::String),
	] {
		assert_eq!(lookup_cast(from, to).unwrap().volatility, Volatility::Stable, "{} to {}", from, to);
	}
	assert_eq!(lookup_cast(Family::String, Family::Box2D).unwrap().volatility, Volatility::Immutable);
}

#[test]
fn test_rows_match_their_keys() {
	init_tracing();
	for row in cast_rows() {
		let found = lookup_cast(row.from, row.to).unwrap();
		assert_eq!(found, row);
	}
}

#[test]
fn test_typed_lookup_ignores_type_parameters() {
	init_tracing();
	let row = lookup_cast_types(&Type::Char(3), &Type::Date).unwrap();
	assert_eq!((row.from, row.to), (Family::String, Family::Date));
	let row = lookup_cast_types(&Type::array_of(Type::Int8), &Type::Text).unwrap();
	assert_eq!(row.from, Family::Array);
	assert!(lookup_cast_types(&Type::Uuid, &Type::Int8).is_none());
}

#[test]
fn test_missing_cast_names_both_families() {
	init_tracing();
	let err = lookup_cast_or_err(Family::Box2D, Family::Int).unwrap_err();
	assert_eq!(err.code, "CAST_001");
	assert!(err.message.contains("box2d"), "{}", err.message);
	assert!(err.message.contains("int"), "{}", err.message);
}
