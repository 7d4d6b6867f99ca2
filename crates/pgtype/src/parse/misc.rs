// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use tracing::instrument;
use uuid::Uuid;

use super::{out_of_range, parse_error};
use crate::{
	datum::{EnumValue, OidDatum},
	fragment::Fragment,
	value::{Box2D, Geography, Geometry, IpAddr, OidKind, Type},
};

/// Accepts the canonical, braced, simple and `urn:uuid:` forms.
#[instrument(name = "pgtype::parse::uuid", level = "trace", skip_all)]
pub fn parse_uuid(fragment: Fragment) -> crate::Result<Uuid> {
	Uuid::parse_str(fragment.text().trim()).map_err(|err| parse_error(&Type::Uuid, fragment, Some(err.to_string())))
}

#[instrument(name = "pgtype::parse::inet", level = "trace", skip_all)]
pub fn parse_inet(fragment: Fragment) -> crate::Result<IpAddr> {
	IpAddr::parse(fragment.text())
		.ok_or_else(|| parse_error(&Type::INet, fragment.clone(), Some("invalid IP address".to_string())))
}

#[instrument(name = "pgtype::parse::json", level = "trace", skip_all)]
pub fn parse_json(ty: &Type, fragment: Fragment) -> crate::Result<serde_json::Value> {
	serde_json::from_str(fragment.text()).map_err(|err| parse_error(ty, fragment, Some(err.to_string())))
}

/// Parses an integer in `[i32::MIN, u32::MAX]`. Negative values wrap to their
/// unsigned bit pattern. The `reg*` kinds take integers only; resolving names
/// is the catalog's concern.
#[instrument(name = "pgtype::parse::oid", level = "trace", skip_all, fields(kind = %kind))]
pub fn parse_oid(kind: OidKind, fragment: Fragment) -> crate::Result<OidDatum> {
	let ty = Type::Oid(kind);
	let value = match fragment.text().trim().parse::<i64>() {
		Ok(value) => value,
		Err(err) => return Err(parse_error(&ty, fragment, Some(err.to_string()))),
	};
	if value < i32::MIN as i64 || value > u32::MAX as i64 {
		return Err(out_of_range(&ty, fragment, format!("OID out of range: {}", value)));
	}
	let value = if value < 0 {
		value as i32 as u32
	} else {
		value as u32
	};
	Ok(OidDatum::with_kind(value, kind))
}

#[instrument(name = "pgtype::parse::box2d", level = "trace", skip_all)]
pub fn parse_box2d(fragment: Fragment) -> crate::Result<Box2D> {
	Box2D::parse(fragment.text())
		.ok_or_else(|| parse_error(&Type::Box2D, fragment.clone(), Some("expected BOX(xmin ymin,xmax ymax)".into())))
}

#[instrument(name = "pgtype::parse::geometry", level = "trace", skip_all)]
pub fn parse_geometry(fragment: Fragment) -> crate::Result<Geometry> {
	Geometry::parse_text(fragment.text())
		.map_err(|err| parse_error(&Type::Geometry, fragment, Some(err.to_string())))
}

#[instrument(name = "pgtype::parse::geography", level = "trace", skip_all)]
pub fn parse_geography(fragment: Fragment) -> crate::Result<Geography> {
	Geography::parse_text(fragment.text())
		.map_err(|err| parse_error(&Type::Geography, fragment, Some(err.to_string())))
}

/// Looks up a label of the enum type `ty`.
#[instrument(name = "pgtype::parse::enum", level = "trace", skip_all)]
pub fn parse_enum(ty: &Type, text: &str) -> crate::Result<EnumValue> {
	EnumValue::from_logical(ty, text)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_uuid_forms() {
		let canonical = parse_uuid(Fragment::testing("a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11")).unwrap();
		assert_eq!(parse_uuid(Fragment::testing("{a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11}")).unwrap(), canonical);
		assert_eq!(parse_uuid(Fragment::testing("a0eebc999c0b4ef8bb6d6bb9bd380a11")).unwrap(), canonical);
		assert_eq!(
			parse_uuid(Fragment::testing("urn:uuid:a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11")).unwrap(),
			canonical
		);
		assert!(parse_uuid(Fragment::testing("a0ee")).is_err());
	}

	#[test]
	fn test_oid_range() {
		assert_eq!(parse_oid(OidKind::Oid, Fragment::testing("4294967295")).unwrap().value(), u32::MAX);
		assert_eq!(parse_oid(OidKind::Oid, Fragment::testing("-1")).unwrap().value(), u32::MAX);
		assert_eq!(parse_oid(OidKind::Oid, Fragment::testing("4294967296")).unwrap_err().code, "PARSE_002");
		assert_eq!(parse_oid(OidKind::Oid, Fragment::testing("-2147483649")).unwrap_err().code, "PARSE_002");
		let reg = parse_oid(OidKind::RegClass, Fragment::testing("1259")).unwrap();
		assert_eq!(reg.kind(), OidKind::RegClass);
		assert_eq!(parse_oid(OidKind::RegClass, Fragment::testing("pg_class")).unwrap_err().code, "PARSE_001");
	}

	#[test]
	fn test_json() {
		let value = parse_json(&Type::Jsonb, Fragment::testing(r#"{"a": [1, 2]}"#)).unwrap();
		assert_eq!(value["a"][1], 2);
		assert!(parse_json(&Type::Jsonb, Fragment::testing("{")).is_err());
	}

	#[test]
	fn test_box2d() {
		let value = parse_box2d(Fragment::testing("box(3 4,1 2)")).unwrap();
		assert_eq!(value.to_string(), "BOX(1 2,3 4)");
		assert!(parse_box2d(Fragment::testing("BOX(1 2)")).is_err());
	}
}
