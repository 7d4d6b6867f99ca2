// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use tracing::instrument;

use super::parse_error;
use crate::{
	datum::{Datum, OidWrapper},
	fragment::Fragment,
	value::{Type, oids},
};

/// Width bounded string types truncate to their width in characters. `name`
/// values carry the `name` oid.
#[instrument(name = "pgtype::parse::string", level = "trace", skip_all)]
pub fn parse_string(ty: &Type, text: &str) -> Datum {
	let value = truncate(text, ty.width());
	match ty {
		Type::Name => Datum::OidWrapper(OidWrapper::wrap(Datum::String(value), oids::NAME)),
		_ => Datum::String(value),
	}
}

#[instrument(name = "pgtype::parse::collated_string", level = "trace", skip_all)]
pub fn parse_collated_string(ty: &Type, fragment: Fragment) -> crate::Result<Datum> {
	let Type::CollatedString {
		width,
		locale,
	} = ty
	else {
		return Err(parse_error(ty, fragment, Some("not a collated string type".to_string())));
	};
	if locale.is_empty() {
		return Err(parse_error(ty, fragment, Some("unspecified collation".to_string())));
	}
	Ok(Datum::collated_string(truncate(fragment.text(), *width), locale.clone()))
}

fn truncate(text: &str, width: Option<u32>) -> String {
	match width {
		Some(width) => text.chars().take(width as usize).collect(),
		None => text.to_string(),
	}
}
