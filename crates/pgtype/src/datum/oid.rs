// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::Datum;
use crate::value::{OidKind, Type};

/// An object identifier, optionally typed as one of the `reg*` aliases.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OidDatum {
	value: u32,
	kind: OidKind,
	/// Resolved object name, used for display only.
	name: Option<String>,
}

impl OidDatum {
	pub fn new(value: u32) -> Self {
		Self::with_kind(value, OidKind::Oid)
	}

	pub fn with_kind(value: u32, kind: OidKind) -> Self {
		Self {
			value,
			kind,
			name: None,
		}
	}

	pub fn with_name(value: u32, kind: OidKind, name: impl Into<String>) -> Self {
		Self {
			value,
			kind,
			name: Some(name.into()),
		}
	}

	/// The same oid typed as `regproc` and named after a function.
	pub fn as_reg_proc(&self, name: impl Into<String>) -> Self {
		Self::with_name(self.value, OidKind::RegProc, name)
	}

	pub fn value(&self) -> u32 {
		self.value
	}

	pub fn kind(&self) -> OidKind {
		self.kind
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}
}

/// The kinds of datum an [`OidWrapper`] may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WrappedKind {
	Int,
	String,
	Array,
}

/// Attaches a custom type oid to an int, string or array datum.
#[derive(Clone, Debug, PartialEq)]
pub struct OidWrapper {
	inner: Box<Datum>,
	kind: WrappedKind,
	oid: u32,
}

impl OidWrapper {
	pub fn try_wrap(datum: Datum, oid: u32) -> crate::Result<OidWrapper> {
		let kind = match &datum {
			Datum::Int(_) => WrappedKind::Int,
			Datum::String(_) => WrappedKind::String,
			Datum::Array(_) => WrappedKind::Array,
			Datum::Null | Datum::OidWrapper(_) => {
				crate::return_internal_error!("cannot wrap {:?} with an oid", datum)
			}
			other => crate::return_internal_error!(
				"unsupported datum of type {} passed to oid wrapping",
				other.resolved_type()
			),
		};
		Ok(OidWrapper {
			inner: Box::new(datum),
			kind,
			oid,
		})
	}

	/// Wraps `datum`, panicking for anything but an int, string or array.
	pub fn wrap(datum: Datum, oid: u32) -> OidWrapper {
		match Self::try_wrap(datum, oid) {
			Ok(wrapper) => wrapper,
			Err(err) => panic!("{}", err),
		}
	}

	pub fn oid(&self) -> u32 {
		self.oid
	}

	pub fn kind(&self) -> WrappedKind {
		self.kind
	}

	pub fn inner(&self) -> &Datum {
		&self.inner
	}

	pub fn into_inner(self) -> Datum {
		*self.inner
	}

	pub fn resolved_type(&self) -> Type {
		Type::from_oid(self.oid).unwrap_or_else(|| self.inner.resolved_type())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::oids;

	#[test]
	fn test_reg_proc() {
		let oid = OidDatum::new(1242).as_reg_proc("boolin");
		assert_eq!(oid.kind(), OidKind::RegProc);
		assert_eq!(oid.name(), Some("boolin"));
		assert_eq!(oid.value(), 1242);
	}

	#[test]
	fn test_wrap_supported_kinds() {
		let wrapper = OidWrapper::wrap(Datum::string("pg_class"), oids::NAME);
		assert_eq!(wrapper.kind(), WrappedKind::String);
		assert_eq!(wrapper.resolved_type(), Type::Name);
		assert_eq!(wrapper.into_inner(), Datum::string("pg_class"));
	}

	#[test]
	fn test_try_wrap_rejects_double_wrap() {
		let wrapped = Datum::OidWrapper(OidWrapper::wrap(Datum::int(1), oids::INT2));
		let err = OidWrapper::try_wrap(wrapped, oids::INT4).unwrap_err();
		assert_eq!(err.code, "INTERNAL_ERROR");
	}

	#[test]
	#[should_panic(expected = "INTERNAL_ERROR")]
	fn test_wrap_unsupported_panics() {
		OidWrapper::wrap(Datum::bool(true), oids::NAME);
	}
}
