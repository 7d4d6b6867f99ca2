// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::mem::size_of;

use super::Datum;
use crate::{
	error::Error,
	value::{Family, Type, oids},
};

/// Arrays hold at most 2^31-1 elements.
pub const MAX_ARRAY_LENGTH: usize = i32::MAX as usize;

/// An array value with an explicit element type.
///
/// Elements are appended one at a time. Every non NULL element must be
/// equivalent to the element type, and the inner arrays of an array of arrays
/// must all have the same length.
#[derive(Clone, Debug, PartialEq)]
pub struct Array {
	elem_type: Type,
	elements: Vec<Datum>,
	has_nulls: bool,
	has_non_nulls: bool,
	custom_oid: Option<u32>,
}

impl Array {
	pub fn new(elem_type: Type) -> Self {
		Self {
			elem_type,
			elements: Vec::new(),
			has_nulls: false,
			has_non_nulls: false,
			custom_oid: None,
		}
	}

	/// An `int2vector` or `oidvector`, the zero indexed array aliases.
	pub fn vector(ty: &Type) -> Option<Self> {
		let elem_type = match ty {
			Type::Int2Vector | Type::OidVector => ty.element()?,
			_ => return None,
		};
		let mut array = Array::new(elem_type);
		array.custom_oid = Some(ty.oid());
		Some(array)
	}

	/// Builds an array from `elements`, panicking on the first element that
	/// violates the array invariants.
	pub fn from_elements(elem_type: Type, elements: impl IntoIterator<Item = Datum>) -> Self {
		let mut array = Array::new(elem_type);
		for element in elements {
			array.append(element);
		}
		array
	}

	pub fn elem_type(&self) -> &Type {
		&self.elem_type
	}

	pub fn elements(&self) -> &[Datum] {
		&self.elements
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	pub fn has_nulls(&self) -> bool {
		self.has_nulls
	}

	pub fn has_non_nulls(&self) -> bool {
		self.has_non_nulls
	}

	pub fn custom_oid(&self) -> Option<u32> {
		self.custom_oid
	}

	/// The index of the first element as seen from SQL.
	pub fn first_index(&self) -> usize {
		match self.custom_oid {
			Some(oids::INT2VECTOR) | Some(oids::OIDVECTOR) => 0,
			_ => 1,
		}
	}

	pub fn resolved_type(&self) -> Type {
		match self.custom_oid {
			Some(oids::INT2VECTOR) => Type::Int2Vector,
			Some(oids::OIDVECTOR) => Type::OidVector,
			_ => Type::array_of(self.elem_type.clone()),
		}
	}

	pub(crate) fn is_ambiguous(&self) -> bool {
		if self.elem_type.family() == Family::Unknown {
			return false;
		}
		!self.has_non_nulls
	}

	pub(crate) fn size_estimate(&self) -> usize {
		size_of::<Array>() + self.elements.iter().map(Datum::size_estimate).sum::<usize>()
	}

	/// Appends `datum`, failing with an internal error when it would break an
	/// array invariant. The array is unchanged on failure.
	pub fn try_append(&mut self, datum: Datum) -> crate::Result<()> {
		self.append_bounded(datum, MAX_ARRAY_LENGTH)
	}

	/// Appends `datum`, panicking when it would break an array invariant.
	pub fn append(&mut self, datum: Datum) {
		if let Err(err) = self.try_append(datum) {
			panic!("{}", err);
		}
	}

	fn append_bounded(&mut self, datum: Datum, max_len: usize) -> crate::Result<()> {
		if !datum.is_null() {
			let ty = datum.resolved_type();
			if !self.elem_type.equivalent(&ty) {
				return Err(array_error(
					"ARRAY_001",
					crate::internal_error!("cannot append {} to array containing {}", ty, self.elem_type),
				));
			}
		}
		if self.elements.len() >= max_len {
			return Err(array_error(
				"ARRAY_002",
				crate::internal_error!("ARRAYs can be at most {} elements long", max_len),
			));
		}
		if self.elem_type.family() == Family::Array {
			self.check_dimensions(&datum)?;
		}
		match datum {
			Datum::Null => self.has_nulls = true,
			_ => self.has_non_nulls = true,
		}
		self.elements.push(datum);
		Ok(())
	}

	fn check_dimensions(&self, datum: &Datum) -> crate::Result<()> {
		let non_homogeneous = || {
			array_error(
				"ARRAY_002",
				crate::internal_error!(
					"multidimensional arrays must have array expressions with matching dimensions"
				),
			)
		};
		let Some(inner) = inner_len(datum) else {
			return Err(non_homogeneous());
		};
		if let Some(previous) = self.elements.last() {
			match inner_len(previous) {
				Some(len) if len == inner => {}
				_ => return Err(non_homogeneous()),
			}
		}
		Ok(())
	}
}

fn inner_len(datum: &Datum) -> Option<usize> {
	match datum {
		Datum::Array(a) => Some(a.len()),
		Datum::OidWrapper(w) => match w.inner() {
			Datum::Array(a) => Some(a.len()),
			_ => None,
		},
		_ => None,
	}
}

fn array_error(code: &str, mut diagnostic: crate::error::Diagnostic) -> Error {
	diagnostic.notes.insert(0, code.to_string());
	Error(diagnostic)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_append_tracks_nulls() {
		let mut array = Array::new(Type::Int8);
		array.append(Datum::Null);
		assert!(array.has_nulls());
		assert!(!array.has_non_nulls());
		array.append(Datum::int(1));
		assert!(array.has_non_nulls());
		assert_eq!(array.len(), 2);
	}

	#[test]
	fn test_append_type_mismatch() {
		let mut array = Array::new(Type::Text);
		let err = array.try_append(Datum::int(1)).unwrap_err();
		assert_eq!(err.code, "INTERNAL_ERROR");
		assert_eq!(err.notes[0], "ARRAY_001");
		assert!(array.is_empty());
	}

	#[test]
	fn test_append_past_bound() {
		let mut array = Array::new(Type::Int8);
		array.append_bounded(Datum::int(1), 1).unwrap();
		let err = array.append_bounded(Datum::int(2), 1).unwrap_err();
		assert_eq!(err.notes[0], "ARRAY_002");
		assert_eq!(array.len(), 1);
	}

	#[test]
	fn test_nested_arrays_must_match() {
		let mut array = Array::new(Type::array_of(Type::Int8));
		array.append(Datum::Array(Array::from_elements(Type::Int8, [Datum::int(1), Datum::int(2)])));
		let err = array.try_append(Datum::Array(Array::from_elements(Type::Int8, [Datum::int(3)]))).unwrap_err();
		assert_eq!(err.notes[0], "ARRAY_002");
		assert!(array.try_append(Datum::Null).is_err());
		array.append(Datum::Array(Array::from_elements(Type::Int8, [Datum::int(3), Datum::Null])));
		assert_eq!(array.len(), 2);
	}

	#[test]
	#[should_panic(expected = "INTERNAL_ERROR")]
	fn test_append_panics() {
		let mut array = Array::new(Type::Bool);
		array.append(Datum::string("t"));
	}

	#[test]
	fn test_vectors_are_zero_indexed() {
		let vector = Array::vector(&Type::Int2Vector).unwrap();
		assert_eq!(vector.first_index(), 0);
		assert_eq!(vector.resolved_type(), Type::Int2Vector);
		assert_eq!(Array::new(Type::Int8).first_index(), 1);
	}

	#[test]
	fn test_ambiguity_follows_non_nulls() {
		let mut array = Array::new(Type::Int8);
		assert!(array.is_ambiguous());
		array.append(Datum::int(1));
		assert!(!array.is_ambiguous());
		assert!(!Array::new(Type::Unknown).is_ambiguous());
	}
}
