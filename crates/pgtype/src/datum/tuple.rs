// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::mem::size_of;

use super::Datum;
use crate::value::Type;

/// A tuple of datums with an optional set of field labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Tuple {
	datums: Vec<Datum>,
	sorted: bool,
	ty: Type,
}

impl Tuple {
	/// A tuple typed after its elements.
	pub fn new(datums: Vec<Datum>) -> Self {
		let ty = Type::tuple(datums.iter().map(Datum::resolved_type).collect());
		Self {
			datums,
			sorted: false,
			ty,
		}
	}

	/// A labelled tuple. There must be one label per element.
	pub fn with_labels(datums: Vec<Datum>, labels: Vec<String>) -> Self {
		if labels.len() != datums.len() {
			crate::panic_internal!("tuple has {} elements but {} labels", datums.len(), labels.len());
		}
		let contents = datums.iter().map(Datum::resolved_type).collect();
		Self {
			datums,
			sorted: false,
			ty: Type::Tuple {
				contents,
				labels,
			},
		}
	}

	/// A tuple with an explicit tuple type, e.g. one whose NULL elements
	/// carry a known type.
	pub fn with_type(datums: Vec<Datum>, ty: Type) -> Self {
		match &ty {
			Type::Tuple {
				contents,
				..
			} if contents.len() == datums.len() || ty.is_any_tuple() => {}
			_ => crate::panic_internal!("{} does not describe a tuple of {} elements", ty, datums.len()),
		}
		Self {
			datums,
			sorted: false,
			ty,
		}
	}

	pub fn datums(&self) -> &[Datum] {
		&self.datums
	}

	pub fn len(&self) -> usize {
		self.datums.len()
	}

	pub fn is_empty(&self) -> bool {
		self.datums.is_empty()
	}

	pub fn labels(&self) -> &[String] {
		match &self.ty {
			Type::Tuple {
				labels,
				..
			} => labels,
			_ => &[],
		}
	}

	pub fn resolved_type(&self) -> &Type {
		&self.ty
	}

	/// Whether any element, or any element of a nested tuple, is NULL.
	pub fn contains_null(&self) -> bool {
		self.datums.iter().any(|datum| match datum {
			Datum::Null => true,
			Datum::Tuple(inner) => inner.contains_null(),
			_ => false,
		})
	}

	/// Marks the tuple as sorted. A tuple containing NULL is never marked;
	/// returns whether the flag was set.
	pub fn set_sorted(&mut self) -> bool {
		if self.contains_null() {
			return false;
		}
		self.sorted = true;
		true
	}

	pub fn is_sorted(&self) -> bool {
		self.sorted
	}

	/// Panics unless the tuple has been marked sorted.
	pub fn assert_sorted(&self) {
		if !self.sorted {
			crate::panic_internal!("expected sorted tuple, found {:?}", self.datums);
		}
	}

	pub(crate) fn size_estimate(&self) -> usize {
		size_of::<Tuple>() + self.datums.iter().map(Datum::size_estimate).sum::<usize>()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_nested_null_blocks_sorting() {
		let inner = Tuple::new(vec![Datum::int(2), Datum::Null]);
		let mut tuple = Tuple::new(vec![Datum::int(1), Datum::Tuple(inner)]);
		assert!(tuple.contains_null());
		assert!(!tuple.set_sorted());
		assert!(!tuple.is_sorted());
	}

	#[test]
	fn test_set_sorted() {
		let mut tuple = Tuple::new(vec![Datum::int(1), Datum::int(2)]);
		assert!(tuple.set_sorted());
		tuple.assert_sorted();
	}

	#[test]
	#[should_panic(expected = "INTERNAL_ERROR")]
	fn test_assert_sorted_panics() {
		Tuple::new(vec![Datum::int(2), Datum::int(1)]).assert_sorted();
	}

	#[test]
	fn test_labels() {
		let tuple = Tuple::with_labels(vec![Datum::int(1), Datum::string("a")], vec!["x".into(), "y".into()]);
		assert_eq!(tuple.labels(), ["x".to_string(), "y".to_string()]);
		assert_eq!(tuple.resolved_type().to_string(), "tuple{int8 AS x, string AS y}");
	}
}
