// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{cmp::Ordering, sync::Arc};

use crate::{
	error::{EnumErrorKind, TypeError},
	fragment::Fragment,
	return_error,
	value::{EnumType, Type},
};

/// A member of a user defined enum type, identified by its position in the
/// type's metadata.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumValue {
	ty: Arc<EnumType>,
	index: usize,
}

impl EnumValue {
	/// Resolves a physical key. Read only members are accepted because the
	/// physical form only comes from storage.
	pub fn from_physical(ty: &Type, physical: &[u8]) -> crate::Result<Self> {
		let enum_type = concrete(ty, &crate::value::hex::encode(physical))?;
		match enum_type.metadata.physical_reps.iter().position(|rep| rep.as_slice() == physical) {
			Some(index) => Ok(Self {
				ty: enum_type,
				index,
			}),
			None => return_error!(TypeError::Enum {
				kind: EnumErrorKind::UnknownPhysical,
				message: format!(
					"could not find {:?} in enum {} representation",
					physical, enum_type.name
				),
				fragment: Fragment::internal(crate::value::hex::encode(physical)),
			}),
		}
	}

	/// Resolves a label. Read only members cannot be written.
	pub fn from_logical(ty: &Type, label: &str) -> crate::Result<Self> {
		let enum_type = concrete(ty, label)?;
		let Some(index) = enum_type.metadata.logical_reps.iter().position(|rep| rep == label) else {
			return_error!(TypeError::Enum {
				kind: EnumErrorKind::UnknownLabel,
				message: format!("invalid input value for enum {}: \"{}\"", enum_type.name, label),
				fragment: Fragment::internal(label),
			});
		};
		if enum_type.metadata.read_only[index] {
			return_error!(TypeError::Enum {
				kind: EnumErrorKind::NotWritable,
				message: format!("enum value \"{}\" is not yet public", label),
				fragment: Fragment::internal(label),
			});
		}
		Ok(Self {
			ty: enum_type,
			index,
		})
	}

	/// The writable member with the greatest physical key.
	pub fn max_writable(ty: &Arc<EnumType>) -> Option<Self> {
		let index = (0..ty.metadata.len()).rev().find(|&i| !ty.metadata.read_only[i])?;
		Some(Self {
			ty: ty.clone(),
			index,
		})
	}

	/// The writable member with the smallest physical key.
	pub fn min_writable(ty: &Arc<EnumType>) -> Option<Self> {
		let index = (0..ty.metadata.len()).find(|&i| !ty.metadata.read_only[i])?;
		Some(Self {
			ty: ty.clone(),
			index,
		})
	}

	pub fn enum_type(&self) -> &Arc<EnumType> {
		&self.ty
	}

	pub fn index(&self) -> usize {
		self.index
	}

	pub fn physical_rep(&self) -> &[u8] {
		&self.ty.metadata.physical_reps[self.index]
	}

	pub fn logical_rep(&self) -> &str {
		&self.ty.metadata.logical_reps[self.index]
	}
}

impl PartialOrd for EnumValue {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		if self.ty.oid != other.ty.oid {
			return None;
		}
		Some(self.physical_rep().cmp(other.physical_rep()))
	}
}

fn concrete(ty: &Type, input: &str) -> crate::Result<Arc<EnumType>> {
	match ty {
		Type::Enum(enum_type) => Ok(enum_type.clone()),
		_ => return_error!(TypeError::Enum {
			kind: EnumErrorKind::Unspecified,
			message: format!("cannot build an enum value of unspecified type {}", ty),
			fragment: Fragment::internal(input),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::EnumMetadata;

	fn mood() -> Type {
		let metadata = EnumMetadata::new(["sad", "ok", "happy", "ecstatic"]).with_read_only("ecstatic");
		Type::Enum(Arc::new(EnumType::new("mood", 100_100, metadata)))
	}

	#[test]
	fn test_from_logical() {
		let value = EnumValue::from_logical(&mood(), "ok").unwrap();
		assert_eq!(value.index(), 1);
		assert_eq!(value.logical_rep(), "ok");
	}

	#[test]
	fn test_from_logical_errors() {
		assert_eq!(EnumValue::from_logical(&mood(), "meh").unwrap_err().code, "ENUM_001");
		assert_eq!(EnumValue::from_logical(&mood(), "ecstatic").unwrap_err().code, "ENUM_002");
		assert_eq!(EnumValue::from_logical(&Type::AnyEnum, "ok").unwrap_err().code, "ENUM_003");
	}

	#[test]
	fn test_from_physical_accepts_read_only() {
		let ty = mood();
		let Type::Enum(enum_type) = &ty else {
			unreachable!()
		};
		let physical = enum_type.metadata.physical_reps[3].clone();
		let value = EnumValue::from_physical(&ty, &physical).unwrap();
		assert_eq!(value.logical_rep(), "ecstatic");
		assert_eq!(EnumValue::from_physical(&ty, &[0xff, 0xff, 0xff]).unwrap_err().code, "ENUM_001");
	}

	#[test]
	fn test_writable_bounds_skip_read_only() {
		let Type::Enum(enum_type) = mood() else {
			unreachable!()
		};
		assert_eq!(EnumValue::max_writable(&enum_type).unwrap().logical_rep(), "happy");
		assert_eq!(EnumValue::min_writable(&enum_type).unwrap().logical_rep(), "sad");
	}

	#[test]
	fn test_ordering_follows_physical_keys() {
		let sad = EnumValue::from_logical(&mood(), "sad").unwrap();
		let happy = EnumValue::from_logical(&mood(), "happy").unwrap();
		assert!(sad < happy);
	}
}
