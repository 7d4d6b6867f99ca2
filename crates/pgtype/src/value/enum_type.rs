// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

/// Ordered label metadata of a user defined enum type.
///
/// The three vectors are index aligned: member `i` has physical key
/// `physical_reps[i]`, label `logical_reps[i]` and visibility `read_only[i]`.
/// Physical keys compare bytewise in declaration order.
#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMetadata {
	pub physical_reps: Vec<Vec<u8>>,
	pub logical_reps: Vec<String>,
	pub read_only: Vec<bool>,
}

impl EnumMetadata {
	/// Builds metadata for `labels`, all writable, with evenly spaced two byte
	/// physical keys.
	pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
		let logical_reps: Vec<String> = labels.into_iter().map(Into::into).collect();
		let n = logical_reps.len() as u64;
		let physical_reps = (0..n)
			.map(|i| {
				let key = ((i + 1) * 65536 / (n + 1)) as u16;
				key.to_be_bytes().to_vec()
			})
			.collect();
		let read_only = vec![false; logical_reps.len()];
		Self {
			physical_reps,
			logical_reps,
			read_only,
		}
	}

	/// Marks the member labelled `label` as not yet writable.
	pub fn with_read_only(mut self, label: &str) -> Self {
		if let Some(idx) = self.logical_reps.iter().position(|l| l == label) {
			self.read_only[idx] = true;
		}
		self
	}

	pub fn len(&self) -> usize {
		self.logical_reps.len()
	}

	pub fn is_empty(&self) -> bool {
		self.logical_reps.is_empty()
	}
}

/// A user defined enum type.
#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
	pub name: String,
	pub oid: u32,
	pub metadata: EnumMetadata,
}

impl EnumType {
	pub fn new(name: impl Into<String>, oid: u32, metadata: EnumMetadata) -> Self {
		Self {
			name: name.into(),
			oid,
			metadata,
		}
	}
}
