// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Well-known Postgres type oids.
pub mod oids {
	pub const BOOL: u32 = 16;
	pub const BYTEA: u32 = 17;
	pub const CHAR: u32 = 18;
	pub const NAME: u32 = 19;
	pub const INT8: u32 = 20;
	pub const INT2: u32 = 21;
	pub const INT2VECTOR: u32 = 22;
	pub const INT4: u32 = 23;
	pub const REGPROC: u32 = 24;
	pub const TEXT: u32 = 25;
	pub const OID: u32 = 26;
	pub const OIDVECTOR: u32 = 30;
	pub const JSON: u32 = 114;
	pub const FLOAT4: u32 = 700;
	pub const FLOAT8: u32 = 701;
	pub const UNKNOWN: u32 = 705;
	pub const INET: u32 = 869;
	pub const BOOL_ARRAY: u32 = 1000;
	pub const BYTEA_ARRAY: u32 = 1001;
	pub const INT2_ARRAY: u32 = 1005;
	pub const INT4_ARRAY: u32 = 1007;
	pub const TEXT_ARRAY: u32 = 1009;
	pub const VARCHAR_ARRAY: u32 = 1015;
	pub const INT8_ARRAY: u32 = 1016;
	pub const FLOAT4_ARRAY: u32 = 1021;
	pub const FLOAT8_ARRAY: u32 = 1022;
	pub const OID_ARRAY: u32 = 1028;
	pub const BPCHAR: u32 = 1042;
	pub const VARCHAR: u32 = 1043;
	pub const DATE: u32 = 1082;
	pub const TIME: u32 = 1083;
	pub const TIMESTAMP: u32 = 1114;
	pub const TIMESTAMPTZ: u32 = 1184;
	pub const INTERVAL: u32 = 1186;
	pub const NUMERIC_ARRAY: u32 = 1231;
	pub const TIMETZ: u32 = 1266;
	pub const BIT: u32 = 1560;
	pub const VARBIT: u32 = 1562;
	pub const NUMERIC: u32 = 1700;
	pub const REGPROCEDURE: u32 = 2202;
	pub const REGOPER: u32 = 2203;
	pub const REGOPERATOR: u32 = 2204;
	pub const REGCLASS: u32 = 2205;
	pub const REGTYPE: u32 = 2206;
	pub const RECORD: u32 = 2249;
	pub const ANY: u32 = 2276;
	pub const ANYARRAY: u32 = 2277;
	pub const UUID: u32 = 2950;
	pub const ANYENUM: u32 = 3500;
	pub const REGCONFIG: u32 = 3734;
	pub const REGDICTIONARY: u32 = 3769;
	pub const JSONB: u32 = 3802;
	pub const REGNAMESPACE: u32 = 4089;
	pub const REGROLE: u32 = 4096;
	pub const GEOMETRY: u32 = 90000;
	pub const GEOGRAPHY: u32 = 90001;
	pub const BOX2D: u32 = 90002;
}

/// The semantic subtype of an oid: plain `oid` or one of the `reg*` aliases.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OidKind {
	Oid,
	RegProc,
	RegProcedure,
	RegClass,
	RegType,
	RegNamespace,
	RegRole,
	RegConfig,
	RegDictionary,
	RegOper,
	RegOperator,
}

impl OidKind {
	pub const ALL: [OidKind; 11] = [
		OidKind::Oid,
		OidKind::RegProc,
		OidKind::RegProcedure,
		OidKind::RegClass,
		OidKind::RegType,
		OidKind::RegNamespace,
		OidKind::RegRole,
		OidKind::RegConfig,
		OidKind::RegDictionary,
		OidKind::RegOper,
		OidKind::RegOperator,
	];

	pub fn name(&self) -> &'static str {
		match self {
			OidKind::Oid => "oid",
			OidKind::RegProc => "regproc",
			OidKind::RegProcedure => "regprocedure",
			OidKind::RegClass => "regclass",
			OidKind::RegType => "regtype",
			OidKind::RegNamespace => "regnamespace",
			OidKind::RegRole => "regrole",
			OidKind::RegConfig => "regconfig",
			OidKind::RegDictionary => "regdictionary",
			OidKind::RegOper => "regoper",
			OidKind::RegOperator => "regoperator",
		}
	}

	pub fn oid(&self) -> u32 {
		match self {
			OidKind::Oid => oids::OID,
			OidKind::RegProc => oids::REGPROC,
			OidKind::RegProcedure => oids::REGPROCEDURE,
			OidKind::RegClass => oids::REGCLASS,
			OidKind::RegType => oids::REGTYPE,
			OidKind::RegNamespace => oids::REGNAMESPACE,
			OidKind::RegRole => oids::REGROLE,
			OidKind::RegConfig => oids::REGCONFIG,
			OidKind::RegDictionary => oids::REGDICTIONARY,
			OidKind::RegOper => oids::REGOPER,
			OidKind::RegOperator => oids::REGOPERATOR,
		}
	}

	pub fn from_oid(oid: u32) -> Option<Self> {
		Self::ALL.iter().copied().find(|k| k.oid() == oid)
	}

	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.iter().copied().find(|k| k.name().eq_ignore_ascii_case(name))
	}

	pub fn is_reg(&self) -> bool {
		!matches!(self, OidKind::Oid)
	}
}

impl Display for OidKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_oid_kind_roundtrips_through_oid_and_name() {
		for kind in OidKind::ALL {
			assert_eq!(OidKind::from_oid(kind.oid()), Some(kind));
			assert_eq!(OidKind::from_name(kind.name()), Some(kind));
		}
		assert_eq!(OidKind::from_oid(oids::INT8), None);
	}

	#[test]
	fn test_oid_kind_is_reg() {
		assert!(!OidKind::Oid.is_reg());
		assert!(OidKind::RegClass.is_reg());
	}
}
