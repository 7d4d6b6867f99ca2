// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
	sync::Arc,
};

use serde::{Deserialize, Serialize};

use super::{
	enum_type::EnumType,
	family::Family,
	oid::{OidKind, oids},
};

/// All concrete SQL types a datum can resolve to
#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
	/// The type of NULL
	Unknown,
	/// Pseudo type matching any other type
	Any,
	/// A boolean: true or false
	Bool,
	/// A 2-byte signed integer
	Int2,
	/// A 4-byte signed integer
	Int4,
	/// An 8-byte signed integer
	Int8,
	/// A 4-byte floating point
	Float4,
	/// An 8-byte floating point
	Float8,
	/// An arbitrary precision decimal
	Decimal,
	/// Unbounded text
	Text,
	/// Variable width text with an optional maximum width in characters
	VarChar(Option<u32>),
	/// Fixed width text, `char(n)`
	Char(u32),
	/// The single character `"char"` type
	QChar,
	/// The identifier type `name`
	Name,
	/// Text carrying a collation locale. An empty locale matches any
	/// collation.
	CollatedString {
		width: Option<u32>,
		locale: String,
	},
	/// A byte string
	Bytes,
	/// Fixed width bit string
	Bit(u32),
	/// Variable width bit string
	VarBit(Option<u32>),
	Uuid,
	/// An IPv4 or IPv6 address with a netmask
	INet,
	Date,
	/// Time of day without a zone
	Time,
	/// Time of day with a zone offset
	TimeTZ,
	Timestamp,
	TimestampTZ,
	Interval,
	Json,
	Jsonb,
	Geometry,
	Geography,
	Box2D,
	/// oid and the reg* aliases
	Oid(OidKind),
	Int2Vector,
	OidVector,
	Array(Box<Type>),
	/// A tuple type. Labels are either empty or aligned with `contents`.
	Tuple {
		contents: Vec<Type>,
		labels: Vec<String>,
	},
	Enum(Arc<EnumType>),
	/// Pseudo type matching any enum
	AnyEnum,
}

impl Type {
	pub fn array_of(element: Type) -> Type {
		Type::Array(Box::new(element))
	}

	pub fn tuple(contents: Vec<Type>) -> Type {
		Type::Tuple {
			contents,
			labels: vec![],
		}
	}

	/// The pseudo tuple type matching tuples of any shape.
	pub fn any_tuple() -> Type {
		Type::tuple(vec![Type::Any])
	}

	pub fn any_array() -> Type {
		Type::array_of(Type::Any)
	}

	pub fn any_collated_string() -> Type {
		Type::CollatedString {
			width: None,
			locale: String::new(),
		}
	}

	pub fn collated(locale: impl Into<String>) -> Type {
		Type::CollatedString {
			width: None,
			locale: locale.into(),
		}
	}

	pub fn is_any_tuple(&self) -> bool {
		matches!(self, Type::Tuple { contents, .. } if contents.len() == 1 && contents[0] == Type::Any)
	}

	/// The type used to stand for a whole family, e.g. in registry return
	/// types and diagnostics.
	pub fn representative(family: Family) -> Type {
		match family {
			Family::Unknown => Type::Unknown,
			Family::Any => Type::Any,
			Family::Bool => Type::Bool,
			Family::Int => Type::Int8,
			Family::Float => Type::Float8,
			Family::Decimal => Type::Decimal,
			Family::Date => Type::Date,
			Family::Timestamp => Type::Timestamp,
			Family::Interval => Type::Interval,
			Family::String => Type::Text,
			Family::Bytes => Type::Bytes,
			Family::TimestampTZ => Type::TimestampTZ,
			Family::CollatedString => Type::any_collated_string(),
			Family::Oid => Type::Oid(OidKind::Oid),
			Family::Uuid => Type::Uuid,
			Family::Array => Type::any_array(),
			Family::INet => Type::INet,
			Family::Time => Type::Time,
			Family::Json => Type::Jsonb,
			Family::TimeTZ => Type::TimeTZ,
			Family::Tuple => Type::any_tuple(),
			Family::Bit => Type::VarBit(None),
			Family::Geometry => Type::Geometry,
			Family::Geography => Type::Geography,
			Family::Enum => Type::AnyEnum,
			Family::Box2D => Type::Box2D,
		}
	}

	pub fn family(&self) -> Family {
		match self {
			Type::Unknown => Family::Unknown,
			Type::Any => Family::Any,
			Type::Bool => Family::Bool,
			Type::Int2 | Type::Int4 | Type::Int8 => Family::Int,
			Type::Float4 | Type::Float8 => Family::Float,
			Type::Decimal => Family::Decimal,
			Type::Text | Type::VarChar(_) | Type::Char(_) | Type::QChar | Type::Name => Family::String,
			Type::CollatedString {
				..
			} => Family::CollatedString,
			Type::Bytes => Family::Bytes,
			Type::Bit(_) | Type::VarBit(_) => Family::Bit,
			Type::Uuid => Family::Uuid,
			Type::INet => Family::INet,
			Type::Date => Family::Date,
			Type::Time => Family::Time,
			Type::TimeTZ => Family::TimeTZ,
			Type::Timestamp => Family::Timestamp,
			Type::TimestampTZ => Family::TimestampTZ,
			Type::Interval => Family::Interval,
			Type::Json | Type::Jsonb => Family::Json,
			Type::Geometry => Family::Geometry,
			Type::Geography => Family::Geography,
			Type::Box2D => Family::Box2D,
			Type::Oid(_) => Family::Oid,
			Type::Int2Vector | Type::OidVector | Type::Array(_) => Family::Array,
			Type::Tuple {
				..
			} => Family::Tuple,
			Type::Enum(_) | Type::AnyEnum => Family::Enum,
		}
	}

	/// The element type of an array type.
	pub fn element(&self) -> Option<Type> {
		match self {
			Type::Array(element) => Some(element.as_ref().clone()),
			Type::Int2Vector => Some(Type::Int2),
			Type::OidVector => Some(Type::Oid(OidKind::Oid)),
			_ => None,
		}
	}

	/// The maximum width in characters or bits, when the type is bounded.
	pub fn width(&self) -> Option<u32> {
		match self {
			Type::VarChar(width)
			| Type::VarBit(width)
			| Type::CollatedString {
				width,
				..
			} => *width,
			Type::Char(width) | Type::Bit(width) => Some(*width),
			Type::QChar => Some(1),
			_ => None,
		}
	}

	pub fn oid(&self) -> u32 {
		match self {
			Type::Unknown => oids::UNKNOWN,
			Type::Any => oids::ANY,
			Type::Bool => oids::BOOL,
			Type::Int2 => oids::INT2,
			Type::Int4 => oids::INT4,
			Type::Int8 => oids::INT8,
			Type::Float4 => oids::FLOAT4,
			Type::Float8 => oids::FLOAT8,
			Type::Decimal => oids::NUMERIC,
			Type::Text => oids::TEXT,
			Type::VarChar(_) => oids::VARCHAR,
			Type::Char(_) => oids::BPCHAR,
			Type::QChar => oids::CHAR,
			Type::Name => oids::NAME,
			Type::CollatedString {
				..
			} => oids::TEXT,
			Type::Bytes => oids::BYTEA,
			Type::Bit(_) => oids::BIT,
			Type::VarBit(_) => oids::VARBIT,
			Type::Uuid => oids::UUID,
			Type::INet => oids::INET,
			Type::Date => oids::DATE,
			Type::Time => oids::TIME,
			Type::TimeTZ => oids::TIMETZ,
			Type::Timestamp => oids::TIMESTAMP,
			Type::TimestampTZ => oids::TIMESTAMPTZ,
			Type::Interval => oids::INTERVAL,
			Type::Json => oids::JSON,
			Type::Jsonb => oids::JSONB,
			Type::Geometry => oids::GEOMETRY,
			Type::Geography => oids::GEOGRAPHY,
			Type::Box2D => oids::BOX2D,
			Type::Oid(kind) => kind.oid(),
			Type::Int2Vector => oids::INT2VECTOR,
			Type::OidVector => oids::OIDVECTOR,
			Type::Array(element) => ARRAY_OIDS
				.iter()
				.find(|(_, e)| e == element.as_ref())
				.map(|(oid, _)| *oid)
				.unwrap_or(oids::ANYARRAY),
			Type::Tuple {
				..
			} => oids::RECORD,
			Type::Enum(e) => e.oid,
			Type::AnyEnum => oids::ANYENUM,
		}
	}

	/// Resolves a builtin type oid. User defined enum oids are not known
	/// here and return `None`.
	pub fn from_oid(oid: u32) -> Option<Type> {
		if let Some(kind) = OidKind::from_oid(oid) {
			return Some(Type::Oid(kind));
		}
		if let Some((_, element)) = ARRAY_OIDS.iter().find(|(o, _)| *o == oid) {
			return Some(Type::array_of(element.clone()));
		}
		let ty = match oid {
			oids::UNKNOWN => Type::Unknown,
			oids::ANY => Type::Any,
			oids::BOOL => Type::Bool,
			oids::INT2 => Type::Int2,
			oids::INT4 => Type::Int4,
			oids::INT8 => Type::Int8,
			oids::FLOAT4 => Type::Float4,
			oids::FLOAT8 => Type::Float8,
			oids::NUMERIC => Type::Decimal,
			oids::TEXT => Type::Text,
			oids::VARCHAR => Type::VarChar(None),
			oids::BPCHAR => Type::Char(1),
			oids::CHAR => Type::QChar,
			oids::NAME => Type::Name,
			oids::BYTEA => Type::Bytes,
			oids::BIT => Type::Bit(1),
			oids::VARBIT => Type::VarBit(None),
			oids::UUID => Type::Uuid,
			oids::INET => Type::INet,
			oids::DATE => Type::Date,
			oids::TIME => Type::Time,
			oids::TIMETZ => Type::TimeTZ,
			oids::TIMESTAMP => Type::Timestamp,
			oids::TIMESTAMPTZ => Type::TimestampTZ,
			oids::INTERVAL => Type::Interval,
			oids::JSON => Type::Json,
			oids::JSONB => Type::Jsonb,
			oids::GEOMETRY => Type::Geometry,
			oids::GEOGRAPHY => Type::Geography,
			oids::BOX2D => Type::Box2D,
			oids::INT2VECTOR => Type::Int2Vector,
			oids::OIDVECTOR => Type::OidVector,
			oids::ANYARRAY => Type::any_array(),
			oids::RECORD => Type::any_tuple(),
			oids::ANYENUM => Type::AnyEnum,
			_ => return None,
		};
		Some(ty)
	}

	/// Reports whether values of the two types are interchangeable. `Any`
	/// matches everything, composite types compare their contents, enums
	/// compare by oid and empty collation locales match any locale.
	pub fn equivalent(&self, other: &Type) -> bool {
		if matches!(self, Type::Any) || matches!(other, Type::Any) {
			return true;
		}
		if self.family() != other.family() {
			return false;
		}
		match (self, other) {
			(
				Type::CollatedString {
					locale: l,
					..
				},
				Type::CollatedString {
					locale: r,
					..
				},
			) => l.is_empty() || r.is_empty() || l == r,
			(
				Type::Tuple {
					contents: l,
					..
				},
				Type::Tuple {
					contents: r,
					..
				},
			) => {
				if self.is_any_tuple() || other.is_any_tuple() {
					return true;
				}
				l.len() == r.len() && l.iter().zip(r.iter()).all(|(l, r)| l.equivalent(r))
			}
			(Type::Enum(l), Type::Enum(r)) => l.oid == r.oid,
			(l, r) if l.family() == Family::Array => match (l.element(), r.element()) {
				(Some(l), Some(r)) => l.equivalent(&r),
				_ => false,
			},
			_ => true,
		}
	}

	/// The SQL spelling used in type annotations, e.g. `INT8` or `STRING[]`.
	pub fn sql_string(&self) -> String {
		match self {
			Type::Unknown => "UNKNOWN".to_string(),
			Type::Any => "ANYELEMENT".to_string(),
			Type::Bool => "BOOL".to_string(),
			Type::Int2 => "INT2".to_string(),
			Type::Int4 => "INT4".to_string(),
			Type::Int8 => "INT8".to_string(),
			Type::Float4 => "FLOAT4".to_string(),
			Type::Float8 => "FLOAT8".to_string(),
			Type::Decimal => "DECIMAL".to_string(),
			Type::Text => "STRING".to_string(),
			Type::VarChar(None) => "VARCHAR".to_string(),
			Type::VarChar(Some(n)) => format!("VARCHAR({})", n),
			Type::Char(n) => format!("CHAR({})", n),
			Type::QChar => "\"char\"".to_string(),
			Type::Name => "NAME".to_string(),
			Type::CollatedString {
				width,
				locale,
			} => match width {
				Some(n) => format!("VARCHAR({}) COLLATE {}", n, locale),
				None => format!("STRING COLLATE {}", locale),
			},
			Type::Bytes => "BYTES".to_string(),
			Type::Bit(n) => format!("BIT({})", n),
			Type::VarBit(None) => "VARBIT".to_string(),
			Type::VarBit(Some(n)) => format!("VARBIT({})", n),
			Type::Oid(kind) => kind.name().to_uppercase(),
			Type::Array(element) => format!("{}[]", element.sql_string()),
			Type::Tuple {
				..
			} if self.is_any_tuple() => "RECORD".to_string(),
			Type::Tuple {
				contents,
				labels,
			} => {
				let parts: Vec<String> = contents
					.iter()
					.enumerate()
					.map(|(i, t)| match labels.get(i) {
						Some(label) => format!("{} AS {}", t.sql_string(), label),
						None => t.sql_string(),
					})
					.collect();
				format!("RECORD({})", parts.join(", "))
			}
			Type::Enum(e) => e.name.clone(),
			other => other.to_string().to_uppercase(),
		}
	}
}

static ARRAY_OIDS: [(u32, Type); 11] = [
	(oids::BOOL_ARRAY, Type::Bool),
	(oids::BYTEA_ARRAY, Type::Bytes),
	(oids::INT2_ARRAY, Type::Int2),
	(oids::INT4_ARRAY, Type::Int4),
	(oids::TEXT_ARRAY, Type::Text),
	(oids::VARCHAR_ARRAY, Type::VarChar(None)),
	(oids::INT8_ARRAY, Type::Int8),
	(oids::FLOAT4_ARRAY, Type::Float4),
	(oids::FLOAT8_ARRAY, Type::Float8),
	(oids::OID_ARRAY, Type::Oid(OidKind::Oid)),
	(oids::NUMERIC_ARRAY, Type::Decimal),
];

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Unknown => f.write_str("unknown"),
			Type::Any => f.write_str("anyelement"),
			Type::Bool => f.write_str("bool"),
			Type::Int2 => f.write_str("int2"),
			Type::Int4 => f.write_str("int4"),
			Type::Int8 => f.write_str("int8"),
			Type::Float4 => f.write_str("float4"),
			Type::Float8 => f.write_str("float8"),
			Type::Decimal => f.write_str("decimal"),
			Type::Text => f.write_str("string"),
			Type::VarChar(None) => f.write_str("varchar"),
			Type::VarChar(Some(n)) => write!(f, "varchar({})", n),
			Type::Char(n) => write!(f, "char({})", n),
			Type::QChar => f.write_str("\"char\""),
			Type::Name => f.write_str("name"),
			Type::CollatedString {
				locale,
				..
			} if locale.is_empty() => f.write_str("anycollatedstring"),
			Type::CollatedString {
				locale,
				..
			} => write!(f, "string collate {}", locale),
			Type::Bytes => f.write_str("bytes"),
			Type::Bit(n) => write!(f, "bit({})", n),
			Type::VarBit(None) => f.write_str("varbit"),
			Type::VarBit(Some(n)) => write!(f, "varbit({})", n),
			Type::Uuid => f.write_str("uuid"),
			Type::INet => f.write_str("inet"),
			Type::Date => f.write_str("date"),
			Type::Time => f.write_str("time"),
			Type::TimeTZ => f.write_str("timetz"),
			Type::Timestamp => f.write_str("timestamp"),
			Type::TimestampTZ => f.write_str("timestamptz"),
			Type::Interval => f.write_str("interval"),
			Type::Json => f.write_str("json"),
			Type::Jsonb => f.write_str("jsonb"),
			Type::Geometry => f.write_str("geometry"),
			Type::Geography => f.write_str("geography"),
			Type::Box2D => f.write_str("box2d"),
			Type::Oid(kind) => f.write_str(kind.name()),
			Type::Int2Vector => f.write_str("int2vector"),
			Type::OidVector => f.write_str("oidvector"),
			Type::Array(element) if element.as_ref() == &Type::Any => f.write_str("anyarray"),
			Type::Array(element) => write!(f, "{}[]", element),
			Type::Tuple {
				..
			} if self.is_any_tuple() => f.write_str("anytuple"),
			Type::Tuple {
				contents,
				labels,
			} => {
				f.write_str("tuple")?;
				if contents.is_empty() {
					return Ok(());
				}
				f.write_str("{")?;
				for (i, t) in contents.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{}", t)?;
					if let Some(label) = labels.get(i) {
						write!(f, " AS {}", label)?;
					}
				}
				f.write_str("}")
			}
			Type::Enum(e) => f.write_str(&e.name),
			Type::AnyEnum => f.write_str("anyenum"),
		}
	}
}

impl FromStr for Type {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		if let Some(element) = s.strip_suffix("[]") {
			return Ok(Type::array_of(element.parse()?));
		}

		let lower = s.to_lowercase();
		if let Some((base, rest)) = lower.split_once('(') {
			let width: u32 = rest.strip_suffix(')').ok_or(())?.trim().parse().map_err(|_| ())?;
			return match base.trim() {
				"varchar" | "character varying" => Ok(Type::VarChar(Some(width))),
				"char" | "character" | "bpchar" => Ok(Type::Char(width)),
				"bit" => Ok(Type::Bit(width)),
				"varbit" | "bit varying" => Ok(Type::VarBit(Some(width))),
				_ => Err(()),
			};
		}
		if let Some((_, locale)) = lower.split_once(" collate ") {
			return Ok(Type::collated(locale.trim()));
		}
		if let Some(kind) = OidKind::from_name(&lower) {
			return Ok(Type::Oid(kind));
		}

		match lower.as_str() {
			"unknown" => Ok(Type::Unknown),
			"bool" | "boolean" => Ok(Type::Bool),
			"int2" | "smallint" => Ok(Type::Int2),
			"int4" | "integer" => Ok(Type::Int4),
			"int8" | "int" | "bigint" => Ok(Type::Int8),
			"float4" | "real" => Ok(Type::Float4),
			"float8" | "float" | "double precision" => Ok(Type::Float8),
			"decimal" | "numeric" => Ok(Type::Decimal),
			"string" | "text" => Ok(Type::Text),
			"varchar" => Ok(Type::VarChar(None)),
			"char" | "bpchar" => Ok(Type::Char(1)),
			"\"char\"" => Ok(Type::QChar),
			"name" => Ok(Type::Name),
			"bytes" | "bytea" => Ok(Type::Bytes),
			"bit" => Ok(Type::Bit(1)),
			"varbit" => Ok(Type::VarBit(None)),
			"uuid" => Ok(Type::Uuid),
			"inet" => Ok(Type::INet),
			"date" => Ok(Type::Date),
			"time" => Ok(Type::Time),
			"timetz" => Ok(Type::TimeTZ),
			"timestamp" => Ok(Type::Timestamp),
			"timestamptz" => Ok(Type::TimestampTZ),
			"interval" => Ok(Type::Interval),
			"json" => Ok(Type::Json),
			"jsonb" => Ok(Type::Jsonb),
			"geometry" => Ok(Type::Geometry),
			"geography" => Ok(Type::Geography),
			"box2d" => Ok(Type::Box2D),
			"int2vector" => Ok(Type::Int2Vector),
			"oidvector" => Ok(Type::OidVector),
			_ => Err(()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::enum_type::EnumMetadata;

	#[test]
	fn test_type_family_of_parameterized_types() {
		assert_eq!(Type::VarChar(Some(3)).family(), Family::String);
		assert_eq!(Type::collated("de").family(), Family::CollatedString);
		assert_eq!(Type::array_of(Type::Int4).family(), Family::Array);
		assert_eq!(Type::Int2Vector.family(), Family::Array);
		assert_eq!(Type::Oid(OidKind::RegClass).family(), Family::Oid);
		assert_eq!(Type::Json.family(), Family::Json);
	}

	#[test]
	fn test_type_oid_roundtrip() {
		for ty in [
			Type::Bool,
			Type::Int2,
			Type::Int8,
			Type::Float8,
			Type::Decimal,
			Type::Text,
			Type::Uuid,
			Type::TimestampTZ,
			Type::Interval,
			Type::Jsonb,
			Type::Oid(OidKind::RegType),
			Type::array_of(Type::Int8),
			Type::OidVector,
		] {
			assert_eq!(Type::from_oid(ty.oid()), Some(ty));
		}
		assert_eq!(Type::from_oid(123456), None);
	}

	#[test]
	fn test_type_equivalent() {
		assert!(Type::Int8.equivalent(&Type::Int4));
		assert!(!Type::Int8.equivalent(&Type::Text));
		assert!(Type::Any.equivalent(&Type::Text));
		assert!(Type::array_of(Type::Int8).equivalent(&Type::array_of(Type::Int2)));
		assert!(!Type::array_of(Type::Int8).equivalent(&Type::array_of(Type::Text)));
		assert!(Type::collated("de").equivalent(&Type::any_collated_string()));
		assert!(!Type::collated("de").equivalent(&Type::collated("fr")));
		assert!(Type::any_tuple().equivalent(&Type::tuple(vec![Type::Int8, Type::Text])));

		let a = Arc::new(EnumType::new("a", 100_001, EnumMetadata::new(["x"])));
		let b = Arc::new(EnumType::new("b", 100_002, EnumMetadata::new(["x"])));
		assert!(Type::Enum(a.clone()).equivalent(&Type::Enum(a.clone())));
		assert!(!Type::Enum(a.clone()).equivalent(&Type::Enum(b)));
		assert!(Type::Enum(a).equivalent(&Type::AnyEnum));
	}

	#[test]
	fn test_type_display_and_sql_string() {
		assert_eq!(Type::array_of(Type::Text).to_string(), "string[]");
		assert_eq!(Type::array_of(Type::Text).sql_string(), "STRING[]");
		assert_eq!(Type::VarChar(Some(4)).sql_string(), "VARCHAR(4)");
		assert_eq!(Type::Oid(OidKind::RegProc).sql_string(), "REGPROC");
		assert_eq!(Type::TimestampTZ.sql_string(), "TIMESTAMPTZ");
		assert_eq!(
			Type::Tuple {
				contents: vec![Type::Int8, Type::Text],
				labels: vec!["a".to_string(), "b".to_string()],
			}
			.to_string(),
			"tuple{int8 AS a, string AS b}"
		);
	}

	#[test]
	fn test_type_from_str() {
		assert_eq!("int".parse::<Type>(), Ok(Type::Int8));
		assert_eq!("varchar(3)".parse::<Type>(), Ok(Type::VarChar(Some(3))));
		assert_eq!("bit(4)".parse::<Type>(), Ok(Type::Bit(4)));
		assert_eq!("string[]".parse::<Type>(), Ok(Type::array_of(Type::Text)));
		assert_eq!("int8[][]".parse::<Type>(), Ok(Type::array_of(Type::array_of(Type::Int8))));
		assert_eq!("regclass".parse::<Type>(), Ok(Type::Oid(OidKind::RegClass)));
		assert_eq!("string collate de".parse::<Type>(), Ok(Type::collated("de")));
		assert_eq!("nope".parse::<Type>(), Err(()));
	}
}
