// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Textual rendering of datums.
//!
//! The flags only change how a value is spelled. `PARSABLE` output re-parses
//! to an equal value: negative numbers are parenthesised, non finite numbers
//! are quoted and ambiguous values carry a `:::TYPE` annotation.

use std::{
	fmt,
	ops::{BitOr, BitOrAssign},
};

use super::{Array, Datum, Tuple};
use crate::{
	config::{ByteaOutput, SessionConfig},
	value::{OidKind, Type, hex},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FmtFlags(u32);

impl FmtFlags {
	pub const SIMPLE: FmtFlags = FmtFlags(0);
	/// Strings and string-like values are written without quotes.
	pub const BARE_STRINGS: FmtFlags = FmtFlags(1 << 0);
	/// Output re-parses to an equal value of the same type.
	pub const PARSABLE: FmtFlags = FmtFlags(1 << 1);
	/// Text encoding of the Postgres wire protocol.
	pub const PGWIRE: FmtFlags = FmtFlags((1 << 2) | Self::BARE_STRINGS.0);
	/// User defined enums render their physical representation.
	pub const STATIC_USER_TYPES: FmtFlags = FmtFlags(1 << 3);
	/// Byte strings render as `b'...'` literals.
	pub const FORMAT_BYTE_LITERALS: FmtFlags = FmtFlags(1 << 4);
	/// Raw values for export, arrays in literal `{...}` form.
	pub const EXPORT: FmtFlags = FmtFlags((1 << 5) | Self::BARE_STRINGS.0);

	pub fn bits(&self) -> u32 {
		self.0
	}

	pub fn contains(&self, other: FmtFlags) -> bool {
		self.0 & other.0 == other.0
	}

	pub fn without(&self, other: FmtFlags) -> FmtFlags {
		FmtFlags(self.0 & !other.0)
	}
}

impl BitOr for FmtFlags {
	type Output = FmtFlags;

	fn bitor(self, rhs: FmtFlags) -> FmtFlags {
		FmtFlags(self.0 | rhs.0)
	}
}

impl BitOrAssign for FmtFlags {
	fn bitor_assign(&mut self, rhs: FmtFlags) {
		self.0 |= rhs.0;
	}
}

/// A rendering buffer together with the flags and session settings in
/// effect.
pub struct FmtCtx {
	buf: String,
	flags: FmtFlags,
	config: SessionConfig,
}

impl FmtCtx {
	pub fn new(flags: FmtFlags) -> Self {
		Self::with_config(flags, SessionConfig::default())
	}

	pub fn with_config(flags: FmtFlags, config: SessionConfig) -> Self {
		Self {
			buf: String::new(),
			flags,
			config,
		}
	}

	pub fn flags(&self) -> FmtFlags {
		self.flags
	}

	pub fn has_flags(&self, flags: FmtFlags) -> bool {
		self.flags.contains(flags)
	}

	pub fn as_str(&self) -> &str {
		&self.buf
	}

	pub fn into_string(self) -> String {
		self.buf
	}

	/// Renders `datum`, followed by a type annotation when the output must
	/// be parsable and the text alone does not determine the type.
	pub fn format_datum(&mut self, datum: &Datum) {
		self.format_value(datum);
		if self.has_flags(FmtFlags::PARSABLE) && datum.is_ambiguous() {
			self.buf.push_str(":::");
			self.buf.push_str(&datum.resolved_type().sql_string());
		}
	}

	fn with_flags(&mut self, flags: FmtFlags, f: impl FnOnce(&mut Self)) {
		let saved = self.flags;
		self.flags = flags;
		f(self);
		self.flags = saved;
	}

	fn bare(&self) -> bool {
		self.has_flags(FmtFlags::BARE_STRINGS)
	}

	fn parsable(&self) -> bool {
		self.has_flags(FmtFlags::PARSABLE)
	}

	fn pgwire(&self) -> bool {
		self.has_flags(FmtFlags::PGWIRE)
	}

	fn format_value(&mut self, datum: &Datum) {
		match datum {
			Datum::Null => {
				if !self.pgwire() {
					self.buf.push_str("NULL");
				}
			}
			Datum::Bool(b) => self.buf.push_str(match (self.pgwire(), b) {
				(true, true) => "t",
				(true, false) => "f",
				(false, true) => "true",
				(false, false) => "false",
			}),
			Datum::Int(i) => self.format_signed(&i.to_string(), *i < 0),
			Datum::Float(f) => {
				if self.parsable() && !f.is_finite() {
					self.quoted(&format_float(*f));
				} else {
					self.format_signed(&format_float(*f), f.is_sign_negative() && !f.is_nan());
				}
			}
			Datum::Decimal(d) => {
				if self.parsable() && !d.is_finite() {
					self.quoted(&d.to_string());
				} else {
					self.format_signed(&d.to_string(), d.is_negative());
				}
			}
			Datum::String(s) => self.quoted(s),
			Datum::CollatedString(s) => {
				encode_sql_string(&mut self.buf, &s.contents);
				self.buf.push_str(" COLLATE ");
				self.buf.push_str(&s.locale);
			}
			Datum::Bytes(b) => self.format_bytes(b),
			Datum::Bit(b) => {
				if self.bare() {
					self.buf.push_str(&b.to_string());
				} else {
					self.buf.push_str("B'");
					self.buf.push_str(&b.to_string());
					self.buf.push('\'');
				}
			}
			Datum::Uuid(u) => self.quoted(&u.hyphenated().to_string()),
			Datum::INet(i) => self.quoted(&i.to_string()),
			Datum::Date(d) => self.quoted(&d.to_string()),
			Datum::Time(t) => self.quoted(&t.to_string()),
			Datum::TimeTZ(t) => self.quoted(&t.to_string()),
			Datum::Timestamp(t) => self.quoted(&t.to_string()),
			Datum::TimestampTZ(t) => {
				let text = t.display_in(self.config.time_zone_offset_secs).to_string();
				self.quoted(&text)
			}
			Datum::Interval(i) => {
				let text = i.display(self.config.interval_style).to_string();
				self.quoted(&text)
			}
			Datum::Geometry(g) => self.quoted(&g.to_string()),
			Datum::Geography(g) => self.quoted(&g.to_string()),
			Datum::Box2D(b) => self.quoted(&b.to_string()),
			Datum::Json(v) => self.quoted(&v.to_string()),
			Datum::Enum(e) => {
				if self.has_flags(FmtFlags::STATIC_USER_TYPES) {
					let flags = self.flags.without(FmtFlags::BARE_STRINGS) | FmtFlags::FORMAT_BYTE_LITERALS;
					self.with_flags(flags, |ctx| ctx.format_bytes(e.physical_rep()));
				} else {
					self.quoted(e.logical_rep());
				}
			}
			Datum::Array(a) => {
				if self.pgwire() || self.has_flags(FmtFlags::EXPORT) {
					self.format_array_literal(a);
				} else {
					self.format_array(a);
				}
			}
			Datum::Tuple(t) => {
				if self.pgwire() {
					self.format_record(t);
				} else {
					self.format_tuple(t);
				}
			}
			Datum::Oid(o) => match o.name() {
				Some(name) if o.kind() != OidKind::Oid => {
					if self.parsable() {
						self.buf.push_str("crdb_internal.create_");
						self.buf.push_str(o.kind().name());
						self.buf.push('(');
						self.buf.push_str(&o.value().to_string());
						self.buf.push(',');
						encode_sql_string(&mut self.buf, name);
						self.buf.push(')');
					} else {
						self.buf.push_str(name);
					}
				}
				_ => self.buf.push_str(&o.value().to_string()),
			},
			Datum::OidWrapper(w) => self.format_value(w.inner()),
		}
	}

	fn format_signed(&mut self, text: &str, negative: bool) {
		if negative && self.parsable() {
			self.buf.push('(');
			self.buf.push_str(text);
			self.buf.push(')');
		} else {
			self.buf.push_str(text);
		}
	}

	fn quoted(&mut self, text: &str) {
		if self.bare() {
			self.buf.push_str(text);
		} else {
			encode_sql_string(&mut self.buf, text);
		}
	}

	fn format_bytes(&mut self, bytes: &[u8]) {
		if self.bare() {
			match self.config.bytea_output {
				ByteaOutput::Hex => {
					self.buf.push_str("\\x");
					self.buf.push_str(&hex::encode(bytes));
				}
				ByteaOutput::Escape => encode_bytea_escape(&mut self.buf, bytes),
			}
			return;
		}
		if self.has_flags(FmtFlags::FORMAT_BYTE_LITERALS) {
			self.buf.push('b');
		}
		self.buf.push_str("'\\x");
		self.buf.push_str(&hex::encode(bytes));
		self.buf.push('\'');
	}

	fn format_array(&mut self, array: &Array) {
		self.buf.push_str("ARRAY[");
		for (i, element) in array.elements().iter().enumerate() {
			if i > 0 {
				self.buf.push(',');
			}
			self.format_datum(element);
		}
		self.buf.push(']');
	}

	/// The `{a,b}` array literal of the wire protocol.
	fn format_array_literal(&mut self, array: &Array) {
		let flags = self.flags.without(FmtFlags::PARSABLE) | FmtFlags::BARE_STRINGS;
		self.buf.push('{');
		for (i, element) in array.elements().iter().enumerate() {
			if i > 0 {
				self.buf.push(',');
			}
			match element {
				Datum::Null => self.buf.push_str("NULL"),
				Datum::Array(inner) => self.with_flags(flags, |ctx| ctx.format_array_literal(inner)),
				other => {
					let mut inner = FmtCtx::with_config(flags, self.config.clone());
					inner.format_value(other);
					let text = inner.into_string();
					if array_element_needs_quotes(&text) {
						quote_composite_element(&mut self.buf, &text);
					} else {
						self.buf.push_str(&text);
					}
				}
			}
		}
		self.buf.push('}');
	}

	fn format_tuple(&mut self, tuple: &Tuple) {
		let contents = match tuple.resolved_type() {
			Type::Tuple {
				contents,
				..
			} => contents.clone(),
			_ => vec![],
		};
		let labels = tuple.labels();
		if !labels.is_empty() {
			self.buf.push('(');
		}
		self.buf.push('(');
		for (i, element) in tuple.datums().iter().enumerate() {
			if i > 0 {
				self.buf.push_str(", ");
			}
			self.format_datum(element);
			if element.is_null() && self.parsable() {
				match contents.get(i) {
					Some(ty) if *ty != Type::Unknown => {
						self.buf.push_str("::");
						self.buf.push_str(&ty.sql_string());
					}
					_ => {}
				}
			}
		}
		if tuple.len() == 1 {
			self.buf.push(',');
		}
		self.buf.push(')');
		if !labels.is_empty() {
			self.buf.push_str(" AS ");
			self.buf.push_str(&labels.join(", "));
			self.buf.push(')');
		}
	}

	/// The `(a,b)` record text of the wire protocol. NULL fields are empty.
	fn format_record(&mut self, tuple: &Tuple) {
		self.buf.push('(');
		for (i, element) in tuple.datums().iter().enumerate() {
			if i > 0 {
				self.buf.push(',');
			}
			if element.is_null() {
				continue;
			}
			let mut inner = FmtCtx::with_config(self.flags, self.config.clone());
			inner.format_value(element);
			let text = inner.into_string();
			if record_field_needs_quotes(&text) {
				quote_composite_element(&mut self.buf, &text);
			} else {
				self.buf.push_str(&text);
			}
		}
		self.buf.push(')');
	}
}

impl fmt::Write for FmtCtx {
	fn write_str(&mut self, s: &str) -> fmt::Result {
		self.buf.push_str(s);
		Ok(())
	}
}

/// Writes `s` as a SQL string literal, switching to the `e'...'` escape form
/// when it contains quotes, backslashes or control characters.
pub(crate) fn encode_sql_string(buf: &mut String, s: &str) {
	let needs_escape = s.chars().any(|c| c == '\'' || c == '\\' || c.is_control());
	if !needs_escape {
		buf.push('\'');
		buf.push_str(s);
		buf.push('\'');
		return;
	}
	buf.push_str("e'");
	for c in s.chars() {
		match c {
			'\'' => buf.push_str("\\'"),
			'\\' => buf.push_str("\\\\"),
			'\n' => buf.push_str("\\n"),
			'\t' => buf.push_str("\\t"),
			'\r' => buf.push_str("\\r"),
			c if c.is_control() && (c as u32) < 0x100 => buf.push_str(&format!("\\x{:02x}", c as u32)),
			c if c.is_control() => buf.push_str(&format!("\\u{:04x}", c as u32)),
			c => buf.push(c),
		}
	}
	buf.push('\'');
}

fn encode_bytea_escape(buf: &mut String, bytes: &[u8]) {
	for &b in bytes {
		match b {
			b'\\' => buf.push_str("\\\\"),
			0x20..=0x7e => buf.push(b as char),
			_ => buf.push_str(&format!("\\{:03o}", b)),
		}
	}
}

fn array_element_needs_quotes(text: &str) -> bool {
	text.is_empty()
		|| text.eq_ignore_ascii_case("NULL")
		|| text.chars().any(|c| matches!(c, '{' | '}' | ',' | '"' | '\\') || c.is_whitespace())
}

fn record_field_needs_quotes(text: &str) -> bool {
	text.is_empty() || text.chars().any(|c| matches!(c, '(' | ')' | ',' | '"' | '\\') || c.is_whitespace())
}

fn quote_composite_element(buf: &mut String, text: &str) {
	buf.push('"');
	for c in text.chars() {
		if c == '"' || c == '\\' {
			buf.push('\\');
		}
		buf.push(c);
	}
	buf.push('"');
}

/// Formats a float the way `%g` with shortest digits does, except that whole
/// numbers below one million keep a single decimal place.
pub(crate) fn format_float(value: f64) -> String {
	if value.is_nan() {
		return "NaN".to_string();
	}
	if value.is_infinite() {
		return if value > 0.0 {
			"+Inf".to_string()
		} else {
			"-Inf".to_string()
		};
	}
	if value == value.trunc() && value.abs() < 1e6 {
		return format!("{:.1}", value);
	}
	let scientific = format!("{:e}", value);
	let Some((mantissa, exponent)) = scientific.split_once('e') else {
		return value.to_string();
	};
	let Ok(exponent) = exponent.parse::<i32>() else {
		return value.to_string();
	};
	if !(-4..6).contains(&exponent) {
		let sign = if exponent < 0 {
			'-'
		} else {
			'+'
		};
		return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
	}
	value.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_format_float() {
		assert_eq!(format_float(1.0), "1.0");
		assert_eq!(format_float(-3.0), "-3.0");
		assert_eq!(format_float(0.5), "0.5");
		assert_eq!(format_float(123456.5), "123456.5");
		assert_eq!(format_float(1234567.5), "1.2345675e+06");
		assert_eq!(format_float(1e6), "1e+06");
		assert_eq!(format_float(0.00001), "1e-05");
		assert_eq!(format_float(0.0001), "0.0001");
		assert_eq!(format_float(f64::NAN), "NaN");
		assert_eq!(format_float(f64::NEG_INFINITY), "-Inf");
	}

	#[test]
	fn test_encode_sql_string() {
		let mut buf = String::new();
		encode_sql_string(&mut buf, "abc");
		assert_eq!(buf, "'abc'");

		let mut buf = String::new();
		encode_sql_string(&mut buf, "it's\n");
		assert_eq!(buf, "e'it\\'s\\n'");
	}

	#[test]
	fn test_flags_compose() {
		assert!(FmtFlags::PGWIRE.contains(FmtFlags::BARE_STRINGS));
		assert!(FmtFlags::EXPORT.contains(FmtFlags::BARE_STRINGS));
		assert!(!FmtFlags::PARSABLE.contains(FmtFlags::BARE_STRINGS));
		let flags = FmtFlags::PARSABLE | FmtFlags::FORMAT_BYTE_LITERALS;
		assert!(flags.contains(FmtFlags::PARSABLE));
		assert_eq!(flags.without(FmtFlags::PARSABLE), FmtFlags::FORMAT_BYTE_LITERALS);
	}

	#[test]
	fn test_format_scalars() {
		assert_eq!(Datum::bool(true).to_string(), "true");
		assert_eq!(Datum::bool(false).to_string_with(FmtFlags::PGWIRE), "f");
		assert_eq!(Datum::int(-5).to_string_with(FmtFlags::PARSABLE), "(-5):::INT8");
		assert_eq!(Datum::int(5).to_string(), "5");
		assert_eq!(Datum::float(f64::NAN).to_string_with(FmtFlags::PARSABLE), "'NaN':::FLOAT8");
		assert_eq!(Datum::string("hi").to_string(), "'hi'");
		assert_eq!(Datum::string("hi").to_string_with(FmtFlags::BARE_STRINGS), "hi");
		assert_eq!(Datum::collated_string("a", "de").to_string(), "'a' COLLATE de");
		assert_eq!(Datum::bytes(vec![0xab, 0x01]).to_string(), "'\\xab01'");
		assert_eq!(Datum::bytes(vec![0xab]).to_string_with(FmtFlags::FORMAT_BYTE_LITERALS), "b'\\xab'");
		assert_eq!(Datum::bytes(vec![0xab]).to_string_with(FmtFlags::PGWIRE), "\\xab");
		assert_eq!(Datum::Null.to_string(), "NULL");
		assert_eq!(Datum::Null.to_string_with(FmtFlags::PGWIRE), "");
	}

	#[test]
	fn test_format_tuples() {
		let tuple = Tuple::new(vec![Datum::int(1)]);
		assert_eq!(Datum::Tuple(tuple).to_string(), "(1,)");

		let labelled = Tuple::with_labels(vec![Datum::int(1), Datum::string("a")], vec!["x".into(), "y".into()]);
		assert_eq!(Datum::Tuple(labelled).to_string(), "((1, 'a') AS x, y)");

		let typed = Tuple::with_type(vec![Datum::int(1), Datum::Null], Type::tuple(vec![Type::Int8, Type::Text]));
		assert_eq!(Datum::Tuple(typed).to_string_with(FmtFlags::PARSABLE), "(1:::INT8, NULL::STRING)");

		let record = Tuple::new(vec![Datum::int(1), Datum::Null, Datum::string("a b")]);
		assert_eq!(Datum::Tuple(record).to_string_with(FmtFlags::PGWIRE), "(1,,\"a b\")");
	}

	#[test]
	fn test_format_arrays() {
		let array = Array::from_elements(Type::Text, [Datum::string("a"), Datum::Null, Datum::string("b c")]);
		assert_eq!(Datum::Array(array.clone()).to_string(), "ARRAY['a',NULL,'b c']");
		assert_eq!(Datum::Array(array).to_string_with(FmtFlags::PGWIRE), "{a,NULL,\"b c\"}");

		let empty = Array::new(Type::Int8);
		assert_eq!(Datum::Array(empty).to_string_with(FmtFlags::PARSABLE), "ARRAY[]:::INT8[]");
	}
}
