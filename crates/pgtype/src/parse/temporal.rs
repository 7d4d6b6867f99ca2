// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Date and time input.
//!
//! All five temporal types share one grammar: an optional date, an optional
//! time of day and an optional zone offset, or one of the special words. Each
//! type then takes the parts it needs.

use tracing::instrument;

use super::{out_of_range, parse_error};
use crate::{
	config::{DateOrder, ParseTimeContext},
	error::Error,
	fragment::Fragment,
	value::{
		Date, MAX_OFFSET_SECS, MICROS_PER_DAY, MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SECOND, Time, TimeTZ,
		Timestamp, TimestampTZ, Type,
	},
};

enum Failure {
	Syntax(String),
	Range(String),
}

impl Failure {
	fn into_error(self, ty: &Type, fragment: Fragment) -> Error {
		match self {
			Failure::Syntax(cause) => parse_error(ty, fragment, Some(cause)),
			Failure::Range(message) => out_of_range(ty, fragment, message),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Special {
	Epoch,
	Infinity,
	NegInfinity,
	Now,
	Today,
	Tomorrow,
	Yesterday,
	Allballs,
}

impl Special {
	fn from_word(word: &str) -> Option<Special> {
		Some(match word {
			"epoch" => Special::Epoch,
			"infinity" | "+infinity" => Special::Infinity,
			"-infinity" => Special::NegInfinity,
			"now" => Special::Now,
			"today" => Special::Today,
			"tomorrow" => Special::Tomorrow,
			"yesterday" => Special::Yesterday,
			"allballs" => Special::Allballs,
			_ => return None,
		})
	}

	fn day_offset(&self) -> i32 {
		match self {
			Special::Tomorrow => 1,
			Special::Yesterday => -1,
			_ => 0,
		}
	}
}

/// The raw parts of a date/time input. The date is kept unresolved so that
/// time types can ignore it.
#[derive(Debug, Default)]
struct Fields {
	date: Option<(i32, u32, u32)>,
	bc: bool,
	time: Option<i64>,
	offset: Option<i32>,
}

enum Parsed {
	Special(Special),
	Fields(Fields),
}

fn parse_fields(text: &str, order: DateOrder) -> Result<Parsed, Failure> {
	let trimmed = text.trim();
	let lower = trimmed.to_ascii_lowercase();
	if let Some(special) = Special::from_word(&lower) {
		return Ok(Parsed::Special(special));
	}
	if lower.is_empty() {
		return Err(Failure::Syntax("empty input".to_string()));
	}

	let mut fields = Fields::default();
	let mut body = lower.as_str();
	if let Some(rest) = body.strip_suffix(" bc") {
		fields.bc = true;
		body = rest.trim_end();
	} else if let Some(rest) = body.strip_suffix(" ad") {
		body = rest.trim_end();
	}

	let split = body.find([' ', 't']);
	let (first, rest) = match split {
		Some(idx) => (&body[..idx], body[idx + 1..].trim()),
		None => (body, ""),
	};
	if first.contains(':') {
		let (time, offset) = parse_time_and_offset(body)?;
		fields.time = time;
		fields.offset = offset;
	} else {
		fields.date = Some(parse_date_part(first, order)?);
		if !rest.is_empty() {
			let (time, offset) = parse_time_and_offset(rest)?;
			fields.time = time;
			fields.offset = offset;
		}
	}
	Ok(Parsed::Fields(fields))
}

fn digits(s: &str) -> Result<u32, Failure> {
	if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
		return Err(Failure::Syntax(format!("invalid field \"{}\"", s)));
	}
	s.parse().map_err(|_| Failure::Range(format!("date/time field value out of range: \"{}\"", s)))
}

fn parse_date_part(token: &str, order: DateOrder) -> Result<(i32, u32, u32), Failure> {
	if token.len() == 8 && token.bytes().all(|b| b.is_ascii_digit()) {
		return Ok((digits(&token[..4])? as i32, digits(&token[4..6])?, digits(&token[6..])?));
	}
	let parts: Vec<&str> = token.split(['-', '/', '.']).collect();
	if parts.len() != 3 {
		return Err(Failure::Syntax(format!("unrecognized date \"{}\"", token)));
	}
	if parts[0].len() > 2 {
		return Ok((digits(parts[0])? as i32, digits(parts[1])?, digits(parts[2])?));
	}
	let (y, m, d) = match order {
		DateOrder::YMD => (parts[0], parts[1], parts[2]),
		DateOrder::DMY => (parts[2], parts[1], parts[0]),
		DateOrder::MDY => (parts[2], parts[0], parts[1]),
	};
	let mut year = digits(y)? as i32;
	if y.len() <= 2 {
		year += if year < 70 {
			2000
		} else {
			1900
		};
	}
	Ok((year, digits(m)?, digits(d)?))
}

/// Parses `HH:MM[:SS[.ffffff]]` followed by an optional `Z`, `UTC` or
/// `+-HH[:MM[:SS]]` offset. Fractions beyond microseconds are rounded.
fn parse_time_and_offset(s: &str) -> Result<(Option<i64>, Option<i32>), Failure> {
	let s = s.trim();
	let (time_text, offset) = if let Some(rest) = s.strip_suffix('z') {
		(rest, Some(0))
	} else if let Some(rest) = s.strip_suffix("utc").or_else(|| s.strip_suffix("gmt")) {
		(rest, Some(0))
	} else if let Some(idx) = s.find(['+', '-']) {
		(&s[..idx], Some(parse_offset(&s[idx..])?))
	} else {
		(s, None)
	};
	let time_text = time_text.trim();
	if time_text.is_empty() {
		return Ok((None, offset));
	}
	Ok((Some(parse_time_of_day(time_text)?), offset))
}

fn parse_time_of_day(s: &str) -> Result<i64, Failure> {
	let parts: Vec<&str> = s.split(':').collect();
	if !(2..=3).contains(&parts.len()) {
		return Err(Failure::Syntax(format!("invalid time \"{}\"", s)));
	}
	let hour = digits(parts[0])? as i64;
	let minute = digits(parts[1])? as i64;
	let (second, fraction) = match parts.get(2) {
		Some(seconds) => match seconds.split_once('.') {
			Some((whole, frac)) => (digits(whole)? as i64, parse_fraction(frac)?),
			None => (digits(seconds)? as i64, 0),
		},
		None => (0, 0),
	};
	if hour > 24 || minute > 59 || second > 60 {
		return Err(Failure::Range(format!("date/time field value out of range: \"{}\"", s)));
	}
	let micros =
		hour * MICROS_PER_HOUR + minute * MICROS_PER_MINUTE + second * MICROS_PER_SECOND + fraction;
	if micros > MICROS_PER_DAY {
		return Err(Failure::Range(format!("date/time field value out of range: \"{}\"", s)));
	}
	Ok(micros)
}

fn parse_fraction(frac: &str) -> Result<i64, Failure> {
	if !frac.bytes().all(|b| b.is_ascii_digit()) {
		return Err(Failure::Syntax(format!("invalid fraction \"{}\"", frac)));
	}
	let mut micros = 0i64;
	for (i, b) in frac.bytes().take(6).enumerate() {
		micros += (b - b'0') as i64 * 10i64.pow(5 - i as u32);
	}
	if frac.as_bytes().get(6).is_some_and(|b| *b >= b'5') {
		micros += 1;
	}
	Ok(micros)
}

fn parse_offset(s: &str) -> Result<i32, Failure> {
	let (sign, body) = match s.as_bytes().first() {
		Some(b'-') => (-1, &s[1..]),
		Some(b'+') => (1, &s[1..]),
		_ => return Err(Failure::Syntax(format!("invalid time zone \"{}\"", s))),
	};
	let body = body.trim();
	if !body.is_ascii() {
		return Err(Failure::Syntax(format!("invalid time zone \"{}\"", s)));
	}
	let (h, m, sec) = if body.contains(':') {
		let parts: Vec<&str> = body.split(':').collect();
		match parts.as_slice() {
			[h, m] => (digits(h)?, digits(m)?, 0),
			[h, m, s] => (digits(h)?, digits(m)?, digits(s)?),
			_ => return Err(Failure::Syntax(format!("invalid time zone \"{}\"", s))),
		}
	} else {
		match body.len() {
			1 | 2 => (digits(body)?, 0, 0),
			4 => (digits(&body[..2])?, digits(&body[2..])?, 0),
			6 => (digits(&body[..2])?, digits(&body[2..4])?, digits(&body[4..])?),
			_ => return Err(Failure::Syntax(format!("invalid time zone \"{}\"", s))),
		}
	};
	if m > 59 || sec > 59 {
		return Err(Failure::Syntax(format!("invalid time zone \"{}\"", s)));
	}
	let total = (h as i64 * 3600 + m as i64 * 60 + sec as i64) * sign;
	if total.abs() > MAX_OFFSET_SECS as i64 {
		return Err(Failure::Range(format!("time zone displacement out of range: \"{}\"", s)));
	}
	Ok(total as i32)
}

fn resolve_date(fields: &Fields) -> Result<Date, Failure> {
	let Some((year, month, day)) = fields.date else {
		return Err(Failure::Syntax("missing date".to_string()));
	};
	if year == 0 {
		return Err(Failure::Range("date/time field value out of range: year 0".to_string()));
	}
	let year = if fields.bc {
		1 - year
	} else {
		year
	};
	if !(1..=12).contains(&month) || day < 1 || day > Date::days_in_month(year, month) {
		return Err(Failure::Range(format!("date/time field value out of range: {}-{}-{}", year, month, day)));
	}
	Date::new(year, month, day).ok_or_else(|| Failure::Range("date is out of range".to_string()))
}

fn resolve_timestamp(fields: &Fields) -> Result<Timestamp, Failure> {
	let date = resolve_date(fields)?;
	let time = Time::from_micros(fields.time.unwrap_or(0))
		.ok_or_else(|| Failure::Range("time is out of range".to_string()))?;
	Timestamp::from_date_time(date, time).ok_or_else(|| Failure::Range("timestamp is out of range".to_string()))
}

fn resolve_time(fields: &Fields) -> Result<Time, Failure> {
	let Some(micros) = fields.time else {
		return Err(Failure::Syntax("missing time".to_string()));
	};
	Time::from_micros(micros).ok_or_else(|| Failure::Range("time is out of range".to_string()))
}

fn relative_date(ctx: &dyn ParseTimeContext, special: Special) -> Result<Date, Failure> {
	ctx.today().add_days(special.day_offset()).ok_or_else(|| Failure::Range("date is out of range".to_string()))
}

fn midnight(date: Date) -> Result<Timestamp, Failure> {
	Timestamp::from_date_time(date, Time::MIDNIGHT).ok_or_else(|| Failure::Range("timestamp is out of range".into()))
}

fn unsupported(special: Special) -> Failure {
	Failure::Syntax(format!("{:?} is not valid for this type", special).to_lowercase())
}

/// Parses a date. Any time of day or offset in the input is ignored.
#[instrument(name = "pgtype::parse::date", level = "trace", skip_all)]
pub fn parse_date(ctx: &dyn ParseTimeContext, fragment: Fragment) -> crate::Result<(Date, bool)> {
	let result = match parse_fields(fragment.text(), ctx.config().date_style.order()) {
		Ok(Parsed::Special(special)) => match special {
			Special::Epoch => Ok((Date::default(), false)),
			Special::Infinity => Ok((Date::INFINITY, false)),
			Special::NegInfinity => Ok((Date::NEG_INFINITY, false)),
			Special::Now | Special::Today | Special::Tomorrow | Special::Yesterday => {
				relative_date(ctx, special).map(|date| (date, true))
			}
			Special::Allballs => Err(unsupported(special)),
		},
		Ok(Parsed::Fields(fields)) => resolve_date(&fields).map(|date| (date, false)),
		Err(failure) => Err(failure),
	};
	result.map_err(|failure| failure.into_error(&Type::Date, fragment))
}

/// Parses a time of day, including `24:00:00`. A date or offset in the
/// input is ignored.
#[instrument(name = "pgtype::parse::time", level = "trace", skip_all)]
pub fn parse_time(ctx: &dyn ParseTimeContext, fragment: Fragment) -> crate::Result<(Time, bool)> {
	let result = match parse_fields(fragment.text(), ctx.config().date_style.order()) {
		Ok(Parsed::Special(Special::Now)) => Ok((ctx.current_time(), true)),
		Ok(Parsed::Special(Special::Allballs)) => Ok((Time::MIDNIGHT, false)),
		Ok(Parsed::Special(special)) => Err(unsupported(special)),
		Ok(Parsed::Fields(fields)) => resolve_time(&fields).map(|time| (time, false)),
		Err(failure) => Err(failure),
	};
	result.map_err(|failure| failure.into_error(&Type::Time, fragment))
}

/// Parses a time with zone. Without an explicit offset the session zone is
/// used and the result depends on the context.
#[instrument(name = "pgtype::parse::timetz", level = "trace", skip_all)]
pub fn parse_timetz(ctx: &dyn ParseTimeContext, fragment: Fragment) -> crate::Result<(TimeTZ, bool)> {
	let session_offset = ctx.config().time_zone_offset_secs;
	let result = match parse_fields(fragment.text(), ctx.config().date_style.order()) {
		Ok(Parsed::Special(Special::Now)) => Ok((ctx.current_timetz(), true)),
		Ok(Parsed::Special(Special::Allballs)) => Ok((TimeTZ::new(Time::MIDNIGHT, 0).unwrap_or_default(), false)),
		Ok(Parsed::Special(special)) => Err(unsupported(special)),
		Ok(Parsed::Fields(fields)) => resolve_time(&fields).and_then(|time| {
			let offset = fields.offset.unwrap_or(session_offset);
			TimeTZ::new(time, offset)
				.map(|value| (value, fields.offset.is_none()))
				.ok_or_else(|| Failure::Range("time zone displacement out of range".to_string()))
		}),
		Err(failure) => Err(failure),
	};
	result.map_err(|failure| failure.into_error(&Type::TimeTZ, fragment))
}

/// Parses a timestamp without zone. An offset in the input is ignored.
#[instrument(name = "pgtype::parse::timestamp", level = "trace", skip_all)]
pub fn parse_timestamp(ctx: &dyn ParseTimeContext, fragment: Fragment) -> crate::Result<(Timestamp, bool)> {
	let result = match parse_fields(fragment.text(), ctx.config().date_style.order()) {
		Ok(Parsed::Special(special)) => match special {
			Special::Epoch => Ok((Timestamp::default(), false)),
			Special::Infinity => Ok((Timestamp::INFINITY, false)),
			Special::NegInfinity => Ok((Timestamp::NEG_INFINITY, false)),
			Special::Now => Ok((ctx.local_now(), true)),
			Special::Today | Special::Tomorrow | Special::Yesterday => {
				relative_date(ctx, special).and_then(midnight).map(|ts| (ts, true))
			}
			Special::Allballs => Err(unsupported(special)),
		},
		Ok(Parsed::Fields(fields)) => resolve_timestamp(&fields).map(|ts| (ts, false)),
		Err(failure) => Err(failure),
	};
	result.map_err(|failure| failure.into_error(&Type::Timestamp, fragment))
}

/// Parses a timestamp with zone. Without an explicit offset the wall clock
/// is read in the session zone and the result depends on the context.
#[instrument(name = "pgtype::parse::timestamptz", level = "trace", skip_all)]
pub fn parse_timestamptz(ctx: &dyn ParseTimeContext, fragment: Fragment) -> crate::Result<(TimestampTZ, bool)> {
	let session_offset = ctx.config().time_zone_offset_secs;
	let zoned = |local: Timestamp, offset: i32| {
		TimestampTZ::from_local(local, offset).ok_or_else(|| Failure::Range("timestamp is out of range".to_string()))
	};
	let result = match parse_fields(fragment.text(), ctx.config().date_style.order()) {
		Ok(Parsed::Special(special)) => match special {
			Special::Epoch => Ok((TimestampTZ::default(), false)),
			Special::Infinity => Ok((TimestampTZ::INFINITY, false)),
			Special::NegInfinity => Ok((TimestampTZ::NEG_INFINITY, false)),
			Special::Now => Ok((ctx.now(), true)),
			Special::Today | Special::Tomorrow | Special::Yesterday => relative_date(ctx, special)
				.and_then(midnight)
				.and_then(|local| zoned(local, session_offset))
				.map(|ts| (ts, true)),
			Special::Allballs => Err(unsupported(special)),
		},
		Ok(Parsed::Fields(fields)) => resolve_timestamp(&fields).and_then(|local| {
			let offset = fields.offset.unwrap_or(session_offset);
			zoned(local, offset).map(|ts| (ts, fields.offset.is_none()))
		}),
		Err(failure) => Err(failure),
	};
	result.map_err(|failure| failure.into_error(&Type::TimestampTZ, fragment))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{DateStyle, SessionConfig, SimpleParseTimeContext};

	fn ctx() -> SimpleParseTimeContext {
		// 2024-03-15 12:00:00 UTC
		SimpleParseTimeContext::new(TimestampTZ::from_micros(1_710_504_000 * MICROS_PER_SECOND).unwrap())
	}

	fn date(s: &str) -> crate::Result<(Date, bool)> {
		parse_date(&ctx(), Fragment::testing(s))
	}

	#[test]
	fn test_date_forms() {
		let expected = Date::new(2024, 3, 15).unwrap();
		assert_eq!(date("2024-03-15").unwrap(), (expected, false));
		assert_eq!(date(" 20240315 ").unwrap().0, expected);
		assert_eq!(date("03/15/2024").unwrap().0, expected);
		assert_eq!(date("2024-03-15 23:59:59+05").unwrap().0, expected);
		assert_eq!(date("0044-03-15 BC").unwrap().0, Date::new(-43, 3, 15).unwrap());
	}

	#[test]
	fn test_date_order_follows_session() {
		let ctx = ctx().with_config(SessionConfig::new().date_style(DateStyle::Iso(DateOrder::DMY)));
		let (value, _) = parse_date(&ctx, Fragment::testing("15/03/24")).unwrap();
		assert_eq!(value, Date::new(2024, 3, 15).unwrap());
	}

	#[test]
	fn test_date_specials() {
		assert_eq!(date("today").unwrap(), (Date::new(2024, 3, 15).unwrap(), true));
		assert_eq!(date("Tomorrow").unwrap(), (Date::new(2024, 3, 16).unwrap(), true));
		assert_eq!(date("yesterday").unwrap(), (Date::new(2024, 3, 14).unwrap(), true));
		assert_eq!(date("epoch").unwrap(), (Date::default(), false));
		assert_eq!(date("-infinity").unwrap().0, Date::NEG_INFINITY);
	}

	#[test]
	fn test_date_errors() {
		assert_eq!(date("2024-02-30").unwrap_err().code, "PARSE_002");
		assert_eq!(date("0000-01-01").unwrap_err().code, "PARSE_002");
		assert_eq!(date("5874898-01-01").unwrap_err().code, "PARSE_002");
		assert_eq!(date("not a date").unwrap_err().code, "PARSE_001");
	}

	#[test]
	fn test_time_forms() {
		let (value, depends) = parse_time(&ctx(), Fragment::testing("14:30:00.1234567")).unwrap();
		assert_eq!(value, Time::new(14, 30, 0, 123_457).unwrap());
		assert!(!depends);
		assert_eq!(parse_time(&ctx(), Fragment::testing("24:00")).unwrap().0, Time::END_OF_DAY);
		assert_eq!(parse_time(&ctx(), Fragment::testing("24:00:01")).unwrap_err().code, "PARSE_002");
		assert_eq!(parse_time(&ctx(), Fragment::testing("now")).unwrap(), (Time::new(12, 0, 0, 0).unwrap(), true));
	}

	#[test]
	fn test_timetz_offsets() {
		let (value, depends) = parse_timetz(&ctx(), Fragment::testing("12:00:00+05:30")).unwrap();
		assert_eq!(value.offset_secs, 19800);
		assert!(!depends);
		let (value, depends) = parse_timetz(&ctx(), Fragment::testing("12:00:00")).unwrap();
		assert_eq!(value.offset_secs, 0);
		assert!(depends);
		assert_eq!(parse_timetz(&ctx(), Fragment::testing("12:00:00+16")).unwrap_err().code, "PARSE_002");
		assert!(parse_timetz(&ctx(), Fragment::testing("12:00:00-15:59")).is_ok());
	}

	#[test]
	fn test_non_ascii_offset_is_rejected() {
		assert!(matches!(parse_offset("+aé1"), Err(Failure::Syntax(_))));
		assert_eq!(parse_timetz(&ctx(), Fragment::testing("10:00+aé1")).unwrap_err().code, "PARSE_001");
		assert_eq!(parse_time(&ctx(), Fragment::testing("10:00+1é2b3")).unwrap_err().code, "PARSE_001");
		let err = parse_timestamptz(&ctx(), Fragment::testing("2024-01-01 10:00+aé1")).unwrap_err();
		assert_eq!(err.code, "PARSE_001");
	}

	#[test]
	fn test_timestamp_range_ends() {
		let (value, _) = parse_timestamp(&ctx(), Fragment::testing("294276-12-31 23:59:59.999999")).unwrap();
		assert_eq!(value.date(), Date::new(294276, 12, 31).unwrap());
		let (value, _) = parse_timestamptz(&ctx(), Fragment::testing("294276-12-31 00:00:00+00")).unwrap();
		assert!(value.is_finite());
		let err = parse_timestamptz(&ctx(), Fragment::testing("294276-12-31 23:00:00-02")).unwrap_err();
		assert_eq!(err.code, "PARSE_002");
		let (value, _) = parse_timestamp(&ctx(), Fragment::testing("4714-11-24 00:00:00 BC")).unwrap();
		assert_eq!(value.to_string(), "4714-11-24 00:00:00 BC");
	}

	#[test]
	fn test_timestamp_ignores_offset() {
		let (value, depends) = parse_timestamp(&ctx(), Fragment::testing("2024-03-15T14:30:00+02")).unwrap();
		assert_eq!(value.to_string(), "2024-03-15 14:30:00");
		assert!(!depends);
	}

	#[test]
	fn test_timestamptz_offsets() {
		let (value, depends) = parse_timestamptz(&ctx(), Fragment::testing("2024-03-15 14:30:00+02")).unwrap();
		assert_eq!(value.display_in(0).to_string(), "2024-03-15 12:30:00+00:00");
		assert!(!depends);

		let ctx = ctx().with_config(SessionConfig::new().time_zone_offset_secs(3600));
		let (value, depends) = parse_timestamptz(&ctx, Fragment::testing("2024-03-15 14:30:00")).unwrap();
		assert_eq!(value.display_in(0).to_string(), "2024-03-15 13:30:00+00:00");
		assert!(depends);

		let (value, depends) = parse_timestamptz(&ctx, Fragment::testing("2024-03-15 14:30:00Z")).unwrap();
		assert_eq!(value.display_in(0).to_string(), "2024-03-15 14:30:00+00:00");
		assert!(!depends);
	}

	#[test]
	fn test_timestamp_specials() {
		let (value, depends) = parse_timestamp(&ctx(), Fragment::testing("now")).unwrap();
		assert_eq!(value.to_string(), "2024-03-15 12:00:00");
		assert!(depends);
		assert_eq!(parse_timestamp(&ctx(), Fragment::testing("infinity")).unwrap().0, Timestamp::INFINITY);
		assert_eq!(parse_timestamptz(&ctx(), Fragment::testing("epoch")).unwrap(), (TimestampTZ::default(), false));
	}
}
