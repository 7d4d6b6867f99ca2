// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Interval input.
//!
//! Three spellings are accepted:
//!
//! - ISO 8601 durations: `P1Y2M3DT4H5M6.5S`, `P2W`
//! - SQL standard: `1-2` (years-months), `3 4:05:06`, `4:05`, or a bare
//!   number of seconds
//! - postgres verbose: `@ 1 year 2 mons -3 days 04:05:06 ago`
//!
//! Fractional units spill into smaller ones with 30 day months and 24 hour
//! days.

use tracing::instrument;

use super::{out_of_range, parse_error};
use crate::{
	error::Error,
	fragment::Fragment,
	value::{Interval, MICROS_PER_DAY, MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SECOND, Type},
};

const DAYS_PER_MONTH: f64 = 30.0;

enum Failure {
	Syntax(String),
	Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
	Millennium,
	Century,
	Decade,
	Year,
	Month,
	Week,
	Day,
	Hour,
	Minute,
	Second,
	Millisecond,
	Microsecond,
}

impl Unit {
	fn from_word(word: &str) -> Option<Unit> {
		Some(match word {
			"millennium" | "millennia" | "millenniums" | "mil" | "mils" => Unit::Millennium,
			"century" | "centuries" | "cent" | "c" => Unit::Century,
			"decade" | "decades" | "dec" | "decs" => Unit::Decade,
			"year" | "years" | "yr" | "yrs" | "y" => Unit::Year,
			"month" | "months" | "mon" | "mons" => Unit::Month,
			"week" | "weeks" | "w" => Unit::Week,
			"day" | "days" | "d" => Unit::Day,
			"hour" | "hours" | "hr" | "hrs" | "h" => Unit::Hour,
			"minute" | "minutes" | "min" | "mins" | "m" => Unit::Minute,
			"second" | "seconds" | "sec" | "secs" | "s" => Unit::Second,
			"millisecond" | "milliseconds" | "msec" | "msecs" | "ms" => Unit::Millisecond,
			"microsecond" | "microseconds" | "usec" | "usecs" | "us" => Unit::Microsecond,
			_ => return None,
		})
	}
}

/// Accumulates components with checked arithmetic.
#[derive(Debug, Default)]
struct Accumulator {
	months: i32,
	days: i32,
	micros: i64,
}

impl Accumulator {
	fn add_months(&mut self, value: f64) -> Result<(), Failure> {
		let whole = value.trunc();
		self.months = self.months.checked_add(to_i32(whole)?).ok_or(Failure::Overflow)?;
		self.add_days((value - whole) * DAYS_PER_MONTH)
	}

	fn add_days(&mut self, value: f64) -> Result<(), Failure> {
		let whole = value.trunc();
		self.days = self.days.checked_add(to_i32(whole)?).ok_or(Failure::Overflow)?;
		self.add_micros((value - whole) * MICROS_PER_DAY as f64)
	}

	fn add_micros(&mut self, value: f64) -> Result<(), Failure> {
		let rounded = value.round();
		if !rounded.is_finite() || rounded.abs() >= i64::MAX as f64 {
			return Err(Failure::Overflow);
		}
		self.micros = self.micros.checked_add(rounded as i64).ok_or(Failure::Overflow)?;
		Ok(())
	}

	fn add(&mut self, value: f64, unit: Unit) -> Result<(), Failure> {
		match unit {
			Unit::Millennium => self.add_months(value * 12_000.0),
			Unit::Century => self.add_months(value * 1_200.0),
			Unit::Decade => self.add_months(value * 120.0),
			Unit::Year => self.add_months(value * 12.0),
			Unit::Month => self.add_months(value),
			Unit::Week => self.add_days(value * 7.0),
			Unit::Day => self.add_days(value),
			Unit::Hour => self.add_micros(value * MICROS_PER_HOUR as f64),
			Unit::Minute => self.add_micros(value * MICROS_PER_MINUTE as f64),
			Unit::Second => self.add_micros(value * MICROS_PER_SECOND as f64),
			Unit::Millisecond => self.add_micros(value * 1_000.0),
			Unit::Microsecond => self.add_micros(value),
		}
	}

	fn finish(self, negate: bool) -> Result<Interval, Failure> {
		let interval = Interval::new(self.months, self.days, self.micros);
		if negate {
			interval.negate().ok_or(Failure::Overflow)
		} else {
			Ok(interval)
		}
	}
}

fn to_i32(value: f64) -> Result<i32, Failure> {
	if !value.is_finite() || value < i32::MIN as f64 || value > i32::MAX as f64 {
		return Err(Failure::Overflow);
	}
	Ok(value as i32)
}

fn number(s: &str) -> Result<f64, Failure> {
	let valid = !s.is_empty()
		&& s.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-'))
		&& s.bytes().any(|b| b.is_ascii_digit());
	if !valid {
		return Err(Failure::Syntax(format!("invalid number \"{}\"", s)));
	}
	s.parse::<f64>().map_err(|_| Failure::Syntax(format!("invalid number \"{}\"", s)))
}

fn parse_iso(body: &str) -> Result<Interval, Failure> {
	let mut acc = Accumulator::default();
	let mut in_time = false;
	let mut pending = String::new();
	let mut seen_any = false;
	for c in body.chars() {
		match c {
			't' if !in_time && pending.is_empty() => in_time = true,
			'0'..='9' | '.' | '-' | '+' => pending.push(c),
			designator => {
				let value = number(&pending)?;
				let unit = match (designator, in_time) {
					('y', false) => Unit::Year,
					('m', false) => Unit::Month,
					('w', false) => Unit::Week,
					('d', false) => Unit::Day,
					('h', true) => Unit::Hour,
					('m', true) => Unit::Minute,
					('s', true) => Unit::Second,
					_ => return Err(Failure::Syntax(format!("unexpected designator '{}'", designator))),
				};
				acc.add(value, unit)?;
				pending.clear();
				seen_any = true;
			}
		}
	}
	if !pending.is_empty() || !seen_any {
		return Err(Failure::Syntax("incomplete ISO 8601 duration".to_string()));
	}
	acc.finish(false)
}

/// Parses `[-]H:M[:S[.f]]` into signed microseconds.
fn parse_clock(s: &str) -> Result<i64, Failure> {
	let (negative, body) = match s.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, s.strip_prefix('+').unwrap_or(s)),
	};
	let parts: Vec<&str> = body.split(':').collect();
	let (hours, minutes, seconds) = match parts.as_slice() {
		[h, m] => (number(h)?, number(m)?, 0.0),
		[h, m, s] => (number(h)?, number(m)?, number(s)?),
		_ => return Err(Failure::Syntax(format!("invalid time \"{}\"", s))),
	};
	if minutes >= 60.0 || seconds >= 60.0 || minutes.fract() != 0.0 || hours.fract() != 0.0 {
		return Err(Failure::Syntax(format!("invalid time \"{}\"", s)));
	}
	let mut acc = Accumulator::default();
	acc.add(hours, Unit::Hour)?;
	acc.add(minutes, Unit::Minute)?;
	acc.add(seconds, Unit::Second)?;
	Ok(if negative {
		acc.micros.checked_neg().ok_or(Failure::Overflow)?
	} else {
		acc.micros
	})
}

/// Parses `[-]Y-M` into signed months.
fn parse_year_month(s: &str) -> Result<f64, Failure> {
	let (negative, body) = match s.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, s),
	};
	let Some((years, months)) = body.split_once('-') else {
		return Err(Failure::Syntax(format!("invalid year-month \"{}\"", s)));
	};
	let (years, months) = (number(years)?, number(months)?);
	if months >= 12.0 || years.fract() != 0.0 || months.fract() != 0.0 {
		return Err(Failure::Syntax(format!("invalid year-month \"{}\"", s)));
	}
	let total = years * 12.0 + months;
	Ok(if negative {
		-total
	} else {
		total
	})
}

fn is_year_month(token: &str) -> bool {
	let body = token.strip_prefix('-').unwrap_or(token);
	body.contains('-') && body.bytes().all(|b| b.is_ascii_digit() || b == b'-')
}

/// Parses the SQL standard and postgres verbose spellings, which may be
/// mixed: every token is a year-month pair, a clock time, a number followed
/// by a unit, or a bare number. A trailing bare number counts as seconds
/// unless it follows a clock time, and one preceding a clock time counts as
/// days.
fn parse_verbose(body: &str) -> Result<Interval, Failure> {
	let mut tokens: Vec<&str> = body.split_whitespace().collect();
	let mut negate = false;
	if tokens.first() == Some(&"@") {
		tokens.remove(0);
	} else if let Some(rest) = tokens.first().copied().and_then(|t| t.strip_prefix('@')) {
		tokens[0] = rest;
	}
	if tokens.last() == Some(&"ago") {
		negate = true;
		tokens.pop();
	}
	if tokens.is_empty() {
		return Err(Failure::Syntax("empty interval".to_string()));
	}

	let mut acc = Accumulator::default();
	let mut i = 0;
	while i < tokens.len() {
		let token = tokens[i];
		if token.contains(':') {
			acc.add_micros(parse_clock(token)? as f64)?;
			i += 1;
			continue;
		}
		if is_year_month(token) {
			acc.add_months(parse_year_month(token)?)?;
			i += 1;
			continue;
		}

		let split = token.find(|c: char| c.is_ascii_alphabetic()).unwrap_or(token.len());
		let (digits, suffix) = token.split_at(split);
		let value = number(digits)?;
		if !suffix.is_empty() {
			let unit = Unit::from_word(suffix).ok_or_else(|| Failure::Syntax(format!("unknown unit \"{}\"", suffix)))?;
			acc.add(value, unit)?;
			i += 1;
			continue;
		}
		match tokens.get(i + 1) {
			Some(next) if next.contains(':') => {
				acc.add(value, Unit::Day)?;
				i += 1;
			}
			Some(next) if next.starts_with(|c: char| c.is_ascii_alphabetic()) => {
				let unit =
					Unit::from_word(next).ok_or_else(|| Failure::Syntax(format!("unknown unit \"{}\"", next)))?;
				acc.add(value, unit)?;
				i += 2;
			}
			Some(_) => return Err(Failure::Syntax(format!("missing unit after \"{}\"", token))),
			None => {
				acc.add(value, Unit::Second)?;
				i += 1;
			}
		}
	}
	acc.finish(negate)
}

/// Parses an interval. Components overflowing their storage are out of range.
#[instrument(name = "pgtype::parse::interval", level = "trace", skip_all)]
pub fn parse_interval(fragment: Fragment) -> crate::Result<Interval> {
	let text = fragment.text().trim().to_ascii_lowercase();
	let result = if text.is_empty() {
		Err(Failure::Syntax("empty interval".to_string()))
	} else if let Some(body) = text.strip_prefix('p') {
		parse_iso(body)
	} else {
		parse_verbose(&text)
	};
	result.map_err(|failure| into_error(failure, fragment))
}

fn into_error(failure: Failure, fragment: Fragment) -> Error {
	match failure {
		Failure::Syntax(cause) => parse_error(&Type::Interval, fragment, Some(cause)),
		Failure::Overflow => out_of_range(&Type::Interval, fragment, "interval out of range"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn interval(s: &str) -> Interval {
		parse_interval(Fragment::testing(s)).unwrap()
	}

	const HOUR: i64 = MICROS_PER_HOUR;

	#[test]
	fn test_iso() {
		assert_eq!(interval("P1Y2M3DT4H5M6S"), Interval::new(14, 3, 4 * HOUR + 5 * MICROS_PER_MINUTE + 6_000_000));
		assert_eq!(interval("P2W"), Interval::new(0, 14, 0));
		assert_eq!(interval("PT0.5S"), Interval::new(0, 0, 500_000));
		assert_eq!(interval("P1.5M"), Interval::new(1, 15, 0));
		assert!(parse_interval(Fragment::testing("P1H")).is_err());
		assert!(parse_interval(Fragment::testing("P")).is_err());
	}

	#[test]
	fn test_sql_standard() {
		assert_eq!(interval("1-2"), Interval::new(14, 0, 0));
		assert_eq!(interval("3 4:05:06"), Interval::new(0, 3, 4 * HOUR + 5 * MICROS_PER_MINUTE + 6_000_000));
		assert_eq!(interval("4:05"), Interval::new(0, 0, 4 * HOUR + 5 * MICROS_PER_MINUTE));
		assert_eq!(interval("-1:00:00"), Interval::new(0, 0, -HOUR));
		assert_eq!(interval("90"), Interval::new(0, 0, 90_000_000));
	}

	#[test]
	fn test_postgres_verbose() {
		assert_eq!(interval("1 year 2 mons 3 days"), Interval::new(14, 3, 0));
		assert_eq!(interval("@ 1 hour ago"), Interval::new(0, 0, -HOUR));
		assert_eq!(interval("1.5 days"), Interval::new(0, 1, 12 * HOUR));
		assert_eq!(interval("2h 30min"), Interval::new(0, 0, 2 * HOUR + 30 * MICROS_PER_MINUTE));
		assert_eq!(interval("1 day -01:00:00"), Interval::new(0, 1, -HOUR));
		assert_eq!(interval("1 week 3 ms"), Interval::new(0, 7, 3_000));
	}

	#[test]
	fn test_display_round_trips_through_parse() {
		let value = Interval::new(-12, 0, 0);
		assert_eq!(interval(&value.to_string()), value);
		let value = Interval::new(0, -1, 2 * HOUR);
		assert_eq!(interval(&value.to_string()), value);
	}

	#[test]
	fn test_errors() {
		assert_eq!(parse_interval(Fragment::testing("1 fortnight")).unwrap_err().code, "PARSE_001");
		assert_eq!(parse_interval(Fragment::testing("")).unwrap_err().code, "PARSE_001");
		assert_eq!(parse_interval(Fragment::testing("3000000000 months")).unwrap_err().code, "PARSE_002");
		assert_eq!(parse_interval(Fragment::testing("99999999999999999 hours")).unwrap_err().code, "PARSE_002");
	}
}
