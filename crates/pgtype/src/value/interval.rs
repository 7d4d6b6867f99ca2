// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter, Write};

use serde::{Deserialize, Serialize};

use super::time::{MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SECOND, write_fraction};
use crate::config::IntervalStyle;

/// A span of time kept as three independent components, since months and
/// days do not have a fixed length in microseconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
	/// A possibly negative number of months for field types like `YEAR`
	pub months: i32,
	/// A possibly negative number of days
	pub days: i32,
	/// A timespan represented in microseconds
	pub micros: i64,
}

impl Interval {
	pub fn new(months: i32, days: i32, micros: i64) -> Self {
		Self {
			months,
			days,
			micros,
		}
	}

	pub fn is_zero(&self) -> bool {
		self.months == 0 && self.days == 0 && self.micros == 0
	}

	pub fn negate(&self) -> Option<Self> {
		Some(Self {
			months: self.months.checked_neg()?,
			days: self.days.checked_neg()?,
			micros: self.micros.checked_neg()?,
		})
	}

	/// An approximate length used for ordering: 30 day months, 24 hour days.
	pub fn as_micros_approx(&self) -> i128 {
		const DAY: i128 = 24 * MICROS_PER_HOUR as i128;
		self.months as i128 * 30 * DAY + self.days as i128 * DAY + self.micros as i128
	}

	/// Returns a value that renders in `style`.
	pub fn display(&self, style: IntervalStyle) -> StyledInterval<'_> {
		StyledInterval {
			interval: self,
			style,
		}
	}

	fn fmt_postgres(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let years = self.months / 12;
		let months = self.months % 12;
		let mut written = false;
		let mut any_negative = false;

		for (value, unit) in [(years, "year"), (months, "mon"), (self.days, "day")] {
			if value == 0 {
				continue;
			}
			if written {
				f.write_char(' ')?;
			}
			write!(f, "{} {}", value, unit)?;
			if value != 1 {
				f.write_char('s')?;
			}
			written = true;
			any_negative |= value < 0;
		}

		if self.micros != 0 || !written {
			if written {
				f.write_char(' ')?;
			}
			if self.micros < 0 {
				f.write_char('-')?;
			} else if any_negative {
				f.write_char('+')?;
			}
			let abs = self.micros.unsigned_abs() as i64;
			write!(
				f,
				"{:02}:{:02}:{:02}",
				abs / MICROS_PER_HOUR,
				(abs % MICROS_PER_HOUR) / MICROS_PER_MINUTE,
				(abs % MICROS_PER_MINUTE) / MICROS_PER_SECOND
			)?;
			write_fraction(f, abs % MICROS_PER_SECOND)?;
		}
		Ok(())
	}

	fn fmt_iso(&self, f: &mut Formatter<'_>) -> fmt::Result {
		if self.is_zero() {
			return f.write_str("PT0S");
		}
		f.write_char('P')?;
		let years = self.months / 12;
		let months = self.months % 12;
		for (value, unit) in [(years, 'Y'), (months, 'M'), (self.days, 'D')] {
			if value != 0 {
				write!(f, "{}{}", value, unit)?;
			}
		}
		if self.micros == 0 {
			return Ok(());
		}
		f.write_char('T')?;
		let hours = self.micros / MICROS_PER_HOUR;
		let minutes = (self.micros % MICROS_PER_HOUR) / MICROS_PER_MINUTE;
		let seconds = self.micros % MICROS_PER_MINUTE;
		if hours != 0 {
			write!(f, "{}H", hours)?;
		}
		if minutes != 0 {
			write!(f, "{}M", minutes)?;
		}
		if seconds != 0 {
			if seconds < 0 {
				f.write_char('-')?;
			}
			let abs = seconds.abs();
			write!(f, "{}", abs / MICROS_PER_SECOND)?;
			write_fraction(f, abs % MICROS_PER_SECOND)?;
			f.write_char('S')?;
		}
		Ok(())
	}
}

impl PartialOrd for Interval {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Interval {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.as_micros_approx()
			.cmp(&other.as_micros_approx())
			.then_with(|| (self.months, self.days, self.micros).cmp(&(other.months, other.days, other.micros)))
	}
}

impl Display for Interval {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		self.fmt_postgres(f)
	}
}

pub struct StyledInterval<'a> {
	interval: &'a Interval,
	style: IntervalStyle,
}

impl Display for StyledInterval<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self.style {
			IntervalStyle::Postgres => self.interval.fmt_postgres(f),
			IntervalStyle::IsoPostgres => self.interval.fmt_iso(f),
		}
	}
}
