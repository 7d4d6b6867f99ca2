// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::{
	date::{Date, write_ymd},
	time::{MICROS_PER_DAY, MICROS_PER_SECOND, Time, write_hms},
	timetz::write_offset,
};

/// Days from 1970-01-01 to 2000-01-01, the origin of the stored microseconds.
const EPOCH_OFFSET_DAYS: i64 = 10_957;
const EPOCH_OFFSET_MICROS: i64 = EPOCH_OFFSET_DAYS * MICROS_PER_DAY;

const MIN_MICROS: i64 = (Date::MIN_DAYS as i64 - EPOCH_OFFSET_DAYS) * MICROS_PER_DAY;
const MAX_MICROS: i64 = (Date::MAX_DAYS as i64 - EPOCH_OFFSET_DAYS + 1) * MICROS_PER_DAY - 1;

/// A date and time without a zone. Stored as microseconds since
/// 2000-01-01 00:00:00, so that the whole date range fits in an `i64`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
	micros: i64,
}

impl Default for Timestamp {
	fn default() -> Self {
		Self {
			micros: -EPOCH_OFFSET_MICROS,
		} // 1970-01-01 00:00:00
	}
}

impl Timestamp {
	pub const NEG_INFINITY: Timestamp = Timestamp {
		micros: i64::MIN,
	};
	pub const INFINITY: Timestamp = Timestamp {
		micros: i64::MAX,
	};

	/// Microseconds since 1970-01-01. Returns `None` outside
	/// 4714-11-24 BC ..= 294276-12-31 23:59:59.999999.
	pub fn from_micros(micros: i64) -> Option<Self> {
		Self::from_pg_micros(micros.checked_sub(EPOCH_OFFSET_MICROS)?)
	}

	/// Microseconds since 2000-01-01.
	pub fn from_pg_micros(micros: i64) -> Option<Self> {
		if !(MIN_MICROS..=MAX_MICROS).contains(&micros) {
			return None;
		}
		Some(Self {
			micros,
		})
	}

	pub fn from_date_time(date: Date, time: Time) -> Option<Self> {
		if !date.is_finite() {
			return None;
		}
		let days = date.to_days_since_epoch() as i64 - EPOCH_OFFSET_DAYS;
		let micros = days.checked_mul(MICROS_PER_DAY)?.checked_add(time.micros())?;
		Self::from_pg_micros(micros)
	}

	/// Microseconds since 1970-01-01. `None` for the infinities and for
	/// instants past the year 294247, which a Unix count cannot reach.
	pub fn micros(&self) -> Option<i64> {
		if !self.is_finite() {
			return None;
		}
		self.micros.checked_add(EPOCH_OFFSET_MICROS)
	}

	pub fn pg_micros(&self) -> i64 {
		self.micros
	}

	pub fn is_finite(&self) -> bool {
		*self != Self::INFINITY && *self != Self::NEG_INFINITY
	}

	pub fn date(&self) -> Date {
		match *self {
			Self::INFINITY => return Date::INFINITY,
			Self::NEG_INFINITY => return Date::NEG_INFINITY,
			_ => {}
		}
		let days = self.micros.div_euclid(MICROS_PER_DAY) + EPOCH_OFFSET_DAYS;
		Date::from_days_since_epoch(days as i32).unwrap_or(if self.micros < 0 {
			Date::NEG_INFINITY
		} else {
			Date::INFINITY
		})
	}

	pub fn time(&self) -> Time {
		Time::from_micros(self.micros.rem_euclid(MICROS_PER_DAY)).unwrap_or_default()
	}

	pub fn add_micros(&self, micros: i64) -> Option<Self> {
		Self::from_pg_micros(self.micros.checked_add(micros)?)
	}
}

fn write_timestamp(f: &mut Formatter<'_>, micros: i64, offset_secs: Option<i32>) -> std::fmt::Result {
	let local = micros + offset_secs.unwrap_or(0) as i64 * MICROS_PER_SECOND;
	let days = local.div_euclid(MICROS_PER_DAY) + EPOCH_OFFSET_DAYS;
	let (year, month, day) = Date::days_since_epoch_to_ymd(days);
	write_ymd(f, year, month, day)?;
	f.write_str(" ")?;
	write_hms(f, local.rem_euclid(MICROS_PER_DAY))?;
	if let Some(offset) = offset_secs {
		write_offset(f, offset, true)?;
	}
	if year <= 0 {
		f.write_str(" BC")?;
	}
	Ok(())
}

impl Display for Timestamp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match *self {
			Self::INFINITY => f.write_str("infinity"),
			Self::NEG_INFINITY => f.write_str("-infinity"),
			_ => write_timestamp(f, self.micros, None),
		}
	}
}

/// An instant in time, stored like [`Timestamp`] as microseconds since
/// 2000-01-01 00:00:00 UTC. Rendering converts it into a session zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimestampTZ {
	micros: i64,
}

impl Default for TimestampTZ {
	fn default() -> Self {
		Self {
			micros: -EPOCH_OFFSET_MICROS,
		}
	}
}

impl TimestampTZ {
	pub const NEG_INFINITY: TimestampTZ = TimestampTZ {
		micros: i64::MIN,
	};
	pub const INFINITY: TimestampTZ = TimestampTZ {
		micros: i64::MAX,
	};

	/// Microseconds since 1970-01-01 00:00:00 UTC.
	pub fn from_micros(micros: i64) -> Option<Self> {
		Timestamp::from_micros(micros).map(|ts| Self {
			micros: ts.micros,
		})
	}

	/// Microseconds since 2000-01-01 00:00:00 UTC.
	pub fn from_pg_micros(micros: i64) -> Option<Self> {
		Timestamp::from_pg_micros(micros).map(|ts| Self {
			micros: ts.micros,
		})
	}

	/// Interprets a wall clock timestamp as local time at `offset_secs` east
	/// of UTC.
	pub fn from_local(local: Timestamp, offset_secs: i32) -> Option<Self> {
		if !local.is_finite() {
			return Some(Self {
				micros: local.micros,
			});
		}
		Self::from_pg_micros(local.micros.checked_sub(offset_secs as i64 * MICROS_PER_SECOND)?)
	}

	/// The wall clock timestamp at `offset_secs` east of UTC.
	pub fn to_local(&self, offset_secs: i32) -> Option<Timestamp> {
		if !self.is_finite() {
			return Some(Timestamp {
				micros: self.micros,
			});
		}
		Timestamp::from_pg_micros(self.micros.checked_add(offset_secs as i64 * MICROS_PER_SECOND)?)
	}

	/// Microseconds since 1970-01-01 00:00:00 UTC, `None` where
	/// [`Timestamp::micros`] is.
	pub fn micros(&self) -> Option<i64> {
		if !self.is_finite() {
			return None;
		}
		self.micros.checked_add(EPOCH_OFFSET_MICROS)
	}

	pub fn pg_micros(&self) -> i64 {
		self.micros
	}

	pub fn is_finite(&self) -> bool {
		*self != Self::INFINITY && *self != Self::NEG_INFINITY
	}

	pub fn add_micros(&self, micros: i64) -> Option<Self> {
		Self::from_pg_micros(self.micros.checked_add(micros)?)
	}

	/// Renders in the zone `offset_secs` east of UTC.
	pub fn display_in(&self, offset_secs: i32) -> ZonedTimestamp {
		ZonedTimestamp {
			ts: *self,
			offset_secs,
		}
	}
}

impl Display for TimestampTZ {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		self.display_in(0).fmt(f)
	}
}

pub struct ZonedTimestamp {
	ts: TimestampTZ,
	offset_secs: i32,
}

impl Display for ZonedTimestamp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.ts {
			TimestampTZ::INFINITY => f.write_str("infinity"),
			TimestampTZ::NEG_INFINITY => f.write_str("-infinity"),
			_ => write_timestamp(f, self.ts.micros, Some(self.offset_secs)),
		}
	}
}
