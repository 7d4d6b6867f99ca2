// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub(crate) const MICROS_PER_SECOND: i64 = 1_000_000;
pub(crate) const MICROS_PER_MINUTE: i64 = 60 * MICROS_PER_SECOND;
pub(crate) const MICROS_PER_HOUR: i64 = 60 * MICROS_PER_MINUTE;
pub(crate) const MICROS_PER_DAY: i64 = 24 * MICROS_PER_HOUR;

/// A time of day without a zone, in microseconds since midnight.
///
/// `24:00:00` is a valid value distinct from `00:00:00`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Time {
	micros: i64,
}

impl Time {
	pub const MIDNIGHT: Time = Time {
		micros: 0,
	};
	pub const END_OF_DAY: Time = Time {
		micros: MICROS_PER_DAY,
	};

	pub fn new(hour: u32, minute: u32, second: u32, micro: u32) -> Option<Self> {
		if hour == 24 && minute == 0 && second == 0 && micro == 0 {
			return Some(Self::END_OF_DAY);
		}
		if hour > 23 || minute > 59 || second > 59 || micro > 999_999 {
			return None;
		}
		Some(Self {
			micros: hour as i64 * MICROS_PER_HOUR
				+ minute as i64 * MICROS_PER_MINUTE
				+ second as i64 * MICROS_PER_SECOND
				+ micro as i64,
		})
	}

	pub fn from_micros(micros: i64) -> Option<Self> {
		if !(0..=MICROS_PER_DAY).contains(&micros) {
			return None;
		}
		Some(Self {
			micros,
		})
	}

	pub fn micros(&self) -> i64 {
		self.micros
	}

	pub fn hour(&self) -> u32 {
		(self.micros / MICROS_PER_HOUR) as u32
	}

	pub fn minute(&self) -> u32 {
		((self.micros % MICROS_PER_HOUR) / MICROS_PER_MINUTE) as u32
	}

	pub fn second(&self) -> u32 {
		((self.micros % MICROS_PER_MINUTE) / MICROS_PER_SECOND) as u32
	}

	pub fn micro(&self) -> u32 {
		(self.micros % MICROS_PER_SECOND) as u32
	}
}

/// Writes `HH:MM:SS` followed by the fractional seconds with trailing zeros
/// removed.
pub(crate) fn write_hms(f: &mut Formatter<'_>, micros_of_day: i64) -> std::fmt::Result {
	let hours = micros_of_day / MICROS_PER_HOUR;
	let minutes = (micros_of_day % MICROS_PER_HOUR) / MICROS_PER_MINUTE;
	let seconds = (micros_of_day % MICROS_PER_MINUTE) / MICROS_PER_SECOND;
	write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)?;
	write_fraction(f, micros_of_day % MICROS_PER_SECOND)
}

pub(crate) fn write_fraction(f: &mut Formatter<'_>, micros: i64) -> std::fmt::Result {
	if micros == 0 {
		return Ok(());
	}
	let mut value = micros;
	let mut width = 6;
	while value % 10 == 0 {
		value /= 10;
		width -= 1;
	}
	write!(f, ".{:0width$}", value, width = width)
}

impl Display for Time {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write_hms(f, self.micros)
	}
}
