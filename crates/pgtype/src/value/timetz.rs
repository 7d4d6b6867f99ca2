// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::time::{MICROS_PER_SECOND, Time};

/// Largest zone displacement accepted for a time with zone, 15:59.
pub const MAX_OFFSET_SECS: i32 = 15 * 3600 + 59 * 60;

/// A time of day together with a fixed zone offset in seconds east of UTC.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeTZ {
	pub time: Time,
	pub offset_secs: i32,
}

impl TimeTZ {
	/// Returns `None` when the offset is outside +/-15:59.
	pub fn new(time: Time, offset_secs: i32) -> Option<Self> {
		if offset_secs.abs() > MAX_OFFSET_SECS {
			return None;
		}
		Some(Self {
			time,
			offset_secs,
		})
	}

	/// The instant in microseconds since UTC midnight.
	pub fn utc_micros(&self) -> i64 {
		self.time.micros() - self.offset_secs as i64 * MICROS_PER_SECOND
	}
}

impl PartialOrd for TimeTZ {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for TimeTZ {
	// Equal instants are ordered by zone so that distinct values never tie.
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.utc_micros().cmp(&other.utc_micros()).then_with(|| other.offset_secs.cmp(&self.offset_secs))
	}
}

/// Writes a zone offset as `+HH`, `+HH:MM` or `+HH:MM:SS`, using the
/// shortest form that is exact.
pub(crate) fn write_offset(f: &mut Formatter<'_>, offset_secs: i32, always_minutes: bool) -> std::fmt::Result {
	let sign = if offset_secs < 0 {
		'-'
	} else {
		'+'
	};
	let abs = offset_secs.unsigned_abs();
	let (hours, minutes, seconds) = (abs / 3600, (abs % 3600) / 60, abs % 60);
	write!(f, "{}{:02}", sign, hours)?;
	if seconds != 0 {
		write!(f, ":{:02}:{:02}", minutes, seconds)
	} else if minutes != 0 || always_minutes {
		write!(f, ":{:02}", minutes)
	} else {
		Ok(())
	}
}

impl Display for TimeTZ {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.time)?;
		write_offset(f, self.offset_secs, false)
	}
}
