// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A calendar date without time information.
///
/// Internally stored as days since Unix epoch (1970-01-01). Years use
/// astronomical numbering, so year 0 is 1 BC. The finite range is
/// 4714-11-24 BC ..= 294276-12-31; the two infinities sit outside it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Date {
	days_since_epoch: i32,
}

impl Default for Date {
	fn default() -> Self {
		Self {
			days_since_epoch: 0,
		} // 1970-01-01
	}
}

// Calendar utilities
impl Date {
	pub const MIN_DAYS: i32 = -2_440_588;
	pub const MAX_DAYS: i32 = 106_762_939;

	pub const NEG_INFINITY: Date = Date {
		days_since_epoch: i32::MIN,
	};
	pub const INFINITY: Date = Date {
		days_since_epoch: i32::MAX,
	};

	/// Check if a year is a leap year
	#[inline]
	pub(crate) fn is_leap_year(year: i32) -> bool {
		(year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
	}

	/// Get the number of days in a month
	#[inline]
	pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
		match month {
			1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
			4 | 6 | 9 | 11 => 30,
			2 => {
				if Self::is_leap_year(year) {
					29
				} else {
					28
				}
			}
			_ => 0,
		}
	}

	/// Convert year/month/day to days since Unix epoch
	pub(crate) fn ymd_to_days_since_epoch(year: i32, month: u32, day: u32) -> Option<i64> {
		if month < 1 || month > 12 || day < 1 || day > Self::days_in_month(year, month) {
			return None;
		}

		// Algorithm based on Howard Hinnant's date algorithms
		// Convert month from [1,12] to [0,11] where Mar=0
		let year = year as i64;
		let (y, m) = if month <= 2 {
			(year - 1, month as i64 + 9) // Jan->10, Feb->11
		} else {
			(year, month as i64 - 3) // Mar->0, Apr->1, ..., Dec->9
		};

		let era = if y >= 0 {
			y
		} else {
			y - 399
		} / 400;
		let yoe = y - era * 400; // [0, 399]
		let doy = (153 * m + 2) / 5 + day as i64 - 1; // [0, 365]
		let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
		Some(era * 146097 + doe - 719468)
	}

	/// Convert days since Unix epoch to year/month/day
	pub(crate) fn days_since_epoch_to_ymd(days: i64) -> (i32, u32, u32) {
		let days_since_ce = days + 719468;

		let era = if days_since_ce >= 0 {
			days_since_ce
		} else {
			days_since_ce - 146096
		} / 146097;
		let doe = days_since_ce - era * 146097; // [0, 146096]
		let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // [0, 399]
		let y = yoe + era * 400;
		let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
		let mp = (5 * doy + 2) / 153; // [0, 11]
		let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
		let m = if mp < 10 {
			mp + 3
		} else {
			mp - 9
		}; // [1, 12]
		let year = if m <= 2 {
			y + 1
		} else {
			y
		};

		(year as i32, m as u32, d as u32)
	}
}

impl Date {
	/// Creates a date from an astronomical year, returning `None` when the
	/// date does not exist or is outside the supported range.
	pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
		Self::ymd_to_days_since_epoch(year, month, day).and_then(Self::from_days_checked)
	}

	fn from_days_checked(days: i64) -> Option<Self> {
		if days < Self::MIN_DAYS as i64 || days > Self::MAX_DAYS as i64 {
			return None;
		}
		Some(Self {
			days_since_epoch: days as i32,
		})
	}

	/// Create from days since Unix epoch
	pub fn from_days_since_epoch(days: i32) -> Option<Self> {
		Self::from_days_checked(days as i64)
	}

	/// Convert to days since Unix epoch
	pub fn to_days_since_epoch(&self) -> i32 {
		self.days_since_epoch
	}

	pub fn is_finite(&self) -> bool {
		*self != Self::INFINITY && *self != Self::NEG_INFINITY
	}

	pub fn year(&self) -> i32 {
		Self::days_since_epoch_to_ymd(self.days_since_epoch as i64).0
	}

	pub fn month(&self) -> u32 {
		Self::days_since_epoch_to_ymd(self.days_since_epoch as i64).1
	}

	pub fn day(&self) -> u32 {
		Self::days_since_epoch_to_ymd(self.days_since_epoch as i64).2
	}

	/// Adds a number of days, returning `None` when leaving the supported
	/// range.
	pub fn add_days(&self, days: i32) -> Option<Self> {
		if !self.is_finite() {
			return Some(*self);
		}
		Self::from_days_checked(self.days_since_epoch as i64 + days as i64)
	}
}

/// Writes `year-month-day`, with a ` BC` suffix for years before 1 AD.
pub(crate) fn write_ymd(f: &mut Formatter<'_>, year: i32, month: u32, day: u32) -> std::fmt::Result {
	if year <= 0 {
		write!(f, "{:04}-{:02}-{:02}", 1 - year, month, day)
	} else {
		write!(f, "{:04}-{:02}-{:02}", year, month, day)
	}
}

impl Display for Date {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if *self == Self::INFINITY {
			return f.write_str("infinity");
		}
		if *self == Self::NEG_INFINITY {
			return f.write_str("-infinity");
		}
		let (year, month, day) = Self::days_since_epoch_to_ymd(self.days_since_epoch as i64);
		write_ymd(f, year, month, day)?;
		if year <= 0 {
			f.write_str(" BC")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_date_epoch() {
		let date = Date::new(1970, 1, 1).unwrap();
		assert_eq!(date.to_days_since_epoch(), 0);
		assert_eq!(date.to_string(), "1970-01-01");
	}

	#[test]
	fn test_date_components() {
		let date = Date::new(2024, 3, 15).unwrap();
		assert_eq!(date.to_days_since_epoch(), 19797);
		assert_eq!(date.year(), 2024);
		assert_eq!(date.month(), 3);
		assert_eq!(date.day(), 15);
	}

	#[test]
	fn test_date_leap_year() {
		assert!(Date::new(2024, 2, 29).is_some());
		assert!(Date::new(2023, 2, 29).is_none());
		assert!(Date::new(1900, 2, 29).is_none());
		assert!(Date::new(2000, 2, 29).is_some());
	}

	#[test]
	fn test_date_range_bounds() {
		let min = Date::new(-4713, 11, 24).unwrap();
		assert_eq!(min.to_days_since_epoch(), Date::MIN_DAYS);
		assert_eq!(min.to_string(), "4714-11-24 BC");
		assert!(Date::new(-4713, 11, 23).is_none());

		let max = Date::new(294276, 12, 31).unwrap();
		assert_eq!(max.to_days_since_epoch(), Date::MAX_DAYS);
		assert!(Date::new(294277, 1, 1).is_none());
	}

	#[test]
	fn test_date_bc_display() {
		assert_eq!(Date::new(0, 12, 31).unwrap().to_string(), "0001-12-31 BC");
		assert_eq!(Date::new(1, 1, 1).unwrap().to_days_since_epoch(), -719162);
	}

	#[test]
	fn test_date_infinity() {
		assert_eq!(Date::INFINITY.to_string(), "infinity");
		assert_eq!(Date::NEG_INFINITY.to_string(), "-infinity");
		assert!(!Date::INFINITY.is_finite());
		assert!(Date::NEG_INFINITY < Date::new(-4713, 11, 24).unwrap());
	}

	#[test]
	fn test_date_add_days() {
		let date = Date::new(2024, 2, 28).unwrap();
		assert_eq!(date.add_days(1).unwrap().to_string(), "2024-02-29");
		assert_eq!(date.add_days(2).unwrap().to_string(), "2024-03-01");
		assert_eq!(Date::INFINITY.add_days(3), Some(Date::INFINITY));
	}
}
