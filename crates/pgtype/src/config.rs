// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Session settings consumed by parsing and formatting.
//!
//! None of these settings change a value. They only decide how ambiguous
//! input is read and how output is spelled.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::value::{Date, Time, TimeTZ, Timestamp, TimestampTZ};

/// Field order of all-numeric dates such as `03/04/05`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateOrder {
	YMD,
	DMY,
	#[default]
	MDY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateStyle {
	Iso(DateOrder),
	Postgres(DateOrder),
}

impl Default for DateStyle {
	fn default() -> Self {
		DateStyle::Iso(DateOrder::default())
	}
}

impl DateStyle {
	pub fn order(&self) -> DateOrder {
		match self {
			DateStyle::Iso(order) | DateStyle::Postgres(order) => *order,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalStyle {
	/// `1 year 2 mons 3 days 04:05:06`
	#[default]
	Postgres,
	/// `P1Y2M3DT4H5M6S`
	IsoPostgres,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ByteaOutput {
	#[default]
	Hex,
	Escape,
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
	/// Session zone in seconds east of UTC, applied to zoned values that
	/// carry no explicit offset and when rendering timestamptz.
	///
	/// Default: 0 (UTC)
	pub time_zone_offset_secs: i32,
	/// Default: ISO, MDY
	pub date_style: DateStyle,
	/// Default: postgres
	pub interval_style: IntervalStyle,
	/// Default: hex
	pub bytea_output: ByteaOutput,
	/// Accepted for compatibility. Floats always render with the shortest
	/// round-trip digits.
	///
	/// Default: 1
	pub extra_float_digits: i32,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			time_zone_offset_secs: 0,
			date_style: DateStyle::default(),
			interval_style: IntervalStyle::default(),
			bytea_output: ByteaOutput::default(),
			extra_float_digits: 1,
		}
	}
}

impl SessionConfig {
	/// Create a new config with default values.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn time_zone_offset_secs(mut self, offset_secs: i32) -> Self {
		self.time_zone_offset_secs = offset_secs;
		self
	}

	pub fn date_style(mut self, style: DateStyle) -> Self {
		self.date_style = style;
		self
	}

	pub fn interval_style(mut self, style: IntervalStyle) -> Self {
		self.interval_style = style;
		self
	}

	pub fn bytea_output(mut self, output: ByteaOutput) -> Self {
		self.bytea_output = output;
		self
	}

	pub fn extra_float_digits(mut self, digits: i32) -> Self {
		self.extra_float_digits = digits;
		self
	}
}

/// Supplies the instant that relative inputs such as `now` or `today` are
/// resolved against, together with the session settings.
pub trait ParseTimeContext {
	fn now(&self) -> TimestampTZ;

	fn config(&self) -> &SessionConfig;

	/// The current wall clock in the session zone.
	fn local_now(&self) -> Timestamp {
		self.now().to_local(self.config().time_zone_offset_secs).unwrap_or_default()
	}

	fn today(&self) -> Date {
		self.local_now().date()
	}

	fn current_time(&self) -> Time {
		self.local_now().time()
	}

	fn current_timetz(&self) -> TimeTZ {
		TimeTZ::new(self.current_time(), self.config().time_zone_offset_secs).unwrap_or_default()
	}
}

/// A parse context with a fixed instant.
#[derive(Debug, Clone)]
pub struct SimpleParseTimeContext {
	now: TimestampTZ,
	config: SessionConfig,
}

impl SimpleParseTimeContext {
	pub fn new(now: TimestampTZ) -> Self {
		Self {
			now,
			config: SessionConfig::default(),
		}
	}

	/// Uses the system clock at the time of the call.
	pub fn system() -> Self {
		let micros = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_micros() as i64).unwrap_or(0);
		Self::new(TimestampTZ::from_micros(micros).unwrap_or_default())
	}

	pub fn with_config(mut self, config: SessionConfig) -> Self {
		self.config = config;
		self
	}
}

impl ParseTimeContext for SimpleParseTimeContext {
	fn now(&self) -> TimestampTZ {
		self.now
	}

	fn config(&self) -> &SessionConfig {
		&self.config
	}
}
