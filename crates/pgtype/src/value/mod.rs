// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

mod bit;
mod date;
mod decimal;
mod enum_type;
mod family;
mod geo;
pub(crate) mod hex;
mod inet;
mod interval;
mod oid;
mod time;
mod timestamp;
mod timetz;
mod r#type;

pub use bit::BitArray;
pub use date::Date;
pub use decimal::Decimal;
pub use enum_type::{EnumMetadata, EnumType};
pub use family::Family;
pub use geo::{Box2D, Geography, Geometry, GeometryError};
pub use inet::IpAddr;
pub use interval::{Interval, StyledInterval};
pub use oid::{OidKind, oids};
pub(crate) use time::{MICROS_PER_DAY, MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SECOND};
pub use time::Time;
pub use timestamp::{Timestamp, TimestampTZ, ZonedTimestamp};
pub use timetz::{MAX_OFFSET_SECS, TimeTZ};
pub use r#type::Type;
