// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Spatial values as seen by the type system: an SRID plus an opaque EWKB
//! payload. Spatial computation lives elsewhere; this module only reads and
//! writes the text and binary envelopes.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::hex;

const EWKB_SRID_FLAG: u32 = 0x2000_0000;
const EWKB_Z_FLAG: u32 = 0x8000_0000;
const EWKB_M_FLAG: u32 = 0x4000_0000;

const WKB_POINT: u32 = 1;
const WKB_LINESTRING: u32 = 2;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
	#[error("EWKB is truncated")]
	Truncated,

	#[error("unknown EWKB byte order {0}")]
	ByteOrder(u8),

	#[error("unsupported geometry type {0}")]
	UnsupportedType(u32),

	#[error("invalid hex EWKB")]
	InvalidHex,

	#[error("invalid SRID {0:?}")]
	InvalidSrid(String),

	#[error("invalid WKT {0:?}")]
	InvalidWkt(String),

	#[error("coordinate ({0} {1}) out of range for geography")]
	OutOfRange(f64, f64),
}

/// A planar spatial object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geometry {
	srid: i32,
	ewkb: Vec<u8>,
}

impl Geometry {
	pub fn srid(&self) -> i32 {
		self.srid
	}

	pub fn ewkb(&self) -> &[u8] {
		&self.ewkb
	}

	/// Reads an EWKB envelope, validating its header.
	pub fn parse_ewkb(ewkb: &[u8]) -> Result<Self, GeometryError> {
		let srid = read_header(ewkb)?;
		Ok(Self {
			srid,
			ewkb: ewkb.to_vec(),
		})
	}

	/// Reads hex encoded EWKB or `[SRID=n;]POINT(x y)` / `LINESTRING(...)` text.
	pub fn parse_text(s: &str) -> Result<Self, GeometryError> {
		Self::parse_text_with_default_srid(s, 0)
	}

	fn parse_text_with_default_srid(s: &str, default_srid: i32) -> Result<Self, GeometryError> {
		let s = s.trim();
		if !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit()) {
			let bytes = hex::decode(s).ok_or(GeometryError::InvalidHex)?;
			let parsed = Self::parse_ewkb(&bytes)?;
			if parsed.srid == 0 && default_srid != 0 {
				return Ok(Self {
					srid: default_srid,
					ewkb: encode_with_srid(&bytes, default_srid),
				});
			}
			return Ok(parsed);
		}

		let (srid, wkt) = match s.split_once(';') {
			Some((prefix, rest)) => {
				let value = prefix
					.trim()
					.strip_prefix("SRID=")
					.or_else(|| prefix.trim().strip_prefix("srid="))
					.ok_or_else(|| GeometryError::InvalidSrid(prefix.to_string()))?;
				let srid: i32 = value.trim().parse().map_err(|_| GeometryError::InvalidSrid(value.to_string()))?;
				(srid, rest.trim())
			}
			None => (default_srid, s),
		};

		let (kind, points) = parse_wkt(wkt)?;
		Ok(Self {
			srid,
			ewkb: encode_ewkb(kind, srid, &points),
		})
	}

	/// The points of a POINT or LINESTRING, when the payload is one.
	pub fn points(&self) -> Option<Vec<(f64, f64)>> {
		decode_points(&self.ewkb)
	}

	pub(crate) fn heap_size(&self) -> usize {
		self.ewkb.capacity()
	}
}

impl Display for Geometry {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&hex::encode_upper(&self.ewkb))
	}
}

/// A spatial object on the spheroid. Coordinates are longitude/latitude and
/// the SRID defaults to 4326.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geography(Geometry);

impl Geography {
	pub const DEFAULT_SRID: i32 = 4326;

	pub fn srid(&self) -> i32 {
		self.0.srid
	}

	pub fn ewkb(&self) -> &[u8] {
		&self.0.ewkb
	}

	pub fn parse_ewkb(ewkb: &[u8]) -> Result<Self, GeometryError> {
		let geometry = Geometry::parse_ewkb(ewkb)?;
		if geometry.srid == 0 {
			return Ok(Self(Geometry {
				srid: Self::DEFAULT_SRID,
				ewkb: encode_with_srid(ewkb, Self::DEFAULT_SRID),
			}));
		}
		Self::checked(geometry)
	}

	pub fn parse_text(s: &str) -> Result<Self, GeometryError> {
		Self::checked(Geometry::parse_text_with_default_srid(s, Self::DEFAULT_SRID)?)
	}

	fn checked(geometry: Geometry) -> Result<Self, GeometryError> {
		if let Some(points) = geometry.points() {
			if let Some((x, y)) = points.into_iter().find(|(x, y)| x.abs() > 180.0 || y.abs() > 90.0) {
				return Err(GeometryError::OutOfRange(x, y));
			}
		}
		Ok(Self(geometry))
	}

	pub(crate) fn heap_size(&self) -> usize {
		self.0.heap_size()
	}
}

impl Display for Geography {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

/// An axis aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box2D {
	pub lo_x: f64,
	pub lo_y: f64,
	pub hi_x: f64,
	pub hi_y: f64,
}

impl Box2D {
	/// Orders the corners so that `lo <= hi` on both axes.
	pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
		Self {
			lo_x: x1.min(x2),
			lo_y: y1.min(y2),
			hi_x: x1.max(x2),
			hi_y: y1.max(y2),
		}
	}

	/// Parses `BOX(xmin ymin,xmax ymax)`, case insensitive.
	pub fn parse(s: &str) -> Option<Self> {
		let s = s.trim();
		let upper = s.to_ascii_uppercase();
		let inner = upper.strip_prefix("BOX")?.trim_start().strip_prefix('(')?.strip_suffix(')')?;
		let (lo, hi) = inner.split_once(',')?;
		let (x1, y1) = parse_coordinate(lo)?;
		let (x2, y2) = parse_coordinate(hi)?;
		Some(Self::new(x1, y1, x2, y2))
	}
}

impl Display for Box2D {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "BOX({} {},{} {})", self.lo_x, self.lo_y, self.hi_x, self.hi_y)
	}
}

fn parse_coordinate(s: &str) -> Option<(f64, f64)> {
	let mut parts = s.split_whitespace();
	let x = parts.next()?.parse().ok()?;
	let y = parts.next()?.parse().ok()?;
	if parts.next().is_some() {
		return None;
	}
	Some((x, y))
}

fn parse_wkt(wkt: &str) -> Result<(u32, Vec<(f64, f64)>), GeometryError> {
	let invalid = || GeometryError::InvalidWkt(wkt.to_string());
	let upper = wkt.to_ascii_uppercase();
	let (kind, rest) = if let Some(rest) = upper.strip_prefix("POINT") {
		(WKB_POINT, rest)
	} else if let Some(rest) = upper.strip_prefix("LINESTRING") {
		(WKB_LINESTRING, rest)
	} else {
		return Err(GeometryError::UnsupportedType(0));
	};
	let inner = rest.trim().strip_prefix('(').and_then(|r| r.strip_suffix(')')).ok_or_else(invalid)?;
	let points = inner.split(',').map(parse_coordinate).collect::<Option<Vec<_>>>().ok_or_else(invalid)?;
	if (kind == WKB_POINT && points.len() != 1) || (kind == WKB_LINESTRING && points.len() < 2) {
		return Err(invalid());
	}
	Ok((kind, points))
}

fn encode_ewkb(kind: u32, srid: i32, points: &[(f64, f64)]) -> Vec<u8> {
	let mut out = vec![1u8];
	let flags = if srid != 0 {
		EWKB_SRID_FLAG
	} else {
		0
	};
	out.extend_from_slice(&(kind | flags).to_le_bytes());
	if srid != 0 {
		out.extend_from_slice(&srid.to_le_bytes());
	}
	if kind == WKB_LINESTRING {
		out.extend_from_slice(&(points.len() as u32).to_le_bytes());
	}
	for (x, y) in points {
		out.extend_from_slice(&x.to_le_bytes());
		out.extend_from_slice(&y.to_le_bytes());
	}
	out
}

struct Reader<'a> {
	bytes: &'a [u8],
	pos: usize,
	little_endian: bool,
}

impl<'a> Reader<'a> {
	fn new(bytes: &'a [u8]) -> Result<Self, GeometryError> {
		let little_endian = match bytes.first() {
			Some(0) => false,
			Some(1) => true,
			Some(other) => return Err(GeometryError::ByteOrder(*other)),
			None => return Err(GeometryError::Truncated),
		};
		Ok(Self {
			bytes,
			pos: 1,
			little_endian,
		})
	}

	fn take<const N: usize>(&mut self) -> Result<[u8; N], GeometryError> {
		let slice = self.bytes.get(self.pos..self.pos + N).ok_or(GeometryError::Truncated)?;
		self.pos += N;
		let mut out = [0u8; N];
		out.copy_from_slice(slice);
		Ok(out)
	}

	fn u32(&mut self) -> Result<u32, GeometryError> {
		let raw = self.take::<4>()?;
		Ok(if self.little_endian {
			u32::from_le_bytes(raw)
		} else {
			u32::from_be_bytes(raw)
		})
	}

	fn f64(&mut self) -> Result<f64, GeometryError> {
		let raw = self.take::<8>()?;
		Ok(if self.little_endian {
			f64::from_le_bytes(raw)
		} else {
			f64::from_be_bytes(raw)
		})
	}
}

fn read_header(ewkb: &[u8]) -> Result<i32, GeometryError> {
	let mut reader = Reader::new(ewkb)?;
	let kind = reader.u32()?;
	let base = (kind & 0x0FFF_FFFF) % 1000;
	if !(1..=7).contains(&base) {
		return Err(GeometryError::UnsupportedType(kind));
	}
	if kind & EWKB_SRID_FLAG != 0 {
		return Ok(reader.u32()? as i32);
	}
	Ok(0)
}

fn decode_points(ewkb: &[u8]) -> Option<Vec<(f64, f64)>> {
	let mut reader = Reader::new(ewkb).ok()?;
	let kind = reader.u32().ok()?;
	if kind & (EWKB_Z_FLAG | EWKB_M_FLAG) != 0 {
		return None;
	}
	if kind & EWKB_SRID_FLAG != 0 {
		reader.u32().ok()?;
	}
	let count = match kind & 0x0FFF_FFFF {
		WKB_POINT => 1,
		WKB_LINESTRING => reader.u32().ok()? as usize,
		_ => return None,
	};
	(0..count).map(|_| Some((reader.f64().ok()?, reader.f64().ok()?))).collect()
}

/// Rewrites a little or big endian EWKB header so that it carries `srid`.
fn encode_with_srid(ewkb: &[u8], srid: i32) -> Vec<u8> {
	let Ok(mut reader) = Reader::new(ewkb) else {
		return ewkb.to_vec();
	};
	let Ok(kind) = reader.u32() else {
		return ewkb.to_vec();
	};
	if kind & EWKB_SRID_FLAG != 0 {
		return ewkb.to_vec();
	}
	let mut out = vec![ewkb[0]];
	let kind = kind | EWKB_SRID_FLAG;
	if reader.little_endian {
		out.extend_from_slice(&kind.to_le_bytes());
		out.extend_from_slice(&srid.to_le_bytes());
	} else {
		out.extend_from_slice(&kind.to_be_bytes());
		out.extend_from_slice(&srid.to_be_bytes());
	}
	out.extend_from_slice(&ewkb[5..]);
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_geometry_parse_wkt_point() {
		let geometry = Geometry::parse_text("POINT(1 2)").unwrap();
		assert_eq!(geometry.srid(), 0);
		assert_eq!(geometry.points(), Some(vec![(1.0, 2.0)]));
		assert_eq!(geometry.to_string(), "0101000000000000000000F03F0000000000000040");
	}

	#[test]
	fn test_geometry_parse_with_srid_roundtrips_through_hex() {
		let geometry = Geometry::parse_text("SRID=4326;POINT(1 2)").unwrap();
		assert_eq!(geometry.srid(), 4326);
		let reparsed = Geometry::parse_text(&geometry.to_string()).unwrap();
		assert_eq!(reparsed, geometry);
	}

	#[test]
	fn test_geometry_linestring() {
		let geometry = Geometry::parse_text("LINESTRING(0 0, 1 1, 2 0)").unwrap();
		assert_eq!(geometry.points().unwrap().len(), 3);
	}

	#[test]
	fn test_geometry_errors() {
		assert_eq!(Geometry::parse_text("CIRCLE(1 2)"), Err(GeometryError::UnsupportedType(0)));
		assert!(matches!(Geometry::parse_text("POINT(1)"), Err(GeometryError::InvalidWkt(_))));
		assert!(matches!(Geometry::parse_text("SRID=x;POINT(1 2)"), Err(GeometryError::InvalidSrid(_))));
		assert_eq!(Geometry::parse_ewkb(&[]), Err(GeometryError::Truncated));
		assert_eq!(Geometry::parse_ewkb(&[7]), Err(GeometryError::ByteOrder(7)));
		assert_eq!(Geometry::parse_text("0101"), Err(GeometryError::Truncated));
	}

	#[test]
	fn test_geography_default_srid_and_range() {
		let geography = Geography::parse_text("POINT(10 20)").unwrap();
		assert_eq!(geography.srid(), Geography::DEFAULT_SRID);
		let from_hex = Geography::parse_text("0101000000000000000000F03F0000000000000040").unwrap();
		assert_eq!(from_hex.srid(), Geography::DEFAULT_SRID);
		assert_eq!(Geography::parse_text("POINT(200 0)"), Err(GeometryError::OutOfRange(200.0, 0.0)));
	}

	#[test]
	fn test_box2d_parse_and_display() {
		let b = Box2D::parse("box(3 4,1 2)").unwrap();
		assert_eq!(b, Box2D::new(1.0, 2.0, 3.0, 4.0));
		assert_eq!(b.to_string(), "BOX(1 2,3 4)");
		assert_eq!(Box2D::parse("BOX(0.5 -1,2 3)").unwrap().to_string(), "BOX(0.5 -1,2 3)");
		assert!(Box2D::parse("BOX(1 2)").is_none());
	}
}
