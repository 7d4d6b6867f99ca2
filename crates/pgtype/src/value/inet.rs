// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	net,
};

use serde::{Deserialize, Serialize};

/// An IPv4 or IPv6 host address with a netmask length.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IpAddr {
	pub addr: net::IpAddr,
	pub mask: u8,
}

impl IpAddr {
	/// Returns `None` when the mask is longer than the address.
	pub fn new(addr: net::IpAddr, mask: u8) -> Option<Self> {
		if mask > Self::max_mask(&addr) {
			return None;
		}
		Some(Self {
			addr,
			mask,
		})
	}

	pub fn host(addr: net::IpAddr) -> Self {
		Self {
			addr,
			mask: Self::max_mask(&addr),
		}
	}

	fn max_mask(addr: &net::IpAddr) -> u8 {
		match addr {
			net::IpAddr::V4(_) => 32,
			net::IpAddr::V6(_) => 128,
		}
	}

	pub fn is_v4(&self) -> bool {
		self.addr.is_ipv4()
	}

	/// Parses `address[/mask]`.
	pub fn parse(s: &str) -> Option<Self> {
		let s = s.trim();
		match s.split_once('/') {
			Some((addr, mask)) => {
				let addr: net::IpAddr = addr.parse().ok()?;
				let mask: u8 = mask.parse().ok()?;
				Self::new(addr, mask)
			}
			None => s.parse().ok().map(Self::host),
		}
	}
}

impl Display for IpAddr {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.addr)?;
		if self.mask != Self::max_mask(&self.addr) {
			write!(f, "/{}", self.mask)?;
		}
		Ok(())
	}
}
