// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Target Range Model
//!
//! Parses what the user typed after `-t` into a [`TargetRange`]: an immutable,
//! de-duplicated set of IPv4 addresses that the ARP discoverer probes.
//!
//! Accepted forms (comma separated, freely mixed):
//! * single host: `192.168.1.7`
//! * CIDR: `192.168.1.0/24` (network and broadcast addresses included)
//! * explicit range: `192.168.1.10-192.168.1.20`
//! * abbreviated range: `192.168.1.10-20`

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;
use thiserror::Error;

use crate::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("no targets given")]
    Empty,
    #[error("invalid target format: '{0}'")]
    Invalid(String),
    #[error("invalid CIDR '{0}': {1}")]
    Cidr(String, String),
    #[error("invalid end of range '{0}'")]
    RangeEnd(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start: Ipv4Addr, end: Ipv4Addr) -> Self {
        if u32::from(start) <= u32::from(end) {
            Self {
                start_addr: start,
                end_addr: end,
            }
        } else {
            info!(verbosity = 1, "{start} > {end}. Reversing order.");
            Self {
                start_addr: end,
                end_addr: start,
            }
        }
    }

    pub fn single(ip: Ipv4Addr) -> Self {
        Self::new(ip, ip)
    }

    pub fn to_iter(&self) -> impl Iterator<Item = Ipv4Addr> + use<> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn contains(&self, ip: &Ipv4Addr) -> bool {
        let ip_u32: u32 = (*ip).into();
        ip_u32 >= u32::from(self.start_addr) && ip_u32 <= u32::from(self.end_addr)
    }

    pub fn len(&self) -> u64 {
        u64::from(u32::from(self.end_addr)) - u64::from(u32::from(self.start_addr)) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

pub fn cidr_range(ip: Ipv4Addr, prefix: u8) -> Result<Ipv4Range, TargetError> {
    let network = Ipv4Network::new(ip, prefix)
        .map_err(|e| TargetError::Cidr(format!("{ip}/{prefix}"), e.to_string()))?;
    Ok(Ipv4Range::new(network.network(), network.broadcast()))
}

/// The immutable set of addresses a scan targets.
///
/// Ranges are kept sorted and merged, so iteration yields every candidate
/// exactly once in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRange {
    ranges: Vec<Ipv4Range>,
}

impl TargetRange {
    pub fn from_ranges(ranges: impl IntoIterator<Item = Ipv4Range>) -> Result<Self, TargetError> {
        let mut ranges: Vec<Ipv4Range> = ranges.into_iter().collect();
        if ranges.is_empty() {
            return Err(TargetError::Empty);
        }
        compact(&mut ranges);
        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[Ipv4Range] {
        &self.ranges
    }

    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.ranges.iter().flat_map(|range| range.to_iter())
    }

    pub fn contains(&self, ip: &Ipv4Addr) -> bool {
        self.ranges.iter().any(|range| range.contains(ip))
    }

    pub fn len(&self) -> u64 {
        self.ranges.iter().map(Ipv4Range::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl FromStr for TargetRange {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ranges: Vec<Ipv4Range> = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(parse_part)
            .collect::<Result<_, _>>()?;

        let target = Self::from_ranges(ranges)?;
        info!(
            verbosity = 1,
            "Parsed '{s}' into {} address(es) across {} range(s)",
            target.len(),
            target.ranges.len()
        );
        Ok(target)
    }
}

impl fmt::Display for TargetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .ranges
            .iter()
            .map(|r| match r.start_addr == r.end_addr {
                true => r.start_addr.to_string(),
                false => format!("{}-{}", r.start_addr, r.end_addr),
            })
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

fn parse_part(s: &str) -> Result<Ipv4Range, TargetError> {
    if let Ok(ip) = s.parse::<Ipv4Addr>() {
        return Ok(Ipv4Range::single(ip));
    }

    if let Some((ip_str, prefix_str)) = s.split_once('/') {
        let ip: Ipv4Addr = ip_str
            .parse()
            .map_err(|_| TargetError::Cidr(s.to_string(), format!("bad address '{ip_str}'")))?;
        let prefix: u8 = prefix_str
            .parse()
            .map_err(|_| TargetError::Cidr(s.to_string(), format!("bad prefix '{prefix_str}'")))?;
        return cidr_range(ip, prefix);
    }

    if let Some((start_str, end_str)) = s.split_once('-') {
        let start: Ipv4Addr = start_str
            .trim()
            .parse()
            .map_err(|_| TargetError::Invalid(s.to_string()))?;
        let end: Ipv4Addr = parse_range_end(end_str.trim(), start)?;
        return Ok(Ipv4Range::new(start, end));
    }

    Err(TargetError::Invalid(s.to_string()))
}

/// Accepts a full address or a suffix overlaid on the start address
/// (`10.0.0.5-20`, `10.0.0.5-1.20`).
fn parse_range_end(end_str: &str, start: Ipv4Addr) -> Result<Ipv4Addr, TargetError> {
    if let Ok(full) = end_str.parse::<Ipv4Addr>() {
        return Ok(full);
    }

    let partial: Vec<u8> = end_str
        .split('.')
        .map(str::parse::<u8>)
        .collect::<Result<_, _>>()
        .map_err(|_| TargetError::RangeEnd(end_str.to_string()))?;

    if partial.is_empty() || partial.len() > 4 {
        return Err(TargetError::RangeEnd(end_str.to_string()));
    }

    let mut octets: [u8; 4] = start.octets();
    octets[4 - partial.len()..].copy_from_slice(&partial);
    Ok(Ipv4Addr::from(octets))
}

fn compact(ranges: &mut Vec<Ipv4Range>) {
    ranges.sort_by_key(|r| r.start_addr);

    let mut merged: Vec<Ipv4Range> = Vec::with_capacity(ranges.len());
    for next in ranges.drain(..) {
        match merged.last_mut() {
            Some(current)
                if u32::from(next.start_addr) <= u32::from(current.end_addr).saturating_add(1) =>
            {
                if next.end_addr > current.end_addr {
                    current.end_addr = next.end_addr;
                }
            }
            _ => merged.push(next),
        }
    }
    *ranges = merged;
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
