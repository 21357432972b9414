// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Host Model
//!
//! This module defines the [`Host`] entity, a single device that answered an ARP probe.
//!
//! ## Key Concepts
//! * **Identity**: a host is its `(ip, mac)` pair. Both are fixed at creation and only
//!   readable afterwards.
//! * **OS hint**: a best-effort guess derived from an observed IP TTL, see [`OsHint::from_ttl`].
//! * **Open ports**: empty until the port scan phase fills them in, exactly once,
//!   always ascending and free of duplicates.

use std::collections::BTreeSet;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use anyhow::ensure;
use pnet::util::MacAddr;
use serde::{Deserialize, Serialize};

use crate::utils::mac;

/// TTL above which a host is labelled [`OsHint::Windows`].
///
/// Heuristic only: Windows stacks start at 128, most Unix stacks at 64, but
/// intermediate hops and tuned kernels make this unreliable.
pub const WINDOWS_TTL_THRESHOLD: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsHint {
    #[serde(rename = "Windows")]
    Windows,
    #[serde(rename = "Linux/Unix")]
    LinuxUnix,
}

impl OsHint {
    /// TTL > 128 ⇒ Windows, anything else ⇒ Linux/Unix.
    pub fn from_ttl(ttl: u8) -> Self {
        if ttl > WINDOWS_TTL_THRESHOLD {
            OsHint::Windows
        } else {
            OsHint::LinuxUnix
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OsHint::Windows => "Windows",
            OsHint::LinuxUnix => "Linux/Unix",
        }
    }
}

impl fmt::Display for OsHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for OsHint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Windows" => Ok(OsHint::Windows),
            "Linux/Unix" => Ok(OsHint::LinuxUnix),
            other => anyhow::bail!("unknown OS hint '{other}'"),
        }
    }
}

/// Represents a host discovered on the local link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    ip: Ipv4Addr,
    mac: MacAddr,
    os_hint: OsHint,
    open_ports: Vec<u16>,
    ports_scanned: bool,

    /// The device vendor/manufacturer (derived from MAC). Display only.
    pub vendor: Option<String>,
}

impl Host {
    pub fn new(ip: Ipv4Addr, mac: MacAddr, os_hint: OsHint) -> Self {
        Self {
            ip,
            mac,
            os_hint,
            open_ports: Vec::new(),
            ports_scanned: false,
            vendor: None,
        }
    }

    /// Looks the MAC up in the OUI database.
    pub fn with_vendor_lookup(mut self) -> Self {
        if !mac::is_locally_administered(self.mac) {
            self.vendor = mac::get_vendor(self.mac);
        }
        self
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.ip
    }

    pub fn mac(&self) -> MacAddr {
        self.mac
    }

    pub fn os_hint(&self) -> OsHint {
        self.os_hint
    }

    pub fn open_ports(&self) -> &[u16] {
        &self.open_ports
    }

    pub fn is_port_scanned(&self) -> bool {
        self.ports_scanned
    }

    /// Stores the result of the port scan for this host.
    ///
    /// The ports are sorted and de-duplicated on the way in. A second call is
    /// rejected: a host is port scanned exactly once.
    pub fn set_open_ports<I>(&mut self, ports: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = u16>,
    {
        ensure!(
            !self.ports_scanned,
            "open ports for {} have already been populated",
            self.ip
        );
        let unique: BTreeSet<u16> = ports.into_iter().collect();
        self.open_ports = unique.into_iter().collect();
        self.ports_scanned = true;
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    static IP_ADDR: Ipv4Addr = Ipv4Addr::new(192, 168, 0, 100);
    static MAC_ADDR: MacAddr = MacAddr(0x02, 0x00, 0x00, 0x00, 0x00, 0x01);

    #[test]
    fn ttl_heuristic_boundaries() {
        assert_eq!(OsHint::from_ttl(64), OsHint::LinuxUnix);
        assert_eq!(OsHint::from_ttl(128), OsHint::LinuxUnix);
        assert_eq!(OsHint::from_ttl(129), OsHint::Windows);
        assert_eq!(OsHint::from_ttl(200), OsHint::Windows);
        assert_eq!(OsHint::from_ttl(0), OsHint::LinuxUnix);
    }

    #[test]
    fn os_hint_display_round_trips() {
        for hint in [OsHint::Windows, OsHint::LinuxUnix] {
            assert_eq!(hint.to_string().parse::<OsHint>().unwrap(), hint);
        }
        assert!("BeOS".parse::<OsHint>().is_err());
    }

    #[test]
    fn new_host_has_no_ports() {
        let host: Host = Host::new(IP_ADDR, MAC_ADDR, OsHint::LinuxUnix);
        assert!(host.open_ports().is_empty());
        assert!(!host.is_port_scanned());
        assert_eq!(host.ip(), IP_ADDR);
        assert_eq!(host.mac(), MAC_ADDR);
    }

    #[test]
    fn open_ports_are_sorted_and_unique() {
        let mut host: Host = Host::new(IP_ADDR, MAC_ADDR, OsHint::Windows);
        host.set_open_ports([443, 22, 80, 22]).unwrap();
        assert_eq!(host.open_ports(), &[22, 80, 443]);
        assert!(host.is_port_scanned());
    }

    #[test]
    fn open_ports_are_populated_once() {
        let mut host: Host = Host::new(IP_ADDR, MAC_ADDR, OsHint::Windows);
        host.set_open_ports([22]).unwrap();
        assert!(host.set_open_ports([80]).is_err());
        assert_eq!(host.open_ports(), &[22]);
    }
}
