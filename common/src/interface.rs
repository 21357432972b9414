// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Picks the network adapter an ARP sweep has to go out of.
//!
//! ARP never leaves the broadcast domain, so the only usable interface is one
//! whose own IPv4 network already contains every target address.

use std::net::Ipv4Addr;

use anyhow::bail;
use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use pnet::util::MacAddr;

use crate::info;
use crate::models::range::TargetRange;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// Loopback never answers ARP.
    IsLoopback,
    /// The interface does not have a MAC address.
    NoMacAddress,
    /// The interface does not support broadcast (required for ARP).
    NotBroadcast,
    /// The interface is a point-to-point link (e.g., a VPN).
    IsPointToPoint,
    /// The interface has no IPv4 network to source ARP requests from.
    NoIpv4,
}

/// The local side of an ARP sweep: interface, our MAC and our IPv4 network.
#[derive(Debug, Clone)]
pub struct LocalLink {
    pub interface: NetworkInterface,
    pub mac: MacAddr,
    pub network: Ipv4Network,
}

impl LocalLink {
    pub fn ip(&self) -> Ipv4Addr {
        self.network.ip()
    }

    pub fn covers(&self, range: &TargetRange) -> bool {
        range.ranges().iter().all(|r| {
            self.network.contains(r.start_addr) && self.network.contains(r.end_addr)
        })
    }
}

/// Finds the interface that can reach every address of `range` via ARP.
pub fn find_for_range(range: &TargetRange) -> anyhow::Result<LocalLink> {
    let interfaces: Vec<NetworkInterface> = datalink::interfaces();

    info!(
        verbosity = 1,
        "Identified {} network interface(s), looking for one on-link with {range}",
        interfaces.len()
    );

    match select_for_range(interfaces, range) {
        Some(link) => {
            info!(
                verbosity = 1,
                "Using interface {} ({} / {})", link.interface.name, link.network, link.mac
            );
            Ok(link)
        }
        None => bail!("no local interface is on-link with {range}; ARP discovery needs a directly attached subnet"),
    }
}

/// Chooses among `interfaces` without touching the system, wired adapters first.
pub fn select_for_range(
    mut interfaces: Vec<NetworkInterface>,
    range: &TargetRange,
) -> Option<LocalLink> {
    interfaces.sort_by_key(|i| if is_wired_name(&i.name) { 0 } else { 1 });

    interfaces
        .into_iter()
        .filter(|intf| match check_viability(intf) {
            Ok(()) => true,
            Err(reason) => {
                info!(verbosity = 2, "Skipping interface {}: {reason:?}", intf.name);
                false
            }
        })
        .flat_map(|intf| {
            let mac: Option<MacAddr> = intf.mac;
            ipv4_nets(&intf)
                .into_iter()
                .filter_map(move |network| {
                    mac.map(|mac| LocalLink {
                        interface: intf.clone(),
                        mac,
                        network,
                    })
                })
                .collect::<Vec<LocalLink>>()
        })
        .find(|link| link.covers(range))
}

pub fn check_viability(intf: &NetworkInterface) -> Result<(), ViabilityError> {
    if !intf.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if intf.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if intf.mac.is_none_or(|mac| mac == MacAddr::zero()) {
        return Err(ViabilityError::NoMacAddress);
    }
    if intf.is_point_to_point() {
        return Err(ViabilityError::IsPointToPoint);
    }
    if !intf.is_broadcast() {
        return Err(ViabilityError::NotBroadcast);
    }
    if ipv4_nets(intf).is_empty() {
        return Err(ViabilityError::NoIpv4);
    }
    Ok(())
}

fn ipv4_nets(intf: &NetworkInterface) -> Vec<Ipv4Network> {
    intf.ips
        .iter()
        .filter_map(|ip| match ip {
            IpNetwork::V4(v4) => Some(*v4),
            IpNetwork::V6(_) => None,
        })
        .collect()
}

fn is_wired_name(name: &str) -> bool {
    name.starts_with("eth") || name.starts_with("en")
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

    const IFF_UP: u32 = 1;
    const IFF_BROADCAST: u32 = 1 << 1;
    const IFF_LOOPBACK: u32 = 1 << 3;
    const IFF_POINTTOPOINT: u32 = 1 << 4;

    fn create_mock_interface(
        name: &str,
        mac: Option<MacAddr>,
        ips: Vec<IpNetwork>,
        flags: u32,
    ) -> NetworkInterface {
        NetworkInterface {
            name: name.to_string(),
            description: "An interface".to_string(),
            index: 0,
            mac,
            ips,
            flags,
        }
    }

    fn default_mac() -> Option<MacAddr> {
        Some(MacAddr(0x1, 0x2, 0x3, 0x4, 0x5, 0x6))
    }

    fn lan_ips() -> Vec<IpNetwork> {
        vec![IpNetwork::V4("192.168.1.100/24".parse().unwrap())]
    }

    fn lan_target() -> TargetRange {
        "192.168.1.0/30".parse().unwrap()
    }

    #[test]
    fn viable_interface_passes() {
        let intf = create_mock_interface("eth0", default_mac(), lan_ips(), IFF_UP | IFF_BROADCAST);
        assert_eq!(check_viability(&intf), Ok(()));
    }

    #[test]
    fn viability_rejections() {
        let down = create_mock_interface("eth0", default_mac(), lan_ips(), IFF_BROADCAST);
        assert_eq!(check_viability(&down), Err(ViabilityError::IsDown));

        let lo = create_mock_interface(
            "lo",
            default_mac(),
            lan_ips(),
            IFF_UP | IFF_BROADCAST | IFF_LOOPBACK,
        );
        assert_eq!(check_viability(&lo), Err(ViabilityError::IsLoopback));

        let no_mac = create_mock_interface("eth0", None, lan_ips(), IFF_UP | IFF_BROADCAST);
        assert_eq!(check_viability(&no_mac), Err(ViabilityError::NoMacAddress));

        let ptp = create_mock_interface("tun0", default_mac(), lan_ips(), IFF_UP | IFF_POINTTOPOINT);
        assert_eq!(check_viability(&ptp), Err(ViabilityError::IsPointToPoint));

        let no_bcast = create_mock_interface("eth0", default_mac(), lan_ips(), IFF_UP);
        assert_eq!(check_viability(&no_bcast), Err(ViabilityError::NotBroadcast));

        let v6_only = create_mock_interface(
            "eth0",
            default_mac(),
            vec![IpNetwork::V6("fe80::1/64".parse().unwrap())],
            IFF_UP | IFF_BROADCAST,
        );
        assert_eq!(check_viability(&v6_only), Err(ViabilityError::NoIpv4));
    }

    #[test]
    fn selects_interface_covering_range() {
        let other = create_mock_interface(
            "eth1",
            default_mac(),
            vec![IpNetwork::V4("10.0.0.2/24".parse().unwrap())],
            IFF_UP | IFF_BROADCAST,
        );
        let lan = create_mock_interface("wlan0", default_mac(), lan_ips(), IFF_UP | IFF_BROADCAST);

        let link = select_for_range(vec![other, lan], &lan_target()).unwrap();
        assert_eq!(link.interface.name, "wlan0");
        assert_eq!(link.ip(), Ipv4Addr::new(192, 168, 1, 100));
    }

    #[test]
    fn prefers_wired_when_both_cover_range() {
        let wireless = create_mock_interface("wlan0", default_mac(), lan_ips(), IFF_UP | IFF_BROADCAST);
        let wired = create_mock_interface("eth0", default_mac(), lan_ips(), IFF_UP | IFF_BROADCAST);

        let link = select_for_range(vec![wireless, wired], &lan_target()).unwrap();
        assert_eq!(link.interface.name, "eth0");
    }

    #[test]
    fn range_partially_off_link_is_rejected() {
        let lan = create_mock_interface("eth0", default_mac(), lan_ips(), IFF_UP | IFF_BROADCAST);
        let target: TargetRange = "192.168.1.250-192.168.2.5".parse().unwrap();
        assert!(select_for_range(vec![lan], &target).is_none());
    }

    #[test]
    fn no_interfaces_returns_none() {
        assert!(select_for_range(vec![], &lan_target()).is_none());
    }
}
