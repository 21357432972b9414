// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

pub mod arp;
pub mod ethernet;
pub mod icmp;
pub mod ip;
pub mod utils;

use std::net::Ipv4Addr;

use pnet::packet::ethernet::{EtherTypes, EthernetPacket};
use pnet::util::MacAddr;
use sweep_common::debug;

use arp::ArpReply;

type Bytes = Vec<u8>;
type PacketIter = Box<dyn Iterator<Item = (Bytes, Ipv4Addr)> + Send>;

/// A received frame reduced to what host discovery needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound {
    ArpReply(ArpReply),
    Ipv4 { source: Ipv4Addr, source_mac: MacAddr, ttl: u8 },
}

/// Lazily builds one broadcast ARP request per target, in target order.
pub fn arp_request_iter<I>(src_mac: MacAddr, src_addr: Ipv4Addr, targets: I) -> PacketIter
where
    I: IntoIterator<Item = Ipv4Addr>,
    I::IntoIter: Send + 'static,
{
    let iter = targets.into_iter().filter_map(move |dst_addr| {
        match arp::create_request(src_mac, src_addr, dst_addr) {
            Ok(packet) => Some((packet, dst_addr)),
            Err(e) => {
                debug!("skipping ARP request to {dst_addr}: {e}");
                None
            }
        }
    });
    Box::new(iter)
}

/// Classifies a raw frame. Frames we have no use for are errors so the caller
/// can log them at high verbosity and move on.
pub fn parse_inbound(bytes: &[u8]) -> anyhow::Result<Inbound> {
    let frame: EthernetPacket = ethernet::get_packet_from_u8(bytes)?;
    match frame.get_ethertype() {
        EtherTypes::Arp => Ok(Inbound::ArpReply(arp::parse_reply(&frame)?)),
        EtherTypes::Ipv4 => {
            let (source, ttl) = ip::get_ipv4_source_and_ttl(&frame)?;
            Ok(Inbound::Ipv4 {
                source,
                source_mac: frame.get_source(),
                ttl,
            })
        }
        other => anyhow::bail!("Unsupported EtherType: {other:?}"),
    }
}
