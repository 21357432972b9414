// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::Ipv4Addr;

use anyhow::{Context, ensure};
use pnet::packet::Packet;
use pnet::packet::ethernet::{EtherTypes, EthernetPacket};
use pnet::packet::ip::IpNextHeaderProtocol;
use pnet::packet::ipv4::{self, Ipv4Packet, MutableIpv4Packet};

use crate::utils::IP_V4_HDR_LEN;

const WORD_LEN: usize = 4;
const NO_FRAG_FLAG: u8 = 1 << 1;

pub fn create_ipv4_header(
    src_addr: Ipv4Addr,
    dst_addr: Ipv4Addr,
    payload_length: u16,
    next_protocol: IpNextHeaderProtocol,
    ttl: u8,
) -> anyhow::Result<Vec<u8>> {
    let mut buffer: [u8; IP_V4_HDR_LEN] = [0; IP_V4_HDR_LEN];
    {
        let mut ipv4: MutableIpv4Packet =
            MutableIpv4Packet::new(&mut buffer[..]).context("creating ipv4 packet")?;
        ipv4.set_version(4);
        ipv4.set_header_length((IP_V4_HDR_LEN / WORD_LEN) as u8);
        ipv4.set_dscp(0);
        ipv4.set_ecn(0);
        ipv4.set_total_length(IP_V4_HDR_LEN as u16 + payload_length);
        ipv4.set_identification(rand::random());
        ipv4.set_flags(NO_FRAG_FLAG);
        ipv4.set_fragment_offset(0);
        ipv4.set_ttl(ttl);
        ipv4.set_next_level_protocol(next_protocol);
        ipv4.set_source(src_addr);
        ipv4.set_destination(dst_addr);
        let csm: u16 = ipv4::checksum(&ipv4.to_immutable());
        ipv4.set_checksum(csm);
    }
    Ok(buffer.to_vec())
}

/// Source address and TTL of an IPv4 frame, the only IP header fields the
/// discoverer cares about.
pub fn get_ipv4_source_and_ttl(frame: &EthernetPacket) -> anyhow::Result<(Ipv4Addr, u8)> {
    ensure!(
        frame.get_ethertype() == EtherTypes::Ipv4,
        "not an IPv4 packet"
    );
    let ipv4_packet: Ipv4Packet = Ipv4Packet::new(frame.payload()).context(format!(
        "truncated or invalid ipv4 packet (payload len {})",
        frame.payload().len()
    ))?;
    Ok((ipv4_packet.get_source(), ipv4_packet.get_ttl()))
}
