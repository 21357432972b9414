// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! ICMPv4 echo frames.
//!
//! ARP replies carry no IP header, so a host's TTL is only visible once it
//! sends us an IPv4 packet. A unicast echo request is the cheapest way to
//! make it do so.

use std::net::Ipv4Addr;

use anyhow::Context;
use pnet::packet::ethernet::EtherTypes;
use pnet::packet::icmp::{IcmpCode, IcmpPacket, IcmpType, IcmpTypes, MutableIcmpPacket, checksum};
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::util::MacAddr;

use crate::utils::{DEFAULT_TTL, ICMP_V4_ECHO_LEN};
use crate::{ethernet, ip};

/// Addressing of an ICMP frame on the local link.
#[derive(Debug, Clone, Copy)]
pub struct Endpoints {
    pub src_mac: MacAddr,
    pub src_addr: Ipv4Addr,
    pub dst_mac: MacAddr,
    pub dst_addr: Ipv4Addr,
}

pub fn create_echo_request_v4(endpoints: Endpoints) -> anyhow::Result<Vec<u8>> {
    create_echo_v4(endpoints, IcmpTypes::EchoRequest, DEFAULT_TTL)
}

/// An echo reply as the target host would send it, with its own `ttl`.
pub fn create_echo_reply_v4(endpoints: Endpoints, ttl: u8) -> anyhow::Result<Vec<u8>> {
    create_echo_v4(endpoints, IcmpTypes::EchoReply, ttl)
}

fn create_echo_v4(endpoints: Endpoints, icmp_type: IcmpType, ttl: u8) -> anyhow::Result<Vec<u8>> {
    let mut icmp_buffer: [u8; ICMP_V4_ECHO_LEN] = [0u8; ICMP_V4_ECHO_LEN];
    {
        let mut icmp: MutableIcmpPacket = MutableIcmpPacket::new(&mut icmp_buffer[..])
            .context("failed to create ICMP packet")?;
        icmp.set_icmp_type(icmp_type);
        icmp.set_icmp_code(IcmpCode::new(0));
        // identifier (2 bytes) + sequence number (2 bytes)
        let identifier: u16 = rand::random();
        icmp.set_payload(&[(identifier >> 8) as u8, identifier as u8, 0, 0]);
        let icmp_pkt: IcmpPacket = icmp.to_immutable();
        let csm: u16 = checksum(&icmp_pkt);
        icmp.set_checksum(csm);
    }

    let ipv4_header: Vec<u8> = ip::create_ipv4_header(
        endpoints.src_addr,
        endpoints.dst_addr,
        ICMP_V4_ECHO_LEN as u16,
        IpNextHeaderProtocols::Icmp,
        ttl,
    )?;

    let mut payload: Vec<u8> = Vec::with_capacity(ipv4_header.len() + ICMP_V4_ECHO_LEN);
    payload.extend_from_slice(&ipv4_header);
    payload.extend_from_slice(&icmp_buffer);

    ethernet::frame(endpoints.src_mac, endpoints.dst_mac, EtherTypes::Ipv4, &payload)
}
