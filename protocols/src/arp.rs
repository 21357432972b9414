// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::Ipv4Addr;

use anyhow::{Context, ensure};
use pnet::packet::Packet;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperation, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket};
use pnet::util::MacAddr;

use crate::ethernet;
use crate::utils::ARP_LEN;

/// The sender side of an ARP reply: who owns which address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpReply {
    pub sender_ip: Ipv4Addr,
    pub sender_mac: MacAddr,
}

/// Builds a broadcast "who-has `dst_addr`, tell `src_addr`" frame.
pub fn create_request(
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    dst_addr: Ipv4Addr,
) -> anyhow::Result<Vec<u8>> {
    let arp: [u8; ARP_LEN] = build(
        ArpOperations::Request,
        src_mac,
        src_addr,
        MacAddr::zero(),
        dst_addr,
    )?;
    ethernet::frame(src_mac, MacAddr::broadcast(), EtherTypes::Arp, &arp)
}

/// Builds a unicast "`src_addr` is-at `src_mac`" frame addressed to the requester.
pub fn create_reply(
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    dst_mac: MacAddr,
    dst_addr: Ipv4Addr,
) -> anyhow::Result<Vec<u8>> {
    let arp: [u8; ARP_LEN] = build(ArpOperations::Reply, src_mac, src_addr, dst_mac, dst_addr)?;
    ethernet::frame(src_mac, dst_mac, EtherTypes::Arp, &arp)
}

fn build(
    operation: ArpOperation,
    sender_mac: MacAddr,
    sender_addr: Ipv4Addr,
    target_mac: MacAddr,
    target_addr: Ipv4Addr,
) -> anyhow::Result<[u8; ARP_LEN]> {
    let mut arp_buffer: [u8; ARP_LEN] = [0u8; ARP_LEN];
    {
        let mut arp_packet: MutableArpPacket = MutableArpPacket::new(&mut arp_buffer)
            .context("failed to create mutable ARP packet")?;
        arp_packet.set_hardware_type(ArpHardwareTypes::Ethernet);
        arp_packet.set_protocol_type(EtherTypes::Ipv4);
        arp_packet.set_hw_addr_len(6);
        arp_packet.set_proto_addr_len(4);
        arp_packet.set_operation(operation);
        arp_packet.set_sender_hw_addr(sender_mac);
        arp_packet.set_sender_proto_addr(sender_addr);
        arp_packet.set_target_hw_addr(target_mac);
        arp_packet.set_target_proto_addr(target_addr);
    }
    Ok(arp_buffer)
}

/// Extracts the sender of an ARP **reply**. Requests and malformed payloads are errors.
pub fn parse_reply(eth_packet: &EthernetPacket) -> anyhow::Result<ArpReply> {
    ensure!(
        eth_packet.get_ethertype() == EtherTypes::Arp,
        "not an ARP packet"
    );
    let payload: &[u8] = eth_packet.payload();
    ensure!(
        payload.len() >= ARP_LEN,
        "truncated or invalid ARP packet (payload len {})",
        payload.len()
    );
    let arp_packet: ArpPacket = ArpPacket::new(payload).context("failed to parse ARP packet")?;
    ensure!(
        arp_packet.get_operation() == ArpOperations::Reply,
        "ARP operation {:?} is not a reply",
        arp_packet.get_operation()
    );

    Ok(ArpReply {
        sender_ip: arp_packet.get_sender_proto_addr(),
        sender_mac: arp_packet.get_sender_hw_addr(),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
