// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use anyhow::Context;
use pnet::packet::ethernet::{EtherType, EthernetPacket, MutableEthernetPacket};
use pnet::util::MacAddr;

use crate::utils::{ETH_HDR_LEN, MIN_ETH_FRAME_NO_FCS};

pub fn make_header(src_mac: MacAddr, dst_mac: MacAddr, et: EtherType) -> anyhow::Result<Vec<u8>> {
    let mut buffer: [u8; ETH_HDR_LEN] = [0; ETH_HDR_LEN];
    {
        let mut eth: MutableEthernetPacket = MutableEthernetPacket::new(&mut buffer[..])
            .context("failed to create mutable Ethernet packet")?;
        eth.set_source(src_mac);
        eth.set_destination(dst_mac);
        eth.set_ethertype(et);
    }
    Ok(buffer.to_vec())
}

/// Prepends an Ethernet header and pads the frame to the 60 byte minimum.
pub fn frame(
    src_mac: MacAddr,
    dst_mac: MacAddr,
    et: EtherType,
    payload: &[u8],
) -> anyhow::Result<Vec<u8>> {
    let mut frame: Vec<u8> = make_header(src_mac, dst_mac, et)?;
    frame.extend_from_slice(payload);
    if frame.len() < MIN_ETH_FRAME_NO_FCS {
        frame.resize(MIN_ETH_FRAME_NO_FCS, 0u8);
    }
    Ok(frame)
}

pub fn get_packet_from_u8(frame_bytes: &'_ [u8]) -> anyhow::Result<EthernetPacket<'_>> {
    let eth_packet: EthernetPacket =
        EthernetPacket::new(frame_bytes).context("truncated or invalid Ethernet frame")?;
    Ok(eth_packet)
}
