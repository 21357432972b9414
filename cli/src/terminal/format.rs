// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;
use pnet::util::MacAddr;
use sweep_common::models::host::{Host, OsHint};

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn mac_to_detail(mac: &MacAddr) -> Detail {
    (String::from("MAC"), mac.to_string().color(colors::MAC_ADDR))
}

pub fn vendor_to_detail(vendor: &Option<String>) -> Option<Detail> {
    vendor
        .as_ref()
        .map(|v| (String::from("Vendor"), v.color(colors::VENDOR)))
}

pub fn os_to_detail(os_hint: OsHint) -> Detail {
    (String::from("OS"), os_hint_colored(os_hint))
}

/// Only hosts that went through the port scan get a `Ports` line.
pub fn ports_to_detail(host: &Host) -> Option<Detail> {
    if !host.is_port_scanned() {
        return None;
    }

    let value: ColoredString = if host.open_ports().is_empty() {
        "none".color(colors::SEPARATOR).italic()
    } else {
        ports_to_string(host.open_ports()).color(colors::PORT_OPEN)
    };
    Some((String::from("Ports"), value))
}

pub fn os_hint_colored(os_hint: OsHint) -> ColoredString {
    match os_hint {
        OsHint::Windows => os_hint.as_str().color(colors::OS_WINDOWS),
        OsHint::LinuxUnix => os_hint.as_str().color(colors::OS_UNIX),
    }
}

pub fn ports_to_string(ports: &[u16]) -> String {
    ports
        .iter()
        .map(u16::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}

/// `-q` rendering: one uncolored line per host.
pub fn host_line(host: &Host) -> String {
    let mut line: String = format!("{:<15} {}  {:<10}", host.ip(), host.mac(), host.os_hint());
    if host.is_port_scanned() {
        line.push_str("  ");
        line.push_str(&host.open_ports().iter().map(u16::to_string).collect::<Vec<_>>().join(","));
    }
    line.trim_end().to_string()
}
