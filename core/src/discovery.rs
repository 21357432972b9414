// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! ARP host discovery on the local link.
//!
//! One broadcast ARP request goes out per target address. Every target that
//! answers before the reply window closes becomes a [`Host`]. The window is
//! measured from the moment the last request was sent.
//!
//! ARP carries no IP header, so right after a host's first reply we send it a
//! unicast ICMP echo. Any IPv4 frame the host sends back within the window
//! gives us its TTL and with it the [`OsHint`]. Hosts that stay silent on IPv4
//! fall back to [`OsHint::LinuxUnix`].
//!
//! This requires **root privileges** (or `CAP_NET_RAW`) to open the raw socket.

use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use pnet::util::MacAddr;
use tokio::time::{Instant, Interval, Sleep};

use sweep_common::interface::{self, LocalLink};
use sweep_common::models::host::{Host, OsHint};
use sweep_common::models::range::TargetRange;
use sweep_common::{debug, success};
use sweep_protocols::arp::ArpReply;
use sweep_protocols::icmp::{self, Endpoints};
use sweep_protocols::{self as protocol, Inbound};

use crate::network::channel::{self, EthernetHandle};

const SEND_INTERVAL_US: Duration = Duration::from_micros(1000);

pub static FOUND_HOST_COUNT: AtomicUsize = AtomicUsize::new(0);

pub fn get_host_count() -> usize {
    FOUND_HOST_COUNT.load(Ordering::Relaxed)
}

fn increment_host_count() {
    FOUND_HOST_COUNT.fetch_add(1, Ordering::Relaxed);
}

fn reset_host_count() {
    FOUND_HOST_COUNT.store(0, Ordering::Relaxed);
}

/// Anything that can turn a target range into a list of live hosts.
///
/// The orchestrator only talks to this trait, which lets tests replace the raw
/// socket sweep with a fixed host list.
#[async_trait]
pub trait HostDiscovery: Send {
    async fn discover_hosts(&mut self) -> anyhow::Result<Vec<Host>>;
}

#[derive(Debug, Clone, Copy)]
struct Observed {
    mac: MacAddr,
    ttl: Option<u8>,
}

pub struct ArpDiscoverer {
    local_mac: MacAddr,
    local_ip: Ipv4Addr,
    targets: TargetRange,
    eth_handle: EthernetHandle,
    reply_window: Duration,
    hosts: IndexMap<Ipv4Addr, Observed>,
}

#[async_trait]
impl HostDiscovery for ArpDiscoverer {
    async fn discover_hosts(&mut self) -> anyhow::Result<Vec<Host>> {
        reset_host_count();
        let targets: Vec<Ipv4Addr> = self.targets.iter().collect();
        let mut packet_iter = protocol::arp_request_iter(self.local_mac, self.local_ip, targets);
        let mut sending_finished: bool = false;

        let mut send_interval: Interval = tokio::time::interval(SEND_INTERVAL_US);

        // Armed once the last request is out.
        let reply_deadline: Sleep = tokio::time::sleep(self.reply_window);
        tokio::pin!(reply_deadline);

        loop {
            tokio::select! {
                pkt = self.eth_handle.rx.recv() => {
                    match pkt {
                        Some(bytes) => self.process_frame(&bytes),
                        None => break,
                    }
                }

                _ = send_interval.tick(), if !sending_finished => {
                    match packet_iter.next() {
                        Some((packet, ip)) => {
                            if let Err(e) = self.eth_handle.send(&packet) {
                                debug!(verbosity = 2, "ARP request to {ip} failed: {e}");
                            }
                        }
                        None => {
                            sending_finished = true;
                            reply_deadline.as_mut().reset(Instant::now() + self.reply_window);
                            debug!(
                                verbosity = 1,
                                "All ARP requests sent, listening {}ms for replies",
                                self.reply_window.as_millis()
                            );
                        }
                    }
                }

                _ = &mut reply_deadline, if sending_finished => break,
            }
        }

        Ok(self
            .hosts
            .drain(..)
            .map(|(ip, observed)| {
                let os_hint: OsHint = observed.ttl.map_or(OsHint::LinuxUnix, OsHint::from_ttl);
                Host::new(ip, observed.mac, os_hint).with_vendor_lookup()
            })
            .collect())
    }
}

impl ArpDiscoverer {
    /// Builds a discoverer on top of an already open Layer 2 handle.
    pub fn new(
        local_mac: MacAddr,
        local_ip: Ipv4Addr,
        targets: TargetRange,
        eth_handle: EthernetHandle,
        reply_window: Duration,
    ) -> Self {
        Self {
            local_mac,
            local_ip,
            targets,
            eth_handle,
            reply_window,
            hosts: IndexMap::new(),
        }
    }

    /// Opens a raw capture on `link` and builds a discoverer for `targets`.
    pub fn open(
        link: &LocalLink,
        targets: TargetRange,
        reply_window: Duration,
    ) -> anyhow::Result<Self> {
        let eth_handle: EthernetHandle = channel::start_capture(&link.interface)?;
        Ok(Self::new(link.mac, link.ip(), targets, eth_handle, reply_window))
    }

    fn process_frame(&mut self, bytes: &[u8]) {
        match protocol::parse_inbound(bytes) {
            Ok(Inbound::ArpReply(reply)) => self.record_reply(reply),
            Ok(Inbound::Ipv4 {
                source,
                source_mac,
                ttl,
            }) => self.record_ttl(source, source_mac, ttl),
            Err(e) => debug!(verbosity = 2, "Ignoring frame: {e}"),
        }
    }

    fn record_reply(&mut self, reply: ArpReply) {
        let ArpReply {
            sender_ip,
            sender_mac,
        } = reply;

        if sender_mac == self.local_mac || !self.targets.contains(&sender_ip) {
            debug!(verbosity = 2, "Ignoring ARP reply from {sender_ip} ({sender_mac})");
            return;
        }

        if let Some(observed) = self.hosts.get_mut(&sender_ip) {
            if observed.mac != sender_mac {
                debug!(
                    verbosity = 1,
                    "{sender_ip} moved from {} to {sender_mac}", observed.mac
                );
                observed.mac = sender_mac;
            }
            return;
        }

        self.hosts.insert(
            sender_ip,
            Observed {
                mac: sender_mac,
                ttl: None,
            },
        );
        increment_host_count();
        success!(verbosity = 1, "{sender_ip} is at {sender_mac}");
        self.send_ttl_probe(sender_ip, sender_mac);
    }

    fn record_ttl(&mut self, source: Ipv4Addr, source_mac: MacAddr, ttl: u8) {
        if let Some(observed) = self.hosts.get_mut(&source)
            && observed.mac == source_mac
        {
            debug!(verbosity = 2, "{source} answered with TTL {ttl}");
            observed.ttl = Some(ttl);
        }
    }

    fn send_ttl_probe(&mut self, dst_addr: Ipv4Addr, dst_mac: MacAddr) {
        let endpoints: Endpoints = Endpoints {
            src_mac: self.local_mac,
            src_addr: self.local_ip,
            dst_mac,
            dst_addr,
        };
        let sent = icmp::create_echo_request_v4(endpoints)
            .and_then(|packet| self.eth_handle.send(&packet));
        if let Err(e) = sent {
            debug!(verbosity = 2, "ICMP probe to {dst_addr} failed: {e}");
        }
    }
}

/// Sweeps `range` from the interface that is on-link with it.
pub async fn discover(range: &TargetRange, reply_window: Duration) -> anyhow::Result<Vec<Host>> {
    let link: LocalLink = interface::find_for_range(range)?;
    let mut discoverer: ArpDiscoverer = ArpDiscoverer::open(&link, range.clone(), reply_window)?;
    discoverer.discover_hosts().await
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
