// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Orchestration of a full sweep.
//!
//! Discovery runs exactly once. Every discovered host is then port scanned,
//! one host at a time, in discovery order, with the pool size and connect
//! timeout from [`ScanConfig`]. The result keeps that order.

use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use chrono::{DateTime, Local};

use sweep_common::config::ScanConfig;
use sweep_common::interface::{self, LocalLink};
use sweep_common::models::host::Host;
use sweep_common::models::range::TargetRange;
use sweep_common::models::result::ScanResult;
use sweep_common::{info, success};

use crate::discovery::{self, ArpDiscoverer, HostDiscovery};
use crate::portscan;

pub static SCANNED_HOST_COUNT: AtomicUsize = AtomicUsize::new(0);

pub fn get_scanned_count() -> usize {
    SCANNED_HOST_COUNT.load(Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub struct Orchestrator {
    cfg: ScanConfig,
}

impl Orchestrator {
    pub fn new(cfg: ScanConfig) -> Self {
        Self { cfg }
    }

    /// ARP sweep of `range` followed by a TCP connect scan of every live host.
    ///
    /// Fails before any probe is sent when no local interface can reach
    /// `range` or the raw socket cannot be opened.
    pub async fn run(&self, range: &TargetRange) -> anyhow::Result<ScanResult> {
        let link: LocalLink = interface::find_for_range(range)?;
        let discoverer: ArpDiscoverer =
            ArpDiscoverer::open(&link, range.clone(), self.cfg.discovery_timeout)?;
        let connect_timeout = self.cfg.connect_timeout;

        self.run_with(discoverer, move |addr| {
            portscan::tcp_connect(addr, connect_timeout)
        })
        .await
    }

    /// Discovery only, no port scan.
    pub async fn discover_only(&self, range: &TargetRange) -> anyhow::Result<Vec<Host>> {
        discovery::discover(range, self.cfg.discovery_timeout).await
    }

    /// Same pipeline as [`Orchestrator::run`] with caller supplied discovery and probing.
    pub async fn run_with<D, F, Fut>(&self, mut discoverer: D, prober: F) -> anyhow::Result<ScanResult>
    where
        D: HostDiscovery,
        F: Fn(SocketAddr) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let started_at: DateTime<Local> = Local::now();
        let clock: Instant = Instant::now();
        SCANNED_HOST_COUNT.store(0, Ordering::Relaxed);

        let mut hosts: Vec<Host> = discoverer.discover_hosts().await?;
        success!("Discovery finished: {} live host(s)", hosts.len());

        for host in hosts.iter_mut() {
            let open: Vec<u16> = portscan::scan_ports_with(
                IpAddr::V4(host.ip()),
                self.cfg.ports.as_slice(),
                self.cfg.concurrency,
                prober.clone(),
            )
            .await;

            info!(
                verbosity = 1,
                "{}: {} open port(s) out of {}",
                host.ip(),
                open.len(),
                self.cfg.ports.len()
            );
            host.set_open_ports(open)?;
            SCANNED_HOST_COUNT.fetch_add(1, Ordering::Relaxed);
        }

        Ok(ScanResult::new(hosts, started_at, clock.elapsed()))
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
