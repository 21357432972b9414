// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::net::Ipv4Addr;
use std::time::Duration;

use sweep_common::config::ScanConfig;
use sweep_common::models::host::OsHint;
use sweep_common::models::port::PortSpec;
use sweep_core::portscan;
use sweep_core::scanner::Orchestrator;

use crate::fixtures::{self, StubDiscoverer};

fn orchestrator(ports: Vec<u16>) -> Orchestrator {
    Orchestrator::new(ScanConfig {
        ports: PortSpec::from(ports),
        concurrency: 8,
        connect_timeout: Duration::from_millis(500),
        ..ScanConfig::default()
    })
}

#[tokio::test]
async fn scan_fills_ports_for_discovered_loopback_host() {
    let (_listeners, open) = fixtures::listeners(2).await;
    let closed = fixtures::closed_port().await;
    let mut ports = vec![closed];
    ports.extend(&open);

    let discoverer = StubDiscoverer::new(vec![fixtures::host(Ipv4Addr::LOCALHOST, OsHint::LinuxUnix)]);
    let timeout = Duration::from_millis(500);
    let result = orchestrator(ports)
        .run_with(discoverer, move |addr| portscan::tcp_connect(addr, timeout))
        .await
        .unwrap();

    let mut expected = open.clone();
    expected.sort_unstable();
    assert_eq!(result.hosts.len(), 1);
    assert_eq!(result.hosts[0].open_ports(), expected.as_slice());
    assert_eq!(result.hosts[0].os_hint(), OsHint::LinuxUnix);
}

#[tokio::test]
#[cfg(target_os = "linux")]
async fn discovery_order_survives_the_scan() {
    // Listeners are bound to 127.0.0.1 only, so 127.0.0.2 answers with RST.
    let (_listeners, open) = fixtures::listeners(1).await;
    let second = Ipv4Addr::new(127, 0, 0, 2);

    let discoverer = StubDiscoverer::new(vec![
        fixtures::host(second, OsHint::Windows),
        fixtures::host(Ipv4Addr::LOCALHOST, OsHint::LinuxUnix),
    ]);
    let timeout = Duration::from_millis(500);
    let result = orchestrator(open.clone())
        .run_with(discoverer, move |addr| portscan::tcp_connect(addr, timeout))
        .await
        .unwrap();

    let ips: Vec<Ipv4Addr> = result.hosts.iter().map(|h| h.ip()).collect();
    assert_eq!(ips, vec![second, Ipv4Addr::LOCALHOST]);
    assert!(result.hosts[0].open_ports().is_empty());
    assert_eq!(result.hosts[1].open_ports(), open.as_slice());
}

#[tokio::test]
async fn empty_discovery_yields_empty_result() {
    let result = orchestrator(vec![22, 80])
        .run_with(StubDiscoverer::new(Vec::new()), |addr| {
            portscan::tcp_connect(addr, Duration::from_millis(100))
        })
        .await
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(result.open_port_count(), 0);
}
