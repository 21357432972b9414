// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::net::{IpAddr, Ipv4Addr};
use std::time::{Duration, Instant};

use sweep_core::portscan;

use crate::fixtures;

const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

#[tokio::test]
async fn open_loopback_ports_are_reported_ascending() {
    let (_listeners, mut open) = fixtures::listeners(2).await;
    let closed = fixtures::closed_port().await;

    let candidates = [open[1], closed, open[0]];
    let found = portscan::scan_ports(LOCALHOST, &candidates, 50, Duration::from_secs(1)).await;

    open.sort_unstable();
    assert_eq!(found, open);
}

#[tokio::test]
async fn single_worker_still_covers_every_port() {
    let (_listeners, mut open) = fixtures::listeners(5).await;
    let mut candidates = open.clone();
    candidates.push(fixtures::closed_port().await);

    let found = portscan::scan_ports(LOCALHOST, &candidates, 1, Duration::from_secs(1)).await;

    open.sort_unstable();
    assert_eq!(found, open);
}

#[tokio::test]
async fn closed_ports_only_yield_nothing() {
    let closed = [fixtures::closed_port().await, fixtures::closed_port().await];
    let found = portscan::scan_ports(LOCALHOST, &closed, 4, Duration::from_millis(500)).await;
    assert!(found.is_empty());
}

#[tokio::test]
async fn unanswered_connects_are_bounded_by_the_timeout() {
    // Blackhole documentation address; every attempt either fails fast or times out.
    let target = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1));
    let start = Instant::now();

    let found = portscan::scan_ports(target, &[81, 82, 83, 84], 4, Duration::from_millis(200)).await;

    assert!(found.is_empty());
    assert!(start.elapsed() < Duration::from_secs(2));
}
