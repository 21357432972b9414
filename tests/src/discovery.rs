// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::time::Duration;

use sweep_common::models::range::TargetRange;
use sweep_core::discovery;

#[tokio::test]
async fn range_without_local_interface_is_fatal() {
    // TEST-NET-3, never configured on a real interface.
    let range: TargetRange = "203.0.113.0/30".parse().unwrap();

    let err = discovery::discover(&range, Duration::from_millis(100))
        .await
        .unwrap_err();

    assert!(
        err.to_string().contains("203.0.113.0"),
        "error should name the range: {err}"
    );
}

#[tokio::test]
#[cfg(target_os = "linux")]
async fn privileged_discovery_in_netns() {
    use std::net::Ipv4Addr;

    use sweep_common::models::host::{Host, OsHint};

    use crate::utils::NetnsContext;

    let _ctx: NetnsContext = match NetnsContext::new("disc") {
        Some(c) => c,
        None => {
            eprintln!("Skipping netns test: requires root privileges and the 'ip' command.");
            return;
        }
    };

    let target_ip = Ipv4Addr::new(10, 200, 0, 2);
    let range: TargetRange = "10.200.0.2".parse().unwrap();

    let hosts: Vec<Host> = discovery::discover(&range, Duration::from_millis(1500))
        .await
        .expect("discovery inside the namespace");

    assert_eq!(hosts.len(), 1, "exactly the namespace peer should answer");
    assert_eq!(hosts[0].ip(), target_ip);
    // Linux stack inside the namespace: TTL 64.
    assert_eq!(hosts[0].os_hint(), OsHint::LinuxUnix);
    assert!(hosts[0].open_ports().is_empty());
}
