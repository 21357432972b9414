// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

mod discovery;
mod export;
mod portscan;
mod scan;

#[cfg(test)]
pub mod fixtures {
    use std::net::Ipv4Addr;

    use async_trait::async_trait;
    use pnet::util::MacAddr;
    use sweep_common::models::host::{Host, OsHint};
    use sweep_core::discovery::HostDiscovery;
    use tokio::net::TcpListener;

    /// Hands out a fixed host list instead of sweeping the wire.
    pub struct StubDiscoverer {
        hosts: Option<Vec<Host>>,
    }

    impl StubDiscoverer {
        pub fn new(hosts: Vec<Host>) -> Self {
            Self { hosts: Some(hosts) }
        }
    }

    #[async_trait]
    impl HostDiscovery for StubDiscoverer {
        async fn discover_hosts(&mut self) -> anyhow::Result<Vec<Host>> {
            self.hosts
                .take()
                .ok_or_else(|| anyhow::anyhow!("stub discovery already consumed"))
        }
    }

    pub fn host(ip: Ipv4Addr, os_hint: OsHint) -> Host {
        let [_, _, c, d] = ip.octets();
        Host::new(ip, MacAddr(0x02, 0, 0, 0, c, d), os_hint)
    }

    /// Binds `count` loopback listeners; keep them alive for as long as the ports must stay open.
    pub async fn listeners(count: usize) -> (Vec<TcpListener>, Vec<u16>) {
        let mut bound = Vec::with_capacity(count);
        let mut ports = Vec::with_capacity(count);
        for _ in 0..count {
            let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
                .await
                .expect("bind loopback listener");
            ports.push(listener.local_addr().expect("listener address").port());
            bound.push(listener);
        }
        (bound, ports)
    }

    /// A loopback port that was just released, so nothing listens on it.
    pub async fn closed_port() -> u16 {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("bind loopback listener");
        listener.local_addr().expect("listener address").port()
    }
}

#[cfg(target_os = "linux")]
pub mod utils {
    use std::process::Command;
    use std::thread;
    use std::time::Duration;

    /// A veth pair with one end moved into its own network namespace:
    /// `10.200.0.1/24` on the host side, `10.200.0.2/24` inside.
    pub struct NetnsContext {
        pub ns_name: String,
        pub host_if: String,
    }

    impl NetnsContext {
        pub fn new(suffix: &str) -> Option<Self> {
            let ns_name = format!("sweep-ns-{}", suffix);
            let host_if = format!("v-host-{}", suffix);
            let target_if = format!("v-targ-{}", suffix);

            Self::cleanup(&ns_name, &host_if);

            if !run_cmd("ip", &["netns", "add", &ns_name]) {
                return None;
            }

            let wired = run_cmd(
                "ip",
                &["link", "add", &host_if, "type", "veth", "peer", "name", &target_if],
            ) && run_cmd("ip", &["link", "set", &target_if, "netns", &ns_name]);
            if !wired {
                Self::cleanup(&ns_name, &host_if);
                return None;
            }

            run_cmd("ip", &["addr", "add", "10.200.0.1/24", "dev", &host_if]);
            run_cmd("ip", &["link", "set", &host_if, "up"]);

            run_ns_cmd(&ns_name, "ip", &["addr", "add", "10.200.0.2/24", "dev", &target_if]);
            run_ns_cmd(&ns_name, "ip", &["link", "set", &target_if, "up"]);
            run_ns_cmd(&ns_name, "ip", &["link", "set", "lo", "up"]);

            thread::sleep(Duration::from_millis(500));

            Some(Self { ns_name, host_if })
        }

        fn cleanup(ns_name: &str, host_if: &str) {
            let _ = Command::new("ip").args(["netns", "del", ns_name]).output();
            let _ = Command::new("ip").args(["link", "del", host_if]).output();
        }
    }

    impl Drop for NetnsContext {
        fn drop(&mut self) {
            Self::cleanup(&self.ns_name, &self.host_if);
        }
    }

    fn run_cmd(cmd: &str, args: &[&str]) -> bool {
        Command::new(cmd)
            .args(args)
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn run_ns_cmd(ns: &str, cmd: &str, args: &[&str]) -> bool {
        let mut final_args = vec!["netns", "exec", ns, cmd];
        final_args.extend_from_slice(args);
        run_cmd("ip", &final_args)
    }
}
