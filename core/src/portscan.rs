// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! TCP connect port scanning of a single host.
//!
//! A fixed pool of workers pulls ports from a shared queue until it is empty.
//! Each port is probed exactly once. Open ports land in an ordered set, so the
//! result is ascending no matter in which order the probes complete.

use std::collections::{BTreeSet, VecDeque};
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::task::JoinSet;
use tokio::time::timeout;

use sweep_common::{debug, error};

/// Number of workers actually spawned: never more than there are ports.
pub fn worker_count(concurrency: usize, port_count: usize) -> usize {
    concurrency.max(1).min(port_count)
}

/// Probes `ports` on `ip` with real TCP connects.
pub async fn scan_ports(
    ip: IpAddr,
    ports: &[u16],
    concurrency: usize,
    connect_timeout: Duration,
) -> Vec<u16> {
    scan_ports_with(ip, ports, concurrency, move |addr| {
        tcp_connect(addr, connect_timeout)
    })
    .await
}

/// Runs `prober` once per port with at most [`worker_count`] probes in flight
/// and returns the ports it reported open, ascending and unique.
pub async fn scan_ports_with<F, Fut>(
    ip: IpAddr,
    ports: &[u16],
    concurrency: usize,
    prober: F,
) -> Vec<u16>
where
    F: Fn(SocketAddr) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    let workers: usize = worker_count(concurrency, ports.len());
    if workers == 0 {
        return Vec::new();
    }

    let queue: Arc<Mutex<VecDeque<u16>>> = Arc::new(Mutex::new(ports.iter().copied().collect()));
    let open: Arc<Mutex<BTreeSet<u16>>> = Arc::new(Mutex::new(BTreeSet::new()));
    let prober: Arc<F> = Arc::new(prober);

    debug!(
        verbosity = 1,
        "Scanning {} port(s) on {ip} with {workers} worker(s)",
        ports.len()
    );

    let mut pool: JoinSet<()> = JoinSet::new();
    for _ in 0..workers {
        let queue = Arc::clone(&queue);
        let open = Arc::clone(&open);
        let prober = Arc::clone(&prober);

        pool.spawn(async move {
            while let Some(port) = next_port(&queue) {
                if prober(SocketAddr::new(ip, port)).await {
                    debug!(verbosity = 2, "{ip}:{port} is open");
                    open.lock().unwrap_or_else(PoisonError::into_inner).insert(port);
                }
            }
        });
    }

    while let Some(joined) = pool.join_next().await {
        if let Err(e) = joined {
            error!("Port scan worker for {ip} failed: {e}");
        }
    }

    let mut open = open.lock().unwrap_or_else(PoisonError::into_inner);
    std::mem::take(&mut *open).into_iter().collect()
}

/// `true` iff a TCP handshake with `addr` completes within `connect_timeout`.
/// The connection is closed right away.
pub async fn tcp_connect(addr: SocketAddr, connect_timeout: Duration) -> bool {
    matches!(
        timeout(connect_timeout, TcpStream::connect(addr)).await,
        Ok(Ok(_))
    )
}

fn next_port(queue: &Mutex<VecDeque<u16>>) -> Option<u16> {
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::net::Ipv4Addr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use proptest::prelude::*;
    use tokio::net::TcpListener;

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn worker_count_is_bounded_by_ports_and_at_least_one() {
        assert_eq!(worker_count(50, 10), 10);
        assert_eq!(worker_count(4, 10), 4);
        assert_eq!(worker_count(0, 10), 1);
        assert_eq!(worker_count(50, 0), 0);
    }

    #[tokio::test]
    async fn empty_port_list_never_probes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let open = scan_ports_with(LOCALHOST, &[], 8, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { true }
        })
        .await;

        assert!(open.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn every_port_is_probed_exactly_once() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let ports: Vec<u16> = (1..=200).collect();

        scan_ports_with(LOCALHOST, &ports, 16, move |addr| {
            log.lock().unwrap().push(addr.port());
            async { false }
        })
        .await;

        let mut seen = seen.lock().unwrap().clone();
        seen.sort_unstable();
        assert_eq!(seen, ports);
    }

    #[tokio::test]
    async fn finds_listening_loopback_ports() {
        let first = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let second = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let closed = {
            let probe = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
            probe.local_addr().unwrap().port()
        };

        let a = first.local_addr().unwrap().port();
        let b = second.local_addr().unwrap().port();
        let mut expected = vec![a, b];
        expected.sort_unstable();

        let open = scan_ports(LOCALHOST, &[b, closed, a], 50, Duration::from_secs(1)).await;
        assert_eq!(open, expected);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn result_is_the_ascending_open_subset(
            ports in prop::collection::vec(1u16..=u16::MAX, 0..64),
            open_mask in prop::collection::hash_set(1u16..=u16::MAX, 0..64),
            concurrency in 0usize..20,
        ) {
            let open_set: Arc<HashSet<u16>> =
                Arc::new(open_mask.into_iter().chain(ports.iter().copied().step_by(3)).collect());

            let lookup = Arc::clone(&open_set);
            let result = runtime().block_on(scan_ports_with(LOCALHOST, &ports, concurrency, move |addr| {
                let is_open = lookup.contains(&addr.port());
                // Scramble completion order.
                let delay = Duration::from_micros(u64::from(addr.port() % 7) * 100);
                async move {
                    tokio::time::sleep(delay).await;
                    is_open
                }
            }));

            let expected: BTreeSet<u16> = ports.iter().copied().filter(|p| open_set.contains(p)).collect();
            prop_assert_eq!(result.clone(), expected.into_iter().collect::<Vec<_>>());
            prop_assert!(result.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn in_flight_probes_never_exceed_the_pool(
            port_count in 0usize..80,
            concurrency in 0usize..24,
        ) {
            let ports: Vec<u16> = (1..=port_count as u16).collect();
            let in_flight = Arc::new(AtomicUsize::new(0));
            let peak = Arc::new(AtomicUsize::new(0));

            let (current, max) = (Arc::clone(&in_flight), Arc::clone(&peak));
            runtime().block_on(scan_ports_with(LOCALHOST, &ports, concurrency, move |_| {
                let current = Arc::clone(&current);
                let max = Arc::clone(&max);
                async move {
                    let now = current.fetch_add(1, Ordering::SeqCst) + 1;
                    max.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(1)).await;
                    current.fetch_sub(1, Ordering::SeqCst);
                    false
                }
            }));

            prop_assert!(peak.load(Ordering::SeqCst) <= worker_count(concurrency, ports.len()));
            prop_assert_eq!(in_flight.load(Ordering::SeqCst), 0);
        }
    }
}
