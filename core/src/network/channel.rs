// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Raw Layer 2 access.
//!
//! `pnet` receivers block, so a dedicated OS thread drains the socket and
//! forwards every frame into a tokio channel the async discoverer can `select!` on.

use std::io;
use std::thread;
use std::time::Duration;

use anyhow::{Context, anyhow};
use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};
use tokio::sync::mpsc;

const READ_TIMEOUT_MS: u64 = 50;

pub struct EthernetHandle {
    pub tx: Box<dyn DataLinkSender>,
    pub rx: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl EthernetHandle {
    pub fn send(&mut self, frame: &[u8]) -> anyhow::Result<()> {
        match self.tx.send_to(frame, None) {
            Some(result) => result.context("sending frame"),
            None => Err(anyhow!("datalink sender has no buffer space")),
        }
    }
}

pub fn start_capture(intf: &NetworkInterface) -> anyhow::Result<EthernetHandle> {
    let cfg = Config {
        read_timeout: Some(Duration::from_millis(READ_TIMEOUT_MS)),
        ..Default::default()
    };
    let (tx, rx_socket) = open_eth_channel(intf, datalink::channel, cfg)?;
    let (queue_tx, queue_rx) = mpsc::unbounded_channel();
    spawn_eth_listener(queue_tx, rx_socket);
    Ok(EthernetHandle { tx, rx: queue_rx })
}

pub fn open_eth_channel<F>(
    intf: &NetworkInterface,
    channel_opener: F,
    cfg: Config,
) -> anyhow::Result<(Box<dyn DataLinkSender>, Box<dyn DataLinkReceiver>)>
where
    F: FnOnce(&NetworkInterface, Config) -> io::Result<Channel>,
{
    let ch: Channel = channel_opener(intf, cfg).map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => anyhow!(
            "opening raw socket on {}: permission denied (run as root or grant CAP_NET_RAW)",
            intf.name
        ),
        _ => anyhow!(e).context(format!("opening raw socket on {}", intf.name)),
    })?;

    match ch {
        Channel::Ethernet(tx, rx) => Ok((tx, rx)),
        _ => anyhow::bail!("non-ethernet channel for {}", intf.name),
    }
}

/// Forwards frames until the async side drops its receiver.
pub fn spawn_eth_listener(
    eth_tx: mpsc::UnboundedSender<Vec<u8>>,
    mut eth_rx: Box<dyn DataLinkReceiver>,
) {
    thread::spawn(move || {
        loop {
            match eth_rx.next() {
                Ok(frame) => {
                    if eth_tx.send(frame.to_vec()).is_err() {
                        break;
                    }
                }
                Err(_) if eth_tx.is_closed() => break,
                Err(_) => continue,
            }
        }
    });
}
