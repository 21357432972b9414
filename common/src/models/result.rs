// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::time::Duration;

use chrono::{DateTime, Local};

use crate::models::host::Host;

/// Outcome of a full discovery + port scan run.
///
/// `hosts` keeps the order in which hosts answered ARP, never the order in
/// which their port scans completed.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub hosts: Vec<Host>,
    pub started_at: DateTime<Local>,
    pub elapsed: Duration,
}

impl ScanResult {
    pub fn new(hosts: Vec<Host>, started_at: DateTime<Local>, elapsed: Duration) -> Self {
        Self {
            hosts,
            started_at,
            elapsed,
        }
    }

    pub fn open_port_count(&self) -> usize {
        self.hosts.iter().map(|h| h.open_ports().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
