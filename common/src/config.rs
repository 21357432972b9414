// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use std::time::Duration;

use crate::models::port::PortSpec;

pub const DEFAULT_CONCURRENCY: usize = 50;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Terminal presentation options.
///
/// Constructed from CLI flags; none of these change what gets scanned.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Skips the startup banner while keeping logs and colors.
    pub no_banner: bool,

    /// Controls the visual density of the terminal output.
    ///
    /// # Levels
    /// * **0** (Default): Full UI, including colors, spinners, and host trees.
    /// * **1**: Reduced styling, one line per host.
    /// * **2**: Raw mode. Only `ip` lines, suitable for piping into other tools.
    pub quiet: u8,

    /// Number of `-v` flags, gates log events tagged with `verbosity`.
    pub verbosity: u8,
}

/// Everything the scan engine needs to know, passed explicitly to the
/// orchestrator. There is no process-wide default state besides the
/// constants above.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Candidate TCP ports probed on every discovered host.
    pub ports: PortSpec,

    /// Upper bound of concurrent connect workers per host.
    ///
    /// The effective pool is `min(concurrency, ports.len())`.
    pub concurrency: usize,

    /// Bound on a single TCP connect attempt.
    pub connect_timeout: Duration,

    /// How long to keep listening for ARP replies after the last request went out.
    pub discovery_timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ports: PortSpec::top_ports(),
            concurrency: DEFAULT_CONCURRENCY,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            discovery_timeout: DEFAULT_DISCOVERY_TIMEOUT,
        }
    }
}

/// Optional report destinations. Each one is written independently.
#[derive(Debug, Clone, Default)]
pub struct ExportTargets {
    pub csv: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub html: Option<PathBuf>,
}

impl ExportTargets {
    pub fn is_empty(&self) -> bool {
        self.csv.is_none() && self.json.is_none() && self.html.is_none()
    }
}
