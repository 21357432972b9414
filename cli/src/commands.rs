// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! The argument schema lives here, the execution of each subcommand in its own
//! submodule. The `From`/`TryFrom` impls at the bottom translate raw flags into
//! the core's [`Config`], [`ScanConfig`] and [`ExportTargets`] so the libraries
//! never see `clap` types.

pub mod discover;
pub mod scan;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use is_root::is_root;
use sweep_common::config::{
    Config, DEFAULT_CONCURRENCY, DEFAULT_CONNECT_TIMEOUT, DEFAULT_DISCOVERY_TIMEOUT, ExportTargets,
    ScanConfig,
};
use sweep_common::models::port::{PortSpec, PortSpecError};
use sweep_common::models::range::{TargetError, TargetRange};
use sweep_common::warn;

#[derive(Parser)]
#[command(name = "sweep", version)]
#[command(about = "Local subnet recon: ARP host discovery and TCP connect port scanning.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Keep logs and colors but hide the banner line
    #[arg(long = "no-banner", global = true)]
    pub no_banner: bool,

    /// Reduce UI visual density (-q: one line per host, -qq: bare IPs)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Increase logging detail (-v: per-host progress, -vv: every frame)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find live hosts on the local link via ARP
    #[command(alias = "d")]
    Discover(DiscoverArgs),

    /// Discover hosts, then TCP connect scan each of them
    #[command(alias = "s")]
    Scan(ScanArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DiscoverArgs {
    /// IP, CIDR or range, comma separated (e.g. 192.168.1.0/24, 10.0.0.1-50)
    #[arg(short = 't', long = "target", value_name = "RANGE")]
    pub target: String,

    /// How long to wait for ARP replies after the last request
    #[arg(long = "discovery-timeout", value_name = "MS", default_value_t = DEFAULT_DISCOVERY_TIMEOUT.as_millis() as u64)]
    pub discovery_timeout_ms: u64,
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    #[command(flatten)]
    pub discover: DiscoverArgs,

    /// Ports to probe, comma separated, ranges allowed (default: top 10)
    #[arg(short = 'p', long = "ports", value_name = "PORTS")]
    pub ports: Option<String>,

    /// Concurrent connect attempts per host
    #[arg(short = 'w', long = "workers", visible_alias = "threads", value_name = "N", default_value_t = DEFAULT_CONCURRENCY)]
    pub workers: usize,

    /// TCP connect timeout
    #[arg(long = "timeout", value_name = "MS", default_value_t = DEFAULT_CONNECT_TIMEOUT.as_millis() as u64)]
    pub timeout_ms: u64,

    /// Write a CSV report
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write a JSON report
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Write an HTML report
    #[arg(long = "html", value_name = "PATH")]
    pub html: Option<PathBuf>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Raw ARP sockets need root or `CAP_NET_RAW`; say so before the channel open fails.
pub fn warn_if_unprivileged() {
    if !is_root() {
        warn!("Root privileges missing, opening the raw socket will likely fail");
    }
}

impl DiscoverArgs {
    pub fn target_range(&self) -> Result<TargetRange, TargetError> {
        self.target.parse()
    }
}

impl From<&CommandLine> for Config {
    fn from(cmd: &CommandLine) -> Self {
        Self {
            no_banner: cmd.no_banner,
            quiet: cmd.quiet,
            verbosity: cmd.verbosity,
        }
    }
}

impl From<&DiscoverArgs> for ScanConfig {
    fn from(args: &DiscoverArgs) -> Self {
        Self {
            discovery_timeout: Duration::from_millis(args.discovery_timeout_ms),
            ..Self::default()
        }
    }
}

impl TryFrom<&ScanArgs> for ScanConfig {
    type Error = PortSpecError;

    fn try_from(args: &ScanArgs) -> Result<Self, Self::Error> {
        let ports: PortSpec = match &args.ports {
            Some(list) => PortSpec::parse_lenient(list)?,
            None => PortSpec::top_ports(),
        };

        Ok(Self {
            ports,
            concurrency: args.workers,
            connect_timeout: Duration::from_millis(args.timeout_ms),
            ..Self::from(&args.discover)
        })
    }
}

impl From<&ScanArgs> for ExportTargets {
    fn from(args: &ScanArgs) -> Self {
        Self {
            csv: args.csv.clone(),
            json: args.json.clone(),
            html: args.html.clone(),
        }
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
