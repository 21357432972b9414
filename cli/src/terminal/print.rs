// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::sync::OnceLock;
use std::time::Duration;

use anyhow::bail;
use colored::*;
use unicode_width::UnicodeWidthStr;

use sweep_common::config::Config;
use sweep_common::models::host::Host;
use sweep_common::models::result::ScanResult;
use sweep_common::{error, success};

use crate::terminal::colors;
use crate::terminal::format::{self, Detail};

pub const TOTAL_WIDTH: usize = 64;

static PRINT: OnceLock<Print> = OnceLock::new();

#[macro_export]
macro_rules! sprint {
    () => {
        $crate::sprint!("")
    };
    ($($arg:tt)*) => {
        tracing::info!(
            target: "sweep::print",
            raw_msg = %format_args!($($arg)*)
        )
    };
}

#[derive(Default)]
pub struct Print {
    no_banner: bool,
    q_level: u8,
}

impl Print {
    fn new(cfg: &Config) -> Self {
        Self {
            no_banner: cfg.no_banner,
            q_level: cfg.quiet,
        }
    }

    pub fn init(cfg: &Config) -> anyhow::Result<()> {
        if PRINT.set(Self::new(cfg)).is_err() {
            bail!("terminal has already been initialized")
        }
        Ok(())
    }

    fn get() -> &'static Self {
        PRINT.get_or_init(Self::default)
    }

    pub fn banner() {
        let p = Self::get();
        if p.no_banner || p.q_level > 0 {
            return;
        }

        let text_content: String = format!("⟦ SWEEP v{} ⟧ ", env!("CARGO_PKG_VERSION"));
        let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
        let text: ColoredString = text_content.bright_green().bold();
        let sep: ColoredString = "═"
            .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
            .bright_black();

        sprint!("{}{}{}", sep, text, sep);
    }

    pub fn header(msg: &str) {
        let p = Self::get();
        if p.q_level > 0 {
            return;
        }

        let formatted: String = format!("⟦ {} ⟧", msg);
        let msg_len: usize = formatted.chars().count();

        let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
        let left: usize = dash_count / 2;
        let right: usize = dash_count - left;

        let line: ColoredString = format!(
            "{}{}{}",
            "─".repeat(left),
            formatted.to_uppercase().bright_green(),
            "─".repeat(right)
        )
        .bright_black();

        sprint!("{}", line);
    }

    /// Renders every host according to the quiet level:
    /// `0` trees, `1` one line per host, `2` bare IPs.
    pub fn hosts(hosts: &[Host]) {
        let p = Self::get();
        for (idx, host) in hosts.iter().enumerate() {
            match p.q_level {
                0 => {
                    Self::host_tree(host, idx);
                    if idx + 1 != hosts.len() {
                        sprint!();
                    }
                }
                1 => {
                    sprint!("{}", format::host_line(host));
                }
                _ => {
                    sprint!("{}", host.ip());
                }
            }
        }
    }

    fn host_tree(host: &Host, idx: usize) {
        sprint!(
            "{} {}",
            format!("[{}]", idx.to_string().color(colors::ACCENT)).color(colors::SEPARATOR),
            host.ip().to_string().color(colors::PRIMARY)
        );

        let mut details: Vec<Detail> = vec![format::mac_to_detail(&host.mac())];

        if let Some(vendor_detail) = format::vendor_to_detail(&host.vendor) {
            details.push(vendor_detail);
        }

        details.push(format::os_to_detail(host.os_hint()));

        if let Some(ports_detail) = format::ports_to_detail(host) {
            details.push(ports_detail);
        }

        as_tree(details);
    }

    pub fn discovery_summary(hosts_len: usize, total_time: Duration) {
        let active_hosts: ColoredString = format!("{hosts_len} active hosts").bold().green();
        let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
        let output: String = format!("Discovery Complete: {active_hosts} identified in {total_time}")
            .color(colors::TEXT_DEFAULT)
            .to_string();

        Self::summary(&output);
    }

    pub fn scan_summary(result: &ScanResult) {
        let active_hosts: ColoredString = format!("{} hosts", result.hosts.len()).bold().green();
        let open_ports: ColoredString = format!("{} open ports", result.open_port_count())
            .bold()
            .color(colors::PORT_OPEN);
        let total_time: ColoredString =
            format!("{:.2}s", result.elapsed.as_secs_f64()).bold().yellow();
        let output: String =
            format!("Scan Complete: {active_hosts}, {open_ports} in {total_time}")
                .color(colors::TEXT_DEFAULT)
                .to_string();

        Self::summary(&output);
    }

    fn summary(output: &str) {
        match Self::get().q_level {
            0 => {
                divider();
                centerln(output);
            }
            1 => {
                sprint!();
                success!("{output}")
            }
            _ => {}
        }
    }

    pub fn no_results() {
        let p = Self::get();
        if p.q_level == 0 {
            Self::header("zero hosts detected");
        }
        error!("Sweep completed: 0 devices responded.");
    }

    pub fn end_of_program() {
        if Self::get().q_level > 0 {
            return;
        }
        sprint!("{}", "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR));
    }
}

pub fn divider() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    sprint!("{}", sep);
}

pub fn as_tree(details: Vec<Detail>) {
    let padding_width: usize = "Vendor".len();

    for (i, (key, value)) in details.iter().enumerate() {
        let last: bool = i + 1 == details.len();
        let branch: ColoredString = if !last { "├─" } else { "└─" }.bright_black();

        let dots_count: usize = padding_width.saturating_sub(key.len());
        let dots: ColoredString = ".".repeat(dots_count).color(colors::SEPARATOR);

        sprint!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            dots,
            ":".color(colors::SEPARATOR),
            value
        );
    }
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    sprint!("{}{}{}", space, msg, space);
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
