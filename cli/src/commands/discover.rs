// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::time::{Duration, Instant};

use colored::*;
use tracing::info_span;

use sweep_common::config::ScanConfig;
use sweep_common::info;
use sweep_common::models::host::Host;
use sweep_common::models::range::TargetRange;
use sweep_core::discovery;
use sweep_core::scanner::Orchestrator;

use crate::commands::DiscoverArgs;
use crate::terminal::colors;
use crate::terminal::print::Print;
use crate::terminal::spinner::SpinnerGuard;

pub async fn discover(args: &DiscoverArgs) -> anyhow::Result<()> {
    let range: TargetRange = args.target_range()?;
    let scan_cfg: ScanConfig = ScanConfig::from(args);

    super::warn_if_unprivileged();
    Print::header("performing host discovery");
    info!(
        "ARP sweep of {range} ({} address(es))",
        range.len()
    );

    let start_time: Instant = Instant::now();
    let hosts: Vec<Host> = {
        let _guard: SpinnerGuard = run_spinner();
        Orchestrator::new(scan_cfg).discover_only(&range).await?
    };
    let total_time: Duration = start_time.elapsed();

    if hosts.is_empty() {
        Print::no_results();
        return Ok(());
    }

    Print::header("network discovery");
    Print::hosts(&hosts);
    Print::discovery_summary(hosts.len(), total_time);
    Ok(())
}

fn run_spinner() -> SpinnerGuard {
    let span = info_span!("discover", indicatif.pb_show = true);
    let _enter = span.enter();

    SpinnerGuard::with_status(span.clone(), || {
        let count = discovery::get_host_count();
        let label = if count == 1 { "host" } else { "hosts" };
        format!("Identified {} {} so far...", count.to_string().green().bold(), label)
            .color(colors::TEXT_DEFAULT)
            .italic()
    })
}
