// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;
use tracing::info_span;

use sweep_common::config::{ExportTargets, ScanConfig};
use sweep_common::models::range::TargetRange;
use sweep_common::models::result::ScanResult;
use sweep_common::{error, info, success};
use sweep_core::report::{self, ExportOutcome};
use sweep_core::scanner::Orchestrator;
use sweep_core::{discovery, scanner};

use crate::commands::ScanArgs;
use crate::terminal::colors;
use crate::terminal::print::Print;
use crate::terminal::spinner::SpinnerGuard;

pub async fn scan(args: &ScanArgs) -> anyhow::Result<()> {
    let range: TargetRange = args.discover.target_range()?;
    let scan_cfg: ScanConfig = ScanConfig::try_from(args)?;
    let exports: ExportTargets = ExportTargets::from(args);

    super::warn_if_unprivileged();
    Print::header("starting scanner");
    info!(
        "Sweeping {range} ({} address(es)), {} port(s) per host, {} worker(s)",
        range.len(),
        scan_cfg.ports.len(),
        scan_cfg.concurrency
    );

    let result: ScanResult = {
        let _guard: SpinnerGuard = run_spinner();
        Orchestrator::new(scan_cfg).run(&range).await?
    };

    if result.is_empty() {
        Print::no_results();
    } else {
        Print::header("scan results");
        Print::hosts(&result.hosts);
        Print::scan_summary(&result);
    }

    write_reports(&result, &exports)
}

/// Every requested report is attempted; failures are logged one by one and
/// only turned into an error once all of them had their chance.
fn write_reports(result: &ScanResult, exports: &ExportTargets) -> anyhow::Result<()> {
    if exports.is_empty() {
        return Ok(());
    }

    let outcomes: Vec<ExportOutcome> = report::export_all(result, exports);
    let mut failed: usize = 0;

    for outcome in &outcomes {
        match &outcome.result {
            Ok(()) => success!(
                "{} report written to {}",
                outcome.format,
                outcome.path.display()
            ),
            Err(e) => {
                failed += 1;
                error!("{e}");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} report(s) could not be written", outcomes.len());
    }
    Ok(())
}

fn run_spinner() -> SpinnerGuard {
    let span = info_span!("scan", indicatif.pb_show = true);
    let _enter = span.enter();

    SpinnerGuard::with_status(span.clone(), || {
        let found = discovery::get_host_count();
        let scanned = scanner::get_scanned_count();

        let status: String = if scanned == 0 {
            let label = if found == 1 { "host" } else { "hosts" };
            format!("Identified {} {} so far...", found.to_string().green().bold(), label)
        } else {
            format!(
                "Port scanned {} of {} hosts...",
                scanned.to_string().green().bold(),
                found.to_string().bold()
            )
        };
        status.color(colors::TEXT_DEFAULT).italic()
    })
}
