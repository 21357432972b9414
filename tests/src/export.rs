// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::fs::{self, File};
use std::net::Ipv4Addr;
use std::time::Duration;

use chrono::Local;
use sweep_common::config::ExportTargets;
use sweep_common::models::host::{Host, OsHint};
use sweep_common::models::result::ScanResult;
use sweep_core::report::{self, ExportError, ExportFormat};
use tempfile::TempDir;

use crate::fixtures;

fn result() -> ScanResult {
    let mut web = fixtures::host(Ipv4Addr::new(192, 168, 1, 10), OsHint::LinuxUnix);
    web.set_open_ports([443, 22, 80]).unwrap();
    let mut desktop = fixtures::host(Ipv4Addr::new(192, 168, 1, 20), OsHint::Windows);
    desktop.set_open_ports([3389]).unwrap();
    let mut silent = fixtures::host(Ipv4Addr::new(192, 168, 1, 30), OsHint::LinuxUnix);
    silent.set_open_ports(Vec::<u16>::new()).unwrap();

    ScanResult::new(vec![web, desktop, silent], Local::now(), Duration::from_secs(3))
}

fn parse(records: Vec<report::HostRecord>) -> Vec<Host> {
    records
        .into_iter()
        .map(|r| Host::try_from(r).unwrap())
        .collect()
}

#[test]
fn csv_and_json_exports_read_back_identically() {
    let dir = TempDir::new().unwrap();
    let targets = ExportTargets {
        csv: Some(dir.path().join("hosts.csv")),
        json: Some(dir.path().join("hosts.json")),
        html: None,
    };
    let scan = result();

    let outcomes = report::export_all(&scan, &targets);
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.result.is_ok()));

    let from_csv = report::csv::read(File::open(dir.path().join("hosts.csv")).unwrap()).unwrap();
    let from_json = report::json::read(File::open(dir.path().join("hosts.json")).unwrap()).unwrap();

    assert_eq!(parse(from_csv), scan.hosts);
    assert_eq!(parse(from_json), scan.hosts);
}

#[test]
fn html_report_lists_every_host() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.html");
    let scan = result();

    report::export(&scan, ExportFormat::Html, &path).unwrap();

    let page = fs::read_to_string(&path).unwrap();
    for host in &scan.hosts {
        assert!(page.contains(&host.ip().to_string()));
    }
    assert!(page.contains("3 live host(s)"));
    assert!(page.contains(&scan.started_at.format("%Y-%m-%d %H:%M:%S").to_string()));
}

#[test]
fn one_failing_export_does_not_stop_the_others() {
    let dir = TempDir::new().unwrap();
    let targets = ExportTargets {
        csv: Some(dir.path().join("hosts.csv")),
        json: Some(dir.path().join("missing").join("hosts.json")),
        html: Some(dir.path().join("report.html")),
    };
    let scan = result();

    let outcomes = report::export_all(&scan, &targets);

    let formats: Vec<ExportFormat> = outcomes.iter().map(|o| o.format).collect();
    assert_eq!(formats, vec![ExportFormat::Csv, ExportFormat::Json, ExportFormat::Html]);

    assert!(outcomes[0].result.is_ok());
    assert!(matches!(
        outcomes[1].result,
        Err(ExportError::Io { format: ExportFormat::Json, .. })
    ));
    assert!(outcomes[2].result.is_ok());

    assert!(dir.path().join("hosts.csv").exists());
    assert!(dir.path().join("report.html").exists());
    assert_eq!(scan.hosts.len(), 3);
}
