// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Report export
//!
//! Renders a [`ScanResult`] as CSV, JSON or HTML. Every requested format is
//! written independently: a failing export is reported on its own and never
//! stops the others.
//!
//! CSV and JSON share one flat row shape, [`HostRecord`]:
//!
//! | field      | example             |
//! |------------|---------------------|
//! | ip         | `192.168.1.10`      |
//! | mac        | `aa:bb:cc:dd:ee:ff` |
//! | os_hint    | `Linux/Unix`        |
//! | open_ports | `22,80` (CSV) / `[22, 80]` (JSON) |

pub mod csv;
pub mod html;
pub mod json;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use pnet::util::MacAddr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sweep_common::config::ExportTargets;
use sweep_common::models::host::{Host, OsHint};
use sweep_common::models::result::ScanResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Html,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
            ExportFormat::Html => "HTML",
        })
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write {format} report to '{}': {source}", .path.display())]
    Io {
        format: ExportFormat,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot encode {format} report to '{}': {source}", .path.display())]
    Encode {
        format: ExportFormat,
        path: PathBuf,
        source: Box<ExportError>,
    },

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid host record: {0}")]
    Record(String),
}

/// One host as it appears in a CSV or JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    pub ip: String,
    pub mac: String,
    pub os_hint: OsHint,
    pub open_ports: Vec<u16>,
}

impl From<&Host> for HostRecord {
    fn from(host: &Host) -> Self {
        Self {
            ip: host.ip().to_string(),
            mac: host.mac().to_string(),
            os_hint: host.os_hint(),
            open_ports: host.open_ports().to_vec(),
        }
    }
}

impl TryFrom<HostRecord> for Host {
    type Error = ExportError;

    fn try_from(record: HostRecord) -> Result<Self, Self::Error> {
        let ip: Ipv4Addr = record
            .ip
            .parse()
            .map_err(|_| ExportError::Record(format!("bad ip '{}'", record.ip)))?;
        let mac: MacAddr = record
            .mac
            .parse()
            .map_err(|_| ExportError::Record(format!("bad mac '{}'", record.mac)))?;

        let mut host: Host = Host::new(ip, mac, record.os_hint);
        host.set_open_ports(record.open_ports)
            .map_err(|e| ExportError::Record(e.to_string()))?;
        Ok(host)
    }
}

pub fn records(hosts: &[Host]) -> Vec<HostRecord> {
    hosts.iter().map(HostRecord::from).collect()
}

/// The result of one requested export.
#[derive(Debug)]
pub struct ExportOutcome {
    pub format: ExportFormat,
    pub path: PathBuf,
    pub result: Result<(), ExportError>,
}

/// Writes every format requested in `targets`, in CSV, JSON, HTML order.
pub fn export_all(result: &ScanResult, targets: &ExportTargets) -> Vec<ExportOutcome> {
    let requested = [
        (ExportFormat::Csv, &targets.csv),
        (ExportFormat::Json, &targets.json),
        (ExportFormat::Html, &targets.html),
    ];

    requested
        .into_iter()
        .filter_map(|(format, path)| path.as_ref().map(|p| (format, p)))
        .map(|(format, path)| ExportOutcome {
            format,
            path: path.clone(),
            result: export(result, format, path),
        })
        .collect()
}

pub fn export(result: &ScanResult, format: ExportFormat, path: &Path) -> Result<(), ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io {
        format,
        path: path.to_path_buf(),
        source,
    };

    let encode_err = |source: ExportError| ExportError::Encode {
        format,
        path: path.to_path_buf(),
        source: Box::new(source),
    };

    let file: File = File::create(path).map_err(io_err)?;
    let mut out: BufWriter<File> = BufWriter::new(file);

    match format {
        ExportFormat::Csv => csv::write(&result.hosts, &mut out).map_err(encode_err)?,
        ExportFormat::Json => json::write(&result.hosts, &mut out).map_err(encode_err)?,
        ExportFormat::Html => {
            let page: String = html::render(result);
            out.write_all(page.as_bytes()).map_err(io_err)?;
        }
    }

    out.flush().map_err(io_err)
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

    #[test]
    fn record_parses_back_into_host() {
        let mut host = Host::new(
            Ipv4Addr::new(10, 0, 0, 7),
            MacAddr(0xaa, 0xbb, 0xcc, 0x00, 0x11, 0x22),
            OsHint::Windows,
        );
        host.set_open_ports([445, 135]).unwrap();

        let record = HostRecord::from(&host);
        assert_eq!(record.mac, "aa:bb:cc:00:11:22");
        assert_eq!(record.open_ports, vec![135, 445]);

        let parsed = Host::try_from(record).unwrap();
        assert_eq!(parsed, host);
    }

    #[test]
    fn malformed_records_are_rejected() {
        let record = HostRecord {
            ip: "10.0.0.300".into(),
            mac: "aa:bb:cc:00:11:22".into(),
            os_hint: OsHint::LinuxUnix,
            open_ports: Vec::new(),
        };
        assert!(matches!(Host::try_from(record), Err(ExportError::Record(_))));
    }

    #[test]
    fn io_errors_name_format_and_path() {
        let err = ExportError::Io {
            format: ExportFormat::Html,
            path: PathBuf::from("/nowhere/report.html"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let msg = err.to_string();
        assert!(msg.contains("HTML"));
        assert!(msg.contains("/nowhere/report.html"));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn write_failures_name_format_and_path() {
        use chrono::Local;
        use std::time::Duration;

        let mut host = Host::new(
            Ipv4Addr::new(10, 0, 0, 9),
            MacAddr(0x02, 0, 0, 0, 0, 0x09),
            OsHint::LinuxUnix,
        );
        host.set_open_ports([22]).unwrap();
        let result = ScanResult::new(vec![host], Local::now(), Duration::from_millis(5));

        for format in [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Html] {
            let err = export(&result, format, Path::new("/dev/full")).unwrap_err();
            assert!(
                matches!(err, ExportError::Io { .. } | ExportError::Encode { .. }),
                "{format}: unexpected {err:?}"
            );
            let msg = err.to_string();
            assert!(msg.contains(&format.to_string()), "{msg}");
            assert!(msg.contains("/dev/full"), "{msg}");
        }
    }
}
