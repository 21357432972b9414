// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::io::{Read, Write};

use ::csv::{Reader, Writer};
use serde::Deserialize;

use sweep_common::models::host::{Host, OsHint};

use super::{ExportError, HostRecord};

pub const HEADER: [&str; 4] = ["ip", "mac", "os_hint", "open_ports"];

/// CSV cells are flat strings, so the port list travels as `22,80,443`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    ip: String,
    mac: String,
    os_hint: OsHint,
    open_ports: String,
}

pub fn write<W: Write>(hosts: &[Host], out: W) -> Result<(), ExportError> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(HEADER)?;

    for record in hosts.iter().map(HostRecord::from) {
        let ports: Vec<String> = record.open_ports.iter().map(u16::to_string).collect();
        wtr.write_record([
            record.ip.as_str(),
            record.mac.as_str(),
            record.os_hint.as_str(),
            ports.join(",").as_str(),
        ])?;
    }

    wtr.flush().map_err(::csv::Error::from)?;
    Ok(())
}

pub fn read<R: Read>(input: R) -> Result<Vec<HostRecord>, ExportError> {
    let mut rdr = Reader::from_reader(input);
    let mut records: Vec<HostRecord> = Vec::new();

    for row in rdr.deserialize::<CsvRow>() {
        let row: CsvRow = row?;
        let open_ports: Vec<u16> = row
            .open_ports
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                p.parse::<u16>()
                    .map_err(|_| ExportError::Record(format!("bad port '{p}' for {}", row.ip)))
            })
            .collect::<Result<_, _>>()?;

        records.push(HostRecord {
            ip: row.ip,
            mac: row.mac,
            os_hint: row.os_hint,
            open_ports,
        });
    }

    Ok(records)
}
