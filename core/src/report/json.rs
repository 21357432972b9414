// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::io::{Read, Write};

use sweep_common::models::host::Host;

use super::{ExportError, HostRecord, records};

/// Pretty printed array of [`HostRecord`]s.
pub fn write<W: Write>(hosts: &[Host], out: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(out, &records(hosts))?;
    Ok(())
}

pub fn read<R: Read>(input: R) -> Result<Vec<HostRecord>, ExportError> {
    Ok(serde_json::from_reader(input)?)
}
