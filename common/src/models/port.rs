// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Port Specification
//!
//! A [`PortSpec`] is the set of candidate TCP ports handed to the port scanner.
//! The order is whatever the caller gave us; the scanner never relies on it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::warn;

/// Well-known ports probed when the user does not pass `-p`.
pub const TOP_PORTS: [u16; 10] = [21, 22, 23, 25, 53, 80, 110, 143, 443, 3389];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortSpecError {
    #[error("'{0}' is not a valid port number")]
    Malformed(String),
    #[error("port {0} is outside 1-65535")]
    OutOfRange(u32),
    #[error("port range {0}-{1} is reversed")]
    ReversedRange(u16, u16),
    #[error("no valid ports in '{0}'")]
    Empty(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    ports: Vec<u16>,
}

impl PortSpec {
    pub fn new(ports: Vec<u16>) -> Self {
        Self { ports }
    }

    pub fn top_ports() -> Self {
        Self::new(TOP_PORTS.to_vec())
    }

    /// Lenient parser for comma separated port lists.
    ///
    /// Invalid entries are skipped with a warning instead of failing the
    /// whole list; only a list without a single valid entry is an error.
    /// Entries may be single ports (`80`) or inclusive ranges (`8000-8010`).
    pub fn parse_lenient(input: &str) -> Result<Self, PortSpecError> {
        let mut ports: Vec<u16> = Vec::new();

        for entry in input.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match parse_entry(entry) {
                Ok(parsed) => ports.extend(parsed),
                Err(e) => warn!("Skipping port entry: {e}"),
            }
        }

        if ports.is_empty() {
            return Err(PortSpecError::Empty(input.to_string()));
        }
        Ok(Self { ports })
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.ports
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

impl Default for PortSpec {
    fn default() -> Self {
        Self::top_ports()
    }
}

impl FromStr for PortSpec {
    type Err = PortSpecError;

    /// Strict parser: the first invalid entry fails the whole list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ports: Vec<u16> = Vec::new();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            ports.extend(parse_entry(entry)?);
        }
        if ports.is_empty() {
            return Err(PortSpecError::Empty(s.to_string()));
        }
        Ok(Self { ports })
    }
}

impl From<Vec<u16>> for PortSpec {
    fn from(ports: Vec<u16>) -> Self {
        Self::new(ports)
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.ports.iter().map(u16::to_string).collect();
        write!(f, "{}", joined.join(","))
    }
}

fn parse_entry(entry: &str) -> Result<Vec<u16>, PortSpecError> {
    match entry.split_once('-') {
        Some((start, end)) => {
            let start: u16 = parse_port(start.trim())?;
            let end: u16 = parse_port(end.trim())?;
            if start > end {
                return Err(PortSpecError::ReversedRange(start, end));
            }
            Ok((start..=end).collect())
        }
        None => Ok(vec![parse_port(entry)?]),
    }
}

fn parse_port(s: &str) -> Result<u16, PortSpecError> {
    let value: u32 = s
        .parse()
        .map_err(|_| PortSpecError::Malformed(s.to_string()))?;
    match u16::try_from(value) {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(PortSpecError::OutOfRange(value)),
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
