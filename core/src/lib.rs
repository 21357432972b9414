// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Sweep scan engine
//!
//! * [`discovery`]: ARP sweep of a [`TargetRange`](sweep_common::models::range::TargetRange).
//! * [`portscan`]: bounded worker pool of TCP connect probes against one host.
//! * [`scanner`]: runs discovery once, then port scans each host in discovery order.
//! * [`report`]: CSV, JSON and HTML renderings of a finished scan.

pub mod discovery;
pub mod network;
pub mod portscan;
pub mod report;
pub mod scanner;
