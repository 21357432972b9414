// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! MAC vendor lookup through the **Organizationally Unique Identifier (OUI)** database.

use std::sync::OnceLock;

use mac_oui::Oui;
use pnet::util::MacAddr;

use crate::warn;

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

/// Loads the bundled OUI database on first use. A broken database only
/// costs us vendor names, so the failure is logged once and remembered.
fn get_oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(e) => {
                warn!(verbosity = 1, "OUI database unavailable: {e}");
                None
            }
        })
        .as_ref()
}

/// Identify the vendor of a MAC address.
pub fn get_vendor(mac: MacAddr) -> Option<String> {
    let db = get_oui_db()?;
    match db.lookup_by_mac(&mac.to_string()) {
        Ok(Some(entry)) => Some(entry.company_name.clone()),
        _ => None,
    }
}

/// Locally administered addresses (bit 1 of the first octet) are randomized
/// or virtual and never carry a registered vendor.
pub fn is_locally_administered(mac: MacAddr) -> bool {
    mac.0 & 0b0000_0010 != 0
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
