// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use rand::seq::SliceRandom;
use rand::{Rng, rng};

/// Operational guidance for the scanner itself.
const SCANNER_TIPS: &[&str] = &[
    "ARP discovery only sees hosts on your own subnet",
    "Raise -w for large port lists, lower it on flaky Wi-Fi",
    "The OS hint comes from the IP TTL and is only a guess",
    "Export with --csv, --json and --html in a single run",
    "Port ranges work too: -p 20-25,80,8000-8080",
    "Use -v to see per-host timing, -vv for every probe",
];

/// Technical facts and networking trivia.
const TECH_TRIVIA: &[&str] = &[
    "ARP was specified in RFC 826, back in 1982",
    "Windows starts its TTL at 128, Linux at 64",
    "A TCP connect scan completes the full three-way handshake",
    "Port 3389 is RDP, a favourite of lateral movement",
];

/// Industry jokes and developer humor.
const DEV_HUMOR: &[&str] = &[
    "ARP: who has the punchline? Tell the person asking",
    "A closed port is still an answer, just not a friendly one",
    "The scan works on my machine though",
    "The 'S' in IoT stands for Security",
];

/// Generates a randomized list of UI messages.
///
/// Every slot in the resulting list has a 50% probability of being an
/// operational tip and a 50% probability of being flavor text (trivia/humor),
/// provided both pools still have remaining items.
pub fn get_shuffled_insights() -> Vec<&'static str> {
    let mut rng = rng();

    let mut tips = SCANNER_TIPS.to_vec();
    tips.shuffle(&mut rng);

    let mut flavor: Vec<&str> = TECH_TRIVIA
        .iter()
        .chain(DEV_HUMOR.iter())
        .copied()
        .collect();
    flavor.shuffle(&mut rng);

    let total_len = tips.len() + flavor.len();
    let mut output = Vec::with_capacity(total_len);

    while !tips.is_empty() && !flavor.is_empty() {
        let pick_tip = rng.random_bool(0.5);
        if pick_tip {
            output.push(tips.remove(0));
        } else {
            output.push(flavor.remove(0));
        }
    }

    output.extend(tips);
    output.extend(flavor);
    output
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
