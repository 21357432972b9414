// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use sweep_common::models::host::Host;
use sweep_common::models::result::ScanResult;

const TEMPLATE: &str = include_str!("../../templates/report.html");
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn render(result: &ScanResult) -> String {
    let rows: Vec<String> = result.hosts.iter().map(host_row).collect();

    TEMPLATE
        .replace("{{scan_time}}", &escape(&result.started_at.format(TIME_FORMAT).to_string()))
        .replace("{{host_count}}", &result.hosts.len().to_string())
        .replace("{{host_rows}}", &rows.join("\n"))
}

fn host_row(host: &Host) -> String {
    let ports: String = if host.open_ports().is_empty() {
        r#"<td class="none">none</td>"#.to_string()
    } else {
        let joined: Vec<String> = host.open_ports().iter().map(u16::to_string).collect();
        format!(r#"<td class="mono">{}</td>"#, escape(&joined.join(", ")))
    };

    format!(
        r#"            <tr><td class="mono">{}</td><td class="mono">{}</td><td>{}</td>{}</tr>"#,
        escape(&host.ip().to_string()),
        escape(&host.mac().to_string()),
        escape(host.os_hint().as_str()),
        ports
    )
}

pub fn escape(raw: &str) -> String {
    let mut out: String = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
