// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Terminal UI & Logging
//!
//! 1.  **Global Logging**: wires `tracing` so that `info!`, `warn!` and friends
//!     print to stderr above the progress line instead of through it.
//! 2.  **The Spinner**: a background animation that alternates between a live
//!     status ("Identified 6 hosts so far...") and a random tip.
//!
//! ## Cycle
//!
//! * **0s - 2s**: status
//! * **2s - 5s**: tip
//! * **Repeat**

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use colored::*;
use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::{IndicatifLayer, span_ext::IndicatifSpanExt};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use sweep_common::insights;

use crate::terminal::{colors, logging};

/// Total length of one text cycle (Status + Tip).
const CYCLE_MS: u128 = 5000;
/// How long the status message stays visible at the start of a cycle.
const STATUS_MS: u128 = 2000;

const TICKS: [&str; 8] = [
    "▁▁▁▁▁", "▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁",
];

/// Default filter: `-v` unlocks debug events of the sweep crates.
fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info,mio=error",
        _ => "info,sweep_core=debug,sweep_common=debug,sweep_protocols=debug,mio=error",
    }
}

/// Wires up the global tracing subscriber.
///
/// 1.  **Filter**: `RUST_LOG` if set, otherwise derived from `-v`.
/// 2.  **Formatter**: [`logging::SweepFormatter`].
/// 3.  **Indicatif**: keeps log lines above the spinner.
pub fn init_logging(verbosity: u8) {
    let style: ProgressStyle = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&TICKS);
    let indicatif_layer = IndicatifLayer::new().with_progress_style(style);

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let formatting_layer = tracing_subscriber::fmt::layer()
        .event_format(logging::SweepFormatter {
            max_verbosity: verbosity,
        })
        .with_writer(indicatif_layer.get_stderr_writer());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(formatting_layer)
        .with(indicatif_layer)
        .init();
}

async fn run_spinner_loop<F>(span: Span, running: Arc<AtomicBool>, status_fn: F)
where
    F: Fn() -> ColoredString + Send + Sync + 'static,
{
    let mut interval = tokio::time::interval(Duration::from_millis(100));
    let start_time = tokio::time::Instant::now();
    let mut last_text = String::new();

    let active_insights: Vec<&'static str> = insights::get_shuffled_insights();

    while running.load(Ordering::Relaxed) {
        interval.tick().await;

        let elapsed_ms = start_time.elapsed().as_millis();
        let cycle_time = elapsed_ms % CYCLE_MS;
        let tip_index = (elapsed_ms / CYCLE_MS) as usize % active_insights.len().max(1);

        let colored_msg: ColoredString = match active_insights.get(tip_index) {
            Some(tip) if cycle_time >= STATUS_MS => tip.italic().color(colors::TEXT_DEFAULT),
            _ => status_fn(),
        };

        let current_text = colored_msg.to_string();
        if current_text != last_text {
            span.pb_set_message(&current_text);
            last_text = current_text;
        }
    }
}

/// Keeps the spinner alive until dropped.
pub struct SpinnerGuard {
    running: Arc<AtomicBool>,
    handle: tokio::task::JoinHandle<()>,
}

impl SpinnerGuard {
    pub fn with_status<F>(span: Span, status_fn: F) -> Self
    where
        F: Fn() -> ColoredString + Send + Sync + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let run_clone = Arc::clone(&running);

        let handle = tokio::spawn(async move {
            run_spinner_loop(span, run_clone, status_fn).await;
        });

        Self { running, handle }
    }
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        self.handle.abort();
    }
}
