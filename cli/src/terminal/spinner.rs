use colored::*;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::colors;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS)
}

/// Span rendered as a spinner by the indicatif layer while it is entered.
pub fn detection_span(total: usize) -> Span {
    let span = info_span!("detection", indicatif.pb_show = true);
    span.pb_set_style(&spinner_style());
    span.pb_set_length(total as u64);
    report_detection_progress(&span, 0, total);
    span
}

pub fn report_detection_progress(span: &Span, done: usize, total: usize) {
    span.pb_set_position(done as u64);
    span.pb_set_message(
        &format!(
            "Classified {} so far...",
            format!("{done}/{total} identifiers").green().bold()
        )
        .color(colors::TEXT_DEFAULT)
        .to_string(),
    );
}
