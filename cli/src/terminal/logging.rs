use std::fmt;

use colored::*;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::filter::{EnvFilter, filter_fn};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

/// Target of the events produced by [`super::print::print`].
pub const PRINT_TARGET: &str = "assay::print";

pub struct AssayFormatter;

impl<S, N> FormatEvent<S, N> for AssayFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut visitor = RawMessage::default();
            event.record(&mut visitor);
            return writeln!(writer, "{}", visitor.0);
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Pulls the `raw_msg` field out of a print event.
#[derive(Default)]
struct RawMessage(String);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "raw_msg" {
            self.0 = format!("{value:?}");
        }
    }
}

/// Printed output goes to stdout, diagnostics to stderr; both are routed
/// around the progress bars.
pub fn init_logging(verbose: bool) {
    let default_level: LevelFilter = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let mut env_filter: EnvFilter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    if let Ok(directive) = format!("{PRINT_TARGET}=off").parse() {
        env_filter = env_filter.add_directive(directive);
    }

    let indicatif_layer = IndicatifLayer::new();

    let print_layer = tracing_subscriber::fmt::layer()
        .event_format(AssayFormatter)
        .with_writer(indicatif_layer.get_stdout_writer())
        .with_filter(filter_fn(|meta| meta.target() == PRINT_TARGET));

    let log_layer = tracing_subscriber::fmt::layer()
        .event_format(AssayFormatter)
        .with_writer(indicatif_layer.get_stderr_writer())
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(print_layer)
        .with(log_layer)
        .with(indicatif_layer)
        .init();
}
