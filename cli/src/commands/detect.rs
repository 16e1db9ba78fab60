use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use assay_common::{asset::AssetType, config::Config};
use assay_core::{detector::Detector, error::DetectError};
use colored::*;
use tracing::warn;

use crate::mprint;
use crate::terminal::{colors, format, print, spinner};

type Detection = Result<Vec<AssetType>, DetectError>;

pub fn detect(identifiers: Vec<String>, cfg: &Config) -> anyhow::Result<ExitCode> {
    let identifiers: Vec<String> = if identifiers.is_empty() {
        read_identifiers(io::stdin().lock())?
    } else {
        identifiers
    };

    if identifiers.is_empty() {
        print::no_results(cfg.quiet);
        return Ok(ExitCode::SUCCESS);
    }

    if cfg.no_dns {
        warn!("DNS disabled: hostnames are judged by shape and domain names are not detected");
    }

    let detector: Detector = Detector::from_config(cfg);
    let start_time: Instant = Instant::now();
    let results: Vec<Detection> = run_detection(&detector, &identifiers);

    detection_ends(&identifiers, &results, start_time.elapsed(), cfg);

    if results.iter().any(Result::is_err) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_detection(detector: &Detector, identifiers: &[String]) -> Vec<Detection> {
    let total: usize = identifiers.len();
    let span = spinner::detection_span(total);
    let _guard = span.enter();

    let on_progress = |done: usize| spinner::report_detection_progress(&span, done, total);
    detector.detect_all(identifiers, Some(&on_progress))
}

/// One identifier per line. Blank lines and `#` comments are skipped.
fn read_identifiers(reader: impl BufRead) -> anyhow::Result<Vec<String>> {
    if io::stdin().is_terminal() {
        warn!("Reading identifiers from stdin, one per line");
    }

    let mut identifiers: Vec<String> = Vec::new();
    for line in reader.lines() {
        let line: String = line.context("failed to read identifiers from stdin")?;
        let trimmed: &str = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        identifiers.push(trimmed.to_string());
    }
    Ok(identifiers)
}

fn detection_ends(identifiers: &[String], results: &[Detection], total_time: Duration, cfg: &Config) {
    for (idx, (identifier, result)) in identifiers.iter().zip(results).enumerate() {
        match cfg.quiet {
            2 => print_result_line(identifier, result),
            _ => {
                print_result_tree(idx, identifier, result);
                if idx + 1 != identifiers.len() {
                    mprint!();
                }
            }
        }
    }

    print_summary(results, total_time, cfg);
}

fn print_result_tree(idx: usize, identifier: &str, result: &Detection) {
    print::tree_head(idx, identifier);
    let details: Vec<format::Detail> = match result {
        Ok(asset_types) => format::asset_types_to_detail(asset_types),
        Err(e) => vec![format::error_to_detail(e)],
    };
    print::as_tree_one_level(details);
}

fn print_result_line(identifier: &str, result: &Detection) {
    match result {
        Ok(asset_types) => {
            mprint!(&format!("{identifier}\t{}", format::asset_types_to_string(asset_types)));
        }
        Err(e) => {
            mprint!(&format!("{identifier}\terror: {}", format::error_chain(e)));
        }
    }
}

fn print_summary(results: &[Detection], total_time: Duration, cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }

    let failed: usize = results.iter().filter(|result| result.is_err()).count();
    let classified: usize = results
        .iter()
        .filter(|result| result.as_ref().is_ok_and(|types| !types.is_empty()))
        .count();

    let classified: ColoredString = format!("{classified}/{} identifiers", results.len()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let mut output: String = format!("Detection Complete: {classified} classified in {total_time}");
    if failed > 0 {
        output.push_str(&format!(", {}", format!("{failed} failed").bold().red()));
    }
    let output: ColoredString = output.color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        _ => {
            mprint!();
            print::print_status(output.to_string());
        }
    }
}
